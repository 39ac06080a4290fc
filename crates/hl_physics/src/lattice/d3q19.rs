// crates/hl_physics/src/lattice/d3q19.rs

//! D3Q19 格子模型
//!
//! 三维立方格子上的十九个速度方向：
//! - 1 个静止方向
//! - 6 个面心方向（±x, ±y, ±z）
//! - 12 个棱心方向（±x±y, ±x±z, ±y±z）

use glam::IVec3;

use super::LatticeModel;

/// D3Q19 离散速度集
const VELOCITIES: [IVec3; 19] = [
    IVec3::new(0, 0, 0), // 0: 静止
    IVec3::new(1, 0, 0), // 1-6: 面心
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
    IVec3::new(1, 1, 0), // 7-18: 棱心
    IVec3::new(-1, -1, 0),
    IVec3::new(1, -1, 0),
    IVec3::new(-1, 1, 0),
    IVec3::new(1, 0, 1),
    IVec3::new(-1, 0, -1),
    IVec3::new(1, 0, -1),
    IVec3::new(-1, 0, 1),
    IVec3::new(0, 1, 1),
    IVec3::new(0, -1, -1),
    IVec3::new(0, 1, -1),
    IVec3::new(0, -1, 1),
];

/// D3Q19 权重
const WEIGHTS: [f64; 19] = [
    1.0 / 3.0,  // 0: 静止
    1.0 / 18.0, // 1-6: 面心
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 18.0,
    1.0 / 36.0, // 7-18: 棱心
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// 反方向索引表
const OPPOSITE: [usize; 19] = [
    0, 2, 1, 4, 3, 6, 5, 8, 7, 10, 9, 12, 11, 14, 13, 16, 15, 18, 17,
];

/// 三维十九速格子模型
#[derive(Debug, Clone, Copy, Default)]
pub struct D3Q19;

impl LatticeModel for D3Q19 {
    const D: usize = 3;
    const Q: usize = 19;

    fn name() -> &'static str {
        "D3Q19"
    }

    #[inline]
    fn velocities() -> &'static [IVec3] {
        &VELOCITIES
    }

    #[inline]
    fn weights() -> &'static [f64] {
        &WEIGHTS
    }

    #[inline]
    fn opposite(q: usize) -> usize {
        OPPOSITE[q]
    }
}
