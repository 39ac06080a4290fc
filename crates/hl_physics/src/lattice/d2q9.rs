// crates/hl_physics/src/lattice/d2q9.rs

//! D2Q9 格子模型
//!
//! 二维正方格子上的九个速度方向：
//! ```text
//!   6   2   5
//!    \  |  /
//!   3 - 0 - 1
//!    /  |  \
//!   7   4   8
//! ```

use glam::IVec3;

use super::LatticeModel;

/// D2Q9 离散速度集（z = 0 嵌入三维）
const VELOCITIES: [IVec3; 9] = [
    IVec3::new(0, 0, 0),   // 0: 静止
    IVec3::new(1, 0, 0),   // 1: 东
    IVec3::new(0, 1, 0),   // 2: 北
    IVec3::new(-1, 0, 0),  // 3: 西
    IVec3::new(0, -1, 0),  // 4: 南
    IVec3::new(1, 1, 0),   // 5: 东北
    IVec3::new(-1, 1, 0),  // 6: 西北
    IVec3::new(-1, -1, 0), // 7: 西南
    IVec3::new(1, -1, 0),  // 8: 东南
];

/// D2Q9 权重
const WEIGHTS: [f64; 9] = [
    4.0 / 9.0, // 0: 静止
    1.0 / 9.0, // 1-4: 轴向
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0, // 5-8: 对角
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// 反方向索引表
const OPPOSITE: [usize; 9] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

/// 二维九速格子模型
#[derive(Debug, Clone, Copy, Default)]
pub struct D2Q9;

impl LatticeModel for D2Q9 {
    const D: usize = 2;
    const Q: usize = 9;

    fn name() -> &'static str {
        "D2Q9"
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
