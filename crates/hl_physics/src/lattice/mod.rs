// crates/hl_physics/src/lattice/mod.rs

//! 格子模型定义
//!
//! 本模块定义离散化描述的统一接口与标准实例：
//! - [`LatticeModel`]: 格子模型 trait（维数、方向数、速度集、权重、声速）
//! - [`D2Q9`]: 二维九速模型
//! - [`D3Q19`]: 三维十九速模型
//!
//! # 设计思路
//!
//! 1. 速度集、权重与分布函数数组按方向索引对齐，索引 0 约定为静止方向
//! 2. 二维模型以 z = 0 嵌入三维，单元与计算域无需对维数做泛型
//! 3. 所有表均为 `'static` 常量，模型在模拟生命周期内只读

use glam::IVec3;

mod d2q9;
mod d3q19;

pub use d2q9::D2Q9;
pub use d3q19::D3Q19;

/// 格子模型 trait
///
/// 编译期固定的离散化描述。实现者提供 Q 个离散速度向量与
/// 索引对齐的权重表，权重之和为 1。
pub trait LatticeModel: Send + Sync + 'static {
    /// 空间维数
    const D: usize;

    /// 离散方向数
    const Q: usize;

    /// 格子声速平方 cs²
    const CS2: f64 = 1.0 / 3.0;

    /// 模型名称
    fn name() -> &'static str;

    /// 离散速度集（长度 Q，索引 0 为静止方向）
    ///
    /// 二维模型的 z 分量恒为 0。
    fn velocities() -> &'static [IVec3];

    /// 方向权重（长度 Q，与速度集索引对齐）
    fn weights() -> &'static [f64];

    /// q 方向的反方向索引
    ///
    /// 满足 `velocities()[opposite(q)] == -velocities()[q]`，
    /// 反弹边界依赖此映射。
    fn opposite(q: usize) -> usize;
}
