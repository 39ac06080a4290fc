// crates/hl_physics/src/lib.rs

//! 物理内核模块
//!
//! 提供 Lattice Boltzmann 求解器的节点级计算内核，包括：
//! - 格子模型定义 (lattice) - 离散速度集、权重、声速
//! - 节点单元 (cell) - 分布函数存储、矩计算、平衡分布、碰撞分发
//! - 碰撞算子 (collision) - 流体松弛与边界条件的可插拔更新规则
//! - 计算域 (domain) - 结构化网格、邻居查询、并行碰撞阶段
//!
//! # Trait 抽象
//!
//! - [`LatticeModel`]: 离散化描述（维数 D、方向数 Q、速度集、权重）
//! - [`CollisionOperator`]: 节点局部更新规则的统一接口
//!
//! # 并行模型
//!
//! 碰撞阶段逐节点独立：每个单元的更新只读写自身的分布函数，
//! 算子本身无每次调用的可变状态，因此 [`Domain::collide_all`]
//! 可以无锁并行。流动（streaming）阶段在上层实现，需要在碰撞
//! 与流动之间设置同步屏障。

pub mod cell;
pub mod collision;
pub mod domain;
pub mod lattice;

// 重导出常用类型
pub use cell::{Cell, Distributions};
pub use collision::{
    create_operator, BgkCollision, BounceBackWall, CollisionConfig, CollisionKind,
    CollisionOperator, CollisionTable, MovingWall, PressureOutlet, VelocityInlet,
};
pub use domain::Domain;
pub use lattice::{LatticeModel, D2Q9, D3Q19};
