// crates/hl_physics/src/collision/boundary.rs

//! 边界碰撞算子
//!
//! 本模块提供以碰撞算子形式实现的边界条件：
//! - [`BounceBackWall`]: 无滑移固壁（半步反弹）
//! - [`MovingWall`]: 运动壁面（反弹加壁面动量项）
//! - [`VelocityInlet`]: 给定速度入流
//! - [`PressureOutlet`]: 给定密度出流
//!
//! 所有算子都遵守局部性约束：只读写传入的节点。需要壁面侧
//! 密度的地方使用配置的参考密度而非邻居节点的值。

use glam::{DVec3, UVec3};

use hl_foundation::float::MIN_DENSITY;

use super::CollisionOperator;
use crate::cell::Cell;
use crate::lattice::LatticeModel;

// ============================================================
// 无滑移固壁
// ============================================================

/// 无滑移固壁算子
///
/// 半步反弹：将每个方向的分布函数与其反方向交换。交换是对合
/// 操作且精确保持节点质量；流动阶段后，相邻流体节点会收到
/// 被反射的分布值。
#[derive(Debug, Clone, Copy, Default)]
pub struct BounceBackWall;

impl BounceBackWall {
    /// 创建无滑移固壁算子
    pub fn new() -> Self {
        Self
    }
}

impl<M: LatticeModel> CollisionOperator<M> for BounceBackWall {
    fn name(&self) -> &'static str {
        "bounce_back_wall"
    }

    fn is_fluid(&self) -> bool {
        false
    }

    fn collide(&self, cell: &mut Cell<M>, _position: UVec3) {
        for q in 0..M::Q {
            let opp = M::opposite(q);
            if q < opp {
                let tmp = cell[q];
                cell[q] = cell[opp];
                cell[opp] = tmp;
            }
        }
    }
}

// ============================================================
// 运动壁面
// ============================================================

/// 运动壁面算子
///
/// 在反弹之上叠加壁面动量项：
///
/// `pdf_q += 2 · w_q · ρ_w · (c_q · u_w) / cs²`
///
/// 动量项按方向求和恒为零，因此节点质量精确守恒，动量按
/// `2 ρ_w u_w` 注入。壁面密度 ρ_w 取配置值（默认为格子参考
/// 密度 1），不读取邻居节点。
#[derive(Debug, Clone, Copy)]
pub struct MovingWall {
    velocity: DVec3,
    wall_density: f64,
}

impl MovingWall {
    /// 创建运动壁面算子
    ///
    /// # 参数
    /// - `velocity`: 壁面速度（格子单位）
    pub fn new(velocity: DVec3) -> Self {
        Self {
            velocity,
            wall_density: 1.0,
        }
    }

    /// 设置壁面密度
    pub fn with_wall_density(mut self, wall_density: f64) -> Self {
        self.wall_density = wall_density;
        self
    }

    /// 壁面速度
    #[inline]
    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    /// 壁面密度
    #[inline]
    pub fn wall_density(&self) -> f64 {
        self.wall_density
    }
}

impl<M: LatticeModel> CollisionOperator<M> for MovingWall {
    fn name(&self) -> &'static str {
        "moving_wall"
    }

    fn is_fluid(&self) -> bool {
        false
    }

    fn collide(&self, cell: &mut Cell<M>, _position: UVec3) {
        // 先做无滑移反弹
        for q in 0..M::Q {
            let opp = M::opposite(q);
            if q < opp {
                let tmp = cell[q];
                cell[q] = cell[opp];
                cell[opp] = tmp;
            }
        }

        // 再按方向叠加壁面动量项
        let scale = 2.0 * self.wall_density / M::CS2;
        let weights = M::weights();
        for (q, c) in M::velocities().iter().enumerate() {
            cell[q] += scale * weights[q] * c.as_dvec3().dot(self.velocity);
        }
    }
}

// ============================================================
// 给定速度入流
// ============================================================

/// 给定速度入流算子
///
/// 将节点分布函数整体置为给定参考密度与入流速度下的平衡分布。
/// 入流节点因此携带精确的给定宏观量。
#[derive(Debug, Clone, Copy)]
pub struct VelocityInlet {
    velocity: DVec3,
    density: f64,
}

impl VelocityInlet {
    /// 创建入流算子
    ///
    /// 参考密度默认为 1（格子单位）。
    pub fn new(velocity: DVec3) -> Self {
        Self {
            velocity,
            density: 1.0,
        }
    }

    /// 设置参考密度
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// 入流速度
    #[inline]
    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }
}

impl<M: LatticeModel> CollisionOperator<M> for VelocityInlet {
    fn name(&self) -> &'static str {
        "velocity_inlet"
    }

    fn is_fluid(&self) -> bool {
        false
    }

    fn collide(&self, cell: &mut Cell<M>, _position: UVec3) {
        let eq = cell.equilibrium(self.density, self.velocity);
        for q in 0..M::Q {
            cell[q] = eq[q];
        }
    }
}

// ============================================================
// 给定密度出流
// ============================================================

/// 给定密度出流算子
///
/// 以节点自身速度与给定目标密度重建平衡分布。节点密度被钳制
/// 到目标值而速度随流场演化。自身密度低于 [`MIN_DENSITY`] 的
/// 退化节点按静止处理，避免零密度除法。
#[derive(Debug, Clone, Copy)]
pub struct PressureOutlet {
    density: f64,
}

impl PressureOutlet {
    /// 创建出流算子
    ///
    /// # 参数
    /// - `density`: 出流处给定密度（格子单位）
    pub fn new(density: f64) -> Self {
        Self { density }
    }

    /// 给定密度
    #[inline]
    pub fn density(&self) -> f64 {
        self.density
    }
}

impl<M: LatticeModel> CollisionOperator<M> for PressureOutlet {
    fn name(&self) -> &'static str {
        "pressure_outlet"
    }

    fn is_fluid(&self) -> bool {
        false
    }

    fn collide(&self, cell: &mut Cell<M>, _position: UVec3) {
        let rho = cell.density();
        let velocity = if rho.abs() < MIN_DENSITY {
            DVec3::ZERO
        } else {
            cell.velocity(rho)
        };

        let eq = cell.equilibrium(self.density, velocity);
        for q in 0..M::Q {
            cell[q] = eq[q];
        }
    }
}

// ============================================================
// 测试
// ============================================================
