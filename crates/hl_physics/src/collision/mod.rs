// crates/hl_physics/src/collision/mod.rs

//! 碰撞算子
//!
//! 本模块定义节点局部更新规则的统一接口与配置层：
//! - [`CollisionOperator`]: 碰撞算子 trait
//! - [`CollisionKind`]: 算子类型枚举
//! - [`CollisionConfig`]: 算子配置（支持 serde）
//! - [`create_operator`]: 由配置创建算子的工厂函数
//! - [`CollisionTable`]: 具名算子注册表
//!
//! # 设计思路
//!
//! 1. 算子定义与节点分离：算子是无状态（或轻参数化）的规则对象，
//!    以 `Arc` 共享给任意多个节点，所有权由创建方（工厂、注册表）持有
//! 2. 算子只通过传入节点的矩接口读写该节点，不触碰其他节点，
//!    这一局部性约束是碰撞阶段无锁并行的前提
//! 3. 配置经 [`CollisionKind`] + [`CollisionConfig`] 描述，便于
//!    从配置文件批量布置算子

use std::collections::HashMap;
use std::sync::Arc;

use glam::{DVec3, UVec3};
use serde::{Deserialize, Serialize};

use hl_foundation::{HlError, HlResult};

use crate::cell::Cell;
use crate::lattice::LatticeModel;

mod bgk;
mod boundary;

pub use bgk::BgkCollision;
pub use boundary::{BounceBackWall, MovingWall, PressureOutlet, VelocityInlet};

// ============================================================
// 碰撞算子接口
// ============================================================

/// 碰撞算子 trait
///
/// 节点局部更新规则的统一接口：流体松弛与各类边界条件实现同一
/// 契约，在同一调用点互换。
///
/// # 局部性约束
///
/// `collide` 只允许读写传入的节点本身。遵守此约束的算子可以在
/// 一个时间步内对全域所有节点并发调用而无需加锁。
pub trait CollisionOperator<M: LatticeModel>: Send + Sync {
    /// 算子名称
    fn name(&self) -> &'static str;

    /// 是否表示流体节点
    ///
    /// 固定的能力标志：节点的流体/非流体模式完全由当前安装的
    /// 算子声明。
    fn is_fluid(&self) -> bool;

    /// 对传入节点执行一次碰撞更新
    ///
    /// # 参数
    /// - `cell`: 待更新的节点，经其矩接口读取密度、速度与平衡分布
    /// - `position`: 节点的格点坐标（位置相关的边界算子需要）
    fn collide(&self, cell: &mut Cell<M>, position: UVec3);
}

// ============================================================
// 算子类型枚举
// ============================================================

/// 算子类型枚举
///
/// 列举内核支持的碰撞算子类型，用于配置文件与工厂函数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum CollisionKind {
    /// BGK 单松弛流体碰撞
    #[default]
    Bgk = 0,

    /// 无滑移固壁（半步反弹）
    BounceBackWall = 1,

    /// 运动壁面（反弹加壁面动量项）
    MovingWall = 2,

    /// 给定速度入流
    VelocityInlet = 3,

    /// 给定密度出流
    PressureOutlet = 4,
}

impl CollisionKind {
    /// 是否表示流体节点
    #[inline]
    pub fn is_fluid(&self) -> bool {
        matches!(self, Self::Bgk)
    }

    /// 是否为边界算子
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.is_fluid()
    }

    /// 从 u8 值转换
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Bgk),
            1 => Some(Self::BounceBackWall),
            2 => Some(Self::MovingWall),
            3 => Some(Self::VelocityInlet),
            4 => Some(Self::PressureOutlet),
            _ => None,
        }
    }

    /// 转换为 u8 值
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bgk => "Bgk",
            Self::BounceBackWall => "BounceBackWall",
            Self::MovingWall => "MovingWall",
            Self::VelocityInlet => "VelocityInlet",
            Self::PressureOutlet => "PressureOutlet",
        };
        write!(f, "{}", name)
    }
}

// ============================================================
// 算子配置
// ============================================================

/// 算子配置
///
/// 完整描述一个碰撞算子的类型与参数，经 [`create_operator`]
/// 实例化。未用到的参数字段保持 `None`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionConfig {
    /// 算子类型
    pub kind: CollisionKind,

    /// 松弛时间 τ（BGK）
    #[serde(default)]
    pub tau: Option<f64>,

    /// 壁面/入流速度（格子单位）
    #[serde(default)]
    pub velocity: Option<DVec3>,

    /// 目标密度（入流参考密度 / 出流给定密度）
    #[serde(default)]
    pub density: Option<f64>,

    /// 壁面密度（运动壁面动量项）
    #[serde(default)]
    pub wall_density: Option<f64>,
}

impl CollisionConfig {
    /// BGK 流体算子配置
    pub fn bgk(tau: f64) -> Self {
        Self {
            kind: CollisionKind::Bgk,
            tau: Some(tau),
            velocity: None,
            density: None,
            wall_density: None,
        }
    }

    /// 无滑移固壁配置
    pub fn bounce_back() -> Self {
        Self {
            kind: CollisionKind::BounceBackWall,
            tau: None,
            velocity: None,
            density: None,
            wall_density: None,
        }
    }

    /// 运动壁面配置
    pub fn moving_wall(velocity: DVec3) -> Self {
        Self {
            kind: CollisionKind::MovingWall,
            tau: None,
            velocity: Some(velocity),
            density: None,
            wall_density: None,
        }
    }

    /// 给定速度入流配置
    pub fn velocity_inlet(velocity: DVec3) -> Self {
        Self {
            kind: CollisionKind::VelocityInlet,
            tau: None,
            velocity: Some(velocity),
            density: None,
            wall_density: None,
        }
    }

    /// 给定密度出流配置
    pub fn pressure_outlet(density: f64) -> Self {
        Self {
            kind: CollisionKind::PressureOutlet,
            tau: None,
            velocity: None,
            density: Some(density),
            wall_density: None,
        }
    }

    /// 设置目标密度
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    /// 设置壁面密度
    pub fn with_wall_density(mut self, wall_density: f64) -> Self {
        self.wall_density = Some(wall_density);
        self
    }
}

// ============================================================
// 工厂函数
// ============================================================

/// 由配置创建碰撞算子
///
/// 校验参数后返回可共享的算子句柄，所有权归调用方。
///
/// # 错误
/// 缺少必需参数或参数非法时返回 `InvalidConfiguration`。
pub fn create_operator<M: LatticeModel>(
    config: &CollisionConfig,
) -> HlResult<Arc<dyn CollisionOperator<M>>> {
    log::debug!("创建碰撞算子: {}", config.kind);

    match config.kind {
        CollisionKind::Bgk => {
            let tau = config
                .tau
                .ok_or_else(|| HlError::invalid_configuration("BGK 算子缺少松弛时间 tau"))?;
            Ok(Arc::new(BgkCollision::new(tau)?))
        }
        CollisionKind::BounceBackWall => Ok(Arc::new(BounceBackWall::new())),
        CollisionKind::MovingWall => {
            let velocity = config
                .velocity
                .ok_or_else(|| HlError::invalid_configuration("运动壁面算子缺少壁面速度"))?;
            check_velocity(velocity)?;
            let mut op = MovingWall::new(velocity);
            if let Some(wall_density) = config.wall_density {
                check_density(wall_density)?;
                op = op.with_wall_density(wall_density);
            }
            Ok(Arc::new(op))
        }
        CollisionKind::VelocityInlet => {
            let velocity = config
                .velocity
                .ok_or_else(|| HlError::invalid_configuration("入流算子缺少入流速度"))?;
            check_velocity(velocity)?;
            let mut op = VelocityInlet::new(velocity);
            if let Some(density) = config.density {
                check_density(density)?;
                op = op.with_density(density);
            }
            Ok(Arc::new(op))
        }
        CollisionKind::PressureOutlet => {
            let density = config
                .density
                .ok_or_else(|| HlError::invalid_configuration("出流算子缺少给定密度"))?;
            check_density(density)?;
            Ok(Arc::new(PressureOutlet::new(density)))
        }
    }
}

fn check_velocity(velocity: DVec3) -> HlResult<()> {
    if velocity.is_finite() {
        Ok(())
    } else {
        Err(HlError::invalid_configuration(format!(
            "速度必须为有限值, 实际为 {:?}",
            velocity
        )))
    }
}

fn check_density(density: f64) -> HlResult<()> {
    HlError::check_finite("密度", density)?;
    if density > 0.0 {
        Ok(())
    } else {
        Err(HlError::invalid_configuration(format!(
            "密度必须为正, 实际为 {}",
            density
        )))
    }
}

// ============================================================
// 算子注册表
// ============================================================

/// 具名算子注册表
///
/// 持有算子单例的外部所有者：节点只保留非拥有的共享句柄，
/// 注册表负责算子的生命周期。典型用法是在布置阶段按名称取出
/// 算子安装到节点上。
pub struct CollisionTable<M: LatticeModel> {
    operators: HashMap<String, Arc<dyn CollisionOperator<M>>>,
}

impl<M: LatticeModel> CollisionTable<M> {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            operators: HashMap::new(),
        }
    }

    /// 注册算子
    ///
    /// 同名算子被替换并返回旧句柄。
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        op: Arc<dyn CollisionOperator<M>>,
    ) -> Option<Arc<dyn CollisionOperator<M>>> {
        self.operators.insert(name.into(), op)
    }

    /// 由配置创建并注册算子
    pub fn register(&mut self, name: impl Into<String>, config: &CollisionConfig) -> HlResult<()> {
        let op = create_operator::<M>(config)?;
        self.insert(name, op);
        Ok(())
    }

    /// 按名称查找算子
    pub fn get(&self, name: &str) -> Option<&Arc<dyn CollisionOperator<M>>> {
        self.operators.get(name)
    }

    /// 是否包含指定名称
    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    /// 已注册算子数量
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl<M: LatticeModel> Default for CollisionTable<M> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::D2Q9;

    #[test]
    fn test_kind_properties() {
        assert!(CollisionKind::Bgk.is_fluid());
        assert!(!CollisionKind::Bgk.is_boundary());

        assert!(!CollisionKind::BounceBackWall.is_fluid());
        assert!(CollisionKind::MovingWall.is_boundary());
        assert!(CollisionKind::VelocityInlet.is_boundary());
        assert!(CollisionKind::PressureOutlet.is_boundary());
    }

    #[test]
    fn test_kind_conversion() {
        for i in 0..=4 {
            let kind = CollisionKind::from_u8(i).unwrap();
            assert_eq!(kind.as_u8(), i);
        }
        assert!(CollisionKind::from_u8(5).is_none());
    }

    #[test]
    fn test_config_builders() {
        let bgk = CollisionConfig::bgk(0.8);
        assert_eq!(bgk.kind, CollisionKind::Bgk);
        assert_eq!(bgk.tau, Some(0.8));

        let lid = CollisionConfig::moving_wall(DVec3::new(0.1, 0.0, 0.0)).with_wall_density(1.0);
        assert_eq!(lid.kind, CollisionKind::MovingWall);
        assert_eq!(lid.wall_density, Some(1.0));

        let outlet = CollisionConfig::pressure_outlet(1.0);
        assert_eq!(outlet.density, Some(1.0));
    }

    #[test]
    fn test_factory_creates_operators() {
        let op = create_operator::<D2Q9>(&CollisionConfig::bgk(0.8)).unwrap();
        assert!(op.is_fluid());
        assert_eq!(op.name(), "bgk");

        let op = create_operator::<D2Q9>(&CollisionConfig::bounce_back()).unwrap();
        assert!(!op.is_fluid());
    }

    #[test]
    fn test_factory_rejects_missing_params() {
        let mut config = CollisionConfig::bgk(0.8);
        config.tau = None;
        assert!(create_operator::<D2Q9>(&config).is_err());

        let mut config = CollisionConfig::moving_wall(DVec3::X);
        config.velocity = None;
        assert!(create_operator::<D2Q9>(&config).is_err());
    }

    #[test]
    fn test_factory_rejects_invalid_params() {
        assert!(create_operator::<D2Q9>(&CollisionConfig::bgk(0.5)).is_err());
        assert!(create_operator::<D2Q9>(&CollisionConfig::pressure_outlet(-1.0)).is_err());
        assert!(
            create_operator::<D2Q9>(&CollisionConfig::velocity_inlet(DVec3::new(
                f64::NAN,
                0.0,
                0.0
            )))
            .is_err()
        );
    }

    #[test]
    fn test_collision_table() {
        let mut table = CollisionTable::<D2Q9>::new();
        assert!(table.is_empty());

        table.register("fluid", &CollisionConfig::bgk(0.8)).unwrap();
        table
            .register("wall", &CollisionConfig::bounce_back())
            .unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.contains("fluid"));
        assert!(table.get("fluid").unwrap().is_fluid());
        assert!(!table.get("wall").unwrap().is_fluid());
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = CollisionConfig::moving_wall(DVec3::new(0.1, 0.0, 0.0));
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CollisionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, CollisionKind::MovingWall);
        assert_eq!(parsed.velocity, Some(DVec3::new(0.1, 0.0, 0.0)));
        assert_eq!(parsed.tau, None);
    }
}
