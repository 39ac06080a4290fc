// crates/hl_physics/src/collision/bgk.rs

//! BGK 单松弛碰撞算子
//!
//! 以单一松弛时间 τ 将分布函数向局部平衡分布弛豫：
//!
//! `pdf_q += (eq_q - pdf_q) / τ`
//!
//! 平衡分布由节点自身的密度与速度求得，因此该更新精确保持
//! 节点的质量与动量。

use glam::UVec3;

use hl_foundation::{ensure, HlError, HlResult};

use super::CollisionOperator;
use crate::cell::Cell;
use crate::lattice::LatticeModel;

/// 稳定性告警阈值：τ 过于接近 0.5 时粘性趋零，计算易失稳
const TAU_WARN_THRESHOLD: f64 = 0.55;

/// BGK 单松弛流体碰撞算子
#[derive(Debug, Clone, Copy)]
pub struct BgkCollision {
    tau: f64,
}

impl BgkCollision {
    /// 创建 BGK 算子
    ///
    /// # 参数
    /// - `tau`: 松弛时间（格子单位），必须大于 0.5
    ///
    /// # 错误
    /// `tau` 非有限或不大于 0.5 时返回 `InvalidConfiguration`。
    pub fn new(tau: f64) -> HlResult<Self> {
        HlError::check_finite("tau", tau)?;
        ensure!(
            tau > 0.5,
            HlError::invalid_configuration(format!("松弛时间必须大于 0.5, 实际为 {}", tau))
        );

        if tau < TAU_WARN_THRESHOLD {
            log::warn!("松弛时间 τ = {:.4} 接近稳定极限 0.5", tau);
        }
        Ok(Self { tau })
    }

    /// 由运动粘性系数创建 BGK 算子
    ///
    /// `τ = ν / cs² + 1/2`（格子单位）。
    pub fn from_viscosity<M: LatticeModel>(nu: f64) -> HlResult<Self> {
        HlError::check_finite("nu", nu)?;
        Self::new(nu / M::CS2 + 0.5)
    }

    /// 松弛时间
    #[inline]
    pub fn tau(&self) -> f64 {
        self.tau
    }
}

impl<M: LatticeModel> CollisionOperator<M> for BgkCollision {
    fn name(&self) -> &'static str {
        "bgk"
    }

    fn is_fluid(&self) -> bool {
        true
    }

    fn collide(&self, cell: &mut Cell<M>, _position: UVec3) {
        let density = cell.density();
        let velocity = cell.velocity(density);
        let eq = cell.equilibrium(density, velocity);

        for q in 0..M::Q {
            cell[q] += (eq[q] - cell[q]) / self.tau;
        }
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{D2Q9, D3Q19};
    use std::sync::Arc;

    fn seeded_cell<M: LatticeModel>(tau: f64) -> Cell<M> {
        let op: Arc<dyn CollisionOperator<M>> = Arc::new(BgkCollision::new(tau).unwrap());
        let pdf = (0..M::Q)
            .map(|q| 0.04 + 0.01 * ((q as f64) * 0.9).cos().abs())
            .collect();
        Cell::with_pdf(op, pdf).unwrap()
    }

    #[test]
    fn test_tau_validation() {
        assert!(BgkCollision::new(0.8).is_ok());
        assert!(BgkCollision::new(0.5).is_err());
        assert!(BgkCollision::new(0.3).is_err());
        assert!(BgkCollision::new(f64::NAN).is_err());
    }

    #[test]
    fn test_from_viscosity() {
        // ν = 0.1, cs² = 1/3 → τ = 0.8
        let op = BgkCollision::from_viscosity::<D2Q9>(0.1).unwrap();
        assert!((op.tau() - 0.8).abs() < 1e-14);

        // 零粘性落在稳定极限上
        assert!(BgkCollision::from_viscosity::<D2Q9>(0.0).is_err());
    }

    #[test]
    fn test_collide_conserves_mass_and_momentum() {
        fn check<M: LatticeModel>() {
            let mut cell = seeded_cell::<M>(0.8);
            let rho_before = cell.density();
            let momentum_before = cell.velocity(rho_before) * rho_before;

            cell.collide(UVec3::ZERO);

            let rho_after = cell.density();
            let momentum_after = cell.velocity(rho_after) * rho_after;

            assert!((rho_after - rho_before).abs() < 1e-12);
            assert!((momentum_after - momentum_before).length() < 1e-12);
        }

        check::<D2Q9>();
        check::<D3Q19>();
    }

    #[test]
    fn test_tau_one_reaches_equilibrium() {
        // τ = 1 时一步完全弛豫到平衡分布
        let mut cell = seeded_cell::<D2Q9>(1.0);
        let rho = cell.density();
        let u = cell.velocity(rho);
        let eq = cell.equilibrium(rho, u);

        cell.collide(UVec3::ZERO);

        for q in 0..D2Q9::Q {
            assert!((cell[q] - eq[q]).abs() < 1e-14);
        }
    }

    #[test]
    fn test_is_fluid() {
        let op = BgkCollision::new(0.8).unwrap();
        assert!(CollisionOperator::<D2Q9>::is_fluid(&op));
        assert_eq!(CollisionOperator::<D2Q9>::name(&op), "bgk");
    }

    #[test]
    fn test_repeated_collisions_stay_finite() {
        let mut cell = seeded_cell::<D3Q19>(0.6);
        for step in 0..100 {
            cell.collide(UVec3::new(0, 0, step));
        }
        assert!(cell.pdf().iter().all(|f| f.is_finite()));
    }
}
