// crates/hl_physics/tests/mass_conservation.rs

//! 碰撞阶段质量守恒验证测试
//!
//! 检验各碰撞算子在任意碰撞前状态下的守恒性质：
//! - BGK 逐节点保持密度与动量
//! - 反弹与运动壁面逐节点保持密度
//! - 混合布置下全域总质量逐步守恒

use std::sync::Arc;

use glam::{DVec3, UVec3};

use hl_physics::{
    BgkCollision, BounceBackWall, CollisionOperator, Domain, LatticeModel, MovingWall, D2Q9,
    D3Q19,
};

// ============================================================================
// 测试辅助函数
// ============================================================================

fn fluid_op<M: LatticeModel>() -> Arc<dyn CollisionOperator<M>> {
    Arc::new(BgkCollision::new(0.7).unwrap())
}

/// 以位置为种子生成偏离平衡的确定性分布
fn seed_domain<M: LatticeModel>(domain: &mut Domain<M>) {
    let positions: Vec<UVec3> = domain.positions().collect();
    for (position, cell) in positions.into_iter().zip(domain.cells_mut()) {
        let phase =
            (position.x as f64) * 0.7 + (position.y as f64) * 1.3 + (position.z as f64) * 2.1;
        for q in 0..M::Q {
            cell[q] = 0.05 + 0.01 * (phase + q as f64).sin().abs();
        }
    }
}

fn cell_momentum<M: LatticeModel>(cell: &hl_physics::Cell<M>) -> DVec3 {
    let mut p = DVec3::ZERO;
    for (q, c) in M::velocities().iter().enumerate() {
        p += cell.pdf()[q] * c.as_dvec3();
    }
    p
}

// ============================================================================
// 逐节点守恒
// ============================================================================

/// BGK 碰撞在任意碰撞前状态下保持每个节点的密度与动量
#[test]
fn bgk_preserves_cellwise_density_and_momentum() {
    let mut domain = Domain::<D3Q19>::new(UVec3::new(4, 4, 4), fluid_op()).unwrap();
    seed_domain(&mut domain);

    let before: Vec<(f64, DVec3)> = domain
        .cells()
        .map(|c| (c.density(), cell_momentum(c)))
        .collect();

    domain.collide_all();

    for (cell, (rho0, p0)) in domain.cells().zip(before) {
        assert!((cell.density() - rho0).abs() < 1e-13);
        assert!((cell_momentum(cell) - p0).length() < 1e-13);
    }
}

/// 反弹固壁保持每个节点的密度
#[test]
fn bounce_back_preserves_cellwise_density() {
    let wall: Arc<dyn CollisionOperator<D2Q9>> = Arc::new(BounceBackWall::new());
    let mut domain = Domain::<D2Q9>::new(UVec3::new(5, 5, 1), wall).unwrap();
    seed_domain(&mut domain);

    let before: Vec<f64> = domain.cells().map(|c| c.density()).collect();
    domain.collide_all();

    for (cell, rho0) in domain.cells().zip(before) {
        assert!((cell.density() - rho0).abs() < 1e-14);
    }
}

// ============================================================================
// 全域守恒
// ============================================================================

/// 流体内部、反弹边框与运动顶盖的混合布置下，总质量多步守恒
#[test]
fn mixed_domain_conserves_total_mass() {
    let mut domain = Domain::<D2Q9>::new(UVec3::new(8, 8, 1), fluid_op()).unwrap();
    let wall: Arc<dyn CollisionOperator<D2Q9>> = Arc::new(BounceBackWall::new());
    let lid: Arc<dyn CollisionOperator<D2Q9>> =
        Arc::new(MovingWall::new(DVec3::new(0.1, 0.0, 0.0)));

    for x in 0..8 {
        domain.set_operator(UVec3::new(x, 0, 0), Arc::clone(&wall)).unwrap();
        domain.set_operator(UVec3::new(x, 7, 0), Arc::clone(&lid)).unwrap();
    }
    for y in 1..7 {
        domain.set_operator(UVec3::new(0, y, 0), Arc::clone(&wall)).unwrap();
        domain.set_operator(UVec3::new(7, y, 0), Arc::clone(&wall)).unwrap();
    }

    seed_domain(&mut domain);
    let before = domain.total_mass();

    for _ in 0..25 {
        domain.collide_all();
    }

    assert!(
        (domain.total_mass() - before).abs() < 1e-10,
        "总质量漂移: {} -> {}",
        before,
        domain.total_mass()
    );
}

/// 三维全流体域的总质量多步守恒
#[test]
fn d3q19_fluid_domain_conserves_total_mass() {
    let mut domain = Domain::<D3Q19>::new(UVec3::new(4, 4, 4), fluid_op()).unwrap();
    seed_domain(&mut domain);

    let before = domain.total_mass();
    for _ in 0..10 {
        domain.collide_all();
    }
    assert!((domain.total_mass() - before).abs() < 1e-11);
}

/// 平衡态是 BGK 的不动点：均匀初始化后分布保持不变
#[test]
fn equilibrium_is_bgk_fixed_point() {
    let mut domain = Domain::<D2Q9>::new(UVec3::new(4, 4, 1), fluid_op()).unwrap();
    let u = DVec3::new(0.03, 0.01, 0.0);
    domain.init_equilibrium(1.0, u);

    let before: Vec<Vec<f64>> = domain.cells().map(|c| c.pdf().to_vec()).collect();
    domain.collide_all();

    for (cell, pdf0) in domain.cells().zip(before) {
        for q in 0..D2Q9::Q {
            assert!((cell.pdf()[q] - pdf0[q]).abs() < 1e-13);
        }
    }
}
