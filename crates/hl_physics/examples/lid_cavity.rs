// crates/hl_physics/examples/lid_cavity.rs

//! 顶盖驱动方腔流演示
//!
//! D2Q9 模型：内部 BGK 流体，三面无滑移固壁，顶盖为运动壁面。
//! 碰撞阶段由内核提供；流动（streaming）属于时间步编排层，
//! 这里在示例内用最朴素的拉取格式实现。

use std::sync::Arc;

use glam::{DVec3, UVec3};

use hl_foundation::HlResult;
use hl_physics::{BgkCollision, BounceBackWall, Domain, LatticeModel, MovingWall, D2Q9};

const N: u32 = 32;
const STEPS: usize = 500;
const LID_SPEED: f64 = 0.1;
const VISCOSITY: f64 = 0.05;

/// 朴素拉取式流动：每个节点沿各方向从上游邻居取分布值
fn stream(domain: &mut Domain<D2Q9>) {
    let dims = domain.dims();
    let old: Vec<Vec<f64>> = domain.cells().map(|c| c.pdf().to_vec()).collect();

    for y in 0..dims.y {
        for x in 0..dims.x {
            let position = UVec3::new(x, y, 0);
            for (q, c) in D2Q9::velocities().iter().enumerate() {
                let src = position.as_ivec3() - *c;
                if domain.in_bounds(src) {
                    let src_index = (src.x as u32 + dims.x * src.y as u32) as usize;
                    domain.cell_mut(position)[q] = old[src_index][q];
                }
            }
        }
    }
}

fn main() -> HlResult<()> {
    let fluid = Arc::new(BgkCollision::from_viscosity::<D2Q9>(VISCOSITY)?);
    let wall = Arc::new(BounceBackWall::new());
    let lid = Arc::new(MovingWall::new(DVec3::new(LID_SPEED, 0.0, 0.0)));

    let mut domain = Domain::<D2Q9>::new(UVec3::new(N, N, 1), fluid)?;

    // 布置：底边与侧边固壁，顶边运动壁面
    for x in 0..N {
        domain.set_operator(UVec3::new(x, 0, 0), wall.clone())?;
        domain.set_operator(UVec3::new(x, N - 1, 0), lid.clone())?;
    }
    for y in 1..N - 1 {
        domain.set_operator(UVec3::new(0, y, 0), wall.clone())?;
        domain.set_operator(UVec3::new(N - 1, y, 0), wall.clone())?;
    }

    domain.init_equilibrium(1.0, DVec3::ZERO);

    println!(
        "顶盖驱动方腔: {}x{}, τ = {:.3}, 流体节点 {}/{}",
        N,
        N,
        VISCOSITY / D2Q9::CS2 + 0.5,
        domain.fluid_cell_count(),
        domain.len()
    );

    let mass0 = domain.total_mass();
    for step in 1..=STEPS {
        domain.collide_all();
        stream(&mut domain);

        if step % 100 == 0 {
            // 腔体中心速度作为收敛观察量
            let center = UVec3::new(N / 2, N / 2, 0);
            let cell = domain.cell(center);
            let u = cell.velocity(cell.density());
            println!(
                "step {:4}: 中心速度 = ({:+.5}, {:+.5}), 总质量偏差 = {:+.2e}",
                step,
                u.x,
                u.y,
                domain.total_mass() - mass0
            );
        }
    }

    // 中轴线水平速度剖面（自底向顶应单调趋向顶盖速度）
    println!("中轴线 u_x 剖面:");
    for y in (0..N).step_by(4) {
        let cell = domain.cell(UVec3::new(N / 2, y, 0));
        let u = cell.velocity(cell.density());
        println!("  y = {:2}: u_x = {:+.5}", y, u.x);
    }

    Ok(())
}
