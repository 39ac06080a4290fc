// crates/hl_physics/src/domain.rs

//! 计算域
//!
//! 本模块提供节点的结构化网格容器 [`Domain`]：
//! - 按三维格点坐标索引节点（x 主序），二维模型取 nz = 1
//! - 提供边界检查与邻居查找，供邻接分类查询使用
//! - 提供并行碰撞阶段 [`Domain::collide_all`]
//!
//! # 并行模型
//!
//! 碰撞阶段逐节点独立（每个节点只读写自身），因此用 rayon 对
//! 全部节点并行即可，无需加锁。流动阶段在上层实现，与碰撞阶段
//! 之间需要同步屏障。

use std::sync::Arc;

use glam::{DVec3, IVec3, UVec3};
use rayon::prelude::*;

use hl_foundation::{ensure, HlError, HlResult};

use crate::cell::Cell;
use crate::collision::CollisionOperator;
use crate::lattice::LatticeModel;

/// 由线性索引还原格点坐标（x 主序）
#[inline]
fn position_from_index(index: usize, dims: UVec3) -> UVec3 {
    let nx = dims.x as usize;
    let ny = dims.y as usize;
    UVec3::new(
        (index % nx) as u32,
        ((index / nx) % ny) as u32,
        (index / (nx * ny)) as u32,
    )
}

/// 结构化计算域
///
/// 持有网格上全部节点。节点在创建时统一安装给定的初始算子，
/// 布置阶段再经 [`Domain::set_operator`] 对边界节点重新分类。
pub struct Domain<M: LatticeModel> {
    dims: UVec3,
    cells: Vec<Cell<M>>,
}

impl<M: LatticeModel> Domain<M> {
    /// 创建计算域，所有节点安装同一初始算子
    ///
    /// # 参数
    /// - `dims`: 各方向节点数（二维模型要求 `dims.z == 1`）
    /// - `initial`: 初始碰撞算子（常见为流体算子）
    ///
    /// # 错误
    /// 任一维度为零，或二维模型下 `dims.z != 1` 时返回
    /// `InvalidConfiguration`。
    pub fn new(dims: UVec3, initial: Arc<dyn CollisionOperator<M>>) -> HlResult<Self> {
        ensure!(
            dims.x > 0 && dims.y > 0 && dims.z > 0,
            HlError::invalid_configuration(format!("计算域尺寸必须为正, 实际为 {:?}", dims))
        );
        ensure!(
            M::D == 3 || dims.z == 1,
            HlError::invalid_configuration(format!(
                "二维模型 {} 要求 nz = 1, 实际为 {}",
                M::name(),
                dims.z
            ))
        );

        let len = (dims.x * dims.y * dims.z) as usize;
        let cells = (0..len).map(|_| Cell::new(Arc::clone(&initial))).collect();

        log::debug!("创建计算域: {} 模型, 尺寸 {:?}", M::name(), dims);
        Ok(Self { dims, cells })
    }

    /// 各方向节点数
    #[inline]
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// 节点总数
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// 计算域是否为空（尺寸校验后恒为否，保留以配合 `len`）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 坐标是否在界内
    ///
    /// 接受带符号坐标以便直接检验 `position + c_q` 形式的邻居。
    #[inline]
    pub fn in_bounds(&self, position: IVec3) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.z >= 0
            && (position.x as u32) < self.dims.x
            && (position.y as u32) < self.dims.y
            && (position.z as u32) < self.dims.z
    }

    /// 格点坐标到线性索引（x 主序）
    #[inline]
    fn index(&self, position: UVec3) -> usize {
        (position.x + self.dims.x * (position.y + self.dims.y * position.z)) as usize
    }

    /// 校验坐标并返回线性索引
    fn checked_index(&self, position: UVec3) -> HlResult<usize> {
        HlError::check_index("cell.x", position.x as usize, self.dims.x as usize)?;
        HlError::check_index("cell.y", position.y as usize, self.dims.y as usize)?;
        HlError::check_index("cell.z", position.z as usize, self.dims.z as usize)?;
        Ok(self.index(position))
    }

    /// 按坐标访问节点
    ///
    /// 越界时 panic；需要可恢复错误时用 [`Domain::try_cell`]。
    #[inline]
    pub fn cell(&self, position: UVec3) -> &Cell<M> {
        match self.checked_index(position) {
            Ok(index) => &self.cells[index],
            Err(err) => panic!("{}", err),
        }
    }

    /// 按坐标访问节点（可变）
    #[inline]
    pub fn cell_mut(&mut self, position: UVec3) -> &mut Cell<M> {
        match self.checked_index(position) {
            Ok(index) => &mut self.cells[index],
            Err(err) => panic!("{}", err),
        }
    }

    /// 按坐标访问节点（带边界检查）
    pub fn try_cell(&self, position: UVec3) -> HlResult<&Cell<M>> {
        let index = self.checked_index(position)?;
        Ok(&self.cells[index])
    }

    /// 按坐标访问节点（可变，带边界检查）
    pub fn try_cell_mut(&mut self, position: UVec3) -> HlResult<&mut Cell<M>> {
        let index = self.checked_index(position)?;
        Ok(&mut self.cells[index])
    }

    /// 在指定节点上安装算子
    ///
    /// 布置阶段使用：对节点施加边界条件或重新分类。
    pub fn set_operator(
        &mut self,
        position: UVec3,
        op: Arc<dyn CollisionOperator<M>>,
    ) -> HlResult<()> {
        self.try_cell_mut(position)?.set_collision_handler(op);
        Ok(())
    }

    /// 以统一宏观量初始化全域分布函数
    ///
    /// 每个节点的分布函数置为给定密度与速度下的平衡分布，
    /// 是模拟启动的常见初始条件。
    pub fn init_equilibrium(&mut self, density: f64, velocity: DVec3) {
        for cell in &mut self.cells {
            let eq = cell.equilibrium(density, velocity);
            for q in 0..M::Q {
                cell[q] = eq[q];
            }
        }
    }

    /// 对全域执行一次并行碰撞阶段
    ///
    /// 每个节点的更新只读写自身，节点间无共享可变状态，
    /// 因此直接数据并行。与后续流动阶段之间的同步屏障由调用方
    /// （时间步编排层）负责。
    pub fn collide_all(&mut self) {
        let dims = self.dims;
        self.cells
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, cell)| {
                cell.collide(position_from_index(index, dims));
            });
    }

    /// 流体节点数量
    ///
    /// 布置与诊断用统计量。
    pub fn fluid_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_fluid()).count()
    }

    /// 全域总质量
    pub fn total_mass(&self) -> f64 {
        self.cells.iter().map(|c| c.density()).sum()
    }

    /// 节点迭代器（按线性索引序）
    pub fn cells(&self) -> impl Iterator<Item = &Cell<M>> {
        self.cells.iter()
    }

    /// 节点迭代器（可变，按线性索引序）
    ///
    /// 初始化与布置阶段使用，与 [`Domain::positions`] 按序配对。
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell<M>> {
        self.cells.iter_mut()
    }

    /// 全部格点坐标迭代器（按线性索引序）
    ///
    /// 返回的迭代器不持有对计算域的借用，可与 [`Domain::cells_mut`]
    /// 配对遍历。
    pub fn positions(&self) -> impl Iterator<Item = UVec3> {
        let dims = self.dims;
        (0..self.cells.len()).map(move |index| position_from_index(index, dims))
    }

    /// 节点与坐标迭代器
    pub fn cells_with_positions(&self) -> impl Iterator<Item = (UVec3, &Cell<M>)> {
        self.positions().zip(self.cells.iter())
    }
}

// ============================================================
// 测试
// ============================================================
