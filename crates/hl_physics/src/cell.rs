// crates/hl_physics/src/cell.rs

//! 节点单元
//!
//! 本模块定义格子节点的核心抽象 [`Cell`]：
//! - 持有一个节点的分布函数数组（长度 Q，与速度集索引对齐）
//! - 持有当前碰撞算子的共享句柄（所有权在外部，可随时替换）
//! - 提供矩计算（密度、速度）、平衡分布与碰撞分发
//!
//! # 设计思路
//!
//! 1. 碰撞算子通过节点自身的窄接口（`density`/`velocity`/`equilibrium`/
//!    索引访问）读写分布函数，算子实现与具体格子模型的权重布局解耦
//! 2. 算子句柄为 `Arc`，替换句柄即可在运行期重新分类节点
//!    （如流体 → 边界），不复制分布函数
//! 3. `collide` 只读写本节点，碰撞阶段可对全域无锁并行

use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use glam::{DVec3, UVec3};
use smallvec::SmallVec;

use hl_foundation::{HlError, HlResult};

use crate::collision::CollisionOperator;
use crate::domain::Domain;
use crate::lattice::LatticeModel;

/// 长度为 Q 的分布函数序列
///
/// 内联容量覆盖 D3Q19 及以下模型，节点级热路径上不触发堆分配。
pub type Distributions = SmallVec<[f64; 19]>;

/// 格子节点
///
/// 表示计算域中的一个离散节点：分布函数数组加当前安装的碰撞算子。
/// 分布函数数组长度恒为 `M::Q`，各分量在两次更新之间应为有限实数
/// （该性质由调用方维护，类型层不强制）。
pub struct Cell<M: LatticeModel> {
    pdf: Vec<f64>,
    collision: Arc<dyn CollisionOperator<M>>,
}

impl<M: LatticeModel> Cell<M> {
    /// 创建节点，分布函数零初始化
    ///
    /// # 参数
    /// - `collision`: 初始碰撞算子（常见为流体算子）
    pub fn new(collision: Arc<dyn CollisionOperator<M>>) -> Self {
        Self {
            pdf: vec![0.0; M::Q],
            collision,
        }
    }

    /// 以给定分布函数创建节点
    ///
    /// # 错误
    /// `pdf` 长度不等于 `M::Q` 时返回 `InvalidConfiguration`。
    pub fn with_pdf(collision: Arc<dyn CollisionOperator<M>>, pdf: Vec<f64>) -> HlResult<Self> {
        if pdf.len() != M::Q {
            return Err(HlError::invalid_configuration(format!(
                "分布函数长度 {} 与模型 {} 的方向数 {} 不符",
                pdf.len(),
                M::name(),
                M::Q
            )));
        }
        Ok(Self { pdf, collision })
    }

    /// q 方向的分布函数（带边界检查）
    ///
    /// # 错误
    /// `q >= Q` 时返回 `IndexOutOfRange`。
    #[inline]
    pub fn get(&self, q: usize) -> HlResult<f64> {
        HlError::check_index("pdf", q, M::Q)?;
        Ok(self.pdf[q])
    }

    /// q 方向的分布函数可变引用（带边界检查）
    ///
    /// # 错误
    /// `q >= Q` 时返回 `IndexOutOfRange`。
    #[inline]
    pub fn get_mut(&mut self, q: usize) -> HlResult<&mut f64> {
        HlError::check_index("pdf", q, M::Q)?;
        Ok(&mut self.pdf[q])
    }

    /// 分布函数切片（长度 Q）
    #[inline]
    pub fn pdf(&self) -> &[f64] {
        &self.pdf
    }

    /// 当前节点是否为流体节点
    ///
    /// 由当前安装的碰撞算子自报，纯查询，无副作用。
    #[inline]
    pub fn is_fluid(&self) -> bool {
        self.collision.is_fluid()
    }

    /// 零阶矩：密度
    ///
    /// 即所有方向分布函数之和（节点局部质量），调用时实时求和，
    /// 无缓存、无副作用。
    #[inline]
    pub fn density(&self) -> f64 {
        self.pdf.iter().sum()
    }

    /// 一阶矩除以密度：宏观速度
    ///
    /// `u_d = (1/ρ) Σ_q pdf[q] · c_q[d]`
    ///
    /// 密度与速度常一起使用，由调用方传入密度避免重复求和。
    /// `density == 0` 时结果为 NaN/Inf：退化节点（固体、不可达单元）
    /// 由碰撞算子负责规避或特判，本方法不做保护。
    pub fn velocity(&self, density: f64) -> DVec3 {
        let mut momentum = DVec3::ZERO;
        for (q, c) in M::velocities().iter().enumerate() {
            momentum += self.pdf[q] * c.as_dvec3();
        }
        momentum / density
    }

    /// 平衡分布
    ///
    /// 在给定宏观密度与速度下求离散 Maxwell-Boltzmann 平衡分布的
    /// 二阶展开：
    ///
    /// `eq_q = w_q · ρ · (1 + c_q·u/cs² + (c_q·u)²/(2cs⁴) - u·u/(2cs²))`
    ///
    /// 纯函数，无副作用。满足 Σ eq_q = ρ 与 Σ eq_q c_q = ρu
    /// （浮点容差内），这是松弛型碰撞算子趋向的数学不变量。
    pub fn equilibrium(&self, density: f64, velocity: DVec3) -> Distributions {
        let cs2 = M::CS2;
        let uu = velocity.length_squared();
        let weights = M::weights();

        let mut eq = Distributions::with_capacity(M::Q);
        for (q, c) in M::velocities().iter().enumerate() {
            let cu = c.as_dvec3().dot(velocity);
            eq.push(
                weights[q]
                    * density
                    * (1.0 + cu / cs2 + (cu * cu) / (2.0 * cs2 * cs2) - uu / (2.0 * cs2)),
            );
        }
        eq
    }

    /// 对本节点执行一次碰撞
    ///
    /// 将节点自身与其格点坐标交给当前算子，由算子经节点的矩接口
    /// 计算并就地写回新的分布函数。副作用仅限本节点的 `pdf`，
    /// 因此同一时间步内可对全域所有节点独立并发调用。
    ///
    /// # 参数
    /// - `position`: 本节点的格点坐标（位置相关的边界算子需要）
    pub fn collide(&mut self, position: UVec3) {
        let op = Arc::clone(&self.collision);
        op.collide(self, position);
    }

    /// 安装碰撞算子
    ///
    /// 用于在节点上施加边界条件或重新分类节点。不转移所有权，
    /// 不重置分布函数，替换即刻对 `is_fluid` 可见。
    pub fn set_collision_handler(&mut self, collision: Arc<dyn CollisionOperator<M>>) {
        self.collision = collision;
    }

    /// 当前安装的碰撞算子
    #[inline]
    pub fn collision_handler(&self) -> &Arc<dyn CollisionOperator<M>> {
        &self.collision
    }

    /// 邻域内是否存在流体节点
    ///
    /// 对每个离散方向 q 计算邻居坐标 `position + c_q`，只要存在
    /// 一个在界内且 `is_fluid()` 为真的邻居即返回 `true`。
    /// 用于布置边界条件时对节点做邻接分类，只读查询。
    ///
    /// 注意：静止方向（c = 0）指向节点自身，因此孤立的流体节点
    /// 也会经由自身判定为"邻域有流体"。该行为与遍历全部 Q 个
    /// 方向的定义一致，刻意保留并有测试固定。
    pub fn has_fluid_vicinity(&self, domain: &Domain<M>, position: UVec3) -> bool {
        for c in M::velocities() {
            let neighbor = position.as_ivec3() + *c;
            if domain.in_bounds(neighbor) && domain.cell(neighbor.as_uvec3()).is_fluid() {
                return true;
            }
        }
        false
    }
}

impl<M: LatticeModel> Index<usize> for Cell<M> {
    type Output = f64;

    #[inline]
    fn index(&self, q: usize) -> &f64 {
        match self.pdf.get(q) {
            Some(value) => value,
            None => panic!("索引越界: pdf 索引 {} 超出范围 0..{}", q, M::Q),
        }
    }
}

impl<M: LatticeModel> IndexMut<usize> for Cell<M> {
    #[inline]
    fn index_mut(&mut self, q: usize) -> &mut f64 {
        match self.pdf.get_mut(q) {
            Some(value) => value,
            None => panic!("索引越界: pdf 索引 {} 超出范围 0..{}", q, M::Q),
        }
    }
}

impl<M: LatticeModel> Clone for Cell<M> {
    fn clone(&self) -> Self {
        Self {
            pdf: self.pdf.clone(),
            collision: Arc::clone(&self.collision),
        }
    }
}

impl<M: LatticeModel> fmt::Debug for Cell<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("model", &M::name())
            .field("operator", &self.collision.name())
            .field("density", &self.density())
            .finish()
    }
}

// ============================================================
// 测试
// ============================================================
