// crates/hl_foundation/src/lib.rs

//! HydroLat Foundation Layer
//!
//! 零重量基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`float`]: 数值常量与浮点比较工具
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 thiserror
//! 2. **错误即前置条件**: 所有错误都是局部前置条件违反，同步上报调用者
//! 3. **零开销抽象**: release 模式下最小化运行时开销
//!
//! # 示例
//!
//! ```
//! use hl_foundation::{HlError, HlResult};
//!
//! fn check_direction(q: usize, num_directions: usize) -> HlResult<()> {
//!     HlError::check_index("pdf", q, num_directions)
//! }
//!
//! assert!(check_direction(8, 9).is_ok());
//! assert!(check_direction(9, 9).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;

// 重导出常用类型
pub use error::{HlError, HlResult};
pub use float::{approx_eq, safe_div, DEFAULT_EPSILON, MIN_DENSITY, WEIGHT_SUM_TOL};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::ensure;
    pub use crate::error::{HlError, HlResult};
    pub use crate::float::{approx_eq, safe_div, DEFAULT_EPSILON, MIN_DENSITY};
}
