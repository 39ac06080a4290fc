// crates/hl_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `HlError` 枚举和 `HlResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **窄分类**: 内核的错误只有两类——索引越界与配置非法，
//!    均为局部前置条件违反，同步上报调用者，不重试、不吞没
//! 2. **易用性**: 提供便捷的构造方法和 `check_*` 辅助函数
//!
//! # 示例
//!
//! ```
//! use hl_foundation::error::{HlError, HlResult};
//!
//! fn build_cell(tau: f64) -> HlResult<()> {
//!     if tau <= 0.5 {
//!         return Err(HlError::invalid_configuration("松弛时间必须大于 0.5"));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// 统一结果类型
pub type HlResult<T> = Result<T, HlError>;

/// HydroLat 错误类型
///
/// 内核错误分类很窄：所有错误都是调用方违反局部前置条件，
/// 由被调用方立即同步返回，内部从不恢复。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HlError {
    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfRange {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    /// 无效配置
    #[error("无效配置: {message}")]
    InvalidConfiguration {
        /// 具体错误信息
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl HlError {
    /// 索引越界
    pub fn index_out_of_range(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            index_type,
            index,
            len,
        }
    }

    /// 无效配置
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl HlError {
    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> HlResult<()> {
        if index >= len {
            Err(Self::index_out_of_range(index_type, index, len))
        } else {
            Ok(())
        }
    }

    /// 检查值是否有限
    #[inline]
    pub fn check_finite(name: &'static str, value: f64) -> HlResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::invalid_configuration(format!(
                "{} 必须为有限值, 实际为 {}",
                name, value
            )))
        }
    }
}

/// 条件不满足时返回错误
///
/// # 示例
///
/// ```
/// use hl_foundation::{ensure, HlError, HlResult};
///
/// fn check(value: f64) -> HlResult<()> {
///     ensure!(value > 0.0, HlError::invalid_configuration("值必须为正"));
///     Ok(())
/// }
///
/// assert!(check(1.0).is_ok());
/// assert!(check(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

// ========================================================================
// 测试
// ========================================================================
