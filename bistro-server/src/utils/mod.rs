//! 工具模块 - 错误、日志、时间
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型
//! - [`logger`] - tracing 日志初始化
//! - [`time`] - 时间工具 (Unix millis + 本地日历)

pub mod error;
pub mod logger;
pub mod time;

pub use error::{AppError, AppResult};
