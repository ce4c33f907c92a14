pub mod auth;
pub mod classes;
pub mod common;
pub mod questions;
pub mod subjects;
pub mod system;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

/// 程序启动时间，用于系统状态展示与启动耗时统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
