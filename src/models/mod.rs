//! 数据模型定义
//!
//! 业务实体、请求体与响应体。存储层在 `entity` 与这里的类型之间做一次转换，
//! 状态等枚举的字符串形式只在那一处出现。

pub mod actors;
pub mod common;
pub mod deadlines;
pub mod evaluations;
pub mod projects;

pub use common::error_code::ErrorCode;
pub use common::pagination::PaginationInfo;
pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
