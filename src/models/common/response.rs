use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::CapstoneError;
use crate::models::ErrorCode;

/// 统一响应信封 `{code, message, data, timestamp}`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn build(code: ErrorCode, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data,
            timestamp: Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, Some(data), message)
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self::build(code, Some(data), message)
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, None, message)
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(code, None, message)
    }

    /// 由业务错误构造响应体，错误码与消息均取自错误本身
    pub fn from_error(err: &CapstoneError) -> Self {
        Self::error_empty(ErrorCode::from(err), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_uses_business_code() {
        let resp = ApiResponse::from_error(&CapstoneError::duplicate_evaluation("dup"));
        assert_eq!(resp.code, ErrorCode::EvaluationAlreadyExists as i32);
        assert_eq!(resp.message, "dup");
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_empty_data_is_omitted_from_json() {
        let json = serde_json::to_value(ApiResponse::success_empty("ok")).unwrap();
        assert_eq!(json["code"], 0);
        assert!(json.get("data").is_none());
        assert!(json.get("timestamp").is_some());
    }
}
