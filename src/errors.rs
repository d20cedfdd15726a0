//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_capstone_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CapstoneError {
            $($variant(String),)*
        }

        impl CapstoneError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CapstoneError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CapstoneError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CapstoneError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CapstoneError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CapstoneError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_capstone_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Resource Conflict"),
    InvalidTransition("E007", "Invalid Status Transition"),
    DuplicateEvaluation("E008", "Duplicate Evaluation"),
    PreconditionFailed("E009", "Precondition Failed"),
    Serialization("E010", "Serialization Error"),
    DateParse("E011", "Date Parse Error"),
}

impl CapstoneError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 调用方可修正后重试的业务错误（不回滚以外的副作用）
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CapstoneError::Validation(_)
                | CapstoneError::NotFound(_)
                | CapstoneError::Conflict(_)
                | CapstoneError::InvalidTransition(_)
                | CapstoneError::DuplicateEvaluation(_)
                | CapstoneError::PreconditionFailed(_)
        )
    }
}

impl fmt::Display for CapstoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CapstoneError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CapstoneError {
    fn from(err: sea_orm::DbErr) -> Self {
        CapstoneError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CapstoneError {
    fn from(err: serde_json::Error) -> Self {
        CapstoneError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CapstoneError {
    fn from(err: chrono::ParseError) -> Self {
        CapstoneError::DateParse(err.to_string())
    }
}

impl From<crate::engine::lifecycle::InvalidTransition> for CapstoneError {
    fn from(err: crate::engine::lifecycle::InvalidTransition) -> Self {
        CapstoneError::InvalidTransition(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CapstoneError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::lifecycle::InvalidTransition;
    use crate::models::projects::entities::ProjectStatus;

    #[test]
    fn test_error_codes() {
        assert_eq!(CapstoneError::database_config("test").code(), "E001");
        assert_eq!(CapstoneError::validation("test").code(), "E004");
        assert_eq!(CapstoneError::invalid_transition("test").code(), "E007");
        assert_eq!(CapstoneError::duplicate_evaluation("test").code(), "E008");
        assert_eq!(CapstoneError::precondition_failed("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CapstoneError::duplicate_evaluation("test").error_type(),
            "Duplicate Evaluation"
        );
        assert_eq!(
            CapstoneError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = CapstoneError::validation("score exceeds maximum");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("score exceeds maximum"));
    }

    #[test]
    fn test_invalid_transition_conversion_keeps_both_states() {
        let err: CapstoneError = InvalidTransition {
            from: ProjectStatus::Rejected,
            to: ProjectStatus::Submitted,
        }
        .into();
        assert_eq!(err.code(), "E007");
        assert!(err.message().contains("rejected"));
        assert!(err.message().contains("submitted"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(CapstoneError::duplicate_evaluation("x").is_recoverable());
        assert!(!CapstoneError::database_operation("x").is_recoverable());
    }
}
