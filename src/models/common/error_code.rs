use crate::errors::CapstoneError;

/// 业务响应码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    ValidationFailed = 1005,
    InternalServerError = 1500,

    ProjectNotFound = 2000,
    ProjectAlreadyExists = 2001,
    ProjectHasEvaluations = 2002,
    InvalidStatusTransition = 2004,

    EvaluationNotFound = 3000,
    EvaluationAlreadyExists = 3001,
    EvaluationIncomplete = 3002,

    DeadlineNotFound = 4000,
}

impl From<&CapstoneError> for ErrorCode {
    fn from(err: &CapstoneError) -> Self {
        match err {
            CapstoneError::Validation(_) => ErrorCode::ValidationFailed,
            CapstoneError::NotFound(_) => ErrorCode::NotFound,
            CapstoneError::Conflict(_) => ErrorCode::ProjectAlreadyExists,
            CapstoneError::InvalidTransition(_) => ErrorCode::InvalidStatusTransition,
            CapstoneError::DuplicateEvaluation(_) => ErrorCode::EvaluationAlreadyExists,
            CapstoneError::PreconditionFailed(_) => ErrorCode::EvaluationIncomplete,
            _ => ErrorCode::InternalServerError,
        }
    }
}
