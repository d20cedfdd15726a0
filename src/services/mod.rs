pub mod deadlines;
pub mod evaluations;
pub mod projects;

pub use deadlines::DeadlineService;
pub use evaluations::EvaluationService;
pub use projects::ProjectService;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use tracing::error;

use crate::errors::CapstoneError;
use crate::middlewares::RequireIdentity;
use crate::models::{ApiResponse, ErrorCode, actors::Actor};

/// 业务错误对应的 HTTP 状态码
pub fn error_status(err: &CapstoneError) -> StatusCode {
    match err {
        CapstoneError::InvalidTransition(_)
        | CapstoneError::Conflict(_)
        | CapstoneError::DuplicateEvaluation(_) => StatusCode::CONFLICT,
        CapstoneError::Validation(_) => StatusCode::BAD_REQUEST,
        CapstoneError::PreconditionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CapstoneError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 由业务错误构造响应；非业务错误不向调用方暴露细节
pub(crate) fn error_response(err: &CapstoneError) -> HttpResponse {
    let status = error_status(err);
    if err.is_recoverable() {
        HttpResponse::build(status).json(ApiResponse::from_error(err))
    } else {
        error!("{}", err.format_simple());
        HttpResponse::build(status).json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            "Internal server error",
        ))
    }
}

/// 取出当前调用者，缺失时给出 401 响应
pub(crate) fn current_actor(request: &HttpRequest) -> Result<Actor, HttpResponse> {
    RequireIdentity::extract_actor(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing caller identity",
        ))
    })
}

pub(crate) fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&CapstoneError::invalid_transition("x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&CapstoneError::duplicate_evaluation("x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&CapstoneError::validation("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&CapstoneError::precondition_failed("x")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_status(&CapstoneError::not_found("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&CapstoneError::database_operation("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
