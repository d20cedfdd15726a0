use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProjectService;
use crate::errors::CapstoneError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn delete_project(
    service: &ProjectService,
    request: &HttpRequest,
    project_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_project(project_id).await {
        Ok(true) => {
            info!("Project {} deleted", project_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Project deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProjectNotFound,
            "Project not found",
        ))),
        Err(e @ CapstoneError::PreconditionFailed(_)) => Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(
                ErrorCode::ProjectHasEvaluations,
                e.message(),
            ))),
        Err(e) => Ok(error_response(&e)),
    }
}
