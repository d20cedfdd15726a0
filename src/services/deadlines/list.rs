use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DeadlineService;
use crate::models::projects::entities::ProjectLevel;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn list_deadlines(
    service: &DeadlineService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_deadlines().await {
        Ok(deadlines) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            deadlines,
            "Deadlines retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_deadline(
    service: &DeadlineService,
    request: &HttpRequest,
    level: ProjectLevel,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_deadline_by_level(level).await {
        Ok(Some(deadline)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            deadline,
            "Deadline retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DeadlineNotFound,
            format!("No deadline set for level {level}"),
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
