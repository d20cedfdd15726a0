use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProjectService;
use crate::models::ApiResponse;
use crate::models::projects::requests::{RejectProjectRequest, TransitionProjectRequest};
use crate::services::error_response;

pub async fn approve_project(
    service: &ProjectService,
    request: &HttpRequest,
    project_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.approve_project(project_id).await {
        Ok(project) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            project,
            "Project approved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn reject_project(
    service: &ProjectService,
    request: &HttpRequest,
    project_id: i64,
    reject_data: RejectProjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.reject_project(project_id, reject_data.reason).await {
        Ok(project) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            project,
            "Project rejected successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn transition_project(
    service: &ProjectService,
    request: &HttpRequest,
    project_id: i64,
    transition_data: TransitionProjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .transition_project(project_id, transition_data.status)
        .await
    {
        Ok(project) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            project,
            "Project status updated successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
