use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProjectService, can_access};
use crate::models::projects::responses::ProjectDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_actor, error_response, forbidden};

pub async fn get_project(
    service: &ProjectService,
    request: &HttpRequest,
    project_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = match current_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let project = match storage.get_project_by_id(project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                "Project not found",
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    if !can_access(&actor, &project) {
        return Ok(forbidden("You can only view your own project"));
    }

    let evaluations = match storage.list_project_evaluations(project_id).await {
        Ok(summary) => summary
            .project_evaluation
            .into_iter()
            .chain(summary.presentation_evaluation)
            .collect(),
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ProjectDetailResponse {
            project,
            evaluations,
        },
        "Project retrieved successfully",
    )))
}
