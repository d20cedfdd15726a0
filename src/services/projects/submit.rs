use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProjectService, can_access};
use crate::models::projects::requests::SubmitProjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_actor, error_response, forbidden};

pub async fn submit_project(
    service: &ProjectService,
    request: &HttpRequest,
    project_id: i64,
    submit_data: SubmitProjectRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_project_by_id(project_id).await {
        Ok(Some(project)) if can_access(&actor, &project) => {}
        Ok(Some(_)) => return Ok(forbidden("You can only submit your own project")),
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                "Project not found",
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    }

    match storage.submit_project(project_id, submit_data).await {
        Ok(receipt) => {
            let message = if receipt.is_late {
                "Project submitted after the deadline"
            } else {
                "Project submitted successfully"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(receipt, message)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
