use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DeadlineService;
use crate::models::ApiResponse;
use crate::models::deadlines::SetDeadlineRequest;
use crate::models::projects::entities::ProjectLevel;
use crate::services::error_response;

pub async fn set_deadline(
    service: &DeadlineService,
    request: &HttpRequest,
    level: ProjectLevel,
    deadline_data: SetDeadlineRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_deadline(level, deadline_data.deadline).await {
        Ok(deadline) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            deadline,
            "Deadline updated successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
