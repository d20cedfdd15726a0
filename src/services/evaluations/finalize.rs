use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::ApiResponse;
use crate::services::error_response;

pub async fn finalize_combined_grade(
    service: &EvaluationService,
    request: &HttpRequest,
    project_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.finalize_combined_grade(project_id).await {
        Ok(grade) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grade,
            "Combined grade finalized successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
