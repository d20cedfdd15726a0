use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::ApiResponse;
use crate::models::evaluations::requests::ReviseEvaluationRequest;
use crate::services::error_response;

pub async fn revise_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
    revision: ReviseEvaluationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.revise_evaluation(evaluation_id, revision).await {
        Ok(evaluation) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluation,
            "Evaluation revised successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
