use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::ApiResponse;
use crate::models::evaluations::requests::RecordEvaluationRequest;
use crate::services::{current_actor, error_response};

pub async fn record_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    project_id: i64,
    evaluation_data: RecordEvaluationRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage
        .record_evaluation(project_id, actor.id, evaluation_data)
        .await
    {
        Ok(evaluation) => Ok(HttpResponse::Created().json(ApiResponse::success(
            evaluation,
            "Evaluation recorded successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
