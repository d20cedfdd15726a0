use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::projects::can_access;
use crate::services::{current_actor, error_response, forbidden};

pub async fn list_project_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
    project_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = match current_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    // 学生只能查看自己项目的评分
    if !actor.is_admin() {
        match storage.get_project_by_id(project_id).await {
            Ok(Some(project)) if can_access(&actor, &project) => {}
            Ok(Some(_)) => return Ok(forbidden("You can only view your own evaluations")),
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ProjectNotFound,
                    "Project not found",
                )));
            }
            Err(e) => return Ok(error_response(&e)),
        }
    }

    match storage.list_project_evaluations(project_id).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Evaluations retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = match current_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let evaluation = match storage.get_evaluation_by_id(evaluation_id).await {
        Ok(Some(evaluation)) => evaluation,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EvaluationNotFound,
                "Evaluation not found",
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    if !actor.is_admin() {
        match storage.get_project_by_id(evaluation.project_id).await {
            Ok(Some(project)) if can_access(&actor, &project) => {}
            Ok(_) => return Ok(forbidden("You can only view your own evaluations")),
            Err(e) => return Ok(error_response(&e)),
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        evaluation,
        "Evaluation retrieved successfully",
    )))
}
