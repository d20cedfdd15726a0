use actix_web::{HttpResponse, Result as ActixResult};

use crate::engine::rubric;
use crate::models::ApiResponse;

pub async fn list_templates() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        rubric::templates(),
        "Evaluation templates retrieved successfully",
    )))
}
