use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProjectService;
use crate::models::ApiResponse;
use crate::models::projects::requests::ProjectListQuery;
use crate::services::{current_actor, error_response};

pub async fn list_projects(
    service: &ProjectService,
    request: &HttpRequest,
    mut query: ProjectListQuery,
) -> ActixResult<HttpResponse> {
    let actor = match current_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    // 学生只能看到自己的项目
    if !actor.is_admin() {
        query.student_id = Some(actor.id);
    }

    let storage = service.get_storage(request);
    match storage.list_projects_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Projects retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
