use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProjectService;
use crate::models::actors::ActorRole;
use crate::models::projects::requests::CreateProjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_actor, error_response};

pub async fn create_project(
    service: &ProjectService,
    request: &HttpRequest,
    mut project_data: CreateProjectRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_actor(request) {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    // 学生只能为自己创建项目，管理员必须指定学生
    match actor.role {
        ActorRole::Student => project_data.student_id = Some(actor.id),
        ActorRole::Admin if project_data.student_id.is_none() => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "student_id is required when an administrator creates a project",
            )));
        }
        ActorRole::Admin => {}
    }

    let storage = service.get_storage(request);
    match storage.create_project(project_data, actor.role).await {
        Ok(project) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(project, "Project created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}
