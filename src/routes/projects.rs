use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::evaluations::{finalize_combined_grade, list_project_evaluations, record_evaluation};
use crate::middlewares;
use crate::models::actors::ActorRole;
use crate::models::projects::requests::{
    CreateProjectRequest, ProjectListQuery, RejectProjectRequest, SubmitProjectRequest,
    TransitionProjectRequest,
};
use crate::services::ProjectService;
use crate::utils::SafeProjectIdI64;

// 懒加载的全局 PROJECT_SERVICE 实例
static PROJECT_SERVICE: Lazy<ProjectService> = Lazy::new(ProjectService::new_lazy);

// HTTP处理程序
pub async fn list_projects(
    req: HttpRequest,
    query: web::Query<ProjectListQuery>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.list_projects(&req, query.into_inner()).await
}

pub async fn create_project(
    req: HttpRequest,
    project_data: web::Json<CreateProjectRequest>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE
        .create_project(&req, project_data.into_inner())
        .await
}

pub async fn get_project(
    req: HttpRequest,
    project_id: SafeProjectIdI64,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.get_project(&req, project_id.0).await
}

pub async fn delete_project(
    req: HttpRequest,
    project_id: SafeProjectIdI64,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.delete_project(&req, project_id.0).await
}

pub async fn approve_project(
    req: HttpRequest,
    project_id: SafeProjectIdI64,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.approve_project(&req, project_id.0).await
}

pub async fn reject_project(
    req: HttpRequest,
    project_id: SafeProjectIdI64,
    reject_data: Option<web::Json<RejectProjectRequest>>,
) -> ActixResult<HttpResponse> {
    let reject_data = reject_data.map(|d| d.into_inner()).unwrap_or_default();
    PROJECT_SERVICE
        .reject_project(&req, project_id.0, reject_data)
        .await
}

pub async fn submit_project(
    req: HttpRequest,
    project_id: SafeProjectIdI64,
    submit_data: web::Json<SubmitProjectRequest>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE
        .submit_project(&req, project_id.0, submit_data.into_inner())
        .await
}

pub async fn transition_project(
    req: HttpRequest,
    project_id: SafeProjectIdI64,
    transition_data: web::Json<TransitionProjectRequest>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE
        .transition_project(&req, project_id.0, transition_data.into_inner())
        .await
}

// 配置路由
pub fn configure_project_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/projects")
            .wrap(middlewares::RequireIdentity)
            .service(
                // 学生查询自己的项目，管理员可以查询所有项目
                web::resource("")
                    .route(web::get().to(list_projects))
                    .route(web::post().to(create_project)),
            )
            .service(
                web::resource("/{project_id}")
                    .route(web::get().to(get_project))
                    .route(
                        web::delete()
                            .to(delete_project)
                            .wrap(middlewares::RequireRole::new_any(ActorRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{project_id}/approve").route(
                    web::post()
                        .to(approve_project)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{project_id}/reject").route(
                    web::post()
                        .to(reject_project)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{project_id}/transition").route(
                    web::post()
                        .to(transition_project)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::admin_roles())),
                ),
            )
            .service(
                // 学生提交自己的项目
                web::resource("/{project_id}/submit").route(web::post().to(submit_project)),
            )
            .service(
                web::resource("/{project_id}/evaluations")
                    .route(web::get().to(list_project_evaluations))
                    .route(
                        web::post()
                            .to(record_evaluation)
                            .wrap(middlewares::RequireRole::new_any(ActorRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{project_id}/evaluations/finalize").route(
                    web::post()
                        .to(finalize_combined_grade)
                        .wrap(middlewares::RequireRole::new_any(ActorRole::admin_roles())),
                ),
            ),
    );
}
