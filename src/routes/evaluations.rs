use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::actors::ActorRole;
use crate::models::evaluations::requests::{RecordEvaluationRequest, ReviseEvaluationRequest};
use crate::services::EvaluationService;
use crate::utils::{SafeEvaluationIdI64, SafeProjectIdI64};

// 懒加载的全局 EVALUATION_SERVICE 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// HTTP处理程序
pub async fn record_evaluation(
    req: HttpRequest,
    project_id: SafeProjectIdI64,
    evaluation_data: web::Json<RecordEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .record_evaluation(&req, project_id.0, evaluation_data.into_inner())
        .await
}

pub async fn list_project_evaluations(
    req: HttpRequest,
    project_id: SafeProjectIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_project_evaluations(&req, project_id.0)
        .await
}

pub async fn finalize_combined_grade(
    req: HttpRequest,
    project_id: SafeProjectIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .finalize_combined_grade(&req, project_id.0)
        .await
}

pub async fn get_evaluation(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.get_evaluation(&req, evaluation_id.0).await
}

pub async fn revise_evaluation(
    req: HttpRequest,
    evaluation_id: SafeEvaluationIdI64,
    revision: web::Json<ReviseEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .revise_evaluation(&req, evaluation_id.0, revision.into_inner())
        .await
}

pub async fn list_templates() -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.list_templates().await
}

// 配置路由（项目下的评分路由见 projects.rs）
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(middlewares::RequireIdentity)
            .service(
                web::resource("/{evaluation_id}")
                    .route(web::get().to(get_evaluation))
                    .route(
                        web::patch()
                            .to(revise_evaluation)
                            .wrap(middlewares::RequireRole::new_any(ActorRole::admin_roles())),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/evaluation-templates")
            .wrap(middlewares::RequireIdentity)
            .service(web::resource("").route(web::get().to(list_templates))),
    );
}
