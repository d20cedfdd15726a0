use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::actors::ActorRole;
use crate::models::deadlines::SetDeadlineRequest;
use crate::services::DeadlineService;
use crate::utils::SafeLevel;

// 懒加载的全局 DEADLINE_SERVICE 实例
static DEADLINE_SERVICE: Lazy<DeadlineService> = Lazy::new(DeadlineService::new_lazy);

// HTTP处理程序
pub async fn list_deadlines(req: HttpRequest) -> ActixResult<HttpResponse> {
    DEADLINE_SERVICE.list_deadlines(&req).await
}

pub async fn get_deadline(req: HttpRequest, level: SafeLevel) -> ActixResult<HttpResponse> {
    DEADLINE_SERVICE.get_deadline(&req, level.0).await
}

pub async fn set_deadline(
    req: HttpRequest,
    level: SafeLevel,
    deadline_data: web::Json<SetDeadlineRequest>,
) -> ActixResult<HttpResponse> {
    DEADLINE_SERVICE
        .set_deadline(&req, level.0, deadline_data.into_inner())
        .await
}

// 配置路由
pub fn configure_deadline_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/deadlines")
            .wrap(middlewares::RequireIdentity)
            .service(web::resource("").route(web::get().to(list_deadlines)))
            .service(
                web::resource("/{level}")
                    .route(web::get().to(get_deadline))
                    .route(
                        web::put()
                            .to(set_deadline)
                            // 仅管理员可设置截止时间
                            .wrap(middlewares::RequireRole::new_any(ActorRole::admin_roles())),
                    ),
            ),
    );
}
