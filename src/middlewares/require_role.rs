/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireIdentity 中间件之后使用，用于验证调用者是否具有特定角色。
 *
 * ```rust,ignore
 * web::resource("/{project_id}/approve").route(
 *     web::post()
 *         .to(approve_project)
 *         .wrap(RequireRole::new_any(ActorRole::admin_roles())),
 * )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use super::{RequireIdentity, create_error_response};
use crate::models::{ErrorCode, actors::ActorRole};

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Vec<ActorRole>,
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: ActorRole) -> Self {
        Self {
            allowed_roles: vec![role],
        }
    }

    /// 创建需要任一角色的中间件
    pub fn new_any(roles: &[ActorRole]) -> Self {
        Self {
            allowed_roles: roles.to_vec(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Vec<ActorRole>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            match RequireIdentity::extract_actor(req.request()) {
                Some(actor) if allowed_roles.contains(&actor.role) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(actor) => {
                    info!(
                        "Access denied for actor {} (role: {}). Allowed roles: {:?}",
                        actor.id, actor.role, allowed_roles
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: no actor found in request. Make sure RequireIdentity middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middlewares::require_identity::{USER_ID_HEADER, USER_ROLE_HEADER};
    use actix_web::{App, HttpResponse, test, web};

    async fn admin_only() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    // wrap 顺序：最后注册的最先执行，身份中间件需在外层
    macro_rules! guarded_app {
        () => {
            test::init_service(
                App::new().service(
                    web::resource("/guarded")
                        .route(web::post().to(admin_only))
                        .wrap(RequireRole::new_any(ActorRole::admin_roles()))
                        .wrap(RequireIdentity),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_admin_passes() {
        let app = guarded_app!();
        let req = test::TestRequest::post()
            .uri("/guarded")
            .insert_header((USER_ID_HEADER, "1"))
            .insert_header((USER_ROLE_HEADER, "admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_student_is_forbidden() {
        let app = guarded_app!();
        let req = test::TestRequest::post()
            .uri("/guarded")
            .insert_header((USER_ID_HEADER, "42"))
            .insert_header((USER_ROLE_HEADER, "student"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_missing_identity_is_unauthorized() {
        let app = guarded_app!();
        let req = test::TestRequest::post().uri("/guarded").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
