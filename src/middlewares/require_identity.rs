/*!
 * 调用者身份中间件
 *
 * 身份由上游网关签发，并通过请求头传入：
 *
 * - `X-User-Id`: 调用者 ID（正整数）
 * - `X-User-Role`: `admin` 或 `student`
 *
 * 中间件校验两个请求头，并把 [`Actor`] 存入请求扩展；缺失或非法时返回 401。
 *
 * ```rust,ignore
 * web::scope("/api/v1/projects")
 *     .wrap(RequireIdentity)
 *     .route("", web::get().to(list_projects))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::HeaderMap,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

use super::create_error_response;
use crate::models::{
    ErrorCode,
    actors::{Actor, ActorRole},
};

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

#[derive(Clone)]
pub struct RequireIdentity;

// 辅助函数：从请求头解析调用者
fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, String> {
    let id = headers
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| format!("Missing {USER_ID_HEADER} header"))?
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| format!("Invalid {USER_ID_HEADER} header"))?;

    let role = headers
        .get(USER_ROLE_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| format!("Missing {USER_ROLE_HEADER} header"))?
        .parse::<ActorRole>()?;

    Ok(Actor { id, role })
}

impl<S, B> Transform<S, ServiceRequest> for RequireIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireIdentityMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireIdentityMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireIdentityMiddleware<S>
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
        Box::pin(async move {
            match actor_from_headers(req.headers()) {
                Ok(actor) => {
                    debug!("Identity accepted: {} ({})", actor.id, actor.role);
                    req.extensions_mut().insert(actor);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!("Identity rejected for request to {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取调用者
impl RequireIdentity {
    /// 此函数应该在应用了 RequireIdentity 中间件的路由处理程序中使用
    pub fn extract_actor(req: &actix_web::HttpRequest) -> Option<Actor> {
        req.extensions().get::<Actor>().copied()
    }
}
