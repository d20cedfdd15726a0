//! 路径参数提取器
//!
//! 非法的路径参数直接返回 400，处理程序拿到的一定是合法值。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode, projects::entities::ProjectLevel};

fn bad_request(message: String) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        message.clone(),
    ));
    InternalError::from_response(message, response).into()
}

fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| bad_request(format!("Invalid {name}: '{raw}'")))
}

macro_rules! define_safe_id {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req, $param).map($name))
            }
        }
    };
}

define_safe_id!(SafeProjectIdI64, "project_id");
define_safe_id!(SafeEvaluationIdI64, "evaluation_id");

/// 路径中的项目级别（200 / 400）
#[derive(Debug, Clone, Copy)]
pub struct SafeLevel(pub ProjectLevel);

impl FromRequest for SafeLevel {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("level").unwrap_or_default();
        let level = raw
            .parse::<i32>()
            .map_err(|_| format!("Invalid level: '{raw}'"))
            .and_then(ProjectLevel::try_from)
            .map(SafeLevel)
            .map_err(bad_request);
        ready(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_project_id_must_be_positive() {
        let (req, mut payload) = TestRequest::default()
            .param("project_id", "12")
            .to_http_parts();
        let id = SafeProjectIdI64::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(id.0, 12);

        let (req, mut payload) = TestRequest::default()
            .param("project_id", "-1")
            .to_http_parts();
        assert!(
            SafeProjectIdI64::from_request(&req, &mut payload)
                .await
                .is_err()
        );
    }

    #[actix_web::test]
    async fn test_level_accepts_known_values_only() {
        let (req, mut payload) = TestRequest::default().param("level", "400").to_http_parts();
        let level = SafeLevel::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(level.0, ProjectLevel::Level400);

        let (req, mut payload) = TestRequest::default().param("level", "300").to_http_parts();
        assert!(SafeLevel::from_request(&req, &mut payload).await.is_err());
    }
}
