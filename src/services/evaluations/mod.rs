pub mod finalize;
pub mod get;
pub mod record;
pub mod revise;
pub mod templates;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::evaluations::requests::{RecordEvaluationRequest, ReviseEvaluationRequest};
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 录入评分
    pub async fn record_evaluation(
        &self,
        request: &HttpRequest,
        project_id: i64,
        evaluation_data: RecordEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_evaluation(self, request, project_id, evaluation_data).await
    }

    // 修订评分
    pub async fn revise_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        revision: ReviseEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        revise::revise_evaluation(self, request, evaluation_id, revision).await
    }

    // 结算综合成绩
    pub async fn finalize_combined_grade(
        &self,
        request: &HttpRequest,
        project_id: i64,
    ) -> ActixResult<HttpResponse> {
        finalize::finalize_combined_grade(self, request, project_id).await
    }

    // 获取项目的评分汇总
    pub async fn list_project_evaluations(
        &self,
        request: &HttpRequest,
        project_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::list_project_evaluations(self, request, project_id).await
    }

    // 获取单条评分
    pub async fn get_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_evaluation(self, request, evaluation_id).await
    }

    // 评分模板
    pub async fn list_templates(&self) -> ActixResult<HttpResponse> {
        templates::list_templates().await
    }
}
