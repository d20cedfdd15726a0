pub mod list;
pub mod set;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::deadlines::SetDeadlineRequest;
use crate::models::projects::entities::ProjectLevel;
use crate::storage::Storage;

pub struct DeadlineService {
    storage: Option<Arc<dyn Storage>>,
}

impl DeadlineService {
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

    // 列出截止时间
    pub async fn list_deadlines(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_deadlines(self, request).await
    }

    // 获取某一级别的截止时间
    pub async fn get_deadline(
        &self,
        request: &HttpRequest,
        level: ProjectLevel,
    ) -> ActixResult<HttpResponse> {
        list::get_deadline(self, request, level).await
    }

    // 设置截止时间
    pub async fn set_deadline(
        &self,
        request: &HttpRequest,
        level: ProjectLevel,
        deadline_data: SetDeadlineRequest,
    ) -> ActixResult<HttpResponse> {
        set::set_deadline(self, request, level, deadline_data).await
    }
}
