pub mod create;
pub mod delete;
pub mod get;
pub mod lifecycle;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::actors::Actor;
use crate::models::projects::entities::Project;
use crate::models::projects::requests::{
    CreateProjectRequest, ProjectListQuery, RejectProjectRequest, SubmitProjectRequest,
    TransitionProjectRequest,
};
use crate::storage::Storage;

pub struct ProjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProjectService {
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

    // 获取项目列表
    pub async fn list_projects(
        &self,
        request: &HttpRequest,
        query: ProjectListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_projects(self, request, query).await
    }

    // 创建项目
    pub async fn create_project(
        &self,
        request: &HttpRequest,
        project_data: CreateProjectRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_project(self, request, project_data).await
    }

    // 获取项目详情（含评分）
    pub async fn get_project(
        &self,
        request: &HttpRequest,
        project_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_project(self, request, project_id).await
    }

    // 删除项目
    pub async fn delete_project(
        &self,
        request: &HttpRequest,
        project_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_project(self, request, project_id).await
    }

    // 审批通过
    pub async fn approve_project(
        &self,
        request: &HttpRequest,
        project_id: i64,
    ) -> ActixResult<HttpResponse> {
        lifecycle::approve_project(self, request, project_id).await
    }

    // 驳回
    pub async fn reject_project(
        &self,
        request: &HttpRequest,
        project_id: i64,
        reject_data: RejectProjectRequest,
    ) -> ActixResult<HttpResponse> {
        lifecycle::reject_project(self, request, project_id, reject_data).await
    }

    // 手动状态流转
    pub async fn transition_project(
        &self,
        request: &HttpRequest,
        project_id: i64,
        transition_data: TransitionProjectRequest,
    ) -> ActixResult<HttpResponse> {
        lifecycle::transition_project(self, request, project_id, transition_data).await
    }

    // 学生提交
    pub async fn submit_project(
        &self,
        request: &HttpRequest,
        project_id: i64,
        submit_data: SubmitProjectRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_project(self, request, project_id, submit_data).await
    }
}

/// 管理员可访问全部项目，学生只能访问自己的项目
pub(crate) fn can_access(actor: &Actor, project: &Project) -> bool {
    actor.is_admin() || project.student_id == actor.id
}
