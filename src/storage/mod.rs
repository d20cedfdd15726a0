use std::sync::Arc;

use crate::models::{
    actors::ActorRole,
    deadlines::Deadline,
    evaluations::{
        entities::{CombinedGrade, Evaluation},
        requests::{RecordEvaluationRequest, ReviseEvaluationRequest},
        responses::ProjectEvaluationsResponse,
    },
    projects::{
        entities::{Project, ProjectLevel, ProjectStatus},
        requests::{CreateProjectRequest, ProjectListQuery, SubmitProjectRequest},
        responses::{ProjectListResponse, SubmissionReceipt},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 项目管理方法
    // 创建项目，初始状态由创建者角色决定
    async fn create_project(&self, req: CreateProjectRequest, created_by: ActorRole)
    -> Result<Project>;
    // 通过ID获取项目
    async fn get_project_by_id(&self, project_id: i64) -> Result<Option<Project>>;
    // 列出项目
    async fn list_projects_with_pagination(
        &self,
        query: ProjectListQuery,
    ) -> Result<ProjectListResponse>;
    // 删除项目（已有评分时拒绝）
    async fn delete_project(&self, project_id: i64) -> Result<bool>;

    /// 项目状态流转方法
    // 手动请求状态流转
    async fn transition_project(&self, project_id: i64, target: ProjectStatus) -> Result<Project>;
    // 管理员审批通过
    async fn approve_project(&self, project_id: i64) -> Result<Project>;
    // 管理员驳回，可附带原因
    async fn reject_project(&self, project_id: i64, reason: Option<String>) -> Result<Project>;
    // 学生提交项目
    async fn submit_project(
        &self,
        project_id: i64,
        req: SubmitProjectRequest,
    ) -> Result<SubmissionReceipt>;

    /// 评分方法
    // 录入某一类评分
    async fn record_evaluation(
        &self,
        project_id: i64,
        evaluator_id: i64,
        req: RecordEvaluationRequest,
    ) -> Result<Evaluation>;
    // 修订评分（整体替换评分项）
    async fn revise_evaluation(
        &self,
        evaluation_id: i64,
        req: ReviseEvaluationRequest,
    ) -> Result<Evaluation>;
    // 结算综合成绩
    async fn finalize_combined_grade(&self, project_id: i64) -> Result<CombinedGrade>;
    // 获取项目的全部评分
    async fn list_project_evaluations(&self, project_id: i64)
    -> Result<ProjectEvaluationsResponse>;
    // 通过ID获取评分
    async fn get_evaluation_by_id(&self, evaluation_id: i64) -> Result<Option<Evaluation>>;

    /// 截止时间方法
    // 设置某一级别的截止时间（不存在则创建）
    async fn set_deadline(
        &self,
        level: ProjectLevel,
        deadline: chrono::DateTime<chrono::Utc>,
    ) -> Result<Deadline>;
    // 获取某一级别的截止时间
    async fn get_deadline_by_level(&self, level: ProjectLevel) -> Result<Option<Deadline>>;
    // 列出全部截止时间
    async fn list_deadlines(&self) -> Result<Vec<Deadline>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
