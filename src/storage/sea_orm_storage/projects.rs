//! 项目存储操作
//!
//! 所有状态写入都经过 `LifecycleManager` 校验，这里只负责把结果落库。

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, info, warn};

use super::SeaOrmStorage;
use super::deadlines::find_deadline;
use super::evaluations::{both_categories_exist, finalize_in};
use crate::engine::{InvalidTransition, LifecycleEvent, LifecycleManager, TransitionOutcome};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::entity::projects::{ActiveModel, Column, Entity as Projects};
use crate::errors::{CapstoneError, Result};
use crate::models::{
    PaginationInfo,
    actors::ActorRole,
    common::pagination::normalize_page,
    projects::{
        entities::{Project, ProjectStatus},
        requests::{CreateProjectRequest, ProjectListQuery, SubmitProjectRequest},
        responses::{ProjectListResponse, SubmissionReceipt},
    },
};
use crate::utils::escape_like_pattern;
use crate::utils::validate::{normalize_text, validate_link, validate_title};

/// 读取项目，不存在时返回 `NotFound`
pub(super) async fn load_project<C: ConnectionTrait>(conn: &C, project_id: i64) -> Result<Project> {
    Projects::find_by_id(project_id)
        .one(conn)
        .await
        .map_err(|e| CapstoneError::database_operation(format!("查询项目失败: {e}")))?
        .ok_or_else(|| CapstoneError::not_found(format!("项目 {project_id} 不存在")))?
        .into_project()
}

/// 在事务内锁定项目行并读取，作为同一项目上并发写操作的唯一争用点
///
/// 第一条语句是对该行的空更新：SQLite 由此立即取得写锁（其余写事务在 busy_timeout 内排队），
/// PostgreSQL / MySQL 则持有行锁直到事务结束。随后的读取带 `FOR UPDATE`。
pub(super) async fn lock_project<C: ConnectionTrait>(conn: &C, project_id: i64) -> Result<Project> {
    // 值未变化时 MySQL 的 rows_affected 为 0，存在性以随后的读取为准
    Projects::update_many()
        .col_expr(Column::UpdatedAt, Expr::col(Column::UpdatedAt).into())
        .filter(Column::Id.eq(project_id))
        .exec(conn)
        .await
        .map_err(|e| CapstoneError::database_operation(format!("锁定项目失败: {e}")))?;

    Projects::find_by_id(project_id)
        .lock_exclusive()
        .one(conn)
        .await
        .map_err(|e| CapstoneError::database_operation(format!("查询项目失败: {e}")))?
        .ok_or_else(|| CapstoneError::not_found(format!("项目 {project_id} 不存在")))?
        .into_project()
}

/// 把状态机的裁决落库；非法流转不会产生任何写入
async fn persist_outcome<C: ConnectionTrait>(
    conn: &C,
    project: &Project,
    decision: std::result::Result<TransitionOutcome, InvalidTransition>,
    now: DateTime<Utc>,
) -> Result<TransitionOutcome> {
    let outcome = decision.inspect_err(|e| {
        warn!(
            project_id = project.id,
            from = %e.from,
            to = %e.to,
            "拒绝非法的项目状态流转"
        );
    })?;

    match outcome {
        TransitionOutcome::Applied { from, to } => {
            ActiveModel {
                id: Set(project.id),
                status: Set(to.to_string()),
                updated_at: Set(now.timestamp()),
                ..Default::default()
            }
            .update(conn)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("更新项目状态失败: {e}")))?;
            info!(project_id = project.id, %from, %to, "项目状态已变更");
        }
        TransitionOutcome::Unchanged => {
            debug!(project_id = project.id, status = %project.status, "项目状态未变化");
        }
    }

    Ok(outcome)
}

/// 请求状态流转并写入结果
pub(super) async fn apply_transition<C: ConnectionTrait>(
    conn: &C,
    project: &mut Project,
    target: ProjectStatus,
    now: DateTime<Utc>,
) -> Result<TransitionOutcome> {
    let decision = LifecycleManager::request_transition(project, target, now);
    persist_outcome(conn, project, decision, now).await
}

/// 处理生命周期事件；事件在当前状态下不触发流转时为空操作
pub(super) async fn apply_event<C: ConnectionTrait>(
    conn: &C,
    project: &mut Project,
    event: LifecycleEvent,
    now: DateTime<Utc>,
) -> Result<TransitionOutcome> {
    let decision = LifecycleManager::apply_event(project, event, now);
    persist_outcome(conn, project, decision, now).await
}

fn map_create_error(err: DbErr, student_id: i64) -> CapstoneError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            CapstoneError::conflict(format!("学生 {student_id} 已有项目"))
        }
        _ => CapstoneError::database_operation(format!("创建项目失败: {err}")),
    }
}

/// 驳回原因追加到描述末尾
fn append_rejection_reason(description: Option<String>, reason: &str) -> String {
    match description {
        Some(desc) if !desc.is_empty() => format!("{desc}\n\nRejection reason: {reason}"),
        _ => format!("Rejection reason: {reason}"),
    }
}

impl SeaOrmStorage {
    /// 创建项目
    pub async fn create_project_impl(
        &self,
        req: CreateProjectRequest,
        created_by: ActorRole,
    ) -> Result<Project> {
        let title = validate_title(&req.title)?;
        // student_id 必须由服务层确保已设置
        let student_id = req
            .student_id
            .ok_or_else(|| CapstoneError::validation("student_id is required"))?;

        let existing = Projects::find()
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询项目失败: {e}")))?;
        if existing.is_some() {
            return Err(CapstoneError::conflict(format!(
                "学生 {student_id} 已有项目"
            )));
        }

        let now = Utc::now().timestamp();
        let status = LifecycleManager::initial_status(created_by);

        let model = ActiveModel {
            title: Set(title),
            description: Set(normalize_text(req.description)),
            level: Set(req.level.as_i32()),
            study_program_id: Set(req.study_program_id),
            student_id: Set(student_id),
            status: Set(status.to_string()),
            repository_url: Set(None),
            documentation_url: Set(None),
            submitted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_create_error(e, student_id))?;

        info!(project_id = result.id, student_id, %status, "项目已创建");
        result.into_project()
    }

    /// 通过 ID 获取项目
    pub async fn get_project_by_id_impl(&self, project_id: i64) -> Result<Option<Project>> {
        let result = Projects::find_by_id(project_id)
            .one(&self.db)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询项目失败: {e}")))?;

        result.map(|m| m.into_project()).transpose()
    }

    /// 分页列出项目
    pub async fn list_projects_with_pagination_impl(
        &self,
        query: ProjectListQuery,
    ) -> Result<ProjectListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Projects::find();

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level));
        }
        if let Some(study_program_id) = query.study_program_id {
            select = select.filter(Column::StudyProgramId.eq(study_program_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询项目总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询项目页数失败: {e}")))?;

        let projects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询项目列表失败: {e}")))?;

        Ok(ProjectListResponse {
            items: projects
                .into_iter()
                .map(|m| m.into_project())
                .collect::<Result<Vec<_>>>()?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 删除项目，已有评分时拒绝
    pub async fn delete_project_impl(&self, project_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("开启事务失败: {e}")))?;

        match lock_project(&txn, project_id).await {
            Ok(_) => {}
            Err(CapstoneError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        }

        let evaluations = Evaluations::find()
            .filter(EvaluationColumn::ProjectId.eq(project_id))
            .count(&txn)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询评分数量失败: {e}")))?;
        if evaluations > 0 {
            return Err(CapstoneError::precondition_failed(format!(
                "项目 {project_id} 已有 {evaluations} 条评分，无法删除"
            )));
        }

        let result = Projects::delete_by_id(project_id)
            .exec(&txn)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("删除项目失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 手动状态流转
    ///
    /// 两类评分均已存在时，请求 `UNDER_REVIEW` 会改为直接结算综合成绩，项目最终为 `EVALUATED`。
    pub async fn transition_project_impl(
        &self,
        project_id: i64,
        target: ProjectStatus,
    ) -> Result<Project> {
        let now = Utc::now();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("开启事务失败: {e}")))?;

        let mut project = lock_project(&txn, project_id).await?;

        if target == ProjectStatus::UnderReview && both_categories_exist(&txn, project_id).await? {
            finalize_in(&txn, &mut project, now).await?;
        } else {
            apply_transition(&txn, &mut project, target, now).await?;
        }

        txn.commit()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(project)
    }

    /// 审批通过
    pub async fn approve_project_impl(&self, project_id: i64) -> Result<Project> {
        let now = Utc::now();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("开启事务失败: {e}")))?;

        let mut project = lock_project(&txn, project_id).await?;
        apply_event(&txn, &mut project, LifecycleEvent::Approved, now).await?;

        txn.commit()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(project)
    }

    /// 驳回项目，原因仅在流转实际发生时写入描述
    pub async fn reject_project_impl(
        &self,
        project_id: i64,
        reason: Option<String>,
    ) -> Result<Project> {
        let reason = normalize_text(reason);
        let now = Utc::now();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("开启事务失败: {e}")))?;

        let mut project = lock_project(&txn, project_id).await?;
        let outcome = apply_event(&txn, &mut project, LifecycleEvent::Rejected, now).await?;

        if outcome.is_applied()
            && let Some(reason) = reason
        {
            let description = append_rejection_reason(project.description.take(), &reason);
            ActiveModel {
                id: Set(project.id),
                description: Set(Some(description.clone())),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("更新项目描述失败: {e}")))?;
            project.description = Some(description);
        }

        txn.commit()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(project)
    }

    /// 学生提交项目
    ///
    /// 首次提交记录提交时间并流转到 `SUBMITTED`；已提交状态下再次提交只更新链接。
    pub async fn submit_project_impl(
        &self,
        project_id: i64,
        req: SubmitProjectRequest,
    ) -> Result<SubmissionReceipt> {
        let repository_url = validate_link("repository_url", req.repository_url)?;
        let documentation_url = validate_link("documentation_url", req.documentation_url)?;
        let now = Utc::now();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("开启事务失败: {e}")))?;

        let mut project = lock_project(&txn, project_id).await?;

        let first_submission = project.status != ProjectStatus::Submitted;
        if first_submission {
            apply_event(&txn, &mut project, LifecycleEvent::SubmissionFinalized, now).await?;
            project.submitted_at = Some(now);
        }
        project.repository_url = repository_url;
        project.documentation_url = documentation_url;
        project.updated_at = now;

        ActiveModel {
            id: Set(project.id),
            repository_url: Set(project.repository_url.clone()),
            documentation_url: Set(project.documentation_url.clone()),
            submitted_at: Set(project.submitted_at.map(|t| t.timestamp())),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| CapstoneError::database_operation(format!("更新项目提交信息失败: {e}")))?;

        let deadline = find_deadline(&txn, project.level).await?;

        txn.commit()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("提交事务失败: {e}")))?;

        let submitted_at = project.submitted_at.unwrap_or(now);
        let is_late = deadline
            .as_ref()
            .is_some_and(|d| d.is_missed_by(submitted_at));
        if is_late {
            warn!(
                project_id = project.id,
                level = %project.level,
                %submitted_at,
                "项目晚于截止时间提交"
            );
        } else if first_submission {
            info!(project_id = project.id, "项目已提交");
        }

        Ok(SubmissionReceipt {
            project,
            is_late,
            deadline: deadline.map(|d| d.deadline),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{create_request, file_storage, storage, submitted_project};
    use super::*;
    use crate::models::evaluations::{entities::EvaluationCategory, requests::*};
    use crate::models::projects::entities::ProjectLevel;

    #[tokio::test]
    async fn test_initial_status_depends_on_creator() {
        let storage = storage().await;
        let by_student = storage
            .create_project_impl(create_request(1), ActorRole::Student)
            .await
            .unwrap();
        let by_admin = storage
            .create_project_impl(create_request(2), ActorRole::Admin)
            .await
            .unwrap();

        assert_eq!(by_student.status, ProjectStatus::PendingApproval);
        assert_eq!(by_admin.status, ProjectStatus::Draft);
    }

    #[tokio::test]
    async fn test_one_project_per_student() {
        let storage = storage().await;
        storage
            .create_project_impl(create_request(5), ActorRole::Student)
            .await
            .unwrap();

        let err = storage
            .create_project_impl(create_request(5), ActorRole::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, CapstoneError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let storage = storage().await;
        let mut req = create_request(9);
        req.title = "   ".to_string();

        let err = storage
            .create_project_impl(req, ActorRole::Student)
            .await
            .unwrap_err();
        assert!(matches!(err, CapstoneError::Validation(_)));
    }

    #[tokio::test]
    async fn test_approve_then_submit() {
        let storage = storage().await;
        let project = storage
            .create_project_impl(create_request(1), ActorRole::Student)
            .await
            .unwrap();

        let approved = storage.approve_project_impl(project.id).await.unwrap();
        assert_eq!(approved.status, ProjectStatus::Draft);

        let receipt = storage
            .submit_project_impl(
                project.id,
                SubmitProjectRequest {
                    repository_url: Some(" https://github.com/example/app ".to_string()),
                    documentation_url: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(receipt.project.status, ProjectStatus::Submitted);
        assert!(receipt.project.submitted_at.is_some());
        assert_eq!(
            receipt.project.repository_url.as_deref(),
            Some("https://github.com/example/app")
        );
        assert!(!receipt.is_late);
    }

    #[tokio::test]
    async fn test_resubmit_updates_links_only() {
        let storage = storage().await;
        let project = submitted_project(&storage, 1).await;
        let first_submitted_at = project.submitted_at;

        let receipt = storage
            .submit_project_impl(
                project.id,
                SubmitProjectRequest {
                    repository_url: Some("https://gitlab.com/example/library".to_string()),
                    documentation_url: Some("https://docs.example.com".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(receipt.project.status, ProjectStatus::Submitted);
        assert_eq!(receipt.project.submitted_at, first_submitted_at);
        assert_eq!(
            receipt.project.documentation_url.as_deref(),
            Some("https://docs.example.com")
        );
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_link() {
        let storage = storage().await;
        let project = storage
            .create_project_impl(create_request(1), ActorRole::Admin)
            .await
            .unwrap();

        let err = storage
            .submit_project_impl(
                project.id,
                SubmitProjectRequest {
                    repository_url: Some("ftp://example.com/repo".to_string()),
                    documentation_url: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CapstoneError::Validation(_)));

        let unchanged = storage
            .get_project_by_id_impl(project.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.status, ProjectStatus::Draft);
    }

    #[tokio::test]
    async fn test_late_submission_is_flagged() {
        let storage = storage().await;
        let cutoff = Utc::now() - chrono::Duration::days(1);
        storage
            .set_deadline_impl(ProjectLevel::Level400, cutoff)
            .await
            .unwrap();
        let project = storage
            .create_project_impl(create_request(1), ActorRole::Admin)
            .await
            .unwrap();

        let receipt = storage
            .submit_project_impl(project.id, SubmitProjectRequest::default())
            .await
            .unwrap();

        assert!(receipt.is_late);
        assert_eq!(receipt.deadline.map(|d| d.timestamp()), Some(cutoff.timestamp()));
        assert_eq!(receipt.project.status, ProjectStatus::Submitted);
    }

    #[tokio::test]
    async fn test_deadline_of_other_level_is_ignored() {
        let storage = storage().await;
        storage
            .set_deadline_impl(ProjectLevel::Level200, Utc::now() - chrono::Duration::days(1))
            .await
            .unwrap();
        let project = storage
            .create_project_impl(create_request(1), ActorRole::Admin)
            .await
            .unwrap();

        let receipt = storage
            .submit_project_impl(project.id, SubmitProjectRequest::default())
            .await
            .unwrap();
        assert!(!receipt.is_late);
        assert!(receipt.deadline.is_none());
    }

    #[tokio::test]
    async fn test_reject_appends_reason_then_submit_fails() {
        let storage = storage().await;
        let project = storage
            .create_project_impl(create_request(1), ActorRole::Student)
            .await
            .unwrap();

        let rejected = storage
            .reject_project_impl(project.id, Some("Scope too small".to_string()))
            .await
            .unwrap();
        assert_eq!(rejected.status, ProjectStatus::Rejected);
        assert_eq!(
            rejected.description.as_deref(),
            Some("Inventory and lending for the faculty library\n\nRejection reason: Scope too small")
        );

        let err = storage
            .submit_project_impl(project.id, SubmitProjectRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CapstoneError::InvalidTransition(_)));

        let stored = storage
            .get_project_by_id_impl(project.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ProjectStatus::Rejected);
        assert!(stored.submitted_at.is_none());
    }

    #[tokio::test]
    async fn test_repeated_reject_does_not_append_twice() {
        let storage = storage().await;
        let project = storage
            .create_project_impl(create_request(1), ActorRole::Student)
            .await
            .unwrap();

        storage
            .reject_project_impl(project.id, Some("Duplicate topic".to_string()))
            .await
            .unwrap();
        let again = storage
            .reject_project_impl(project.id, Some("Duplicate topic".to_string()))
            .await
            .unwrap();

        let description = again.description.unwrap();
        assert_eq!(description.matches("Rejection reason").count(), 1);
    }

    #[tokio::test]
    async fn test_manual_transition_outside_table_fails() {
        let storage = storage().await;
        let project = storage
            .create_project_impl(create_request(1), ActorRole::Admin)
            .await
            .unwrap();

        let err = storage
            .transition_project_impl(project.id, ProjectStatus::Evaluated)
            .await
            .unwrap_err();
        assert!(matches!(err, CapstoneError::InvalidTransition(_)));

        let same = storage
            .transition_project_impl(project.id, ProjectStatus::Draft)
            .await
            .unwrap();
        assert_eq!(same.status, ProjectStatus::Draft);
    }

    #[tokio::test]
    async fn test_manual_under_review_is_superseded_when_fully_scored() {
        let storage = storage().await;
        let project = submitted_project(&storage, 1).await;
        for (category, name, max, score) in [
            (EvaluationCategory::Project, "Functionality", 70.0, 60.0),
            (EvaluationCategory::Presentation, "Clarity", 30.0, 25.0),
        ] {
            storage
                .record_evaluation_impl(
                    project.id,
                    100,
                    RecordEvaluationRequest {
                        category,
                        marks: vec![MarkInput::new(name, max, score)],
                        comments: None,
                    },
                )
                .await
                .unwrap();
        }

        let project = storage
            .transition_project_impl(project.id, ProjectStatus::UnderReview)
            .await
            .unwrap();
        assert_eq!(project.status, ProjectStatus::Evaluated);
    }

    #[tokio::test]
    async fn test_delete_guard() {
        let storage = storage().await;
        let project = submitted_project(&storage, 1).await;
        storage
            .record_evaluation_impl(
                project.id,
                100,
                RecordEvaluationRequest {
                    category: EvaluationCategory::Project,
                    marks: vec![MarkInput::new("Code Quality", 20.0, 15.0)],
                    comments: None,
                },
            )
            .await
            .unwrap();

        let err = storage.delete_project_impl(project.id).await.unwrap_err();
        assert!(matches!(err, CapstoneError::PreconditionFailed(_)));
        assert!(
            storage
                .get_project_by_id_impl(project.id)
                .await
                .unwrap()
                .is_some()
        );

        let other = storage
            .create_project_impl(create_request(2), ActorRole::Admin)
            .await
            .unwrap();
        assert!(storage.delete_project_impl(other.id).await.unwrap());
        assert!(!storage.delete_project_impl(other.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let storage = storage().await;
        for student_id in 1..=5 {
            storage
                .create_project_impl(create_request(student_id), ActorRole::Student)
                .await
                .unwrap();
        }
        let mut other = create_request(6);
        other.title = "Weather station dashboard".to_string();
        let other = storage
            .create_project_impl(other, ActorRole::Admin)
            .await
            .unwrap();

        let page = storage
            .list_projects_with_pagination_impl(ProjectListQuery {
                page: Some(2),
                size: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 6);
        assert_eq!(page.pagination.total_pages, 3);

        let drafts = storage
            .list_projects_with_pagination_impl(ProjectListQuery {
                status: Some(ProjectStatus::Draft),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(drafts.items.len(), 1);
        assert_eq!(drafts.items[0].id, other.id);

        let searched = storage
            .list_projects_with_pagination_impl(ProjectListQuery {
                search: Some("weather".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
    }

    #[test]
    fn test_append_rejection_reason() {
        assert_eq!(
            append_rejection_reason(None, "Incomplete"),
            "Rejection reason: Incomplete"
        );
        assert_eq!(
            append_rejection_reason(Some("Inventory app".to_string()), "Incomplete"),
            "Inventory app\n\nRejection reason: Incomplete"
        );
    }

    #[tokio::test]
    async fn test_concurrent_approve_and_reject_never_hit_lock_errors() {
        let (storage, _db) = file_storage(4).await;

        for student_id in 1..=10 {
            let project = storage
                .create_project_impl(create_request(student_id), ActorRole::Student)
                .await
                .unwrap();
            let (approved, rejected) = tokio::join!(
                storage.approve_project_impl(project.id),
                storage.reject_project_impl(project.id, Some("Out of scope".to_string())),
            );

            // 拒绝总能成功；审批要么先行，要么因项目已驳回而失败
            assert_eq!(rejected.unwrap().status, ProjectStatus::Rejected);
            if let Err(err) = approved {
                assert!(matches!(err, CapstoneError::InvalidTransition(_)));
            }
            let stored = storage.get_project_by_id_impl(project.id).await.unwrap().unwrap();
            assert_eq!(stored.status, ProjectStatus::Rejected);
        }
    }

    #[tokio::test]
    async fn test_transition_of_missing_project_is_not_found() {
        let storage = storage().await;
        let err = storage
            .transition_project_impl(99, ProjectStatus::Draft)
            .await
            .unwrap_err();
        assert!(matches!(err, CapstoneError::NotFound(_)));
        assert!(!storage.delete_project_impl(99).await.unwrap());
    }
}
