//! 项目状态机

use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::actors::ActorRole;
use crate::models::projects::entities::{Project, ProjectStatus};

/// 请求的状态无法从当前状态到达
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: ProjectStatus,
    pub to: ProjectStatus,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot move project from '{}' to '{}'",
            self.from, self.to
        )
    }
}

impl std::error::Error for InvalidTransition {}

/// 状态流转结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied {
        from: ProjectStatus,
        to: ProjectStatus,
    },
    /// 目标状态与当前状态相同，未做任何修改
    Unchanged,
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied { .. })
    }
}

/// 由协作方触发的生命周期事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// 管理员审批通过
    Approved,
    /// 管理员驳回
    Rejected,
    /// 学生首次提交
    SubmissionFinalized,
    /// 某一类评分已录入
    EvaluationRecorded,
    /// 两类评分均已存在
    AllCategoriesScored,
}

pub struct LifecycleManager;

impl LifecycleManager {
    /// 当前状态允许到达的下一状态
    pub fn allowed_next(status: ProjectStatus) -> &'static [ProjectStatus] {
        use ProjectStatus::*;
        match status {
            PendingApproval => &[Draft, Rejected],
            Draft => &[Submitted, Rejected],
            Submitted => &[UnderReview, Rejected],
            UnderReview => &[Evaluated, Rejected],
            Evaluated | Rejected => &[],
        }
    }

    pub fn is_terminal(status: ProjectStatus) -> bool {
        Self::allowed_next(status).is_empty()
    }

    /// 新建项目的初始状态：学生创建需审批，管理员创建视为已审批
    pub fn initial_status(created_by: ActorRole) -> ProjectStatus {
        match created_by {
            ActorRole::Student => ProjectStatus::PendingApproval,
            ActorRole::Admin => ProjectStatus::Draft,
        }
    }

    /// 校验并执行一次状态流转
    ///
    /// 目标与当前状态相同时直接成功且不修改任何字段；失败时 `project` 保持原样。
    pub fn request_transition(
        project: &mut Project,
        target: ProjectStatus,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome, InvalidTransition> {
        let from = project.status;
        if target == from {
            return Ok(TransitionOutcome::Unchanged);
        }
        if !Self::allowed_next(from).contains(&target) {
            return Err(InvalidTransition { from, to: target });
        }

        project.status = target;
        project.updated_at = now;
        Ok(TransitionOutcome::Applied { from, to: target })
    }

    /// 事件对应的目标状态；`None` 表示该事件在当前状态下不触发流转
    pub fn target_for(event: LifecycleEvent, current: ProjectStatus) -> Option<ProjectStatus> {
        match event {
            LifecycleEvent::Approved => Some(ProjectStatus::Draft),
            LifecycleEvent::Rejected => Some(ProjectStatus::Rejected),
            LifecycleEvent::SubmissionFinalized => Some(ProjectStatus::Submitted),
            LifecycleEvent::EvaluationRecorded => {
                (current == ProjectStatus::Submitted).then_some(ProjectStatus::UnderReview)
            }
            LifecycleEvent::AllCategoriesScored => Some(ProjectStatus::Evaluated),
        }
    }

    /// 处理生命周期事件
    pub fn apply_event(
        project: &mut Project,
        event: LifecycleEvent,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome, InvalidTransition> {
        match Self::target_for(event, project.status) {
            Some(target) => Self::request_transition(project, target, now),
            None => Ok(TransitionOutcome::Unchanged),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::projects::entities::ProjectLevel;
    use chrono::TimeZone;

    fn project_in(status: ProjectStatus) -> Project {
        let created = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        Project {
            id: 1,
            title: "Campus navigation app".to_string(),
            description: None,
            level: ProjectLevel::Level400,
            study_program_id: 1,
            student_id: 7,
            status,
            repository_url: None,
            documentation_url: None,
            submitted_at: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn later() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_every_table_pair_succeeds() {
        for from in ProjectStatus::all() {
            for to in LifecycleManager::allowed_next(*from) {
                let mut project = project_in(*from);
                let outcome = LifecycleManager::request_transition(&mut project, *to, later());
                assert_eq!(
                    outcome,
                    Ok(TransitionOutcome::Applied { from: *from, to: *to })
                );
                assert_eq!(project.status, *to);
                assert_eq!(project.updated_at, later());
            }
        }
    }

    #[test]
    fn test_pairs_outside_table_fail_without_mutation() {
        for from in ProjectStatus::all() {
            for to in ProjectStatus::all() {
                if from == to || LifecycleManager::allowed_next(*from).contains(to) {
                    continue;
                }
                let mut project = project_in(*from);
                let before = project.updated_at;
                let err = LifecycleManager::request_transition(&mut project, *to, later())
                    .expect_err("transition should be rejected");
                assert_eq!(err, InvalidTransition { from: *from, to: *to });
                assert_eq!(project.status, *from);
                assert_eq!(project.updated_at, before);
            }
        }
    }

    #[test]
    fn test_same_status_is_noop() {
        for status in ProjectStatus::all() {
            let mut project = project_in(*status);
            let before = project.updated_at;
            let outcome = LifecycleManager::request_transition(&mut project, *status, later());
            assert_eq!(outcome, Ok(TransitionOutcome::Unchanged));
            assert_eq!(project.status, *status);
            assert_eq!(project.updated_at, before);
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(LifecycleManager::is_terminal(ProjectStatus::Evaluated));
        assert!(LifecycleManager::is_terminal(ProjectStatus::Rejected));
        assert!(!LifecycleManager::is_terminal(ProjectStatus::UnderReview));
    }

    #[test]
    fn test_initial_status_depends_on_creator() {
        assert_eq!(
            LifecycleManager::initial_status(ActorRole::Student),
            ProjectStatus::PendingApproval
        );
        assert_eq!(
            LifecycleManager::initial_status(ActorRole::Admin),
            ProjectStatus::Draft
        );
    }

    #[test]
    fn test_evaluation_recorded_only_moves_submitted_projects() {
        let mut submitted = project_in(ProjectStatus::Submitted);
        LifecycleManager::apply_event(&mut submitted, LifecycleEvent::EvaluationRecorded, later())
            .unwrap();
        assert_eq!(submitted.status, ProjectStatus::UnderReview);

        let mut reviewing = project_in(ProjectStatus::UnderReview);
        let outcome = LifecycleManager::apply_event(
            &mut reviewing,
            LifecycleEvent::EvaluationRecorded,
            later(),
        );
        assert_eq!(outcome, Ok(TransitionOutcome::Unchanged));
    }

    #[test]
    fn test_happy_path_through_events() {
        let mut project = project_in(ProjectStatus::PendingApproval);
        for event in [
            LifecycleEvent::Approved,
            LifecycleEvent::SubmissionFinalized,
            LifecycleEvent::EvaluationRecorded,
            LifecycleEvent::AllCategoriesScored,
        ] {
            LifecycleManager::apply_event(&mut project, event, later()).unwrap();
        }
        assert_eq!(project.status, ProjectStatus::Evaluated);
    }

    #[test]
    fn test_rejected_project_cannot_be_submitted() {
        let mut project = project_in(ProjectStatus::PendingApproval);
        LifecycleManager::apply_event(&mut project, LifecycleEvent::Rejected, later()).unwrap();
        assert_eq!(project.status, ProjectStatus::Rejected);

        let err = LifecycleManager::request_transition(
            &mut project,
            ProjectStatus::Submitted,
            later(),
        )
        .unwrap_err();
        assert_eq!(err.from, ProjectStatus::Rejected);
        assert_eq!(err.to, ProjectStatus::Submitted);
    }
}
