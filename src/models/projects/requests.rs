use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ProjectLevel, ProjectStatus};

// 创建项目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "project.ts")]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    #[ts(type = "200 | 400")]
    pub level: ProjectLevel,
    pub study_program_id: i64,
    /// 管理员代学生创建时必填；学生创建时忽略，使用调用者本人
    pub student_id: Option<i64>,
}

// 提交项目请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "project.ts")]
pub struct SubmitProjectRequest {
    pub repository_url: Option<String>,
    pub documentation_url: Option<String>,
}

// 驳回项目请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "project.ts")]
pub struct RejectProjectRequest {
    pub reason: Option<String>,
}

// 手动状态流转请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "project.ts")]
pub struct TransitionProjectRequest {
    pub status: ProjectStatus,
}

// 项目列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "project.ts")]
pub struct ProjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<ProjectStatus>,
    pub level: Option<i32>,
    pub study_program_id: Option<i64>,
    pub student_id: Option<i64>,
    pub search: Option<String>,
}
