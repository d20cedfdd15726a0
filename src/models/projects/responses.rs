use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Project;
use crate::models::PaginationInfo;
use crate::models::evaluations::entities::Evaluation;

// 项目列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "project.ts")]
pub struct ProjectListResponse {
    pub items: Vec<Project>,
    pub pagination: PaginationInfo,
}

// 项目详情（含评分）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "project.ts")]
pub struct ProjectDetailResponse {
    pub project: Project,
    pub evaluations: Vec<Evaluation>,
}

// 提交回执
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "project.ts")]
pub struct SubmissionReceipt {
    pub project: Project,
    /// 是否晚于该级别的截止时间
    pub is_late: bool,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}
