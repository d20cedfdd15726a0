use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::projects::entities::ProjectLevel;

// 各级别的提交截止时间
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "deadline.ts")]
pub struct Deadline {
    pub id: i64,
    #[ts(type = "200 | 400")]
    pub level: ProjectLevel,
    pub deadline: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Deadline {
    /// 给定提交时间是否晚于截止时间
    pub fn is_missed_by(&self, submitted_at: chrono::DateTime<chrono::Utc>) -> bool {
        submitted_at > self.deadline
    }
}

// 设置截止时间请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "deadline.ts")]
pub struct SetDeadlineRequest {
    pub deadline: chrono::DateTime<chrono::Utc>,
}
