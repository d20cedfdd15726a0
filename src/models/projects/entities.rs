use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 项目状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "project.ts")]
pub enum ProjectStatus {
    PendingApproval, // 学生创建，等待审批
    Draft,           // 已审批，尚未提交
    Submitted,       // 已提交链接
    UnderReview,     // 评审中
    Evaluated,       // 两类评分均已完成
    Rejected,        // 被管理员驳回
}

impl ProjectStatus {
    pub const PENDING_APPROVAL: &'static str = "pending_approval";
    pub const DRAFT: &'static str = "draft";
    pub const SUBMITTED: &'static str = "submitted";
    pub const UNDER_REVIEW: &'static str = "under_review";
    pub const EVALUATED: &'static str = "evaluated";
    pub const REJECTED: &'static str = "rejected";

    pub fn all() -> &'static [ProjectStatus] {
        &[
            ProjectStatus::PendingApproval,
            ProjectStatus::Draft,
            ProjectStatus::Submitted,
            ProjectStatus::UnderReview,
            ProjectStatus::Evaluated,
            ProjectStatus::Rejected,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::PendingApproval => Self::PENDING_APPROVAL,
            ProjectStatus::Draft => Self::DRAFT,
            ProjectStatus::Submitted => Self::SUBMITTED,
            ProjectStatus::UnderReview => Self::UNDER_REVIEW,
            ProjectStatus::Evaluated => Self::EVALUATED,
            ProjectStatus::Rejected => Self::REJECTED,
        }
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING_APPROVAL => Ok(ProjectStatus::PendingApproval),
            Self::DRAFT => Ok(ProjectStatus::Draft),
            Self::SUBMITTED => Ok(ProjectStatus::Submitted),
            Self::UNDER_REVIEW => Ok(ProjectStatus::UnderReview),
            Self::EVALUATED => Ok(ProjectStatus::Evaluated),
            Self::REJECTED => Ok(ProjectStatus::Rejected),
            _ => Err(format!(
                "Invalid project status: '{s}'. Supported: pending_approval, draft, submitted, under_review, evaluated, rejected"
            )),
        }
    }
}

// 项目级别（200 / 400 两档）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProjectLevel {
    Level200,
    Level400,
}

impl ProjectLevel {
    pub fn as_i32(&self) -> i32 {
        match self {
            ProjectLevel::Level200 => 200,
            ProjectLevel::Level400 => 400,
        }
    }

    pub fn all() -> &'static [ProjectLevel] {
        &[ProjectLevel::Level200, ProjectLevel::Level400]
    }
}

impl TryFrom<i32> for ProjectLevel {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            200 => Ok(ProjectLevel::Level200),
            400 => Ok(ProjectLevel::Level400),
            _ => Err(format!("Invalid project level: {value}. Supported: 200, 400")),
        }
    }
}

impl Serialize for ProjectLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.as_i32())
    }
}

impl<'de> Deserialize<'de> for ProjectLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        ProjectLevel::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ProjectLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

// 毕业设计项目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "project.ts")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[ts(type = "200 | 400")]
    pub level: ProjectLevel,
    pub study_program_id: i64,
    pub student_id: i64,
    pub status: ProjectStatus,
    pub repository_url: Option<String>,
    pub documentation_url: Option<String>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in ProjectStatus::all() {
            assert_eq!(status.to_string().parse::<ProjectStatus>(), Ok(*status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_strings() {
        assert!("DRAFT".parse::<ProjectStatus>().is_err());
        assert!("approved".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn test_level_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ProjectLevel::Level400).unwrap(), "400");
        assert_eq!(
            serde_json::from_str::<ProjectLevel>("200").unwrap(),
            ProjectLevel::Level200
        );
        assert!(serde_json::from_str::<ProjectLevel>("300").is_err());
    }
}
