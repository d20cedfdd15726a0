use serde::Deserialize;
use ts_rs::TS;

use super::entities::EvaluationCategory;

// 单项评分输入
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct MarkInput {
    pub criterion_name: String,
    pub max_score: f64,
    pub score: f64,
    #[serde(default)]
    pub comments: Option<String>,
}

impl MarkInput {
    pub fn new(criterion_name: impl Into<String>, max_score: f64, score: f64) -> Self {
        Self {
            criterion_name: criterion_name.into(),
            max_score,
            score,
            comments: None,
        }
    }
}

// 录入评分请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct RecordEvaluationRequest {
    pub category: EvaluationCategory,
    pub marks: Vec<MarkInput>,
    #[serde(default)]
    pub comments: Option<String>,
}

// 修订评分请求（整体替换评分项）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct ReviseEvaluationRequest {
    pub marks: Vec<MarkInput>,
    /// 为空时保留原有评语
    #[serde(default)]
    pub comments: Option<String>,
}
