use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{CombinedGrade, Evaluation, EvaluationCategory};

// 项目的评分汇总
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct ProjectEvaluationsResponse {
    pub project_evaluation: Option<Evaluation>,
    pub presentation_evaluation: Option<Evaluation>,
    pub combined: Option<CombinedGrade>,
}

// 评分细则模板项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct RubricCriterion {
    pub criterion_name: String,
    pub max_score: f64,
    pub description: String,
}

// 评分细则模板
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct RubricTemplate {
    pub category: EvaluationCategory,
    pub name: String,
    pub description: String,
    pub criteria: Vec<RubricCriterion>,
}
