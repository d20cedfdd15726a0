//! 评分细则词表与模板

use crate::models::evaluations::entities::{EvaluationCategory, RubricSubtotals};
use crate::models::evaluations::responses::{RubricCriterion, RubricTemplate};

/// 可识别的评分细则小项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RubricArea {
    CodeQuality,
    Documentation,
    Functionality,
    ClarityCommunication,
    VisualPresentation,
    TechnicalExplanation,
}

impl RubricArea {
    /// 某一类别下的小项，顺序即匹配优先级
    pub fn for_category(category: EvaluationCategory) -> &'static [RubricArea] {
        match category {
            EvaluationCategory::Project => &[
                RubricArea::CodeQuality,
                RubricArea::Documentation,
                RubricArea::Functionality,
            ],
            EvaluationCategory::Presentation => &[
                RubricArea::ClarityCommunication,
                RubricArea::VisualPresentation,
                RubricArea::TechnicalExplanation,
            ],
        }
    }

    /// 细则名称中出现任一关键词即归入该小项（小写比较）
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            RubricArea::CodeQuality => &["code quality"],
            RubricArea::Documentation => &["documentation"],
            RubricArea::Functionality => &["functionality"],
            RubricArea::ClarityCommunication => &["clarity", "communication"],
            RubricArea::VisualPresentation => &["visual", "presentation"],
            RubricArea::TechnicalExplanation => &["technical", "explanation"],
        }
    }

    /// 按名称归类；无法识别时返回 `None`，该项仍计入总分
    pub fn classify(category: EvaluationCategory, criterion_name: &str) -> Option<RubricArea> {
        let name = criterion_name.to_lowercase();
        Self::for_category(category)
            .iter()
            .copied()
            .find(|area| area.keywords().iter().any(|kw| name.contains(kw)))
    }

    fn slot<'a>(&self, subtotals: &'a mut RubricSubtotals) -> &'a mut Option<f64> {
        match self {
            RubricArea::CodeQuality => &mut subtotals.code_quality,
            RubricArea::Documentation => &mut subtotals.documentation,
            RubricArea::Functionality => &mut subtotals.functionality,
            RubricArea::ClarityCommunication => &mut subtotals.clarity_communication,
            RubricArea::VisualPresentation => &mut subtotals.visual_presentation,
            RubricArea::TechnicalExplanation => &mut subtotals.technical_explanation,
        }
    }

    /// 累加到对应小计
    pub fn accumulate(&self, subtotals: &mut RubricSubtotals, score: f64) {
        let slot = self.slot(subtotals);
        *slot = Some(slot.unwrap_or(0.0) + score);
    }

    /// 将本类别尚未出现的小项补为 0
    pub fn fill_missing(category: EvaluationCategory, subtotals: &mut RubricSubtotals) {
        for area in Self::for_category(category) {
            let slot = area.slot(subtotals);
            if slot.is_none() {
                *slot = Some(0.0);
            }
        }
    }
}

fn criterion(name: &str, max_score: f64, description: &str) -> RubricCriterion {
    RubricCriterion {
        criterion_name: name.to_string(),
        max_score,
        description: description.to_string(),
    }
}

/// 标准评分模板：项目 70 分，答辩 30 分
pub fn templates() -> Vec<RubricTemplate> {
    vec![
        RubricTemplate {
            category: EvaluationCategory::Project,
            name: "Project Evaluation".to_string(),
            description: "Evaluation of project work: Code Quality, Documentation, and Functionality"
                .to_string(),
            criteria: vec![
                criterion(
                    "Code Quality",
                    20.0,
                    "Code structure, organization, and adherence to best practices",
                ),
                criterion(
                    "Documentation",
                    20.0,
                    "Completeness and clarity of documentation",
                ),
                criterion(
                    "Functionality",
                    30.0,
                    "How well the project meets functional requirements",
                ),
            ],
        },
        RubricTemplate {
            category: EvaluationCategory::Presentation,
            name: "Presentation Evaluation".to_string(),
            description: "Evaluation of presentation: Clarity & Communication, Visual Presentation, and Technical Explanation"
                .to_string(),
            criteria: vec![
                criterion(
                    "Clarity & Communication",
                    10.0,
                    "Clear communication of ideas and concepts",
                ),
                criterion(
                    "Visual Presentation",
                    10.0,
                    "Quality of visual materials and slides",
                ),
                criterion(
                    "Technical Explanation",
                    10.0,
                    "Ability to explain technical aspects clearly",
                ),
            ],
        },
    ]
}
