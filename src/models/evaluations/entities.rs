use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评分类别
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "evaluation.ts")]
pub enum EvaluationCategory {
    Project,      // 代码质量、文档、功能
    Presentation, // 表达沟通、视觉呈现、技术讲解
}

impl EvaluationCategory {
    pub const PROJECT: &'static str = "PROJECT";
    pub const PRESENTATION: &'static str = "PRESENTATION";

    pub fn all() -> &'static [EvaluationCategory] {
        &[EvaluationCategory::Project, EvaluationCategory::Presentation]
    }

    /// 另一类评分
    pub fn counterpart(&self) -> EvaluationCategory {
        match self {
            EvaluationCategory::Project => EvaluationCategory::Presentation,
            EvaluationCategory::Presentation => EvaluationCategory::Project,
        }
    }
}

impl<'de> Deserialize<'de> for EvaluationCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for EvaluationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationCategory::Project => write!(f, "{}", Self::PROJECT),
            EvaluationCategory::Presentation => write!(f, "{}", Self::PRESENTATION),
        }
    }
}

impl std::str::FromStr for EvaluationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PROJECT => Ok(EvaluationCategory::Project),
            Self::PRESENTATION => Ok(EvaluationCategory::Presentation),
            _ => Err(format!(
                "Invalid evaluation category: '{s}'. Supported: PROJECT, PRESENTATION"
            )),
        }
    }
}

// 等级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(LetterGrade::A),
            "B" => Ok(LetterGrade::B),
            "C" => Ok(LetterGrade::C),
            "D" => Ok(LetterGrade::D),
            "F" => Ok(LetterGrade::F),
            _ => Err(format!("Invalid letter grade: {s}")),
        }
    }
}

// 单项评分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct Mark {
    pub id: i64,
    pub evaluation_id: i64,
    pub position: i32,
    pub criterion_name: String,
    pub max_score: f64,
    pub score: f64,
    pub comments: Option<String>,
}

/// 按评分细则名称归类出的小计，仅作参考，权威数值是全部评分项的总和
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct RubricSubtotals {
    pub code_quality: Option<f64>,
    pub documentation: Option<f64>,
    pub functionality: Option<f64>,
    pub clarity_communication: Option<f64>,
    pub visual_presentation: Option<f64>,
    pub technical_explanation: Option<f64>,
}

// 综合成绩
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct CombinedGrade {
    pub project_points: f64,
    pub presentation_points: f64,
    pub percentage: f64,
    pub letter_grade: LetterGrade,
}

// 评分记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub project_id: i64,
    pub evaluator_id: i64,
    pub category: EvaluationCategory,
    /// 本类评分的百分比（0–100）
    pub total_score: f64,
    pub achieved_points: f64,
    pub max_points: f64,
    pub subtotals: RubricSubtotals,
    pub combined_project_points: Option<f64>,
    pub combined_presentation_points: Option<f64>,
    pub combined_percentage: Option<f64>,
    pub letter_grade: Option<LetterGrade>,
    pub comments: Option<String>,
    pub marks: Vec<Mark>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Evaluation {
    /// 已写入的综合成绩（两类评分均存在后才有）
    pub fn combined(&self) -> Option<CombinedGrade> {
        Some(CombinedGrade {
            project_points: self.combined_project_points?,
            presentation_points: self.combined_presentation_points?,
            percentage: self.combined_percentage?,
            letter_grade: self.letter_grade?,
        })
    }
}
