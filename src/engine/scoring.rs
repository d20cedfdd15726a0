//! 评分计算
//!
//! 单次评分的百分比 = round(Σscore / Σmax_score × 100, 2)，满分总和为 0 时记 0。
//! 综合成绩按固定的 70（项目）+ 30（答辩）= 100 分制，原始得分之和即百分比。

use crate::engine::rubric::RubricArea;
use crate::models::evaluations::entities::{
    CombinedGrade, EvaluationCategory, LetterGrade, RubricSubtotals,
};
use crate::utils::validate::ValidatedMarks;

/// 项目类评分满分
pub const PROJECT_POINTS: f64 = 70.0;
/// 答辩类评分满分
pub const PRESENTATION_POINTS: f64 = 30.0;
/// 综合满分
pub const RUBRIC_TOTAL_POINTS: f64 = PROJECT_POINTS + PRESENTATION_POINTS;

/// 一次评分的计算结果
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSheet {
    pub achieved_points: f64,
    pub max_points: f64,
    pub percentage: f64,
    pub subtotals: RubricSubtotals,
}

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub struct ScoringEngine;

impl ScoringEngine {
    pub fn percentage(achieved: f64, maximum: f64) -> f64 {
        if maximum <= 0.0 {
            return 0.0;
        }
        round2(achieved / maximum * 100.0)
    }

    /// 汇总某一类评分的全部评分项
    pub fn score(category: EvaluationCategory, marks: &ValidatedMarks) -> ScoreSheet {
        let mut achieved_points = 0.0;
        let mut max_points = 0.0;
        let mut subtotals = RubricSubtotals::default();

        for mark in marks.as_slice() {
            achieved_points += mark.score;
            max_points += mark.max_score;
            if let Some(area) = RubricArea::classify(category, &mark.criterion_name) {
                area.accumulate(&mut subtotals, mark.score);
            }
        }
        RubricArea::fill_missing(category, &mut subtotals);

        ScoreSheet {
            achieved_points,
            max_points,
            percentage: Self::percentage(achieved_points, max_points),
            subtotals,
        }
    }

    pub fn letter_grade(percentage: f64) -> LetterGrade {
        if percentage >= 90.0 {
            LetterGrade::A
        } else if percentage >= 80.0 {
            LetterGrade::B
        } else if percentage >= 70.0 {
            LetterGrade::C
        } else if percentage >= 60.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    /// 由两类评分的原始得分计算综合成绩
    pub fn combine(project_points: f64, presentation_points: f64) -> CombinedGrade {
        let total = project_points + presentation_points;
        let percentage = round2(total / RUBRIC_TOTAL_POINTS * 100.0);
        CombinedGrade {
            project_points,
            presentation_points,
            percentage,
            letter_grade: Self::letter_grade(percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::requests::MarkInput;
    use crate::utils::validate::validate_marks;

    fn marks(items: &[(&str, f64, f64)]) -> ValidatedMarks {
        validate_marks(
            items
                .iter()
                .map(|(name, max, score)| MarkInput::new(*name, *max, *score))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_seventy_of_hundred_is_seventy_percent() {
        let sheet = ScoringEngine::score(
            EvaluationCategory::Project,
            &marks(&[("Code Quality", 40.0, 30.0), ("Functionality", 60.0, 40.0)]),
        );
        assert_eq!(sheet.achieved_points, 70.0);
        assert_eq!(sheet.max_points, 100.0);
        assert_eq!(sheet.percentage, 70.0);
    }

    #[test]
    fn test_percentage_rounds_to_two_places() {
        let sheet = ScoringEngine::score(
            EvaluationCategory::Presentation,
            &marks(&[("Clarity", 3.0, 2.0)]),
        );
        assert_eq!(sheet.percentage, 66.67);
    }

    #[test]
    fn test_zero_maximum_yields_zero_percent() {
        let sheet = ScoringEngine::score(
            EvaluationCategory::Project,
            &marks(&[("Attendance", 0.0, 0.0)]),
        );
        assert_eq!(sheet.percentage, 0.0);
    }

    #[test]
    fn test_subtotals_for_project_category() {
        let sheet = ScoringEngine::score(
            EvaluationCategory::Project,
            &marks(&[
                ("Code Quality", 20.0, 17.0),
                ("Code quality (tests)", 5.0, 4.0),
                ("Functionality", 30.0, 25.0),
                ("Innovation", 15.0, 10.0),
            ]),
        );
        assert_eq!(sheet.subtotals.code_quality, Some(21.0));
        assert_eq!(sheet.subtotals.documentation, Some(0.0));
        assert_eq!(sheet.subtotals.functionality, Some(25.0));
        assert_eq!(sheet.subtotals.clarity_communication, None);
        // 未识别的评分项仍计入总分
        assert_eq!(sheet.achieved_points, 56.0);
        assert_eq!(sheet.max_points, 70.0);
        assert_eq!(sheet.percentage, 80.0);
    }

    #[test]
    fn test_subtotals_for_presentation_category() {
        let sheet = ScoringEngine::score(
            EvaluationCategory::Presentation,
            &marks(&[
                ("Clarity & Communication", 10.0, 9.0),
                ("Visual Presentation", 10.0, 7.0),
                ("Technical Explanation", 10.0, 8.0),
            ]),
        );
        assert_eq!(sheet.subtotals.clarity_communication, Some(9.0));
        assert_eq!(sheet.subtotals.visual_presentation, Some(7.0));
        assert_eq!(sheet.subtotals.technical_explanation, Some(8.0));
        assert_eq!(sheet.subtotals.code_quality, None);
    }

    #[test]
    fn test_rescoring_uses_only_new_marks() {
        let first = ScoringEngine::score(
            EvaluationCategory::Project,
            &marks(&[("Code Quality", 20.0, 20.0), ("Documentation", 20.0, 20.0)]),
        );
        let second = ScoringEngine::score(
            EvaluationCategory::Project,
            &marks(&[("Functionality", 30.0, 15.0)]),
        );
        assert_eq!(first.percentage, 100.0);
        assert_eq!(second.percentage, 50.0);
        assert_eq!(second.achieved_points, 15.0);
        assert_eq!(second.subtotals.code_quality, Some(0.0));
    }

    #[test]
    fn test_combined_grade_a_then_b() {
        let combined = ScoringEngine::combine(65.0, 25.0);
        assert_eq!(combined.percentage, 90.0);
        assert_eq!(combined.letter_grade, LetterGrade::A);

        let lowered = ScoringEngine::combine(65.0, 20.0);
        assert_eq!(lowered.percentage, 85.0);
        assert_eq!(lowered.letter_grade, LetterGrade::B);
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(ScoringEngine::letter_grade(90.0), LetterGrade::A);
        assert_eq!(ScoringEngine::letter_grade(89.99), LetterGrade::B);
        assert_eq!(ScoringEngine::letter_grade(80.0), LetterGrade::B);
        assert_eq!(ScoringEngine::letter_grade(70.0), LetterGrade::C);
        assert_eq!(ScoringEngine::letter_grade(60.0), LetterGrade::D);
        assert_eq!(ScoringEngine::letter_grade(59.99), LetterGrade::F);
        assert_eq!(ScoringEngine::letter_grade(0.0), LetterGrade::F);
    }

    #[test]
    fn test_combined_boundary_at_sixty() {
        assert_eq!(
            ScoringEngine::combine(42.0, 18.0).letter_grade,
            LetterGrade::D
        );
        assert_eq!(
            ScoringEngine::combine(41.99, 18.0).letter_grade,
            LetterGrade::F
        );
    }
}
