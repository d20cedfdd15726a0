//! 评分实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    pub evaluator_id: i64,
    pub category: String,
    pub total_score: f64,
    pub achieved_points: f64,
    pub max_points: f64,
    pub code_quality: Option<f64>,
    pub documentation: Option<f64>,
    pub functionality: Option<f64>,
    pub clarity_communication: Option<f64>,
    pub visual_presentation: Option<f64>,
    pub technical_explanation: Option<f64>,
    pub combined_project_points: Option<f64>,
    pub combined_presentation_points: Option<f64>,
    pub combined_percentage: Option<f64>,
    pub letter_grade: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Project,
    #[sea_orm(has_many = "super::evaluation_marks::Entity")]
    Marks,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::evaluation_marks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn category(&self) -> crate::errors::Result<crate::models::evaluations::entities::EvaluationCategory> {
        self.category.parse().map_err(|e| {
            crate::errors::CapstoneError::database_operation(format!(
                "评分 {} 类别数据损坏: {e}",
                self.id
            ))
        })
    }

    /// 连同评分项一起转换为业务模型，评分项按 position 排序
    pub fn into_evaluation(
        self,
        mut marks: Vec<super::evaluation_marks::Model>,
    ) -> crate::errors::Result<crate::models::evaluations::entities::Evaluation> {
        use crate::errors::CapstoneError;
        use crate::models::evaluations::entities::{Evaluation, LetterGrade, RubricSubtotals};

        let category = self.category()?;
        let letter_grade = self
            .letter_grade
            .as_deref()
            .map(|g| g.parse::<LetterGrade>())
            .transpose()
            .map_err(|e| {
                CapstoneError::database_operation(format!("评分 {} 等级数据损坏: {e}", self.id))
            })?;

        marks.sort_by_key(|m| m.position);

        Ok(Evaluation {
            id: self.id,
            project_id: self.project_id,
            evaluator_id: self.evaluator_id,
            category,
            total_score: self.total_score,
            achieved_points: self.achieved_points,
            max_points: self.max_points,
            subtotals: RubricSubtotals {
                code_quality: self.code_quality,
                documentation: self.documentation,
                functionality: self.functionality,
                clarity_communication: self.clarity_communication,
                visual_presentation: self.visual_presentation,
                technical_explanation: self.technical_explanation,
            },
            combined_project_points: self.combined_project_points,
            combined_presentation_points: self.combined_presentation_points,
            combined_percentage: self.combined_percentage,
            letter_grade,
            comments: self.comments,
            marks: marks.into_iter().map(|m| m.into_mark()).collect(),
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        })
    }
}
