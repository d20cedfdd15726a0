//! 评分项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_id: i64,
    pub position: i32,
    pub criterion_name: String,
    pub max_score: f64,
    pub score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluations::Entity",
        from = "Column::EvaluationId",
        to = "super::evaluations::Column::Id",
        on_delete = "Cascade"
    )]
    Evaluation,
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_mark(self) -> crate::models::evaluations::entities::Mark {
        crate::models::evaluations::entities::Mark {
            id: self.id,
            evaluation_id: self.evaluation_id,
            position: self.position,
            criterion_name: self.criterion_name,
            max_score: self.max_score,
            score: self.score,
            comments: self.comments,
        }
    }
}
