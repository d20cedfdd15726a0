//! 项目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub level: i32,
    pub study_program_id: i64,
    #[sea_orm(unique)]
    pub student_id: i64,
    pub status: String,
    pub repository_url: Option<String>,
    pub documentation_url: Option<String>,
    pub submitted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_project(
        self,
    ) -> crate::errors::Result<crate::models::projects::entities::Project> {
        use crate::errors::CapstoneError;
        use crate::models::projects::entities::{Project, ProjectLevel, ProjectStatus};

        let status = self.status.parse::<ProjectStatus>().map_err(|e| {
            CapstoneError::database_operation(format!("项目 {} 状态数据损坏: {e}", self.id))
        })?;
        let level = ProjectLevel::try_from(self.level).map_err(|e| {
            CapstoneError::database_operation(format!("项目 {} 级别数据损坏: {e}", self.id))
        })?;

        Ok(Project {
            id: self.id,
            title: self.title,
            description: self.description,
            level,
            study_program_id: self.study_program_id,
            student_id: self.student_id,
            status,
            repository_url: self.repository_url,
            documentation_url: self.documentation_url,
            submitted_at: self.submitted_at.map(super::from_timestamp),
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        })
    }
}
