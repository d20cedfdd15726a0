//! 截止时间实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "deadlines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub level: i32,
    pub deadline: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_deadline(self) -> crate::errors::Result<crate::models::deadlines::Deadline> {
        use crate::models::projects::entities::ProjectLevel;

        let level = ProjectLevel::try_from(self.level).map_err(|e| {
            crate::errors::CapstoneError::database_operation(format!(
                "截止时间 {} 级别数据损坏: {e}",
                self.id
            ))
        })?;

        Ok(crate::models::deadlines::Deadline {
            id: self.id,
            level,
            deadline: super::from_timestamp(self.deadline),
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        })
    }
}
