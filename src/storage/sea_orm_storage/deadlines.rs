//! 截止时间存储操作

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::SeaOrmStorage;
use crate::entity::deadlines::{ActiveModel, Column, Entity as Deadlines};
use crate::errors::{CapstoneError, Result};
use crate::models::{deadlines::Deadline, projects::entities::ProjectLevel};

/// 查询某一级别的截止时间
pub(super) async fn find_deadline<C: ConnectionTrait>(
    conn: &C,
    level: ProjectLevel,
) -> Result<Option<Deadline>> {
    Deadlines::find()
        .filter(Column::Level.eq(level.as_i32()))
        .one(conn)
        .await
        .map_err(|e| CapstoneError::database_operation(format!("查询截止时间失败: {e}")))?
        .map(|m| m.into_deadline())
        .transpose()
}

impl SeaOrmStorage {
    /// 设置截止时间，已存在则覆盖
    pub async fn set_deadline_impl(
        &self,
        level: ProjectLevel,
        deadline: DateTime<Utc>,
    ) -> Result<Deadline> {
        let now = Utc::now().timestamp();

        let existing = Deadlines::find()
            .filter(Column::Level.eq(level.as_i32()))
            .one(&self.db)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询截止时间失败: {e}")))?;

        let model = match existing {
            Some(existing) => ActiveModel {
                id: Set(existing.id),
                deadline: Set(deadline.timestamp()),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&self.db)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("更新截止时间失败: {e}")))?,
            None => ActiveModel {
                level: Set(level.as_i32()),
                deadline: Set(deadline.timestamp()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("创建截止时间失败: {e}")))?,
        };

        info!(%level, deadline = %deadline, "截止时间已设置");
        model.into_deadline()
    }

    /// 获取某一级别的截止时间
    pub async fn get_deadline_by_level_impl(&self, level: ProjectLevel) -> Result<Option<Deadline>> {
        find_deadline(&self.db, level).await
    }

    /// 列出全部截止时间
    pub async fn list_deadlines_impl(&self) -> Result<Vec<Deadline>> {
        Deadlines::find()
            .order_by_asc(Column::Level)
            .all(&self.db)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询截止时间列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_deadline())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::storage;
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_set_deadline_upserts_per_level() {
        let storage = storage().await;
        let first = Utc.with_ymd_and_hms(2025, 5, 30, 23, 59, 0).unwrap();
        let moved = Utc.with_ymd_and_hms(2025, 6, 6, 23, 59, 0).unwrap();

        let created = storage
            .set_deadline_impl(ProjectLevel::Level400, first)
            .await
            .unwrap();
        let updated = storage
            .set_deadline_impl(ProjectLevel::Level400, moved)
            .await
            .unwrap();

        assert_eq!(created.id, updated.id);
        assert_eq!(updated.deadline, moved);
        assert_eq!(storage.list_deadlines_impl().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_deadline_by_level() {
        let storage = storage().await;
        let at = Utc.with_ymd_and_hms(2025, 5, 30, 23, 59, 0).unwrap();
        storage
            .set_deadline_impl(ProjectLevel::Level200, at)
            .await
            .unwrap();

        let found = storage
            .get_deadline_by_level_impl(ProjectLevel::Level200)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.level, ProjectLevel::Level200);
        assert!(
            storage
                .get_deadline_by_level_impl(ProjectLevel::Level400)
                .await
                .unwrap()
                .is_none()
        );
    }
}
