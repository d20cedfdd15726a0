//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 涉及多个实体的写操作都在一个显式事务内完成，事务未提交即被丢弃时自动回滚。

mod deadlines;
mod evaluations;
mod projects;

use crate::config::{AppConfig, ScoringConfig};
use crate::errors::{CapstoneError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
    pub(crate) scoring: ScoringConfig,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::with_connection(db, config.scoring).await?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 基于已有连接创建存储实例，并运行迁移
    pub async fn with_connection(db: DatabaseConnection, scoring: ScoringConfig) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db, scoring })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CapstoneError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CapstoneError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CapstoneError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CapstoneError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    actors::ActorRole,
    deadlines::Deadline,
    evaluations::{
        entities::{CombinedGrade, Evaluation},
        requests::{RecordEvaluationRequest, ReviseEvaluationRequest},
        responses::ProjectEvaluationsResponse,
    },
    projects::{
        entities::{Project, ProjectLevel, ProjectStatus},
        requests::{CreateProjectRequest, ProjectListQuery, SubmitProjectRequest},
        responses::{ProjectListResponse, SubmissionReceipt},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 项目模块
    async fn create_project(
        &self,
        req: CreateProjectRequest,
        created_by: ActorRole,
    ) -> Result<Project> {
        self.create_project_impl(req, created_by).await
    }

    async fn get_project_by_id(&self, project_id: i64) -> Result<Option<Project>> {
        self.get_project_by_id_impl(project_id).await
    }

    async fn list_projects_with_pagination(
        &self,
        query: ProjectListQuery,
    ) -> Result<ProjectListResponse> {
        self.list_projects_with_pagination_impl(query).await
    }

    async fn delete_project(&self, project_id: i64) -> Result<bool> {
        self.delete_project_impl(project_id).await
    }

    // 状态流转
    async fn transition_project(&self, project_id: i64, target: ProjectStatus) -> Result<Project> {
        self.transition_project_impl(project_id, target).await
    }

    async fn approve_project(&self, project_id: i64) -> Result<Project> {
        self.approve_project_impl(project_id).await
    }

    async fn reject_project(&self, project_id: i64, reason: Option<String>) -> Result<Project> {
        self.reject_project_impl(project_id, reason).await
    }

    async fn submit_project(
        &self,
        project_id: i64,
        req: SubmitProjectRequest,
    ) -> Result<SubmissionReceipt> {
        self.submit_project_impl(project_id, req).await
    }

    // 评分模块
    async fn record_evaluation(
        &self,
        project_id: i64,
        evaluator_id: i64,
        req: RecordEvaluationRequest,
    ) -> Result<Evaluation> {
        self.record_evaluation_impl(project_id, evaluator_id, req)
            .await
    }

    async fn revise_evaluation(
        &self,
        evaluation_id: i64,
        req: ReviseEvaluationRequest,
    ) -> Result<Evaluation> {
        self.revise_evaluation_impl(evaluation_id, req).await
    }

    async fn finalize_combined_grade(&self, project_id: i64) -> Result<CombinedGrade> {
        self.finalize_combined_grade_impl(project_id).await
    }

    async fn list_project_evaluations(
        &self,
        project_id: i64,
    ) -> Result<ProjectEvaluationsResponse> {
        self.list_project_evaluations_impl(project_id).await
    }

    async fn get_evaluation_by_id(&self, evaluation_id: i64) -> Result<Option<Evaluation>> {
        self.get_evaluation_by_id_impl(evaluation_id).await
    }

    // 截止时间模块
    async fn set_deadline(
        &self,
        level: ProjectLevel,
        deadline: chrono::DateTime<chrono::Utc>,
    ) -> Result<Deadline> {
        self.set_deadline_impl(level, deadline).await
    }

    async fn get_deadline_by_level(&self, level: ProjectLevel) -> Result<Option<Deadline>> {
        self.get_deadline_by_level_impl(level).await
    }

    async fn list_deadlines(&self) -> Result<Vec<Deadline>> {
        self.list_deadlines_impl().await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::config::ScoringConfig;
    use crate::models::actors::ActorRole;
    use crate::models::projects::{
        entities::{Project, ProjectLevel},
        requests::{CreateProjectRequest, SubmitProjectRequest},
    };
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::path::PathBuf;
    use std::str::FromStr;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    /// 单连接的内存 SQLite，事务内禁止再访问 `self.db`
    pub async fn memory_storage(scoring: ScoringConfig) -> SeaOrmStorage {
        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .unwrap();
        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        SeaOrmStorage::with_connection(db, scoring).await.unwrap()
    }

    pub async fn storage() -> SeaOrmStorage {
        memory_storage(ScoringConfig::default()).await
    }

    /// 临时数据库文件，离开作用域时连同 WAL 文件一起删除
    pub struct TempDatabase {
        path: PathBuf,
    }

    impl Drop for TempDatabase {
        fn drop(&mut self) {
            for suffix in ["", "-wal", "-shm"] {
                let mut file = self.path.clone().into_os_string();
                file.push(suffix);
                let _ = std::fs::remove_file(file);
            }
        }
    }

    /// 基于文件的 WAL SQLite，多连接，用于并发写入的测试
    pub async fn file_storage(connections: u32) -> (SeaOrmStorage, TempDatabase) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "capstone-eval-{}-{nanos}.db",
            std::process::id()
        ));
        let opt = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10))
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(connections)
            .connect_with(opt)
            .await
            .unwrap();
        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        let storage = SeaOrmStorage::with_connection(db, ScoringConfig::default())
            .await
            .unwrap();
        (storage, TempDatabase { path })
    }

    pub fn create_request(student_id: i64) -> CreateProjectRequest {
        CreateProjectRequest {
            title: "Library management system".to_string(),
            description: Some("Inventory and lending for the faculty library".to_string()),
            level: ProjectLevel::Level400,
            study_program_id: 3,
            student_id: Some(student_id),
        }
    }

    /// 创建一个已提交的项目
    pub async fn submitted_project(storage: &SeaOrmStorage, student_id: i64) -> Project {
        let project = storage
            .create_project_impl(create_request(student_id), ActorRole::Admin)
            .await
            .unwrap();
        storage
            .submit_project_impl(
                project.id,
                SubmitProjectRequest {
                    repository_url: Some("https://github.com/example/library".to_string()),
                    documentation_url: None,
                },
            )
            .await
            .unwrap()
            .project
    }
}
