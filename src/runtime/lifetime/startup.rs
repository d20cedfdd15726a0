use crate::config::AppConfig;
use crate::models::projects::entities::ProjectLevel;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 检查各级别的截止时间
/// 未设置截止时间的级别不会把任何提交判定为逾期
async fn check_deadlines(storage: &Arc<dyn Storage>) {
    let deadlines = match storage.list_deadlines().await {
        Ok(deadlines) => deadlines,
        Err(e) => {
            warn!("Failed to load deadlines: {}", e);
            return;
        }
    };

    for level in ProjectLevel::all() {
        match deadlines.iter().find(|d| d.level == *level) {
            Some(deadline) => debug!("Level {} deadline: {}", level, deadline.deadline),
            None => warn!(
                "No submission deadline configured for level {}; late submissions will not be flagged",
                level
            ),
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化、迁移与启动检查
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let scoring = AppConfig::get().scoring;
    info!(
        "Combined grade re-sync on revision: {}",
        if scoring.resync_combined_on_revision {
            "enabled"
        } else {
            "disabled"
        }
    );

    check_deadlines(&storage).await;

    StartupContext { storage }
}
