use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: u64 = 20;
/// 每页条数上限
pub const MAX_PAGE_SIZE: u64 = 100;

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// 将可选的页码与页大小规整为合法取值（页码从 1 开始）
pub fn normalize_page(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1) as u64;
    let size = size
        .map(|s| s.clamp(1, MAX_PAGE_SIZE as i64) as u64)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    (page, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_page_defaults() {
        assert_eq!(normalize_page(None, None), (1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_normalize_page_clamps() {
        assert_eq!(normalize_page(Some(-3), Some(0)), (1, 1));
        assert_eq!(normalize_page(Some(4), Some(1000)), (4, MAX_PAGE_SIZE));
    }
}
