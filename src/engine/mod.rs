//! 项目生命周期与评分引擎
//!
//! - `lifecycle`: 项目状态机，唯一允许修改 `Project.status` 的代码路径
//! - `scoring`: 单次评分百分比、综合成绩与等级计算
//! - `rubric`: 评分细则词表与模板
//!
//! 这里只有纯计算；持久化与事务边界由存储层负责。

pub mod lifecycle;
pub mod rubric;
pub mod scoring;

pub use lifecycle::{InvalidTransition, LifecycleEvent, LifecycleManager, TransitionOutcome};
pub use scoring::{ScoreSheet, ScoringEngine};
