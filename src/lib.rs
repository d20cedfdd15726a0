//! Capstone Evaluation - 毕业设计项目评审后端服务
//!
//! 基于 Actix Web 构建，负责项目生命周期管理与评分计算。
//!
//! # 架构
//! - `config`: 配置管理
//! - `engine`: 项目状态机与评分引擎（纯计算，不访问数据库）
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 身份与角色中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM，事务内组合状态机与评分引擎）
//! - `utils`: 工具函数

pub mod config;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
