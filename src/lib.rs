//! Rust Classroom - 课堂工作流与授权服务
//!
//! 三种角色（管理员、教师、学员）共享账号、课程场次、选课、作业、资料与考勤数据。
//!
//! # 架构
//! - `authz`: 统一授权判定（角色 + 归属）
//! - `blobs`: 附件存储能力（本地文件 / 内存）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod authz;
pub mod blobs;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
