//! 客户积分与等级服务
//!
//! 根据订单累计客户积分，并按等级表判定客户当前等级、下一等级与升级进度。
//!
//! ## 模块结构
//!
//! - `tier_table`: 按门槛排序的只读等级表与有序查询
//! - `engine`: 等级判定与进度计算（纯函数）
//! - `tier_catalog`: 等级表快照缓存
//! - `service`: 积分累计与查询编排
//! - `repository`: 存储访问（PostgreSQL / 内存）
//! - `lock`: 客户级互斥锁
//! - `handlers` / `routes` / `state`: HTTP 接口
//! - `worker`: 等级表定时刷新

pub mod dto;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod lock;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod tier_catalog;
pub mod tier_table;
pub mod worker;

pub use dto::{AccrualRequest, ApiResponse, CustomerFilter};
pub use error::{ErrorKind, Result, RewardsError};
pub use models::{CustomerRewards, Tier, TierAssignment};
pub use service::{RewardsService, ServiceSettings};
pub use tier_catalog::TierCatalog;
pub use tier_table::TierTable;
