//! 数据库仓储层
//!
//! 提供等级表与客户积分记录的数据访问接口，封装 SQL 操作细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 客户记录写入为整条覆盖的 upsert，不做字段级更新
//! - 定义 trait 接口以支持 mock 测试与内存实现

mod customer_repo;
pub mod memory;
mod tier_repo;
mod traits;

pub use customer_repo::PgCustomerRewardsRepository;
pub use memory::{MemoryCustomerRewardsRepository, MemoryTierRepository};
pub use tier_repo::PgTierRepository;
pub use traits::*;
