//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CustomerRewards, Tier};

/// 等级表仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TierRepositoryTrait: Send + Sync {
    /// 列出全部等级，不保证顺序
    async fn list_tiers(&self) -> Result<Vec<Tier>>;
}

/// 客户积分仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRewardsRepositoryTrait: Send + Sync {
    /// 按客户标识读取完整记录
    async fn get(&self, customer_id: &str) -> Result<Option<CustomerRewards>>;

    /// 整条写入：不存在则插入，存在则覆盖（保留首次创建时间）
    async fn upsert(&self, record: &CustomerRewards) -> Result<CustomerRewards>;

    /// 列出全部客户记录，按客户标识排序
    async fn list_all(&self) -> Result<Vec<CustomerRewards>>;
}
