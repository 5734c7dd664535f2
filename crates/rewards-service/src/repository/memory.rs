//! 内存仓储
//!
//! 基于 DashMap 的仓储实现，供路由与服务测试替代 PostgreSQL。
//! 语义与 PostgreSQL 实现保持一致：upsert 整条覆盖并保留首次创建时间。

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

use super::traits::{CustomerRewardsRepositoryTrait, TierRepositoryTrait};
use crate::error::Result;
use crate::models::{CustomerRewards, Tier};

/// 内存等级表仓储
#[derive(Debug, Default)]
pub struct MemoryTierRepository {
    tiers: RwLock<Vec<Tier>>,
}

impl MemoryTierRepository {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self {
            tiers: RwLock::new(tiers),
        }
    }

    /// 替换整张等级表（模拟运营在存储侧调整等级）
    pub fn replace(&self, tiers: Vec<Tier>) {
        *self.tiers.write() = tiers;
    }
}

#[async_trait]
impl TierRepositoryTrait for MemoryTierRepository {
    async fn list_tiers(&self) -> Result<Vec<Tier>> {
        Ok(self.tiers.read().clone())
    }
}

/// 内存客户积分仓储
#[derive(Debug, Default)]
pub struct MemoryCustomerRewardsRepository {
    records: DashMap<String, CustomerRewards>,
}

impl MemoryCustomerRewardsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置记录（测试场景）
    pub fn seed(&self, record: CustomerRewards) {
        self.records.insert(record.customer_id.clone(), record);
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }
}

#[async_trait]
impl CustomerRewardsRepositoryTrait for MemoryCustomerRewardsRepository {
    async fn get(&self, customer_id: &str) -> Result<Option<CustomerRewards>> {
        Ok(self.records.get(customer_id).map(|r| r.value().clone()))
    }

    async fn upsert(&self, record: &CustomerRewards) -> Result<CustomerRewards> {
        let mut saved = record.clone();
        self.records
            .entry(record.customer_id.clone())
            .and_modify(|existing| {
                saved.created_at = existing.created_at;
                *existing = saved.clone();
            })
            .or_insert_with(|| saved.clone());
        Ok(saved)
    }

    async fn list_all(&self) -> Result<Vec<CustomerRewards>> {
        let mut records: Vec<CustomerRewards> =
            self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by(|a, b| a.customer_id.cmp(&b.customer_id));
        Ok(records)
    }
}
