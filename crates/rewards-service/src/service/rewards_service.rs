//! 积分服务
//!
//! 一次积分累计的完整流程：
//!
//! 1. 参数校验（失败时不触达存储）
//! 2. 获取客户锁，串行化同一客户的并发订单
//! 3. 读取已有记录，不存在则视为零积分新客户
//! 4. 累加订单积分，按当前等级表快照重算等级与进度
//! 5. 整条写回
//!
//! 每次存储调用都有超时限制，超时与存储失败都会中止本次累计，不留下部分写入。

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use rewards_shared::config::RewardsConfig;
use rewards_shared::observability::metrics;
use tracing::{info, instrument};

use crate::dto::AccrualRequest;
use crate::engine;
use crate::error::{ErrorKind, Result, RewardsError};
use crate::lock::CustomerLocks;
use crate::models::{CustomerRewards, Tier};
use crate::repository::CustomerRewardsRepositoryTrait;
use crate::tier_catalog::TierCatalog;

/// 服务运行参数
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    /// 单次存储调用超时
    pub store_timeout: Duration,
    /// 客户锁等待超时
    pub lock_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from(&RewardsConfig::default())
    }
}

impl From<&RewardsConfig> for ServiceSettings {
    fn from(config: &RewardsConfig) -> Self {
        Self {
            store_timeout: config.store_timeout(),
            lock_timeout: config.lock_timeout(),
        }
    }
}

/// 积分服务
pub struct RewardsService {
    customers: Arc<dyn CustomerRewardsRepositoryTrait>,
    catalog: Arc<TierCatalog>,
    locks: CustomerLocks,
    settings: ServiceSettings,
}

impl RewardsService {
    pub fn new(
        customers: Arc<dyn CustomerRewardsRepositoryTrait>,
        catalog: Arc<TierCatalog>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            customers,
            catalog,
            locks: CustomerLocks::new(),
            settings,
        }
    }

    pub fn catalog(&self) -> &Arc<TierCatalog> {
        &self.catalog
    }

    /// 为客户累计一笔订单的积分并返回更新后的完整记录
    pub async fn accrue(&self, request: AccrualRequest) -> Result<CustomerRewards> {
        let started = Instant::now();
        let result = self.accrue_inner(request).await;

        let status = match &result {
            Ok(_) => "success",
            Err(e) => match e.kind() {
                ErrorKind::Validation => "validation_error",
                ErrorKind::NotFound => "not_found",
                ErrorKind::Storage => "storage_error",
                ErrorKind::Internal => "internal_error",
            },
        };
        metrics::record_accrual(status, started.elapsed().as_secs_f64());

        result
    }

    #[instrument(skip(self, request))]
    async fn accrue_inner(&self, request: AccrualRequest) -> Result<CustomerRewards> {
        let command = request.into_command()?;
        info!(
            customer_id = %command.customer_id,
            order_total = command.order_total,
            "Parsed accrual arguments"
        );

        let _guard = self
            .locks
            .acquire(&command.customer_id, self.settings.lock_timeout)
            .await?;

        let existing = self
            .with_timeout("fetch_customer", self.customers.get(&command.customer_id))
            .await?;

        let now = Utc::now();
        let mut record = match existing {
            Some(record) => {
                info!(
                    customer_id = %record.customer_id,
                    points = record.points,
                    "Existing customer"
                );
                record
            }
            None => {
                info!(customer_id = %command.customer_id, "New customer");
                CustomerRewards::new(command.customer_id.clone(), now)
            }
        };

        let previous_points = record.points;
        let points = engine::accrue_points(previous_points, command.order_total);

        let table = self.catalog.snapshot();
        let assignment = engine::resolve(points, &table);
        record.apply(points, &assignment, now);

        let saved = self
            .with_timeout("upsert_customer", self.customers.upsert(&record))
            .await?;

        metrics::record_points_awarded(points.saturating_sub(previous_points));
        info!(
            customer_id = %saved.customer_id,
            points = saved.points,
            tier = saved.tier_code.as_deref().unwrap_or("-"),
            next_tier = saved.next_tier_code.as_deref().unwrap_or("-"),
            progress = saved.progress_fraction,
            "Customer rewards persisted"
        );

        Ok(saved)
    }

    /// 全部等级，按门槛升序
    pub fn list_tiers(&self) -> Vec<Tier> {
        self.catalog.snapshot().tiers().to_vec()
    }

    /// 查询单个客户的积分记录
    #[instrument(skip(self))]
    pub async fn get_customer(&self, customer_id: &str) -> Result<CustomerRewards> {
        self.with_timeout("fetch_customer", self.customers.get(customer_id))
            .await?
            .ok_or_else(|| RewardsError::CustomerNotFound(customer_id.to_string()))
    }

    /// 查询客户积分记录
    ///
    /// 未指定客户时返回全部记录；指定时返回零或一条
    #[instrument(skip(self))]
    pub async fn list_customers(&self, customer_id: Option<&str>) -> Result<Vec<CustomerRewards>> {
        match customer_id {
            Some(id) => Ok(self
                .with_timeout("fetch_customer", self.customers.get(id))
                .await?
                .into_iter()
                .collect()),
            None => {
                self.with_timeout("list_customers", self.customers.list_all())
                    .await
            }
        }
    }

    /// 为存储调用加上超时
    async fn with_timeout<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.settings.store_timeout, fut)
            .await
            .map_err(|_| RewardsError::StorageTimeout {
                operation: operation.to_string(),
            })?
    }
}
