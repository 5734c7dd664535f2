//! 等级表目录
//!
//! 持有当前生效的等级表快照，避免每次累计积分都查询存储。
//!
//! ## 刷新策略
//!
//! - 启动时加载一次；加载失败则服务无法启动
//! - 之后由 [`crate::worker::TierRefreshWorker`] 定时刷新
//! - 刷新失败时保留旧快照继续服务
//!
//! 快照通过 `ArcSwap` 整体替换，读取方拿到的 `Arc<TierTable>` 在一次累计过程中保持不变。

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use rewards_shared::observability::metrics;
use tracing::{info, warn};

use crate::error::{Result, RewardsError};
use crate::repository::TierRepositoryTrait;
use crate::tier_table::TierTable;

/// 等级表目录
pub struct TierCatalog {
    repo: Arc<dyn TierRepositoryTrait>,
    current: ArcSwap<TierTable>,
    store_timeout: Duration,
}

impl TierCatalog {
    /// 创建空目录，调用 [`load`](Self::load) 后才有等级数据
    pub fn new(repo: Arc<dyn TierRepositoryTrait>, store_timeout: Duration) -> Self {
        Self {
            repo,
            current: ArcSwap::from_pointee(TierTable::empty()),
            store_timeout,
        }
    }

    /// 以指定等级表初始化（测试或预热场景）
    pub fn with_table(
        repo: Arc<dyn TierRepositoryTrait>,
        store_timeout: Duration,
        table: TierTable,
    ) -> Self {
        metrics::set_tier_table_size(table.len());
        Self {
            repo,
            current: ArcSwap::from_pointee(table),
            store_timeout,
        }
    }

    /// 首次加载等级表
    pub async fn load(&self) -> Result<usize> {
        let size = self.refresh().await?;
        if size == 0 {
            warn!("Tier table is empty, every customer will stay untiered");
        }
        Ok(size)
    }

    /// 从存储重新加载等级表并替换快照
    ///
    /// 失败时旧快照保持不变，返回错误由调用方决定如何处理
    pub async fn refresh(&self) -> Result<usize> {
        let fetched = tokio::time::timeout(self.store_timeout, self.repo.list_tiers()).await;

        let tiers = match fetched {
            Ok(Ok(tiers)) => tiers,
            Ok(Err(e)) => {
                metrics::record_tier_refresh("failure");
                return Err(e);
            }
            Err(_) => {
                metrics::record_tier_refresh("timeout");
                return Err(RewardsError::StorageTimeout {
                    operation: "list_tiers".to_string(),
                });
            }
        };

        let table = TierTable::new(tiers);
        let size = table.len();
        self.current.store(Arc::new(table));

        metrics::record_tier_refresh("success");
        metrics::set_tier_table_size(size);
        info!(tiers = size, "Tier table loaded");

        Ok(size)
    }

    /// 当前等级表快照
    pub fn snapshot(&self) -> Arc<TierTable> {
        self.current.load_full()
    }
}
