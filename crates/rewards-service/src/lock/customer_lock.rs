//! 进程内客户锁
//!
//! 每个客户标识对应一把 tokio 互斥锁，不同客户之间互不阻塞。
//! 锁条目在最后一个持有者释放后移除，锁表不会随客户数量无限增长。

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument, warn};

use crate::error::{Result, RewardsError};

type Slot = Arc<Mutex<()>>;

/// 客户锁表
#[derive(Debug, Default)]
pub struct CustomerLocks {
    slots: Arc<DashMap<String, Slot>>,
}

impl CustomerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取客户锁
    ///
    /// 在 `timeout` 内未拿到锁时返回 `LockTimeout`
    #[instrument(skip(self))]
    pub async fn acquire(&self, customer_id: &str, timeout: Duration) -> Result<CustomerLockGuard> {
        let slot = self
            .slots
            .entry(customer_id.to_string())
            .or_default()
            .value()
            .clone();

        match tokio::time::timeout(timeout, slot.lock_owned()).await {
            Ok(guard) => {
                debug!("Customer lock acquired");
                Ok(CustomerLockGuard {
                    customer_id: customer_id.to_string(),
                    slots: Arc::clone(&self.slots),
                    guard: Some(guard),
                })
            }
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "Customer lock wait timed out");
                Self::release_slot(&self.slots, customer_id);
                Err(RewardsError::LockTimeout(customer_id.to_string()))
            }
        }
    }

    /// 当前存在的锁条目数
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 没有其他持有者或等待者时移除条目
    fn release_slot(slots: &DashMap<String, Slot>, customer_id: &str) {
        slots.remove_if(customer_id, |_, slot| Arc::strong_count(slot) == 1);
    }
}

/// 客户锁守卫，离开作用域时释放
#[derive(Debug)]
pub struct CustomerLockGuard {
    customer_id: String,
    slots: Arc<DashMap<String, Slot>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for CustomerLockGuard {
    fn drop(&mut self) {
        // 先释放互斥锁本身（归还其持有的 Arc 引用），再尝试清理条目
        self.guard.take();
        CustomerLocks::release_slot(&self.slots, &self.customer_id);
    }
}
