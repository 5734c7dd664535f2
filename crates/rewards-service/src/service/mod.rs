//! 业务服务层
//!
//! 串联等级目录、客户锁与仓储，对外提供积分累计与查询。

mod rewards_service;

pub use rewards_service::{RewardsService, ServiceSettings};
