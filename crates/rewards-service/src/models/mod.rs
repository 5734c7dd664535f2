//! 积分服务领域模型
//!
//! 包含等级定义、等级判定结果与客户积分记录

pub mod customer;
pub mod tier;

pub use customer::CustomerRewards;
pub use tier::{Tier, TierAssignment};
