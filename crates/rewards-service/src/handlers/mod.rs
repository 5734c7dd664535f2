//! HTTP 请求处理器

pub mod customer_rewards;
pub mod rewards;
