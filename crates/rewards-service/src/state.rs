//! 应用状态定义

use std::sync::Arc;

use crate::service::RewardsService;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub rewards: Arc<RewardsService>,
}

impl AppState {
    pub fn new(rewards: Arc<RewardsService>) -> Self {
        Self { rewards }
    }
}
