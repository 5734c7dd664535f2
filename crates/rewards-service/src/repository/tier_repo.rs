//! 等级表仓储

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::TierRepositoryTrait;
use crate::error::Result;
use crate::models::Tier;

/// PostgreSQL 等级表仓储
pub struct PgTierRepository {
    pool: PgPool,
}

impl PgTierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TierRepositoryTrait for PgTierRepository {
    async fn list_tiers(&self) -> Result<Vec<Tier>> {
        let tiers = sqlx::query_as::<_, Tier>(
            r#"
            SELECT tier_code, display_name, threshold_points
            FROM reward_tiers
            ORDER BY threshold_points ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tiers)
    }
}
