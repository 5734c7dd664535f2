//! 客户积分仓储
//!
//! 写入采用 `INSERT ... ON CONFLICT DO UPDATE` 整条覆盖，单条语句即原子

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::CustomerRewardsRepositoryTrait;
use crate::error::Result;
use crate::models::CustomerRewards;

/// PostgreSQL 客户积分仓储
pub struct PgCustomerRewardsRepository {
    pool: PgPool,
}

impl PgCustomerRewardsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRewardsRepositoryTrait for PgCustomerRewardsRepository {
    async fn get(&self, customer_id: &str) -> Result<Option<CustomerRewards>> {
        let record = sqlx::query_as::<_, CustomerRewards>(
            r#"
            SELECT customer_id, points, tier_code, tier_name, next_tier_code,
                   next_tier_name, progress_fraction, created_at, updated_at
            FROM customer_rewards
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn upsert(&self, record: &CustomerRewards) -> Result<CustomerRewards> {
        let saved = sqlx::query_as::<_, CustomerRewards>(
            r#"
            INSERT INTO customer_rewards (
                customer_id, points, tier_code, tier_name, next_tier_code,
                next_tier_name, progress_fraction, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (customer_id) DO UPDATE SET
                points = EXCLUDED.points,
                tier_code = EXCLUDED.tier_code,
                tier_name = EXCLUDED.tier_name,
                next_tier_code = EXCLUDED.next_tier_code,
                next_tier_name = EXCLUDED.next_tier_name,
                progress_fraction = EXCLUDED.progress_fraction,
                updated_at = EXCLUDED.updated_at
            RETURNING customer_id, points, tier_code, tier_name, next_tier_code,
                      next_tier_name, progress_fraction, created_at, updated_at
            "#,
        )
        .bind(&record.customer_id)
        .bind(record.points)
        .bind(&record.tier_code)
        .bind(&record.tier_name)
        .bind(&record.next_tier_code)
        .bind(&record.next_tier_name)
        .bind(record.progress_fraction)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn list_all(&self) -> Result<Vec<CustomerRewards>> {
        let records = sqlx::query_as::<_, CustomerRewards>(
            r#"
            SELECT customer_id, points, tier_code, tier_name, next_tier_code,
                   next_tier_name, progress_fraction, created_at, updated_at
            FROM customer_rewards
            ORDER BY customer_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
