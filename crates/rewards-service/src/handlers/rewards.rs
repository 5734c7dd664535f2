//! 等级表 API 处理器

use axum::{Json, extract::State};

use crate::{dto::ApiResponse, error::RewardsError, models::Tier, state::AppState};

/// 全部等级
///
/// GET /rewards
pub async fn list_rewards(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Tier>>>, RewardsError> {
    Ok(Json(ApiResponse::success(state.rewards.list_tiers())))
}
