//! 客户积分 API 处理器

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
};
use tracing::info;

use crate::{
    dto::{AccrualRequest, ApiResponse, CustomerFilter},
    error::RewardsError,
    models::CustomerRewards,
    state::AppState,
};

/// 为客户累计订单积分
///
/// PUT /customer_rewards
pub async fn accrue_rewards(
    State(state): State<AppState>,
    payload: Result<Json<AccrualRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CustomerRewards>>, RewardsError> {
    let Json(req) = payload?;
    let record = state.rewards.accrue(req).await?;

    info!(
        customer_id = %record.customer_id,
        points = record.points,
        "Rewards accrued"
    );

    Ok(Json(ApiResponse::success(record)))
}

/// 查询客户积分，可按客户标识过滤
///
/// GET /customer_rewards?customerId=
pub async fn list_customer_rewards(
    State(state): State<AppState>,
    filter: Result<Query<CustomerFilter>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<CustomerRewards>>>, RewardsError> {
    let Query(filter) = filter?;
    let records = state.rewards.list_customers(filter.customer_id()).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// 查询单个客户积分
///
/// GET /customer_rewards/{customer_id}
pub async fn get_customer_rewards(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<ApiResponse<CustomerRewards>>, RewardsError> {
    let record = state.rewards.get_customer(customer_id.trim()).await?;
    Ok(Json(ApiResponse::success(record)))
}
