//! 积分服务错误类型
//!
//! 三类对调用方可区分的失败：参数校验、客户不存在、存储失败。
//! 存储失败细分为数据库错误、超时与锁等待超时，但对外统一归为 Storage。

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// 错误大类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    Internal,
}

/// 积分服务错误类型
#[derive(Debug, Error)]
pub enum RewardsError {
    // === 参数校验 ===
    #[error("参数校验失败: {0}")]
    Validation(String),

    // === 资源不存在 ===
    #[error("客户积分记录不存在: {0}")]
    CustomerNotFound(String),

    // === 存储错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("存储操作超时: {operation}")]
    StorageTimeout { operation: String },

    #[error("存储错误: {0}")]
    Storage(String),

    #[error("等待客户积分锁超时: {0}")]
    LockTimeout(String),

    // === 系统错误 ===
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 积分服务 Result 类型别名
pub type Result<T> = std::result::Result<T, RewardsError>;

impl RewardsError {
    /// 错误大类
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::CustomerNotFound(_) => ErrorKind::NotFound,
            Self::Database(_)
            | Self::StorageTimeout { .. }
            | Self::Storage(_)
            | Self::LockTimeout(_) => ErrorKind::Storage,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// 检查是否为可重试的错误
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Storage
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::Database(_) | Self::Storage(_) => "STORAGE_ERROR",
            Self::StorageTimeout { .. } => "STORAGE_TIMEOUT",
            Self::LockTimeout(_) => "LOCK_TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::CustomerNotFound(_) => StatusCode::NOT_FOUND,
            Self::StorageTimeout { .. } | Self::LockTimeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RewardsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 存储与系统错误只返回通用提示，详细信息仅记录日志
        let message = match self.kind() {
            ErrorKind::Storage | ErrorKind::Internal => {
                tracing::error!(error = %self, code = self.error_code(), "请求处理失败");
                "服务暂时不可用，请稍后重试".to_string()
            }
            ErrorKind::Validation | ErrorKind::NotFound => self.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for RewardsError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 请求体无法解析为 JSON 时视为参数错误
impl From<JsonRejection> for RewardsError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for RewardsError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_error_variants() -> Vec<(RewardsError, StatusCode, &'static str, ErrorKind)> {
        vec![
            (
                RewardsError::Validation("orderTotal 不能为空".into()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                ErrorKind::Validation,
            ),
            (
                RewardsError::CustomerNotFound("a@b.c".into()),
                StatusCode::NOT_FOUND,
                "CUSTOMER_NOT_FOUND",
                ErrorKind::NotFound,
            ),
            (
                RewardsError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                ErrorKind::Storage,
            ),
            (
                RewardsError::StorageTimeout {
                    operation: "fetch_customer".into(),
                },
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_TIMEOUT",
                ErrorKind::Storage,
            ),
            (
                RewardsError::Storage("disk full".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                ErrorKind::Storage,
            ),
            (
                RewardsError::LockTimeout("a@b.c".into()),
                StatusCode::SERVICE_UNAVAILABLE,
                "LOCK_TIMEOUT",
                ErrorKind::Storage,
            ),
            (
                RewardsError::Internal("unexpected".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                ErrorKind::Internal,
            ),
        ]
    }

    #[test]
    fn test_error_mapping_table() {
        for (err, status, code, kind) in all_error_variants() {
            assert_eq!(err.status_code(), status, "{err}");
            assert_eq!(err.error_code(), code, "{err}");
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn test_only_storage_errors_are_retryable() {
        for (err, _, _, kind) in all_error_variants() {
            assert_eq!(err.is_retryable(), kind == ErrorKind::Storage, "{err}");
        }
    }

    #[tokio::test]
    async fn test_storage_error_body_hides_details() {
        let response = RewardsError::Storage("secret connection string".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "STORAGE_ERROR");
        assert!(!json["message"].as_str().unwrap().contains("secret"));
    }

    #[tokio::test]
    async fn test_validation_error_body_keeps_message() {
        let response = RewardsError::Validation("customerId 不能为空".into()).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("customerId"));
    }
}
