//! 参数校验与错误响应测试

use crate::helpers::*;
use reqwest::StatusCode;
use serde_json::json;

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_missing_order_total_rejected() {
        let api = ApiClient::from_env();
        let customer = format!("invalid-{}@e2e.test", uuid::Uuid::new_v4());

        let failure = api
            .accrue_raw(json!({"customerId": customer}))
            .await
            .unwrap();
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
        assert_eq!(failure.code, "VALIDATION_ERROR");

        // 校验失败不应写入任何记录
        let lookup = api.get_customer_failure(&customer).await.unwrap();
        assert_eq!(lookup.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_non_numeric_order_total_rejected() {
        let api = ApiClient::from_env();

        let failure = api
            .accrue_raw(json!({"customerId": "x@e2e.test", "orderTotal": "lots"}))
            .await
            .unwrap();
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_missing_customer_rejected() {
        let api = ApiClient::from_env();

        let failure = api.accrue_raw(json!({"orderTotal": 10})).await.unwrap();
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
        assert_eq!(failure.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_unknown_customer_not_found() {
        let api = ApiClient::from_env();

        let failure = api
            .get_customer_failure("nobody-at-all@e2e.test")
            .await
            .unwrap();
        assert_eq!(failure.status, StatusCode::NOT_FOUND);
        assert_eq!(failure.code, "CUSTOMER_NOT_FOUND");
    }
}
