//! REST API 客户端
//!
//! 封装对 rewards-service 的 HTTP 调用。

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

/// 统一响应信封
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub data: Option<T>,
}

/// 等级
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierResponse {
    pub tier_code: String,
    pub display_name: String,
    pub threshold_points: i64,
}

/// 客户积分记录
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRewardsResponse {
    pub customer_id: String,
    pub points: i64,
    pub tier_code: Option<String>,
    pub tier_name: Option<String>,
    pub next_tier_code: Option<String>,
    pub next_tier_name: Option<String>,
    pub progress_fraction: f64,
}

/// 积分累计请求
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualBody {
    pub customer_id: String,
    pub order_total: serde_json::Value,
}

impl AccrualBody {
    pub fn new(customer_id: impl Into<String>, order_total: impl Into<serde_json::Value>) -> Self {
        Self {
            customer_id: customer_id.into(),
            order_total: order_total.into(),
        }
    }
}

/// 失败响应：状态码与错误码
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub code: String,
}

/// API 客户端
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("创建 HTTP 客户端失败");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 从环境变量读取服务地址
    pub fn from_env() -> Self {
        let base_url = std::env::var("REWARDS_SERVICE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:7050".to_string());
        Self::new(&base_url)
    }

    /// 存活检查
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// 全部等级
    pub async fn list_rewards(&self) -> Result<Vec<TierResponse>> {
        self.get("/rewards").await
    }

    /// 累计订单积分
    pub async fn accrue(&self, body: &AccrualBody) -> Result<CustomerRewardsResponse> {
        let resp = self
            .client
            .put(self.url("/customer_rewards"))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// 发送任意请求体，返回失败信息（用于校验类用例）
    pub async fn accrue_raw(&self, body: serde_json::Value) -> Result<ApiFailure> {
        let resp = self
            .client
            .put(self.url("/customer_rewards"))
            .json(&body)
            .send()
            .await?;
        self.expect_failure(resp).await
    }

    /// 查询单个客户
    pub async fn get_customer(&self, customer_id: &str) -> Result<CustomerRewardsResponse> {
        self.get(&format!("/customer_rewards/{customer_id}")).await
    }

    /// 查询单个客户，预期失败
    pub async fn get_customer_failure(&self, customer_id: &str) -> Result<ApiFailure> {
        let resp = self
            .client
            .get(self.url(&format!("/customer_rewards/{customer_id}")))
            .send()
            .await?;
        self.expect_failure(resp).await
    }

    /// 按客户过滤查询
    pub async fn list_customers(&self, customer_id: Option<&str>) -> Result<Vec<CustomerRewardsResponse>> {
        let mut request = self.client.get(self.url("/customer_rewards"));
        if let Some(id) = customer_id {
            request = request.query(&[("customerId", id)]);
        }
        self.handle_response(request.send().await?).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.client.get(self.url(path)).send().await?;
        self.handle_response(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response<T: DeserializeOwned>(&self, resp: Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            let envelope: Envelope<T> = resp.json().await?;
            envelope
                .data
                .ok_or_else(|| anyhow::anyhow!("响应缺少 data 字段: {}", envelope.code))
        } else {
            let error_text = resp.text().await.unwrap_or_default();
            Err(anyhow::anyhow!("API 错误 {}: {}", status, error_text))
        }
    }

    async fn expect_failure(&self, resp: Response) -> Result<ApiFailure> {
        let status = resp.status();
        if status.is_success() {
            return Err(anyhow::anyhow!("预期失败但请求成功: {}", status));
        }
        let envelope: Envelope<serde_json::Value> = resp.json().await?;
        Ok(ApiFailure {
            status,
            code: envelope.code,
        })
    }
}
