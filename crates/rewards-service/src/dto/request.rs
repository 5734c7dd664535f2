//! 请求 DTO 定义
//!
//! 请求体先按宽松结构反序列化，再经 [`AccrualRequest::into_command`] 收敛为强类型命令。
//! 所有参数校验都在触达存储之前完成。

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::{Result, RewardsError};

/// 积分累计请求
///
/// 客户标识接受 `customerId`、`email`、`customer_id` 三种写法；
/// 订单金额接受 JSON 数字或数字字符串。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualRequest {
    #[serde(default, alias = "email", alias = "customer_id")]
    pub customer_id: Option<String>,

    #[serde(default, alias = "order_total")]
    pub order_total: Option<Value>,
}

/// 校验通过的累计命令
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct AccrualCommand {
    #[validate(length(max = 320, message = "customerId 长度不能超过320个字符"))]
    pub customer_id: String,
    pub order_total: f64,
}

impl AccrualRequest {
    pub fn new(customer_id: impl Into<String>, order_total: impl Into<Value>) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            order_total: Some(order_total.into()),
        }
    }

    /// 校验并转换为累计命令
    ///
    /// 长度限制作用于去除首尾空白后的客户标识。
    pub fn into_command(self) -> Result<AccrualCommand> {
        let customer_id = self
            .customer_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| RewardsError::Validation("customerId 不能为空".to_string()))?
            .to_string();

        let order_total = match self.order_total {
            None | Some(Value::Null) => {
                return Err(RewardsError::Validation("orderTotal 不能为空".to_string()));
            }
            Some(value) => parse_order_total(&value)?,
        };

        let command = AccrualCommand {
            customer_id,
            order_total,
        };
        command.validate()?;

        Ok(command)
    }
}

/// 解析订单金额：数字或数字字符串，且必须为有限值
fn parse_order_total(value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| RewardsError::Validation(format!("orderTotal 不是有效数字: {value}")))
}

/// 客户积分查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilter {
    #[serde(default, alias = "email", alias = "customer_id")]
    pub customer_id: Option<String>,
}

impl CustomerFilter {
    /// 有效的过滤条件，空白视为未指定
    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
