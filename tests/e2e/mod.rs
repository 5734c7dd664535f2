//! 积分服务端到端测试
//!
//! 针对运行中的 rewards-service（默认 http://127.0.0.1:7050）发起真实 HTTP 请求，
//! 服务地址可通过 REWARDS_SERVICE_URL 覆盖。全部用例默认忽略：
//!
//! `cargo test --test e2e -- --ignored`
//!
//! 覆盖：
//! - 等级表查询
//! - 新客户首单与老客户累计
//! - 参数校验与 404
//! - 零金额订单的幂等性

pub mod helpers;
pub mod suites;
