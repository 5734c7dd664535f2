//! 积分等级系统工作区根包
//!
//! 仅用于承载基准测试与端到端测试，业务代码位于 `crates/` 下。

pub use rewards_service;
