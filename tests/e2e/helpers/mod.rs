//! 测试辅助工具

pub mod api_client;

pub use api_client::*;
