//! 请求与响应 DTO

pub mod request;
pub mod response;

pub use request::{AccrualCommand, AccrualRequest, CustomerFilter};
pub use response::ApiResponse;
