//! 测试套件

pub mod accrual_flow;
pub mod validation;
