//! 客户级互斥锁
//!
//! 同一客户的读取-计算-写回必须串行，否则并发订单会互相覆盖积分。

mod customer_lock;

pub use customer_lock::{CustomerLockGuard, CustomerLocks};
