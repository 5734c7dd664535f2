pub mod tier_refresh_worker;

pub use tier_refresh_worker::TierRefreshWorker;
