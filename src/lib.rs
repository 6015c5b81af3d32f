pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use error::{ConfigError, MatchError};
pub use models::{Match, Order, ScoredTxn, Transaction};
pub use service::{batched_match_orders, match_orders, BatchScheduler, OrderMatcher};
