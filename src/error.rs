use crate::service::fields::MatchField;
use thiserror::Error;

/// 匹配流程错误
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    #[error("weight for field {field} must be positive and finite, got {weight}")]
    InvalidWeight { field: MatchField, weight: f64 },

    #[error("batch {batch} failed: {reason}")]
    Worker { batch: usize, reason: String },

    #[error("batch dispatch failed: {0}")]
    Dispatch(String),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid config: {0}")]
    Invalid(String),
}
