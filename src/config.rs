use crate::error::ConfigError;
use crate::service::{FieldWeights, DEFAULT_BATCH_SIZE};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// 环境变量前缀，例如 `XACT_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "XACT";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub batch_size: usize,
    /// 为空时按 CPU 核数
    pub worker_threads: Option<usize>,
    pub weights: WeightsConfig,
}

/// 字段权重
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightsConfig {
    pub customer: f64,
    pub order_id: f64,
    pub date: f64,
    pub item: f64,
    pub price: f64,
}

impl WeightsConfig {
    pub fn to_field_weights(&self) -> Result<FieldWeights, ConfigError> {
        FieldWeights::new([self.customer, self.order_id, self.date, self.item, self.price])
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            customer: 1.0,
            order_id: 1.0,
            date: 0.7,
            item: 0.8,
            price: 0.9,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                body_limit_bytes: 10 * 1024 * 1024,
            },
            matching: MatchingConfig {
                batch_size: DEFAULT_BATCH_SIZE,
                worker_threads: None,
                weights: WeightsConfig::default(),
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置 (默认值 < 可选配置文件 < 环境变量)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        let d = Self::default();
        let w = d.matching.weights;

        let config: AppConfig = Config::builder()
            .set_default("server.host", d.server.host)?
            .set_default("server.port", i64::from(d.server.port))?
            .set_default("server.body_limit_bytes", d.server.body_limit_bytes as i64)?
            .set_default("matching.batch_size", d.matching.batch_size as i64)?
            .set_default("matching.weights.customer", w.customer)?
            .set_default("matching.weights.order_id", w.order_id)?
            .set_default("matching.weights.date", w.date)?
            .set_default("matching.weights.item", w.item)?
            .set_default("matching.weights.price", w.price)?
            .add_source(File::with_name("xact-matcher").required(false))
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host: missing required field".into()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port: out of range".into()));
        }
        if self.matching.batch_size == 0 {
            return Err(ConfigError::Invalid("matching.batch_size: must be at least 1".into()));
        }
        if self.matching.worker_threads == Some(0) {
            return Err(ConfigError::Invalid("matching.worker_threads: must be at least 1".into()));
        }
        self.matching.weights.to_field_weights()?;
        Ok(())
    }
}
