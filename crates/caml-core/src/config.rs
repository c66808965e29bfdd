//! Configuration types and loading
//!
//! Settings are read from the process environment. Binaries call
//! `dotenvy::dotenv()` before `CamlConfig::from_env()` so a local `.env`
//! file is honoured.

use serde::{Deserialize, Serialize};

pub const ENV_LOG: &str = "CAML_LOG";
pub const ENV_STRICT_ARITY: &str = "CAML_STRICT_ARITY";
pub const ENV_ORDER_BY: &str = "CAML_ORDER_BY";
pub const ENV_ORDER_ASCENDING: &str = "CAML_ORDER_ASCENDING";

/// Main runtime configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CamlConfig {
    /// `tracing` filter directive used when `RUST_LOG` is not set
    pub log_filter: String,

    /// Reject filters whose value count does not fit their operator
    pub strict_arity: bool,

    /// Ordering applied when a query definition has none
    pub order_by: Option<OrderByDefault>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct OrderByDefault {
    pub field: String,
    pub ascending: bool,
}

impl Default for CamlConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            strict_arity: false,
            order_by: None,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl CamlConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = filter;
        }
        if let Some(v) = lookup(ENV_STRICT_ARITY) {
            config.strict_arity = parse_bool(ENV_STRICT_ARITY, &v)?;
        }
        if let Some(field) = lookup(ENV_ORDER_BY).filter(|f| !f.trim().is_empty()) {
            let ascending = match lookup(ENV_ORDER_ASCENDING) {
                Some(v) => parse_bool(ENV_ORDER_ASCENDING, &v)?,
                None => true,
            };
            config.order_by = Some(OrderByDefault { field, ascending });
        }

        tracing::debug!(
            log_filter = %config.log_filter,
            strict_arity = config.strict_arity,
            order_by = ?config.order_by,
            "Loaded configuration"
        );

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {:?}", other),
        }),
    }
}
