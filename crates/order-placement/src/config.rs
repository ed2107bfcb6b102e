//! Runtime configuration and the seed catalog.

use crate::model::{CustomerCreate, ProductCreate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CHANNEL_BUFFER: usize = 32;
pub const DEFAULT_CONFLICT_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed catalog: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    /// Request queue length of each store actor.
    pub channel_buffer: usize,
    /// How often a placement that lost a stock race is re-run.
    pub conflict_retries: u32,
    /// JSON seed catalog; `None` means the built-in sample.
    pub seed_path: Option<PathBuf>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            conflict_retries: DEFAULT_CONFLICT_RETRIES,
            seed_path: None,
        }
    }
}

impl SystemConfig {
    /// Reads `ORDER_CHANNEL_BUFFER`, `ORDER_CONFLICT_RETRIES` and
    /// `ORDER_SEED_PATH`, after loading a `.env` file if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let channel_buffer = parse_var(&lookup, "ORDER_CHANNEL_BUFFER")?
            .unwrap_or(defaults.channel_buffer);
        if channel_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                var: "ORDER_CHANNEL_BUFFER",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            channel_buffer,
            conflict_retries: parse_var(&lookup, "ORDER_CONFLICT_RETRIES")?
                .unwrap_or(defaults.conflict_retries),
            seed_path: lookup("ORDER_SEED_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

/// Customers and products to load into empty stores at startup.
///
/// ```json
/// {
///   "customers": [{ "name": "Alice", "email": "alice@example.com" }],
///   "products": [{ "name": "Widget", "price": "10.00", "quantity": 5 }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub customers: Vec<CustomerCreate>,
    #[serde(default)]
    pub products: Vec<ProductCreate>,
}

impl SeedCatalog {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// One customer, one stocked product and one sold-out product.
    pub fn sample() -> Self {
        Self {
            customers: vec![CustomerCreate {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            }],
            products: vec![
                ProductCreate {
                    name: "Widget".to_string(),
                    price: Decimal::new(10, 0),
                    quantity: 5,
                },
                ProductCreate {
                    name: "Gadget".to_string(),
                    price: Decimal::new(20, 0),
                    quantity: 0,
                },
            ],
        }
    }
}
