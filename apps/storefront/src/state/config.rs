//! # Storefront Configuration
//!
//! Store-wide settings: display name, currency symbol, tax rate, default
//! order type and the branches offered for pickup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     OD_STORE_NAME="OD Islamabad"                                       │
//! │     OD_TAX_RATE_BPS=1600                                               │
//! │     OD_ORDER_TYPE=delivery                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/od-storefront/storefront.toml (Linux)                    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     16% tax, pickup, both branches                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! store_name = "OD"
//! currency_symbol = "Rs."
//! tax_rate_bps = 1600
//! default_order_type = "pickup"
//! branches = ["PIA Branch", "Barkat Market Branch"]
//! ```

use od_core::validation::validate_tax_rate_bps;
use od_core::{Branch, Money, OrderType, TaxRate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};
use ts_rs::TS;

/// Configuration load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_store_name() -> String {
    "OD".to_string()
}

fn default_currency_symbol() -> String {
    "Rs.".to_string()
}

fn default_tax_rate_bps() -> u32 {
    TaxRate::STANDARD.bps()
}

fn default_branches() -> Vec<Branch> {
    Branch::ALL.to_vec()
}

/// Store settings shared by every screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StorefrontConfig {
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Shown before amounts, e.g. "Rs. 998.76".
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Sales tax in basis points (1600 = 16%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Preselected on the welcome screen.
    #[serde(default)]
    pub default_order_type: OrderType,

    /// Branches offered for pickup, in display order.
    #[serde(default = "default_branches")]
    pub branches: Vec<Branch>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            store_name: default_store_name(),
            currency_symbol: default_currency_symbol(),
            tax_rate_bps: default_tax_rate_bps(),
            default_order_type: OrderType::default(),
            branches: default_branches(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Storefront config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name cannot be empty".into()));
        }

        validate_tax_rate_bps(self.tax_rate_bps)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.branches.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one branch must be configured".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("OD_STORE_NAME") {
            debug!(name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(bps) = lookup("OD_TAX_RATE_BPS") {
            match bps.parse::<u32>() {
                Ok(b) => self.tax_rate_bps = b,
                Err(_) => warn!(value = %bps, "Ignoring non-numeric OD_TAX_RATE_BPS"),
            }
        }

        if let Some(order_type) = lookup("OD_ORDER_TYPE") {
            match order_type.parse::<OrderType>() {
                Ok(t) => self.default_order_type = t,
                Err(_) => warn!(value = %order_type, "Ignoring unknown OD_ORDER_TYPE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "od", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Formats an amount with the configured symbol: "Rs. 1629.00".
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{} {}", self.currency_symbol, amount.amount_string())
    }

    pub fn offers_branch(&self, branch: Branch) -> bool {
        self.branches.contains(&branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.tax_rate(), TaxRate::STANDARD);
        assert_eq!(config.default_order_type, OrderType::Pickup);
        assert_eq!(config.branches.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_paisa(99876)), "Rs. 998.76");
        assert_eq!(config.format_currency(Money::zero()), "Rs. 0.00");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("OD_STORE_NAME", "OD Blue Area"),
            ("OD_TAX_RATE_BPS", "1500"),
            ("OD_ORDER_TYPE", "Delivery"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_name, "OD Blue Area");
        assert_eq!(config.tax_rate_bps, 1500);
        assert_eq!(config.default_order_type, OrderType::Delivery);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| match key {
            "OD_TAX_RATE_BPS" => Some("sixteen".into()),
            "OD_ORDER_TYPE" => Some("drone".into()),
            _ => None,
        });
        assert_eq!(config.tax_rate_bps, 1600);
        assert_eq!(config.default_order_type, OrderType::Pickup);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = StorefrontConfig {
            tax_rate_bps: 20_000,
            ..StorefrontConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = StorefrontConfig {
            branches: Vec::new(),
            ..StorefrontConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig =
            toml::from_str("store_name = \"OD\"\nbranches = [\"PIA Branch\"]\n").unwrap();
        assert_eq!(config.tax_rate_bps, 1600);
        assert_eq!(config.branches, vec![Branch::Pia]);
        assert!(!config.offers_branch(Branch::BarkatMarket));
    }
}
