//! Configuration Module - TOML-based Agent Configuration
//!
//! Loads configuration from `config.toml`; exchange credentials come
//! from environment variables and never touch the file. Everything is
//! read once at startup and passed into constructors as plain values —
//! no component reads global state mid-run.

pub mod loader;

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::symbol::Symbol;

/// Top-level agent configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the run begins.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Agent identity and metadata.
  pub bot: BotConfig,
  /// Purchase schedule parameters.
  pub dca: DcaConfig,
  /// Exchange API endpoint parameters.
  pub api: ApiConfig,
  /// Run log export destination.
  pub run_log: RunLogConfig,
}

/// Agent identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
  /// Human-readable agent name; also prefixes run log file names.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// DCA purchase parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct DcaConfig {
  /// JPY spending cap per run before carry-over folding.
  pub budget_jpy: Decimal,
  /// Symbols to buy, processed in this order.
  pub symbols: Vec<Symbol>,
}

/// Exchange API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// GMO Coin REST API base URL.
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
}

/// Run log export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RunLogConfig {
  /// Directory the per-run log files are written into.
  #[serde(default = "default_export_dir")]
  pub export_dir: String,
}

/// Exchange credentials, loaded from the environment once at startup.
#[derive(Clone)]
pub struct Credentials {
  /// GMOCOIN_API_KEY.
  pub api_key: String,
  /// GMOCOIN_SECRET_KEY.
  pub secret_key: String,
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("api_key", &self.api_key)
      .field("secret_key", &"<redacted>")
      .finish()
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_base_url() -> String {
  "https://api.coin.z.com".to_string()
}

fn default_timeout() -> u64 {
  30
}

fn default_export_dir() -> String {
  "logs".to_string()
}
