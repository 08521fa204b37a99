//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, loading
//! credentials from the environment, and providing clear error
//! messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use super::{AppConfig, Credentials};

/// Load and validate configuration from a TOML file.
///
/// Runs before the tracing subscriber exists (the config decides the log
/// level), so this function must not log — the caller announces the
/// loaded configuration once the subscriber is up.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  Ok(config)
}

/// Load exchange credentials from environment variables.
///
/// Required env vars: GMOCOIN_API_KEY, GMOCOIN_SECRET_KEY. These MUST
/// stay in the environment — never in config.toml, never in git.
pub fn load_credentials() -> Result<Credentials> {
  let api_key = std::env::var("GMOCOIN_API_KEY")
    .context("GMOCOIN_API_KEY not set")?;
  let secret_key = std::env::var("GMOCOIN_SECRET_KEY")
    .context("GMOCOIN_SECRET_KEY not set")?;

  Ok(Credentials {
    api_key,
    secret_key,
  })
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.bot.name.is_empty(),
    "Bot name must not be empty"
  );

  anyhow::ensure!(
    config.dca.budget_jpy > Decimal::ZERO,
    "budget_jpy must be positive, got {}",
    config.dca.budget_jpy
  );
  anyhow::ensure!(
    !config.dca.symbols.is_empty(),
    "At least one symbol must be configured"
  );

  anyhow::ensure!(
    !config.api.base_url.is_empty(),
    "API base URL must not be empty"
  );
  anyhow::ensure!(
    config.api.timeout_seconds > 0,
    "timeout_seconds must be positive"
  );

  anyhow::ensure!(
    !config.run_log.export_dir.is_empty(),
    "Run log export_dir must not be empty"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use rust_decimal_macros::dec;

  use super::*;
  use crate::domain::symbol::Symbol;

  fn parse(toml: &str) -> AppConfig {
    toml::from_str(toml).unwrap()
  }

  const MINIMAL: &str = r#"
    [bot]
    name = "gmocoin"

    [dca]
    budget_jpy = 10000
    symbols = ["BTC", "SOL"]

    [api]

    [run_log]
  "#;

  #[test]
  fn test_minimal_config_with_defaults() {
    let config = parse(MINIMAL);
    assert_eq!(config.dca.budget_jpy, dec!(10000));
    assert_eq!(config.dca.symbols, vec![Symbol::Btc, Symbol::Sol]);
    assert_eq!(config.api.base_url, "https://api.coin.z.com");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.run_log.export_dir, "logs");
    assert!(validate_config(&config).is_ok());
  }

  #[test]
  fn test_zero_budget_rejected() {
    let mut config = parse(MINIMAL);
    config.dca.budget_jpy = Decimal::ZERO;
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_empty_symbols_rejected() {
    let mut config = parse(MINIMAL);
    config.dca.symbols.clear();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  /// Counts every tracing event it receives.
  struct EventCounter {
    events: std::sync::Arc<std::sync::atomic::AtomicUsize>,
  }

  impl tracing::Subscriber for EventCounter {
    fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
      true
    }
    fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
      tracing::span::Id::from_u64(1)
    }
    fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}
    fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}
    fn event(&self, _: &tracing::Event<'_>) {
      self
        .events
        .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
    fn enter(&self, _: &tracing::span::Id) {}
    fn exit(&self, _: &tracing::span::Id) {}
  }

  #[test]
  fn test_load_config_emits_no_tracing_events() {
    // load_config runs before the real subscriber is installed; a log
    // line emitted here would be silently dropped in production, so the
    // loader must stay quiet.
    let path = std::env::temp_dir().join(format!(
      "gmocoin-dca-bot-loader-test-{}.toml",
      std::process::id()
    ));
    std::fs::write(&path, MINIMAL).unwrap();

    let events = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = EventCounter {
      events: std::sync::Arc::clone(&events),
    };
    let config = tracing::subscriber::with_default(counter, || {
      load_config(path.to_str().unwrap()).unwrap()
    });

    assert_eq!(config.dca.budget_jpy, dec!(10000));
    assert_eq!(events.load(std::sync::atomic::Ordering::SeqCst), 0);

    std::fs::remove_file(&path).unwrap();
  }
}
