//! GMO Coin DCA Agent — Entry Point
//!
//! One invocation = one DCA run. An external scheduler (cron, systemd
//! timer) starts the process; it buys once per configured symbol and
//! exits.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (live operator output)
//! 3. Load exchange credentials from env (GMOCOIN_API_KEY, GMOCOIN_SECRET_KEY)
//! 4. Create GmoClient (HTTP + HMAC-SHA256 signing)
//! 5. Run the DCA service over the configured symbols
//! 6. Finalize the run log — on every exit path, error included
//!
//! Step 6 is the guaranteed-release discipline: the run log is the
//! durable record of what the agent did with real money, so it gets
//! flushed whether the run completed, skipped a symbol, or aborted.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::api::{GmoClient, GmoClientConfig};
use adapters::api::auth::GmoAuth;
use adapters::run_log::RunLog;
use adapters::run_log::file_sink::FileLogSink;
use config::{AppConfig, Credentials};
use usecases::dca_service::DcaService;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured logging ────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.bot.log_level)
                }),
        )
        .init();

    // The loader itself stays quiet (it runs before the subscriber), so
    // the loaded configuration is announced here.
    info!(
        name = %config.bot.name,
        version = env!("CARGO_PKG_VERSION"),
        budget_jpy = %config.dca.budget_jpy,
        symbols = config.dca.symbols.len(),
        "Configuration loaded, starting GMO Coin DCA agent"
    );

    // ── 3. Load exchange credentials from env vars ──────────
    let credentials = config::loader::load_credentials()
        .context("Failed to load GMO Coin credentials from env")?;

    // ── 4. Run log: buffered during the run, exported once ──
    let run_log = Arc::new(RunLog::new(&config.bot.name));
    let sink = FileLogSink::new(&config.run_log.export_dir);

    let result = run(&config, credentials, Arc::clone(&run_log)).await;

    // Caught exactly once: record the failure in the run log so the
    // durable artifact explains the abort, then finalize regardless.
    if let Err(e) = &result {
        error!(error = %e, "DCA run failed");
        run_log.error(format!("Run aborted: {e:#}"));
    }
    run_log
        .finalize(&sink)
        .await
        .context("Failed to export run log")?;

    result
}

/// Wire the adapters and execute one DCA run.
async fn run(
    config: &AppConfig,
    credentials: Credentials,
    run_log: Arc<RunLog>,
) -> Result<()> {
    let auth = GmoAuth::new(credentials.api_key, credentials.secret_key);
    let client_config = GmoClientConfig {
        base_url: config.api.base_url.clone(),
        timeout: Duration::from_secs(config.api.timeout_seconds),
    };
    let client = Arc::new(
        GmoClient::new(auth, client_config, Arc::clone(&run_log))
            .context("Failed to create GMO Coin client")?,
    );

    let service = DcaService::new(client, run_log, config.dca.budget_jpy);
    service.run(&config.dca.symbols).await
}
