//! GMO Coin HTTP Client - Signed REST API Client
//!
//! Wraps reqwest with request signing for the three calls one DCA run
//! needs: public ticker, private margin, private order. Exactly one
//! attempt per logical call — a scheduled agent that failed this run
//! simply tries again on the next scheduler tick, so there is no retry
//! or backoff here.
//!
//! Duplicate-order caveat: if the order POST fails at the transport
//! layer after the exchange already accepted it, this client cannot
//! detect the duplicate. Accepted risk for a budget-capped DCA agent.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use thiserror::Error;

use super::auth::{GmoAuth, SignatureContext};
use super::types::{MarginResponse, OrderRequest, TickerEntry, TickerResponse};
use crate::adapters::run_log::RunLog;
use crate::domain::symbol::Symbol;
use crate::ports::exchange::ExchangeApi;

/// Error taxonomy for exchange calls.
///
/// `Transport` and `Status` and `Parse` are all fatal to the run; the
/// split exists so the top-level error line says what actually broke.
/// The recoverable "no usable quote" case is not an error at all — it
/// is `Ok(None)` from `get_ticker`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("transport error calling {url}: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },
  #[error("GMO API returned HTTP {status}: {body}")]
  Status { status: StatusCode, body: String },
  #[error("failed to decode GMO response: {reason} (body: {body})")]
  Parse { reason: String, body: String },
}

/// Configuration for the GMO Coin HTTP client.
#[derive(Debug, Clone)]
pub struct GmoClientConfig {
  /// Base URL for the exchange API.
  pub base_url: String,
  /// Request timeout. Explicit and configurable — never left to the
  /// HTTP stack's implicit default.
  pub timeout: Duration,
}

impl Default for GmoClientConfig {
  fn default() -> Self {
    Self {
      base_url: "https://api.coin.z.com".to_string(),
      timeout: Duration::from_secs(30),
    }
  }
}

/// Signed HTTP client for the GMO Coin REST API.
pub struct GmoClient {
  /// Underlying HTTP client.
  http: Client,
  /// Request signer and credential holder.
  auth: GmoAuth,
  /// Client configuration.
  config: GmoClientConfig,
  /// Run log shared with the orchestrator.
  run_log: Arc<RunLog>,
}

impl GmoClient {
  /// Create a new GMO Coin client.
  pub fn new(auth: GmoAuth, config: GmoClientConfig, run_log: Arc<RunLog>) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      http,
      auth,
      config,
      run_log,
    })
  }

  /// Attach the signed-call headers for `method` on `path` with `body`.
  ///
  /// `path` is the signature path (`/v1/...`), without the `/private`
  /// URL prefix.
  fn signed(&self, request: RequestBuilder, method: &str, path: &str, body: Option<&str>) -> RequestBuilder {
    let timestamp = GmoAuth::timestamp_ms();
    let sign = self.auth.sign(&SignatureContext {
      timestamp: &timestamp,
      method,
      path,
      body,
    });
    request
      .header("Content-Type", "application/json")
      .header("API-KEY", self.auth.api_key())
      .header("API-TIMESTAMP", timestamp)
      .header("API-SIGN", sign)
  }

  /// Send the request once and read the full body, logging the
  /// request/response pair at debug level.
  async fn dispatch(&self, request: RequestBuilder, url: &str) -> Result<String, ApiError> {
    let started = Instant::now();
    let response = request.send().await.map_err(|source| ApiError::Transport {
      url: url.to_string(),
      source,
    })?;
    let status = response.status();
    let body = response.text().await.map_err(|source| ApiError::Transport {
      url: url.to_string(),
      source,
    })?;
    let elapsed = started.elapsed().as_millis();

    self.run_log.debug(format!(
      "Response: status = {}, body = {body}, elapsed = {elapsed}ms",
      status.as_u16()
    ));

    if !status.is_success() {
      return Err(ApiError::Status { status, body });
    }
    Ok(body)
  }

  fn parse_error(reason: impl ToString, body: &str) -> ApiError {
    ApiError::Parse {
      reason: reason.to_string(),
      body: body.to_string(),
    }
  }
}

/// Pick the quote record for `symbol`, if the response holds exactly one.
///
/// Zero matches and duplicate matches both mean "no usable quote": the
/// response cannot be trusted to name a single ask price.
fn unique_entry(response: &TickerResponse, symbol: Symbol) -> Option<&TickerEntry> {
  let mut matches = response
    .data
    .iter()
    .filter(|entry| entry.symbol == symbol.code());
  match (matches.next(), matches.next()) {
    (Some(entry), None) => Some(entry),
    _ => None,
  }
}

#[async_trait]
impl ExchangeApi for GmoClient {
  async fn get_ticker(&self, symbol: Symbol) -> Result<Option<Decimal>> {
    let url = format!("{}/public/v1/ticker?symbol={symbol}", self.config.base_url);
    self.run_log.debug(format!("Request: URL = {url}"));

    let body = self.dispatch(self.http.get(&url), &url).await?;
    let parsed: TickerResponse =
      serde_json::from_str(&body).map_err(|e| Self::parse_error(e, &body))?;

    let Some(entry) = unique_entry(&parsed, symbol) else {
      self.run_log.error(format!("There is no unique {symbol} record in ticker response"));
      return Ok(None);
    };

    let ask: Decimal = entry
      .ask
      .parse()
      .map_err(|e| Self::parse_error(e, &body))?;
    self.run_log.info(format!("{symbol} ask price = {ask}(JPY/{symbol})"));

    Ok(Some(ask))
  }

  async fn get_margin(&self) -> Result<Decimal> {
    let path = "/v1/account/margin";
    let url = format!("{}/private{path}", self.config.base_url);
    self.run_log.debug(format!("Request: URL = {url}"));

    let request = self.signed(self.http.get(&url), "GET", path, None);
    let body = self.dispatch(request, &url).await?;
    let parsed: MarginResponse =
      serde_json::from_str(&body).map_err(|e| Self::parse_error(e, &body))?;

    let available: Decimal = parsed
      .data
      .available_amount
      .parse()
      .map_err(|e| Self::parse_error(e, &body))?;
    self.run_log.info(format!("Available amount = {available}(JPY)"));

    Ok(available)
  }

  async fn place_order(&self, symbol: Symbol, size: &str) -> Result<()> {
    let path = "/v1/order";
    let url = format!("{}/private{path}", self.config.base_url);
    let payload = serde_json::to_string(&OrderRequest::market_buy(symbol.code(), size))
      .context("Failed to encode order request")?;
    self.run_log.debug(format!("Request: URL = {url}, Payload = {payload}"));

    let request = self
      .signed(self.http.post(&url), "POST", path, Some(&payload))
      .body(payload);
    // The ack body is logged by dispatch but never validated — order
    // acknowledgment verification is out of scope.
    self.dispatch(request, &url).await?;

    Ok(())
  }
}
