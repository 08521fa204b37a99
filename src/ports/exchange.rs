//! Exchange API Port - Market Data and Order Submission
//!
//! The three operations one DCA run needs from GMO Coin. The adapter
//! behind this trait owns the wire protocol and request signing; the
//! usecase layer only sees decimals.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::symbol::Symbol;

/// Signed/unsigned REST operations against the exchange.
///
/// Every method performs exactly one attempt — no retries, no backoff.
/// Transport failures, non-success HTTP statuses, and malformed bodies
/// all surface as errors and abort the run.
#[async_trait]
pub trait ExchangeApi: Send + Sync {
  /// Fetch the current best-ask price for `symbol`.
  ///
  /// `Ok(None)` means the ticker response held no unique record for the
  /// symbol — a recoverable "no actionable quote" condition, distinct
  /// from a transport or parse error.
  async fn get_ticker(&self, symbol: Symbol) -> Result<Option<Decimal>>;

  /// Fetch the margin balance available for new orders, in JPY.
  async fn get_margin(&self) -> Result<Decimal>;

  /// Submit a market buy for `size` units of `symbol`.
  ///
  /// `size` must already be quantized to the symbol's precision. The
  /// exchange acknowledgment is logged but never validated here.
  async fn place_order(&self, symbol: Symbol, size: &str) -> Result<()>;
}
