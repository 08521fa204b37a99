//! GMO Coin API Request/Response Types
//!
//! Serialization types for the three endpoints this agent consumes.
//! GMO Coin renders every numeric field as a JSON string; conversion to
//! `Decimal` happens in the client, not here.

use serde::{Deserialize, Serialize};

/// Response from `GET /public/v1/ticker`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerResponse {
  /// GMO-level status code (0 = success).
  pub status: i64,
  /// One quote record per symbol.
  #[serde(default)]
  pub data: Vec<TickerEntry>,
  /// Server-side response timestamp.
  pub response_time: String,
}

/// A single per-symbol quote record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerEntry {
  pub ask: String,
  pub bid: String,
  pub high: String,
  pub last: String,
  pub low: String,
  pub symbol: String,
  pub timestamp: String,
  pub volume: String,
}

/// Response from `GET /private/v1/account/margin`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginResponse {
  /// GMO-level status code (0 = success).
  pub status: i64,
  pub data: MarginData,
  /// Server-side response timestamp.
  pub response_time: String,
}

/// Margin account snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginData {
  /// JPY amount currently free to spend on new orders.
  pub available_amount: String,
  #[serde(default)]
  pub actual_profit_loss: Option<String>,
  #[serde(default)]
  pub margin: Option<String>,
  #[serde(default)]
  pub margin_call_status: Option<String>,
  #[serde(default)]
  pub margin_ratio: Option<String>,
  #[serde(default)]
  pub profit_loss: Option<String>,
}

/// Body for `POST /private/v1/order`.
///
/// The serialized text of this struct is the exact string that gets
/// signed and sent — the signature covers it byte for byte.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
  /// Exchange symbol code ("BTC", "SOL").
  pub symbol: String,
  /// Always "BUY" for this agent.
  pub side: String,
  /// Always "MARKET" for this agent.
  pub execution_type: String,
  /// Quantity string at the symbol's size precision.
  pub size: String,
}

impl OrderRequest {
  /// Build a market buy for `size` units of `symbol`.
  pub fn market_buy(symbol: &str, size: &str) -> Self {
    Self {
      symbol: symbol.to_string(),
      side: "BUY".to_string(),
      execution_type: "MARKET".to_string(),
      size: size.to_string(),
    }
  }
}
