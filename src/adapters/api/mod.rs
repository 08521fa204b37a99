//! GMO Coin API Adapter
//!
//! Everything exchange-wire-protocol-specific lives here: request
//! signing, endpoint paths, and the JSON shapes GMO Coin speaks.

pub mod auth;
pub mod client;
pub mod types;

pub use client::{ApiError, GmoClient, GmoClientConfig};
