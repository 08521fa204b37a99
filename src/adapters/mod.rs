//! Adapters Layer - Infrastructure Implementations
//!
//! Concrete implementations of the ports:
//! - `api`: signed GMO Coin REST client (reqwest + HMAC-SHA256)
//! - `run_log`: buffered run log and its file-based sink

pub mod api;
pub mod run_log;
