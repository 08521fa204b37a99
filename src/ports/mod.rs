//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires from
//! the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `ExchangeApi`: signed/unsigned calls against the exchange REST API
//! - `LogSink`: durable destination for the buffered run log

pub mod exchange;
pub mod log_sink;
