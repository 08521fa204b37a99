//! Domain Layer - Pure Business Logic
//!
//! No I/O, no clocks, no globals. Everything here is deterministic and
//! unit-testable in isolation:
//! - `symbol`: the closed set of traded assets and their order-size precision
//! - `sizing`: budget carry-over and order quantization

pub mod sizing;
pub mod symbol;
