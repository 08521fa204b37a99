//! Usecases Layer - Run Orchestration
//!
//! Sequences the domain logic against the ports. One module: the DCA
//! purchase pipeline executed once per scheduler invocation.

pub mod dca_service;
