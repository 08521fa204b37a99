//! Integration Tests - DCA Run Orchestration
//!
//! Tests the usecase pipeline against a mocked exchange port: call
//! ordering, quote-absent short-circuit, error propagation, and the
//! flush-on-every-path run log guarantee.

use std::sync::{Arc, Mutex};

use mockall::Sequence;
use mockall::mock;
use mockall::predicate::*;
use rust_decimal_macros::dec;

use gmocoin_dca_bot::adapters::run_log::RunLog;
use gmocoin_dca_bot::domain::symbol::Symbol;
use gmocoin_dca_bot::ports::log_sink::LogSink;
use gmocoin_dca_bot::usecases::dca_service::DcaService;

// ---- Mock Definitions ----

mock! {
    pub Exchange {}

    #[async_trait::async_trait]
    impl gmocoin_dca_bot::ports::exchange::ExchangeApi for Exchange {
        async fn get_ticker(
            &self,
            symbol: Symbol,
        ) -> anyhow::Result<Option<rust_decimal::Decimal>>;

        async fn get_margin(&self) -> anyhow::Result<rust_decimal::Decimal>;

        async fn place_order(&self, symbol: Symbol, size: &str) -> anyhow::Result<()>;
    }
}

/// In-memory sink capturing what the run log exported.
#[derive(Default)]
struct MemorySink {
    exports: Mutex<Vec<(String, String)>>,
}

#[async_trait::async_trait]
impl LogSink for MemorySink {
    async fn export(&self, file_name: &str, contents: &str) -> anyhow::Result<()> {
        self.exports
            .lock()
            .unwrap()
            .push((file_name.to_string(), contents.to_string()));
        Ok(())
    }
}

fn service(exchange: MockExchange) -> (DcaService<MockExchange>, Arc<RunLog>) {
    let run_log = Arc::new(RunLog::new("gmocoin-test"));
    let service = DcaService::new(Arc::new(exchange), Arc::clone(&run_log), dec!(10000));
    (service, run_log)
}

// ---- Integration Tests ----

#[tokio::test]
async fn test_happy_path_places_sized_order() {
    let mut exchange = MockExchange::new();
    let mut seq = Sequence::new();

    // balance 12500, budget 10000 → invest 12500; ask 5,000,000 →
    // 12500 / 5000000 = 0.0025 BTC.
    exchange
        .expect_get_margin()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(dec!(12500)));
    exchange
        .expect_get_ticker()
        .with(eq(Symbol::Btc))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(Some(dec!(5000000))));
    exchange
        .expect_place_order()
        .with(eq(Symbol::Btc), eq("0.0025"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    let (service, _run_log) = service(exchange);
    service.run(&[Symbol::Btc]).await.unwrap();
}

#[tokio::test]
async fn test_absent_quote_skips_symbol_without_ordering() {
    let mut exchange = MockExchange::new();

    exchange.expect_get_margin().returning(|| Ok(dec!(50000)));
    // Zero or duplicate ticker records surface as Ok(None).
    exchange
        .expect_get_ticker()
        .returning(|_| Ok(None));
    exchange.expect_place_order().times(0);

    let (service, _run_log) = service(exchange);
    // Skipping is not a failure.
    service.run(&[Symbol::Btc]).await.unwrap();
}

#[tokio::test]
async fn test_margin_failure_aborts_run_before_ticker() {
    let mut exchange = MockExchange::new();

    exchange
        .expect_get_margin()
        .times(1)
        .returning(|| Err(anyhow::anyhow!("connection reset")));
    exchange.expect_get_ticker().times(0);
    exchange.expect_place_order().times(0);

    let (service, _run_log) = service(exchange);
    // A failure on the first symbol abandons the second one too.
    let err = service.run(&[Symbol::Btc, Symbol::Sol]).await.unwrap_err();
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_failed_run_still_exports_run_log() {
    let mut exchange = MockExchange::new();
    exchange
        .expect_get_margin()
        .returning(|| Err(anyhow::anyhow!("connection reset")));

    let (service, run_log) = service(exchange);
    let result = service.run(&[Symbol::Btc]).await;
    assert!(result.is_err());

    // Mirror the entry point: record the abort, then finalize.
    if let Err(e) = &result {
        run_log.error(format!("Run aborted: {e:#}"));
    }
    let sink = MemorySink::default();
    run_log.finalize(&sink).await.unwrap();

    let exports = sink.exports.lock().unwrap();
    assert_eq!(exports.len(), 1);
    assert!(exports[0].1.contains("Run aborted: connection reset"));
}

#[tokio::test]
async fn test_symbols_processed_sequentially_in_configured_order() {
    let mut exchange = MockExchange::new();
    let mut seq = Sequence::new();

    exchange
        .expect_get_margin()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(dec!(12500)));
    exchange
        .expect_get_ticker()
        .with(eq(Symbol::Btc))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(Some(dec!(5000000))));
    exchange
        .expect_place_order()
        .with(eq(Symbol::Btc), eq("0.0025"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    // SOL leg re-reads the margin; 12500 % 10000 = 2500 → invest 12500;
    // 12500 / 30000 = 0.41666… → 0.42 at SOL precision.
    exchange
        .expect_get_margin()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(dec!(12500)));
    exchange
        .expect_get_ticker()
        .with(eq(Symbol::Sol))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(Some(dec!(30000))));
    exchange
        .expect_place_order()
        .with(eq(Symbol::Sol), eq("0.42"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    let (service, _run_log) = service(exchange);
    service.run(&[Symbol::Btc, Symbol::Sol]).await.unwrap();
}
