//! DCA Service Use Case - Per-Symbol Purchase Pipeline
//!
//! Runs the strictly sequential pipeline for each configured symbol:
//! margin → ticker → size → order. A missing quote skips the symbol and
//! the run continues; any exchange error propagates and ends the whole
//! run (no per-symbol isolation — the scheduler retries the entire run
//! on its next tick).

use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::adapters::run_log::RunLog;
use crate::domain::sizing::OrderSizer;
use crate::domain::symbol::Symbol;
use crate::ports::exchange::ExchangeApi;

/// Orchestrates one DCA run over the configured symbols.
pub struct DcaService<E: ExchangeApi> {
    exchange: Arc<E>,
    run_log: Arc<RunLog>,
    budget_jpy: Decimal,
    sizer: OrderSizer,
}

impl<E: ExchangeApi> DcaService<E> {
    pub fn new(exchange: Arc<E>, run_log: Arc<RunLog>, budget_jpy: Decimal) -> Self {
        Self {
            exchange,
            run_log,
            budget_jpy,
            sizer: OrderSizer::new(budget_jpy),
        }
    }

    /// Execute the pipeline for every symbol, in configured order,
    /// never concurrently.
    pub async fn run(&self, symbols: &[Symbol]) -> Result<()> {
        for &symbol in symbols {
            self.run_symbol(symbol).await?;
        }
        Ok(())
    }

    async fn run_symbol(&self, symbol: Symbol) -> Result<()> {
        self.run_log
            .info(format!("********** Started order: {symbol} **********"));
        self.run_log
            .info(format!("Periodic budget = {}(JPY)", self.budget_jpy));

        let available = self.exchange.get_margin().await?;

        let Some(ask) = self.exchange.get_ticker(symbol).await? else {
            // No actionable quote. Not a failure — the symbol is skipped
            // and the run moves on to finalization.
            self.run_log
                .warn(format!("No actionable {symbol} quote, skipping symbol"));
            return Ok(());
        };

        let sized = self.sizer.size(available, ask, symbol)?;
        self.run_log.info(format!(
            "Calculated quantity = {} / {ask} = {}({symbol})",
            sized.invest_jpy, sized.quantity
        ));
        self.run_log.info(format!(
            "Actual invest amount = {}(JPY)",
            sized.actual_invest_jpy
        ));

        self.exchange.place_order(symbol, &sized.quantity).await?;

        self.run_log
            .info(format!("********** Completed order: {symbol} **********"));
        Ok(())
    }
}
