//! Purchase sizing under a fixed periodic budget.
//!
//! Pure computation, no I/O. The carry-over rule deals with balances that
//! are not an even multiple of the budget (deposits rarely are): the
//! remainder `available % budget` is invested on its own when it is at
//! least half a budget, otherwise it is folded into a double-sized
//! purchase so the agent never buys a trivially small amount.
//!
//! All arithmetic is `Decimal`; quantity rounding uses
//! `MidpointAwayFromZero`, which matches the round-half-away-from-zero
//! behavior the exchange expects for order sizes.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use thiserror::Error;

use super::symbol::Symbol;

/// Sizing failure — both cases are configuration problems, not market
/// conditions, so the run fails fast instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    #[error("periodic budget must be positive, got {0} JPY")]
    NonPositiveBudget(Decimal),
    #[error("ask price must be positive, got {0} JPY")]
    NonPositiveAsk(Decimal),
}

/// Result of sizing one purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedOrder {
    /// Order size as the exchange wants it: a decimal string with exactly
    /// the symbol's number of fractional digits.
    pub quantity: String,
    /// JPY amount this run intends to invest (surplus rule applied).
    pub invest_jpy: Decimal,
    /// JPY amount the rounded quantity actually represents, rounded to
    /// whole yen. Reporting only — no decision depends on it.
    pub actual_invest_jpy: Decimal,
}

/// Sizes market buys against the configured periodic budget.
#[derive(Debug, Clone)]
pub struct OrderSizer {
    budget_jpy: Decimal,
}

impl OrderSizer {
    pub fn new(budget_jpy: Decimal) -> Self {
        Self { budget_jpy }
    }

    /// Decide how much to buy this run.
    ///
    /// `available` is the live margin balance; the carry-over is derived
    /// from it alone, never from stored history.
    pub fn size(
        &self,
        available: Decimal,
        ask: Decimal,
        symbol: Symbol,
    ) -> Result<SizedOrder, SizingError> {
        if self.budget_jpy <= Decimal::ZERO {
            return Err(SizingError::NonPositiveBudget(self.budget_jpy));
        }
        if ask <= Decimal::ZERO {
            return Err(SizingError::NonPositiveAsk(ask));
        }

        let surplus = available % self.budget_jpy;
        // A leftover below half a budget would be a pointless purchase on
        // its own, so it rides along with the next full budget instead.
        let invest_jpy = if surplus >= self.budget_jpy * dec!(0.5) {
            surplus
        } else {
            surplus + self.budget_jpy
        };

        let precision = symbol.size_precision();
        let quantity = (invest_jpy / ask)
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
        let actual_invest_jpy =
            (ask * quantity).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        Ok(SizedOrder {
            quantity: format!("{quantity:.prec$}", prec = precision as usize),
            invest_jpy,
            actual_invest_jpy,
        })
    }
}
