//! Tradable symbols and their exchange constraints.
//!
//! GMO Coin accepts a fixed number of fractional digits per asset when
//! sizing an order. The set of traded assets is closed, so the precision
//! lookup is an exhaustive match — an unmapped symbol cannot exist.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Assets this agent accumulates on GMO Coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbol {
    Btc,
    Sol,
}

impl Symbol {
    /// The symbol code as GMO Coin spells it on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Sol => "SOL",
        }
    }

    /// Number of fractional digits the exchange accepts for order size.
    ///
    /// BTC orders go down to 0.0001, SOL orders down to 0.01.
    pub fn size_precision(self) -> u32 {
        match self {
            Self::Btc => 4,
            Self::Sol => 2,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BTC" => Ok(Self::Btc),
            "SOL" => Ok(Self::Sol),
            other => Err(UnknownSymbol(other.to_string())),
        }
    }
}

/// Error for a symbol code outside the traded set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol code: {0}")]
pub struct UnknownSymbol(pub String);
