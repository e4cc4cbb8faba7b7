// crates/strata-token/src/metadata.rs
//
// Descriptive and financial configuration of a token instance.
//
// Mutable only through the facade's gated setters: owner before the
// token goes alive, capitalControl at any time.

use serde::{Deserialize, Serialize};

use strata_core::CurrencyKind;

/// Name, symbol, description, and base-currency configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub short_description: String,
    /// Currency dividends are deposited and paid out in.
    pub base_currency: CurrencyKind,
    /// Issue rate in base-currency smallest units per share.
    pub base_rate: u64,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            short_description: String::new(),
            base_currency: CurrencyKind::Native,
            base_rate: 0,
        }
    }
}
