// crates/strata-core/src/currency.rs
//
// Funding-currency identification.
//
// A token escrows and distributes dividends in exactly one base currency:
// either the host chain's native coin or a designated fungible asset
// identified by its contract address.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::address::Address;
use crate::error::TokenError;

/// The kind of currency a deposit or payout moves.
///
/// Serialized as a string ("native" or the asset's hex address) so it can
/// key JSON maps in persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CurrencyKind {
    /// The host chain's native currency.
    Native,
    /// A designated fungible asset, identified by contract address.
    Asset(Address),
}

impl CurrencyKind {
    /// Whether this is the native currency.
    pub fn is_native(&self) -> bool {
        matches!(self, CurrencyKind::Native)
    }
}

impl fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyKind::Native => write!(f, "native"),
            CurrencyKind::Asset(addr) => write!(f, "{}", addr),
        }
    }
}

impl FromStr for CurrencyKind {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "native" {
            Ok(CurrencyKind::Native)
        } else {
            Ok(CurrencyKind::Asset(s.parse()?))
        }
    }
}

impl Serialize for CurrencyKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CurrencyKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_roundtrip() {
        let json = serde_json::to_string(&CurrencyKind::Native).unwrap();
        assert_eq!(json, "\"native\"");
        let back: CurrencyKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CurrencyKind::Native);
    }

    #[test]
    fn test_asset_roundtrip() {
        let kind = CurrencyKind::Asset(Address::from_low_u64(9));
        let json = serde_json::to_string(&kind).unwrap();
        let back: CurrencyKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn test_is_native() {
        assert!(CurrencyKind::Native.is_native());
        assert!(!CurrencyKind::Asset(Address::from_low_u64(1)).is_native());
    }
}
