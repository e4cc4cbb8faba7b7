// crates/strata-core/src/address.rs
//
// Account identity for the Strata token engine.
//
// An address is a 20-byte key rendered as 0x-prefixed hex. The all-zero
// address is reserved as "no account" and is rejected wherever an
// operation names a counterparty or a role holder.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TokenError;

/// Byte length of an account address.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account identity.
///
/// Serialized as a 0x-prefixed hex string so addresses stay readable in
/// JSON state files and can key JSON maps.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The reserved all-zero address ("no account").
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Wrap raw address bytes.
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Build an address whose low eight bytes hold `n` big-endian.
    ///
    /// Convenient for fixtures and local simulation accounts.
    ///
    /// # Example
    /// ```
    /// use strata_core::address::Address;
    /// let a = Address::from_low_u64(1);
    /// assert_eq!(a.to_string(), "0x0000000000000000000000000000000000000001");
    /// ```
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 8..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    /// Generate a random (non-zero, with overwhelming probability) address.
    pub fn random() -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Whether this is the reserved zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != ADDRESS_LEN * 2 {
            return Err(TokenError::Precondition(format!(
                "Address must be {} hex characters, got {}",
                ADDRESS_LEN * 2,
                digits.len()
            )));
        }
        let bytes = hex::decode(digits)
            .map_err(|e| TokenError::Precondition(format!("Invalid address hex: {}", e)))?;
        let mut arr = [0u8; ADDRESS_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        let a = Address::from_low_u64(0xdeadbeef);
        let parsed: Address = a.to_string().parse().unwrap();
        assert_eq!(a, parsed);
    }

    #[test]
    fn test_parse_without_prefix() {
        let a: Address = "0000000000000000000000000000000000000001".parse().unwrap();
        assert_eq!(a, Address::from_low_u64(1));
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert!("0x1234".parse::<Address>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert!("0xzz00000000000000000000000000000000000000"
            .parse::<Address>()
            .is_err());
    }

    #[test]
    fn test_zero_detection() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_low_u64(7).is_zero());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let a = Address::from_low_u64(42);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "\"0x000000000000000000000000000000000000002a\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn test_serde_map_key() {
        use std::collections::BTreeMap;
        let mut map = BTreeMap::new();
        map.insert(Address::from_low_u64(1), 10u64);
        let json = serde_json::to_string(&map).unwrap();
        let back: BTreeMap<Address, u64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[&Address::from_low_u64(1)], 10);
    }

    #[test]
    fn test_random_addresses_differ() {
        assert_ne!(Address::random(), Address::random());
    }
}
