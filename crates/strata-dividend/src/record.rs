// crates/strata-dividend/src/record.rs
//
// One dividend deposit, pinned to the ledger state at deposit time.
//
// A record is immutable except for claim tracking and the one-time
// recycled transition. Entitlements divide with integer floor; the dust
// the floor leaves behind stays escrowed and travels with the next
// recycle instead of being lost or double-paid.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use strata_core::{Address, CurrencyKind, Funds, Shares, TokenError};
use strata_ledger::LedgerIndex;

/// Days a record's remainder stays locked before it may be recycled.
pub const RECYCLE_LOCK_DAYS: i64 = 365;

/// An immutable snapshot of one dividend deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendRecord {
    /// Position in the book (zero-based, increasing).
    pub id: u64,
    /// Currency the deposit escrowed.
    pub currency: CurrencyKind,
    /// Amount deposited.
    pub deposited: Funds,
    /// Cumulative amount already paid out to claimants.
    pub claimed_amount: Funds,
    /// Total share supply at the snapshot height.
    pub total_supply_at_deposit: Shares,
    /// Ledger height entitlements are computed against.
    pub checkpoint_index: LedgerIndex,
    /// Wall-clock creation time; starts the recycle lock.
    pub created_at: DateTime<Utc>,
    /// Holders that have claimed on this record.
    pub claimed: BTreeSet<Address>,
    /// Set once when the unclaimed remainder is swept forward.
    pub recycled: bool,
}

impl DividendRecord {
    /// Pro-rata entitlement of `balance` shares: floor(balance * deposited
    /// / supply). A zero-supply record entitles nobody to anything.
    ///
    /// # Errors
    /// Returns `TokenError::Precondition` if the widened multiplication
    /// overflows u128.
    pub fn entitlement(&self, balance: Shares) -> Result<Funds, TokenError> {
        if self.total_supply_at_deposit == 0 {
            return Ok(0);
        }
        let numerator = (balance as Funds).checked_mul(self.deposited).ok_or_else(|| {
            TokenError::Precondition(format!(
                "entitlement overflow for dividend record {}",
                self.id
            ))
        })?;
        Ok(numerator / self.total_supply_at_deposit as Funds)
    }

    /// Amount not yet paid out.
    pub fn outstanding(&self) -> Funds {
        self.deposited.saturating_sub(self.claimed_amount)
    }

    /// Whether `account` has claimed on this record.
    pub fn has_claimed(&self, account: &Address) -> bool {
        self.claimed.contains(account)
    }

    /// Earliest instant the remainder may be recycled. None only if the
    /// lock end falls outside the representable time range.
    pub fn recyclable_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .checked_add_signed(Duration::days(RECYCLE_LOCK_DAYS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_record(deposited: Funds, supply: Shares) -> DividendRecord {
        DividendRecord {
            id: 0,
            currency: CurrencyKind::Native,
            deposited,
            claimed_amount: 0,
            total_supply_at_deposit: supply,
            checkpoint_index: 1,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            claimed: BTreeSet::new(),
            recycled: false,
        }
    }

    #[test]
    fn test_entitlement_proportional() {
        let record = make_record(1_000, 1_000);
        assert_eq!(record.entitlement(100).unwrap(), 100);
        assert_eq!(record.entitlement(250).unwrap(), 250);
        assert_eq!(record.entitlement(0).unwrap(), 0);
    }

    #[test]
    fn test_entitlement_floors() {
        // 10 units across 3 shares: 1 share earns floor(10/3) = 3.
        let record = make_record(10, 3);
        assert_eq!(record.entitlement(1).unwrap(), 3);
        // The three holders together get 9; 1 unit of dust stays behind.
        assert_eq!(record.entitlement(1).unwrap() * 3, 9);
    }

    #[test]
    fn test_entitlement_sum_never_exceeds_deposit() {
        let record = make_record(1_000_000_007, 7);
        let per_share = record.entitlement(1).unwrap();
        assert!(per_share * 7 <= record.deposited);
    }

    #[test]
    fn test_zero_supply_record_pays_nothing() {
        let record = make_record(500, 0);
        assert_eq!(record.entitlement(100).unwrap(), 0);
    }

    #[test]
    fn test_entitlement_overflow_fails_closed() {
        let record = make_record(Funds::MAX, 2);
        assert!(record.entitlement(3).is_err());
    }

    #[test]
    fn test_outstanding() {
        let mut record = make_record(1_000, 1_000);
        assert_eq!(record.outstanding(), 1_000);
        record.claimed_amount = 400;
        assert_eq!(record.outstanding(), 600);
    }

    #[test]
    fn test_recyclable_at_is_one_year_out() {
        let record = make_record(1, 1);
        let unlock = record.recyclable_at().unwrap();
        assert_eq!(
            unlock,
            Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()
        );
    }
}
