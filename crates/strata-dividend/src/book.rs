// crates/strata-dividend/src/book.rs
//
// The ordered collection of dividend records plus escrow accounting.
//
// The book is currency- and balance-agnostic: callers validate the
// deposit currency and look up checkpointed balances, then drive claims
// in two phases — claimable() to validate and read, mark_claimed() after
// the payout confirmed. That split keeps the external transfer between
// validation and commit, so a failed payout leaves no claim mark behind.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use strata_core::{Address, CurrencyKind, Funds, Shares, TokenError};
use strata_ledger::LedgerIndex;

use crate::record::DividendRecord;

/// Result of a recycle sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecycleOutcome {
    /// Unclaimed amount swept out of the old record.
    pub swept: Funds,
    /// The fresh record the sweep deposited into, if anything remained.
    pub new_record_id: Option<u64>,
}

/// Append-only dividend records with per-currency escrow totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DividendBook {
    records: Vec<DividendRecord>,
    /// Still-escrowed amount per currency: deposited minus paid out.
    escrow: BTreeMap<CurrencyKind, Funds>,
}

impl DividendBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records ever created (recycled ones included).
    pub fn len(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&DividendRecord> {
        self.records.get(id as usize)
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[DividendRecord] {
        &self.records
    }

    /// Amount of `currency` still owed to claimants across all records.
    pub fn escrowed(&self, currency: &CurrencyKind) -> Funds {
        self.escrow.get(currency).copied().unwrap_or(0)
    }

    /// Record a deposit whose funds are already in custody.
    ///
    /// Snapshots must be taken from the ledger as of immediately before
    /// the deposit: `total_supply_at_deposit` and `checkpoint_index` fix
    /// the population entitlements are computed over.
    ///
    /// # Errors
    /// Returns `TokenError::Precondition` for a zero amount.
    pub fn deposit(
        &mut self,
        currency: CurrencyKind,
        amount: Funds,
        total_supply_at_deposit: Shares,
        checkpoint_index: LedgerIndex,
        now: DateTime<Utc>,
    ) -> Result<u64, TokenError> {
        if amount == 0 {
            return Err(TokenError::Precondition(
                "dividend deposit amount must be positive".to_string(),
            ));
        }
        let id = self.records.len() as u64;
        self.records.push(DividendRecord {
            id,
            currency,
            deposited: amount,
            claimed_amount: 0,
            total_supply_at_deposit,
            checkpoint_index,
            created_at: now,
            claimed: BTreeSet::new(),
            recycled: false,
        });
        let escrowed = self.escrow.entry(currency).or_insert(0);
        *escrowed = escrowed.saturating_add(amount);
        Ok(id)
    }

    /// Validate that `caller` can claim `id` now and return the record.
    ///
    /// # Errors
    /// `Precondition` for a missing or recycled record, `AlreadyClaimed`
    /// for a double claim.
    pub fn claimable(&self, id: u64, caller: &Address) -> Result<&DividendRecord, TokenError> {
        let record = self
            .records
            .get(id as usize)
            .ok_or_else(|| TokenError::Precondition(format!("no dividend record {}", id)))?;
        if record.recycled {
            return Err(TokenError::Precondition(format!(
                "dividend record {} has been recycled",
                id
            )));
        }
        if record.claimed.contains(caller) {
            return Err(TokenError::AlreadyClaimed(format!(
                "{} already claimed dividend record {}",
                caller, id
            )));
        }
        Ok(record)
    }

    /// Commit a settled claim. Call only after the payout confirmed.
    ///
    /// Marks `caller` claimed even when `paid` is zero, so a zero-balance
    /// holder's claim is a no-op that still cannot be repeated.
    pub fn mark_claimed(
        &mut self,
        id: u64,
        caller: Address,
        paid: Funds,
    ) -> Result<(), TokenError> {
        let record = self
            .records
            .get_mut(id as usize)
            .ok_or_else(|| TokenError::Precondition(format!("no dividend record {}", id)))?;
        record.claimed.insert(caller);
        record.claimed_amount = record.claimed_amount.saturating_add(paid);
        let currency = record.currency;
        if paid > 0 {
            let escrowed = self.escrow.entry(currency).or_insert(0);
            *escrowed = escrowed.saturating_sub(paid);
        }
        Ok(())
    }

    /// Record ids `caller` can still claim, oldest first.
    ///
    /// The lazy pending sequence behind claim-all: records not recycled
    /// and not yet claimed by `caller`.
    pub fn pending_for<'a>(&'a self, caller: &'a Address) -> impl Iterator<Item = u64> + 'a {
        self.records
            .iter()
            .filter(move |r| !r.recycled && !r.claimed.contains(caller))
            .map(|r| r.id)
    }

    /// Sweep the unclaimed remainder of `id` into a brand-new record.
    ///
    /// The new record snapshots the *current* ledger state, so claims on
    /// it follow current balances — holders who received shares after the
    /// original deposit share in the remainder. The old record is marked
    /// recycled, permanently blocking claims against it. Escrow totals are
    /// unchanged: the value merely moves between records.
    ///
    /// # Errors
    /// `Precondition` if the record is missing, already recycled, or the
    /// lock period has not elapsed by `now`.
    pub fn recycle(
        &mut self,
        id: u64,
        now: DateTime<Utc>,
        current_supply: Shares,
        current_index: LedgerIndex,
    ) -> Result<RecycleOutcome, TokenError> {
        let record = self
            .records
            .get_mut(id as usize)
            .ok_or_else(|| TokenError::Precondition(format!("no dividend record {}", id)))?;
        if record.recycled {
            return Err(TokenError::Precondition(format!(
                "dividend record {} has already been recycled",
                id
            )));
        }
        let unlock_at = record.recyclable_at().ok_or_else(|| {
            TokenError::Precondition("lock period end is out of range".to_string())
        })?;
        if now < unlock_at {
            return Err(TokenError::Precondition(format!(
                "lock period for record {} runs until {}",
                id, unlock_at
            )));
        }
        let remainder = record.outstanding();
        let currency = record.currency;
        record.recycled = true;

        let new_record_id = if remainder > 0 {
            let new_id = self.records.len() as u64;
            self.records.push(DividendRecord {
                id: new_id,
                currency,
                deposited: remainder,
                claimed_amount: 0,
                total_supply_at_deposit: current_supply,
                checkpoint_index: current_index,
                created_at: now,
                claimed: BTreeSet::new(),
                recycled: false,
            });
            Some(new_id)
        } else {
            None
        };

        Ok(RecycleOutcome {
            swept: remainder,
            new_record_id,
        })
    }
}
