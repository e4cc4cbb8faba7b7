// crates/strata-ledger/src/ledger.rs
//
// The checkpointed balance ledger.
//
// One global height totally orders every balance-changing operation. An
// operation calls begin_mutation() once, then records the post-mutation
// balance of every account it touched (and the total supply, for mint and
// burn) at that height. Dividend deposits snapshot the height without
// advancing it, so a deposit always sees the state as of the last
// committed mutation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use strata_core::{Address, Shares};

use crate::checkpoint::{record, value_at, Checkpoint, LedgerIndex};

/// Append-only balance and supply history with point-in-time queries.
///
/// Histories are never pruned: historical claims stay answerable for the
/// life of the token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckpointLedger {
    /// Current global height. Height 0 predates every mutation.
    height: LedgerIndex,
    /// Per-account checkpoint history, sorted by height.
    accounts: BTreeMap<Address, Vec<Checkpoint>>,
    /// Total-supply checkpoint history, sorted by height.
    supply: Vec<Checkpoint>,
}

impl CheckpointLedger {
    /// Create an empty ledger at height 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current global height.
    pub fn height(&self) -> LedgerIndex {
        self.height
    }

    /// Advance the height for a new top-level mutating operation.
    ///
    /// Call exactly once per operation; every checkpoint the operation
    /// records is written at the returned height, so a single transfer
    /// yields one coherent height for both sender and receiver.
    pub fn begin_mutation(&mut self) -> LedgerIndex {
        self.height += 1;
        self.height
    }

    /// Record `account`'s balance after a mutation at the current height.
    ///
    /// A second write for the same account at the same height overwrites
    /// the entry instead of duplicating it.
    pub fn record_balance(&mut self, account: Address, value: Shares) {
        let history = self.accounts.entry(account).or_default();
        record(history, self.height, value);
    }

    /// Record the total supply after a mint or burn at the current height.
    pub fn record_total_supply(&mut self, value: Shares) {
        record(&mut self.supply, self.height, value);
    }

    /// Live balance of `account`.
    pub fn balance_of(&self, account: &Address) -> Shares {
        self.accounts
            .get(account)
            .and_then(|history| history.last())
            .map(|c| c.value)
            .unwrap_or(0)
    }

    /// Balance of `account` as of height `at`.
    ///
    /// Queries at or above the current height return the live balance;
    /// an account with no history by `at` reads as 0.
    pub fn balance_of_at(&self, account: &Address, at: LedgerIndex) -> Shares {
        self.accounts
            .get(account)
            .map(|history| value_at(history, at))
            .unwrap_or(0)
    }

    /// Live total supply.
    pub fn total_supply(&self) -> Shares {
        self.supply.last().map(|c| c.value).unwrap_or(0)
    }

    /// Total supply as of height `at`.
    pub fn total_supply_at(&self, at: LedgerIndex) -> Shares {
        value_at(&self.supply, at)
    }

    /// Every account that ever held a balance, in address order.
    pub fn accounts(&self) -> impl Iterator<Item = &Address> {
        self.accounts.keys()
    }

    /// Number of checkpoints stored for `account`.
    pub fn checkpoint_count(&self, account: &Address) -> usize {
        self.accounts.get(account).map(|h| h.len()).unwrap_or(0)
    }

    /// Full checkpoint history of `account`, oldest first.
    pub fn history_of(&self, account: &Address) -> &[Checkpoint] {
        self.accounts
            .get(account)
            .map(|h| h.as_slice())
            .unwrap_or(&[])
    }
}
