// crates/strata-cli/src/output.rs
//
// Table rows and formatting for the Strata CLI listings.

use tabled::{Table, Tabled};

use strata_core::Address;
use strata_token::AssetToken;

/// One account in the `accounts` listing.
#[derive(Tabled)]
pub struct AccountRow {
    pub address: String,
    pub shares: u64,
    pub checkpoints: usize,
}

/// One dividend record in the `records` listing.
#[derive(Tabled)]
pub struct RecordRow {
    pub id: u64,
    pub currency: String,
    pub deposited: u128,
    pub outstanding: u128,
    pub supply: u64,
    pub height: u64,
    pub created: String,
    pub claimants: usize,
    pub recycled: bool,
}

/// One checkpoint in the `history` listing.
#[derive(Tabled)]
pub struct HistoryRow {
    pub height: u64,
    pub shares: u64,
}

/// Format a slice of rows as a table string.
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).to_string()
}

/// Rows for every account the token has ever checkpointed.
pub fn account_rows(token: &AssetToken) -> Vec<AccountRow> {
    token
        .ledger()
        .accounts()
        .map(|address| AccountRow {
            address: address.to_string(),
            shares: token.balance_of(address),
            checkpoints: token.ledger().checkpoint_count(address),
        })
        .collect()
}

/// Rows for every dividend record, oldest first.
pub fn record_rows(token: &AssetToken) -> Vec<RecordRow> {
    token
        .dividends()
        .records()
        .iter()
        .map(|record| RecordRow {
            id: record.id,
            currency: record.currency.to_string(),
            deposited: record.deposited,
            outstanding: record.outstanding(),
            supply: record.total_supply_at_deposit,
            height: record.checkpoint_index,
            created: record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            claimants: record.claimed.len(),
            recycled: record.recycled,
        })
        .collect()
}

/// Rows for one account's full checkpoint history.
pub fn history_rows(token: &AssetToken, account: &Address) -> Vec<HistoryRow> {
    token
        .ledger()
        .history_of(account)
        .iter()
        .map(|c| HistoryRow {
            height: c.index,
            shares: c.value,
        })
        .collect()
}
