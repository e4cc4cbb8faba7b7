// crates/strata-dividend/src/lib.rs
//
// strata-dividend: dividend deposits, pro-rata claims, and recycling.
//
// Each deposit becomes an immutable DividendRecord pinned to the ledger
// height and total supply at deposit time. Holders claim floor(b*D/S)
// once per record; after the lock period the unclaimed remainder can be
// swept into a fresh record snapshotted at the current ledger state.

pub mod book;
pub mod record;

pub use book::{DividendBook, RecycleOutcome};
pub use record::{DividendRecord, RECYCLE_LOCK_DAYS};
