// crates/strata-ledger/src/lib.rs
//
// strata-ledger: the checkpointed balance ledger of the Strata engine.
//
// Every balance-changing operation writes (height, value) checkpoints for
// the accounts it touches, and mint/burn additionally checkpoint the total
// supply. Histories are append-only and never pruned, so the balance any
// account held at any past height stays answerable for the life of the
// system — dividend entitlements depend on it.

pub mod checkpoint;
pub mod ledger;

// Re-export key types for ergonomic access from downstream crates.
pub use checkpoint::{Checkpoint, LedgerIndex};
pub use ledger::CheckpointLedger;
