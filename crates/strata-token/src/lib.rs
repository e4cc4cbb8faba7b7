// crates/strata-token/src/lib.rs
//
// strata-token: the AssetToken facade of the Strata engine.
//
// Wires the checkpoint ledger, lifecycle gating, and dividend book into
// one state machine exposing the full operation surface: the transfer
// gate (mint/burn/transfer/transferFrom/approve), dividend deposits,
// claims and recycling, administrative transitions, and token rescue.
// Every operation threads an explicit caller address; external value
// movement crosses the AssetGateway and FeeClearing seams.

pub mod allowance;
pub mod metadata;
pub mod token;

pub use allowance::Allowances;
pub use metadata::TokenMetadata;
pub use token::AssetToken;
