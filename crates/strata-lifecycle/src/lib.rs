// crates/strata-lifecycle/src/lib.rs
//
// strata-lifecycle: phase, role, and flag gating for the Strata engine.
//
// Dividend correctness depends on *when* balance mutations may run
// relative to checkpoint and deposit events, so every mutating operation
// passes through the single authorization table in this crate.

pub mod machine;
pub mod phase;
pub mod roles;

pub use machine::{Gate, TokenLifecycle};
pub use phase::TokenPhase;
pub use roles::Roles;
