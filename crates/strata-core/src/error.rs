// crates/strata-core/src/error.rs
//
// Operation failure taxonomy for the Strata token engine.
//
// Every mutating operation either commits all of its state changes or
// returns one of these errors with nothing changed. There is no internal
// retry; recovery is the caller's concern.

use thiserror::Error;

/// Failure taxonomy shared by every token operation.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The caller's role or the current lifecycle phase forbids the operation.
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Invalid argument or unmet operational precondition (zero
    /// address/amount, nonexistent record, lock period not elapsed,
    /// wrong currency, arithmetic overflow).
    #[error("Precondition error: {0}")]
    Precondition(String),

    /// A transfer, burn, or allowance spend exceeding the available value.
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    /// A holder attempted a direct claim on a record it already claimed.
    #[error("Already claimed: {0}")]
    AlreadyClaimed(String),

    /// An escrowed-asset transfer in or out did not confirm success.
    #[error("External transfer failure: {0}")]
    ExternalTransfer(String),
}
