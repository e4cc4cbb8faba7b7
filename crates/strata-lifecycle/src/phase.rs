// crates/strata-lifecycle/src/phase.rs
//
// Lifecycle phases of a token.
//
// Valid transitions:
//   Created -> Configured -> Alive

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a token instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenPhase {
    /// Freshly created; configuration has not been confirmed.
    Created,
    /// Configuration confirmed; still under issuer setup.
    Configured,
    /// Live. Configuration and role assignment are locked to the
    /// capital-control override paths.
    Alive,
}

impl fmt::Display for TokenPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenPhase::Created => write!(f, "Created"),
            TokenPhase::Configured => write!(f, "Configured"),
            TokenPhase::Alive => write!(f, "Alive"),
        }
    }
}
