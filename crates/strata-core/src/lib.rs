// crates/strata-core/src/lib.rs
//
// strata-core: shared types for the Strata equity token engine —
// account addresses, amount types, currency kinds, the operation error
// taxonomy, and the trait seams external collaborators plug into.

pub mod address;
pub mod amount;
pub mod currency;
pub mod error;
pub mod gateway;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
pub use address::{Address, ADDRESS_LEN};
pub use amount::{Funds, Shares, SHARE_DECIMALS};
pub use currency::CurrencyKind;
pub use error::TokenError;
pub use gateway::MemoryGateway;
pub use traits::{AssetGateway, FeeClearing, NoopClearing};
