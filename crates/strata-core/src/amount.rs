// crates/strata-core/src/amount.rs
//
// Amount types for the Strata token engine.
//
// Share balances are whole-number share counts: equity tokens carry no
// fractional units. Funding-currency amounts (dividend deposits, claim
// payouts) are tracked in the currency's smallest unit and need the wider
// u128 range — one native coin is commonly 10^18 smallest units.

/// A share balance or share amount. Whole shares only.
pub type Shares = u64;

/// A funding-currency amount in smallest units.
pub type Funds = u128;

/// Equity share tokens have no fractional units.
pub const SHARE_DECIMALS: u8 = 0;
