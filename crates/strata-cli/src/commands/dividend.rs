// crates/strata-cli/src/commands/dividend.rs
//
// `strata dividend {deposit, claim, claim-all, claim-batch, recycle,
// rescue}` — the dividend engine and token rescue.

use chrono::{DateTime, Utc};
use clap::Subcommand;

use strata_core::{Address, CurrencyKind, Funds, TokenError};

use crate::world::World;

/// Dividend subcommands.
#[derive(Debug, Subcommand)]
pub enum DividendCmd {
    /// Deposit a dividend in the configured base currency.
    Deposit {
        /// Amount in smallest currency units.
        amount: Funds,
        /// Deposit a designated asset instead of the native currency.
        #[arg(long)]
        asset: Option<Address>,
    },
    /// Claim the caller's share of one record.
    Claim { record: u64 },
    /// Claim every record still pending for the caller.
    ClaimAll,
    /// Claim the half-open record range [from, to).
    ClaimBatch { from: u64, to: u64 },
    /// Sweep a record's unclaimed remainder into a fresh record.
    Recycle { record: u64 },
    /// Sweep a stray asset out of the token's custody.
    Rescue {
        /// "native" or an asset address.
        currency: CurrencyKind,
        to: Address,
    },
}

/// Run a dividend subcommand as `caller` at simulated time `now`.
pub fn run(
    world: &mut World,
    caller: &Address,
    now: DateTime<Utc>,
    cmd: &DividendCmd,
) -> Result<(), TokenError> {
    let World { token, gateway } = world;
    match cmd {
        DividendCmd::Deposit { amount, asset } => {
            let id = match asset {
                Some(asset) => {
                    token.deposit_asset_dividend(caller, gateway, *asset, *amount, now)?
                }
                None => token.deposit_dividend(caller, gateway, *amount, now)?,
            };
            println!("Created dividend record {}", id);
        }
        DividendCmd::Claim { record } => {
            let paid = token.claim_dividend(caller, gateway, *record)?;
            println!("Claimed {} from record {}", paid, record);
        }
        DividendCmd::ClaimAll => {
            let paid = token.claim_dividend_all(caller, gateway)?;
            println!("Claimed {} across all pending records", paid);
        }
        DividendCmd::ClaimBatch { from, to } => {
            let paid = token.claim_in_batches(caller, gateway, *from, *to)?;
            println!("Claimed {} from records [{}, {})", paid, from, to);
        }
        DividendCmd::Recycle { record } => {
            let outcome = token.recycle_dividend(caller, *record, now)?;
            match outcome.new_record_id {
                Some(id) => println!(
                    "Recycled record {}: {} swept into new record {}",
                    record, outcome.swept, id
                ),
                None => println!("Recycled record {}: nothing left to sweep", record),
            }
        }
        DividendCmd::Rescue { currency, to } => {
            let swept = token.rescue_token(caller, gateway, *currency, *to)?;
            println!("Rescued {} {} to {}", swept, currency, to);
        }
    }
    Ok(())
}
