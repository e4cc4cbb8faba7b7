// crates/strata-cli/src/commands/share.rs
//
// `strata share {mint, burn, transfer, ...}` — the transfer gate.

use clap::Subcommand;

use strata_core::{Address, NoopClearing, Shares, TokenError};

use crate::world::World;

/// Share movement subcommands.
#[derive(Debug, Subcommand)]
pub enum ShareCmd {
    /// Issue new shares to an account.
    Mint { to: Address, amount: Shares },
    /// Retire shares held by an account.
    Burn { from: Address, amount: Shares },
    /// Move shares from the caller to another account.
    Transfer { to: Address, amount: Shares },
    /// Move shares against an allowance granted to the caller.
    TransferFrom {
        from: Address,
        to: Address,
        amount: Shares,
    },
    /// Capital-control recovery: move a lost wallet's full balance.
    Recover { from: Address, to: Address },
    /// Grant a spender the right to move the caller's shares.
    Approve { spender: Address, amount: Shares },
    /// Raise an existing grant.
    IncreaseApproval { spender: Address, amount: Shares },
    /// Lower an existing grant (floors at zero).
    DecreaseApproval { spender: Address, amount: Shares },
}

/// Run a share subcommand as `caller`.
pub fn run(world: &mut World, caller: &Address, cmd: &ShareCmd) -> Result<(), TokenError> {
    let token = &mut world.token;
    match cmd {
        ShareCmd::Mint { to, amount } => {
            token.mint(caller, *to, *amount, &mut NoopClearing)?;
            println!("Minted {} shares to {}", amount, to);
        }
        ShareCmd::Burn { from, amount } => {
            token.burn(caller, *from, *amount)?;
            println!("Burned {} shares from {}", amount, from);
        }
        ShareCmd::Transfer { to, amount } => {
            token.transfer(caller, *to, *amount)?;
            println!("Transferred {} shares to {}", amount, to);
        }
        ShareCmd::TransferFrom { from, to, amount } => {
            token.transfer_from(caller, *from, *to, *amount)?;
            println!("Transferred {} shares from {} to {}", amount, from, to);
        }
        ShareCmd::Recover { from, to } => {
            // Recovery always moves the full balance; reading it here just
            // names the amount for the operation's full-balance check.
            let amount = token.balance_of(from);
            token.forced_transfer_from(caller, *from, *to, amount)?;
            println!("Recovered {} shares from {} to {}", amount, from, to);
        }
        ShareCmd::Approve { spender, amount } => {
            token.approve(caller, *spender, *amount)?;
            println!("Approved {} shares for {}", amount, spender);
        }
        ShareCmd::IncreaseApproval { spender, amount } => {
            token.increase_approval(caller, *spender, *amount)?;
            println!(
                "Allowance for {} is now {}",
                spender,
                token.allowance(caller, spender)
            );
        }
        ShareCmd::DecreaseApproval { spender, amount } => {
            token.decrease_approval(caller, *spender, *amount)?;
            println!(
                "Allowance for {} is now {}",
                spender,
                token.allowance(caller, spender)
            );
        }
    }
    Ok(())
}
