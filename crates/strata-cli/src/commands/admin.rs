// crates/strata-cli/src/commands/admin.rs
//
// `strata admin <...>` — lifecycle transitions, role assignment, pause
// switches, and metadata configuration.

use clap::Subcommand;

use strata_core::{Address, CurrencyKind, TokenError};

use crate::world::World;

/// Administrative subcommands.
#[derive(Debug, Subcommand)]
pub enum AdminCmd {
    /// Confirm the token's configuration.
    SetConfigured,
    /// Take the token live (one-way).
    SetAlive,
    /// Assign the pause and rescue roles in one step.
    SetRoles {
        pause_control: Address,
        rescue_control: Address,
    },
    /// Assign the pause role.
    SetPauseControl { address: Address },
    /// Assign the capital-control role (before alive).
    SetCapitalControl { address: Address },
    /// Capital control's self-managed handoff (once alive).
    UpdateCapitalControl { address: Address },
    /// Assign the delegated minter.
    SetMintControl { address: Address },
    /// End ordinary minting.
    FinishMinting,
    /// Re-open minting under a new delegate.
    ReopenCrowdsale { mint_control: Address },
    /// Issuer-side switch for share transfers.
    EnableTransfers { enabled: bool },
    /// Pause-role switch for share transfers.
    PauseTransfer { enabled: bool },
    /// Pause-role switch for mint/burn. `false` pauses.
    PauseCapital { enabled: bool },
    /// Set the token name.
    SetName { name: String },
    /// Set the token symbol.
    SetSymbol { symbol: String },
    /// Set the short description.
    SetDescription { text: String },
    /// Set the issue rate in base-currency units per share.
    SetBaseRate { rate: u64 },
    /// Set the dividend base currency: "native" or an asset address.
    SetBaseCurrency { currency: CurrencyKind },
}

/// Run an admin subcommand as `caller`.
pub fn run(world: &mut World, caller: &Address, cmd: &AdminCmd) -> Result<(), TokenError> {
    let token = &mut world.token;
    match cmd {
        AdminCmd::SetConfigured => {
            token.set_token_configured(caller)?;
            println!("Token configured");
        }
        AdminCmd::SetAlive => {
            token.set_token_alive(caller)?;
            println!("Token is alive");
        }
        AdminCmd::SetRoles {
            pause_control,
            rescue_control,
        } => {
            token.set_roles(caller, *pause_control, *rescue_control)?;
            println!("Roles assigned");
        }
        AdminCmd::SetPauseControl { address } => {
            token.set_pause_control(caller, *address)?;
            println!("Pause control: {}", address);
        }
        AdminCmd::SetCapitalControl { address } => {
            token.set_capital_control(caller, *address)?;
            println!("Capital control: {}", address);
        }
        AdminCmd::UpdateCapitalControl { address } => {
            token.update_capital_control(caller, *address)?;
            println!("Capital control handed to {}", address);
        }
        AdminCmd::SetMintControl { address } => {
            token.set_mint_control(caller, *address)?;
            println!("Mint control: {}", address);
        }
        AdminCmd::FinishMinting => {
            token.finish_minting(caller)?;
            println!("Minting finished");
        }
        AdminCmd::ReopenCrowdsale { mint_control } => {
            token.reopen_crowdsale(caller, *mint_control)?;
            println!("Crowdsale reopened under {}", mint_control);
        }
        AdminCmd::EnableTransfers { enabled } => {
            token.enable_transfers(caller, *enabled)?;
            println!("Transfers {}", if *enabled { "enabled" } else { "disabled" });
        }
        AdminCmd::PauseTransfer { enabled } => {
            token.pause_transfer(caller, *enabled)?;
            println!("Transfers {}", if *enabled { "enabled" } else { "disabled" });
        }
        AdminCmd::PauseCapital { enabled } => {
            token.pause_capital_increase_or_decrease(caller, *enabled)?;
            println!(
                "Mint/burn {}",
                if *enabled { "running" } else { "paused" }
            );
        }
        AdminCmd::SetName { name } => {
            token.set_name(caller, name.clone())?;
            println!("Name: {}", name);
        }
        AdminCmd::SetSymbol { symbol } => {
            token.set_symbol(caller, symbol.clone())?;
            println!("Symbol: {}", symbol);
        }
        AdminCmd::SetDescription { text } => {
            token.set_short_description(caller, text.clone())?;
            println!("Description set");
        }
        AdminCmd::SetBaseRate { rate } => {
            token.set_base_rate(caller, *rate)?;
            println!("Base rate: {}", rate);
        }
        AdminCmd::SetBaseCurrency { currency } => {
            token.set_base_currency(caller, *currency)?;
            println!("Base currency: {}", currency);
        }
    }
    Ok(())
}
