// crates/strata-lifecycle/src/machine.rs
//
// The lifecycle authorization table and transition operations.
//
// Phase chain:
//   Created -> Configured -> Alive
//
// Orthogonal flags: mint_burn_finished (one-way, reversible only through
// reopen_crowdsale), transfers_enabled and mint_burn_paused (toggles held
// by the pause role). authorize() is the single table every gated
// operation consults; the transition methods mutate state only after
// passing it.

use std::fmt;

use serde::{Deserialize, Serialize};

use strata_core::{Address, TokenError};

use crate::phase::TokenPhase;
use crate::roles::Roles;

/// Every role- or phase-gated operation in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Mint,
    Burn,
    Transfer,
    TransferFrom,
    ForcedTransferFrom,
    Approve,
    DepositDividend,
    RecycleDividend,
    SetConfigured,
    SetAlive,
    SetRoles,
    SetPauseControl,
    SetCapitalControl,
    UpdateCapitalControl,
    SetMintControl,
    FinishMinting,
    ReopenCrowdsale,
    EnableTransfers,
    PauseTransfer,
    PauseCapital,
    SetMetadata,
    RescueToken,
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gate::Mint => "mint",
            Gate::Burn => "burn",
            Gate::Transfer => "transfer",
            Gate::TransferFrom => "transfer_from",
            Gate::ForcedTransferFrom => "forced transfer_from",
            Gate::Approve => "approve",
            Gate::DepositDividend => "deposit_dividend",
            Gate::RecycleDividend => "recycle_dividend",
            Gate::SetConfigured => "set_token_configured",
            Gate::SetAlive => "set_token_alive",
            Gate::SetRoles => "set_roles",
            Gate::SetPauseControl => "set_pause_control",
            Gate::SetCapitalControl => "set_capital_control",
            Gate::UpdateCapitalControl => "update_capital_control",
            Gate::SetMintControl => "set_mint_control",
            Gate::FinishMinting => "finish_minting",
            Gate::ReopenCrowdsale => "reopen_crowdsale",
            Gate::EnableTransfers => "enable_transfers",
            Gate::PauseTransfer => "pause_transfer",
            Gate::PauseCapital => "pause_capital_increase_or_decrease",
            Gate::SetMetadata => "set_metadata",
            Gate::RescueToken => "rescue_token",
        };
        write!(f, "{}", name)
    }
}

fn require_role_address(addr: &Address, role: &str) -> Result<(), TokenError> {
    if addr.is_zero() {
        return Err(TokenError::Precondition(format!(
            "{} must not be the zero address",
            role
        )));
    }
    Ok(())
}

/// Phase, flags, and role assignments for one token instance, plus the
/// authorization table gating every operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLifecycle {
    phase: TokenPhase,
    roles: Roles,
    mint_burn_finished: bool,
    transfers_enabled: bool,
    mint_burn_paused: bool,
    /// When set, set_token_alive hands the owner role to capitalControl.
    promote_capital_control_on_alive: bool,
}

impl TokenLifecycle {
    /// Plain variant: owner only, no capital-control role yet.
    pub fn new(owner: Address) -> Self {
        Self {
            phase: TokenPhase::Created,
            roles: Roles::new(owner),
            mint_burn_finished: false,
            transfers_enabled: false,
            mint_burn_paused: false,
            promote_capital_control_on_alive: false,
        }
    }

    /// Variant with a capital-control role assigned from the start.
    ///
    /// `promote_on_alive` selects whether going alive hands the owner role
    /// to capitalControl.
    pub fn with_capital_control(
        owner: Address,
        capital_control: Address,
        promote_on_alive: bool,
    ) -> Result<Self, TokenError> {
        require_role_address(&capital_control, "capital control")?;
        let mut lifecycle = Self::new(owner);
        lifecycle.roles.capital_control = Some(capital_control);
        lifecycle.promote_capital_control_on_alive = promote_on_alive;
        Ok(lifecycle)
    }

    pub fn phase(&self) -> TokenPhase {
        self.phase
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn is_alive(&self) -> bool {
        self.phase == TokenPhase::Alive
    }

    pub fn transfers_enabled(&self) -> bool {
        self.transfers_enabled
    }

    pub fn mint_burn_paused(&self) -> bool {
        self.mint_burn_paused
    }

    pub fn mint_burn_finished(&self) -> bool {
        self.mint_burn_finished
    }

    /// The authorization table: may `caller` perform `gate` right now?
    ///
    /// One row per gated operation; every mutating entry point consults
    /// this before touching state.
    pub fn authorize(&self, gate: Gate, caller: &Address) -> Result<(), TokenError> {
        let roles = &self.roles;
        let allowed = match gate {
            // capitalControl may always mint and burn; the ordinary path
            // needs the token alive, minting open, and not paused.
            Gate::Mint | Gate::Burn => {
                roles.is_capital_control(caller)
                    || (roles.is_mint_control(caller)
                        && self.phase == TokenPhase::Alive
                        && !self.mint_burn_finished
                        && !self.mint_burn_paused)
            }
            // Value movement is gated on the flag, not on a role.
            Gate::Transfer | Gate::TransferFrom | Gate::Approve => self.transfers_enabled,
            Gate::ForcedTransferFrom => {
                self.transfers_enabled && roles.is_capital_control(caller)
            }
            Gate::DepositDividend | Gate::RecycleDividend => {
                roles.is_owner(caller) || roles.is_capital_control(caller)
            }
            Gate::SetConfigured => roles.is_owner(caller) && self.phase != TokenPhase::Alive,
            Gate::SetAlive => roles.is_owner(caller) && self.phase == TokenPhase::Configured,
            // Role assignment locks at alive; capitalControl's own handoff
            // is the one exception.
            Gate::SetRoles | Gate::SetPauseControl | Gate::SetCapitalControl => {
                roles.is_owner(caller) && self.phase != TokenPhase::Alive
            }
            Gate::UpdateCapitalControl => {
                roles.is_capital_control(caller) && self.phase == TokenPhase::Alive
            }
            Gate::SetMintControl | Gate::SetMetadata | Gate::EnableTransfers => {
                roles.is_capital_control(caller)
                    || (roles.is_owner(caller) && self.phase != TokenPhase::Alive)
            }
            Gate::FinishMinting => {
                roles.is_owner(caller)
                    || roles.is_mint_control(caller)
                    || roles.is_capital_control(caller)
            }
            Gate::ReopenCrowdsale => roles.is_capital_control(caller),
            Gate::PauseTransfer | Gate::PauseCapital => roles.is_pause_control(caller),
            Gate::RescueToken => roles.is_rescue_control(caller),
        };
        if allowed {
            Ok(())
        } else {
            Err(TokenError::Authorization(format!(
                "{} not permitted for {} in phase {}",
                gate, caller, self.phase
            )))
        }
    }

    /// Confirm configuration. Idempotent before alive.
    pub fn set_configured(&mut self, caller: &Address) -> Result<(), TokenError> {
        self.authorize(Gate::SetConfigured, caller)?;
        if self.phase == TokenPhase::Created {
            tracing::info!(
                "Lifecycle transition: {} -> {}",
                TokenPhase::Created,
                TokenPhase::Configured
            );
            self.phase = TokenPhase::Configured;
        }
        Ok(())
    }

    /// Go live. One-way; requires the Configured phase.
    ///
    /// When the promote-on-alive variant is active, the owner role is
    /// handed to capitalControl in the same transition.
    pub fn set_alive(&mut self, caller: &Address) -> Result<(), TokenError> {
        self.authorize(Gate::SetAlive, caller)?;
        if self.promote_capital_control_on_alive {
            let capital_control = self.roles.capital_control.ok_or_else(|| {
                TokenError::Precondition(
                    "cannot promote capital control on alive: role not assigned".to_string(),
                )
            })?;
            tracing::info!("Owner role handed to capital control {}", capital_control);
            self.roles.owner = capital_control;
        }
        tracing::info!(
            "Lifecycle transition: {} -> {}",
            TokenPhase::Configured,
            TokenPhase::Alive
        );
        self.phase = TokenPhase::Alive;
        Ok(())
    }

    /// Assign the delegated operational roles in one step.
    pub fn set_roles(
        &mut self,
        caller: &Address,
        pause_control: Address,
        token_rescue_control: Address,
    ) -> Result<(), TokenError> {
        self.authorize(Gate::SetRoles, caller)?;
        require_role_address(&pause_control, "pause control")?;
        require_role_address(&token_rescue_control, "token rescue control")?;
        self.roles.pause_control = Some(pause_control);
        self.roles.token_rescue_control = Some(token_rescue_control);
        Ok(())
    }

    pub fn set_pause_control(
        &mut self,
        caller: &Address,
        pause_control: Address,
    ) -> Result<(), TokenError> {
        self.authorize(Gate::SetPauseControl, caller)?;
        require_role_address(&pause_control, "pause control")?;
        self.roles.pause_control = Some(pause_control);
        Ok(())
    }

    pub fn set_capital_control(
        &mut self,
        caller: &Address,
        capital_control: Address,
    ) -> Result<(), TokenError> {
        self.authorize(Gate::SetCapitalControl, caller)?;
        require_role_address(&capital_control, "capital control")?;
        self.roles.capital_control = Some(capital_control);
        Ok(())
    }

    /// capitalControl's self-managed handoff, available once alive.
    pub fn update_capital_control(
        &mut self,
        caller: &Address,
        new_capital_control: Address,
    ) -> Result<(), TokenError> {
        self.authorize(Gate::UpdateCapitalControl, caller)?;
        require_role_address(&new_capital_control, "capital control")?;
        tracing::info!(
            "Capital control handoff: {} -> {}",
            caller,
            new_capital_control
        );
        self.roles.capital_control = Some(new_capital_control);
        Ok(())
    }

    pub fn set_mint_control(
        &mut self,
        caller: &Address,
        mint_control: Address,
    ) -> Result<(), TokenError> {
        self.authorize(Gate::SetMintControl, caller)?;
        require_role_address(&mint_control, "mint control")?;
        self.roles.mint_control = Some(mint_control);
        Ok(())
    }

    /// End ordinary minting. One-way except through reopen_crowdsale.
    pub fn finish_minting(&mut self, caller: &Address) -> Result<(), TokenError> {
        self.authorize(Gate::FinishMinting, caller)?;
        if self.mint_burn_finished {
            return Err(TokenError::Precondition(
                "minting is already finished".to_string(),
            ));
        }
        tracing::info!("Minting finished by {}", caller);
        self.mint_burn_finished = true;
        Ok(())
    }

    /// Re-open ordinary minting under a new delegate.
    pub fn reopen_crowdsale(
        &mut self,
        caller: &Address,
        new_mint_control: Address,
    ) -> Result<(), TokenError> {
        self.authorize(Gate::ReopenCrowdsale, caller)?;
        require_role_address(&new_mint_control, "mint control")?;
        if !self.mint_burn_finished {
            return Err(TokenError::Precondition(
                "minting is not finished; nothing to reopen".to_string(),
            ));
        }
        tracing::info!("Crowdsale reopened under mint control {}", new_mint_control);
        self.mint_burn_finished = false;
        self.roles.mint_control = Some(new_mint_control);
        Ok(())
    }

    /// Issuer-side switch for the transfers-enabled flag.
    pub fn enable_transfers(&mut self, caller: &Address, enabled: bool) -> Result<(), TokenError> {
        self.authorize(Gate::EnableTransfers, caller)?;
        self.transfers_enabled = enabled;
        Ok(())
    }

    /// Pause-role switch for the transfers-enabled flag.
    pub fn pause_transfer(&mut self, caller: &Address, enabled: bool) -> Result<(), TokenError> {
        self.authorize(Gate::PauseTransfer, caller)?;
        self.transfers_enabled = enabled;
        Ok(())
    }

    /// Pause-role switch for minting and burning. `enabled = false` pauses.
    pub fn pause_capital_increase_or_decrease(
        &mut self,
        caller: &Address,
        enabled: bool,
    ) -> Result<(), TokenError> {
        self.authorize(Gate::PauseCapital, caller)?;
        self.mint_burn_paused = !enabled;
        Ok(())
    }
}
