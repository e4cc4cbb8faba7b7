// crates/strata-token/src/token.rs
//
// The AssetToken facade: one state machine over the checkpoint ledger,
// lifecycle table, dividend book, and allowance table.
//
// Every mutating operation follows the same shape: authorize against the
// lifecycle table, validate arguments, run any external transfer, then
// commit state. All fallible steps precede the first state write, so a
// failed operation leaves balances, checkpoints, and records untouched.
// External collaborators arrive as &mut dyn parameters per call; the
// token itself stays plain serializable data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use strata_core::{Address, AssetGateway, CurrencyKind, FeeClearing, Funds, Shares, TokenError};
use strata_dividend::{DividendBook, DividendRecord, RecycleOutcome};
use strata_ledger::{CheckpointLedger, LedgerIndex};
use strata_lifecycle::{Gate, TokenLifecycle};

use crate::allowance::Allowances;
use crate::metadata::TokenMetadata;

fn require_account(addr: &Address, what: &str) -> Result<(), TokenError> {
    if addr.is_zero() {
        return Err(TokenError::Precondition(format!(
            "{} must not be the zero address",
            what
        )));
    }
    Ok(())
}

fn require_positive(amount: u128, what: &str) -> Result<(), TokenError> {
    if amount == 0 {
        return Err(TokenError::Precondition(format!(
            "{} amount must be positive",
            what
        )));
    }
    Ok(())
}

/// A tokenized-equity instance: share ledger, lifecycle, dividends, and
/// allowances behind one operation surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetToken {
    metadata: TokenMetadata,
    lifecycle: TokenLifecycle,
    ledger: CheckpointLedger,
    dividends: DividendBook,
    allowances: Allowances,
}

impl AssetToken {
    /// Plain variant: owner only, no capital-control role yet.
    pub fn new(owner: Address) -> Self {
        Self {
            metadata: TokenMetadata::default(),
            lifecycle: TokenLifecycle::new(owner),
            ledger: CheckpointLedger::new(),
            dividends: DividendBook::new(),
            allowances: Allowances::new(),
        }
    }

    /// Variant with a capital-control role assigned at construction.
    ///
    /// When `promote_on_alive` is set, going alive hands the owner role to
    /// capitalControl in the same transition.
    pub fn with_capital_control(
        owner: Address,
        capital_control: Address,
        promote_on_alive: bool,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            metadata: TokenMetadata::default(),
            lifecycle: TokenLifecycle::with_capital_control(
                owner,
                capital_control,
                promote_on_alive,
            )?,
            ledger: CheckpointLedger::new(),
            dividends: DividendBook::new(),
            allowances: Allowances::new(),
        })
    }

    // -----------------------------------------------------------------
    // Read-only surface
    // -----------------------------------------------------------------

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn lifecycle(&self) -> &TokenLifecycle {
        &self.lifecycle
    }

    pub fn ledger(&self) -> &CheckpointLedger {
        &self.ledger
    }

    pub fn dividends(&self) -> &DividendBook {
        &self.dividends
    }

    pub fn balance_of(&self, account: &Address) -> Shares {
        self.ledger.balance_of(account)
    }

    pub fn balance_of_at(&self, account: &Address, at: LedgerIndex) -> Shares {
        self.ledger.balance_of_at(account, at)
    }

    pub fn total_supply(&self) -> Shares {
        self.ledger.total_supply()
    }

    pub fn total_supply_at(&self, at: LedgerIndex) -> Shares {
        self.ledger.total_supply_at(at)
    }

    pub fn height(&self) -> LedgerIndex {
        self.ledger.height()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.allowances.allowance(owner, spender)
    }

    /// Record ids `account` can still claim, oldest first.
    pub fn pending_dividends(&self, account: &Address) -> Vec<u64> {
        self.dividends.pending_for(account).collect()
    }

    // -----------------------------------------------------------------
    // Transfer gate
    // -----------------------------------------------------------------

    /// Issue `amount` new shares to `to`.
    ///
    /// The fee-clearing collaborator is consulted before anything commits;
    /// a failing clearing call fails the mint.
    pub fn mint(
        &mut self,
        caller: &Address,
        to: Address,
        amount: Shares,
        clearing: &mut dyn FeeClearing,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::Mint, caller)?;
        require_account(&to, "mint recipient")?;
        require_positive(amount as u128, "mint")?;
        let balance = self.ledger.balance_of(&to).checked_add(amount).ok_or_else(|| {
            TokenError::Precondition(format!("mint overflows the balance of {}", to))
        })?;
        let supply = self
            .ledger
            .total_supply()
            .checked_add(amount)
            .ok_or_else(|| {
                TokenError::Precondition("mint overflows the total supply".to_string())
            })?;
        clearing.clear_mint_fee(to, amount)?;

        self.ledger.begin_mutation();
        self.ledger.record_balance(to, balance);
        self.ledger.record_total_supply(supply);
        tracing::debug!("Minted {} shares to {} (supply {})", amount, to, supply);
        Ok(())
    }

    /// Retire `amount` shares held by `from`.
    pub fn burn(
        &mut self,
        caller: &Address,
        from: Address,
        amount: Shares,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::Burn, caller)?;
        require_account(&from, "burn account")?;
        require_positive(amount as u128, "burn")?;
        let balance = self.ledger.balance_of(&from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance(format!(
                "{} holds {} shares, burn of {} requested",
                from, balance, amount
            )));
        }
        let supply = self.ledger.total_supply() - amount;

        self.ledger.begin_mutation();
        self.ledger.record_balance(from, balance - amount);
        self.ledger.record_total_supply(supply);
        tracing::debug!("Burned {} shares from {} (supply {})", amount, from, supply);
        Ok(())
    }

    /// Move `amount` shares from the caller to `to`.
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::Transfer, caller)?;
        require_account(caller, "transfer sender")?;
        require_account(&to, "transfer recipient")?;
        require_positive(amount as u128, "transfer")?;
        self.move_shares(*caller, to, amount)
    }

    /// Move `amount` shares from `from` to `to` against the caller's
    /// allowance.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::TransferFrom, caller)?;
        require_account(&from, "transfer sender")?;
        require_account(&to, "transfer recipient")?;
        require_positive(amount as u128, "transfer")?;
        let granted = self.allowances.allowance(&from, caller);
        if granted < amount {
            return Err(TokenError::InsufficientBalance(format!(
                "allowance from {} to {} is {}, {} requested",
                from, caller, granted, amount
            )));
        }
        let balance = self.ledger.balance_of(&from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance(format!(
                "{} holds {} shares, transfer of {} requested",
                from, balance, amount
            )));
        }
        self.allowances.spend(from, *caller, amount)?;
        self.move_shares(from, to, amount)
    }

    /// capitalControl's lost-wallet recovery: move `from`'s holdings to
    /// `to` without an allowance — but only the full balance, never a
    /// partial amount.
    pub fn forced_transfer_from(
        &mut self,
        caller: &Address,
        from: Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::ForcedTransferFrom, caller)?;
        require_account(&from, "transfer sender")?;
        require_account(&to, "transfer recipient")?;
        require_positive(amount as u128, "transfer")?;
        let balance = self.ledger.balance_of(&from);
        if amount != balance {
            return Err(TokenError::Precondition(format!(
                "recovery moves the full balance only: {} holds {}, {} requested",
                from, balance, amount
            )));
        }
        tracing::info!("Forced recovery of {} shares: {} -> {}", amount, from, to);
        self.move_shares(from, to, amount)
    }

    /// Grant `spender` the right to move up to `amount` of the caller's
    /// shares. Zero clears the grant.
    pub fn approve(
        &mut self,
        caller: &Address,
        spender: Address,
        amount: Shares,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::Approve, caller)?;
        require_account(&spender, "spender")?;
        self.allowances.set(*caller, spender, amount);
        Ok(())
    }

    pub fn increase_approval(
        &mut self,
        caller: &Address,
        spender: Address,
        amount: Shares,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::Approve, caller)?;
        require_account(&spender, "spender")?;
        self.allowances.increase(*caller, spender, amount);
        Ok(())
    }

    /// Lowers the grant, flooring at zero rather than underflowing.
    pub fn decrease_approval(
        &mut self,
        caller: &Address,
        spender: Address,
        amount: Shares,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::Approve, caller)?;
        require_account(&spender, "spender")?;
        self.allowances.decrease(*caller, spender, amount);
        Ok(())
    }

    /// Balance arithmetic shared by the transfer paths. Both balances are
    /// computed before the height advances, so a failure commits nothing;
    /// a self-transfer collapses into one same-height checkpoint.
    fn move_shares(&mut self, from: Address, to: Address, amount: Shares) -> Result<(), TokenError> {
        let sender = self.ledger.balance_of(&from);
        if sender < amount {
            return Err(TokenError::InsufficientBalance(format!(
                "{} holds {} shares, transfer of {} requested",
                from, sender, amount
            )));
        }
        let receiver = if from == to {
            sender
        } else {
            self.ledger.balance_of(&to).checked_add(amount).ok_or_else(|| {
                TokenError::Precondition(format!("transfer overflows the balance of {}", to))
            })?
        };

        self.ledger.begin_mutation();
        self.ledger.record_balance(from, sender - amount);
        self.ledger.record_balance(to, receiver);
        tracing::debug!("Transferred {} shares: {} -> {}", amount, from, to);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Dividends
    // -----------------------------------------------------------------

    /// Deposit `amount` of the native currency as a dividend.
    pub fn deposit_dividend(
        &mut self,
        caller: &Address,
        gateway: &mut dyn AssetGateway,
        amount: Funds,
        now: DateTime<Utc>,
    ) -> Result<u64, TokenError> {
        self.deposit_in(caller, gateway, CurrencyKind::Native, amount, now)
    }

    /// Deposit `amount` of the designated asset as a dividend.
    pub fn deposit_asset_dividend(
        &mut self,
        caller: &Address,
        gateway: &mut dyn AssetGateway,
        asset: Address,
        amount: Funds,
        now: DateTime<Utc>,
    ) -> Result<u64, TokenError> {
        require_account(&asset, "dividend asset")?;
        self.deposit_in(caller, gateway, CurrencyKind::Asset(asset), amount, now)
    }

    /// Escrow a deposit and pin a record to the ledger state as of
    /// immediately before it. Deposits never advance the ledger height,
    /// so no mutation can leak into the snapshot.
    fn deposit_in(
        &mut self,
        caller: &Address,
        gateway: &mut dyn AssetGateway,
        currency: CurrencyKind,
        amount: Funds,
        now: DateTime<Utc>,
    ) -> Result<u64, TokenError> {
        self.lifecycle.authorize(Gate::DepositDividend, caller)?;
        if currency != self.metadata.base_currency {
            return Err(TokenError::Precondition(format!(
                "dividends are deposited in {}, not {}",
                self.metadata.base_currency, currency
            )));
        }
        require_positive(amount, "dividend deposit")?;
        gateway.transfer_in(&currency, *caller, amount)?;
        let id = self.dividends.deposit(
            currency,
            amount,
            self.ledger.total_supply(),
            self.ledger.height(),
            now,
        )?;
        tracing::info!(
            "Dividend record {}: {} {} over supply {} at height {}",
            id,
            amount,
            currency,
            self.ledger.total_supply(),
            self.ledger.height()
        );
        Ok(id)
    }

    /// Claim the caller's pro-rata share of one record.
    ///
    /// Pays floor(balance-at-snapshot * deposited / supply-at-snapshot)
    /// and marks the caller claimed even when that is zero. Fails closed
    /// on a missing or recycled record and on a double claim.
    pub fn claim_dividend(
        &mut self,
        caller: &Address,
        gateway: &mut dyn AssetGateway,
        record_id: u64,
    ) -> Result<Funds, TokenError> {
        let record = self.dividends.claimable(record_id, caller)?;
        let balance = self.ledger.balance_of_at(caller, record.checkpoint_index);
        let owed = record.entitlement(balance)?;
        let currency = record.currency;
        if owed > 0 {
            gateway.transfer_out(&currency, *caller, owed)?;
        }
        self.dividends.mark_claimed(record_id, *caller, owed)?;
        tracing::debug!(
            "Claim on record {} by {}: {} {} for {} shares",
            record_id,
            caller,
            owed,
            currency,
            balance
        );
        Ok(owed)
    }

    /// Claim every record still pending for the caller.
    ///
    /// Sugar for draining the pending sequence in one call; the cost
    /// scales with the caller's backlog, so holders with many pending
    /// periods should prefer [`claim_in_batches`](Self::claim_in_batches).
    pub fn claim_dividend_all(
        &mut self,
        caller: &Address,
        gateway: &mut dyn AssetGateway,
    ) -> Result<Funds, TokenError> {
        let pending: Vec<u64> = self.dividends.pending_for(caller).collect();
        self.settle_claims(caller, gateway, &pending)
    }

    /// Claim the half-open record range `[from, to)`.
    ///
    /// Records already claimed by the caller and recycled records are
    /// skipped, so overlapping ranges never double-pay and never fail the
    /// batch. The cost is a function of the range size only.
    pub fn claim_in_batches(
        &mut self,
        caller: &Address,
        gateway: &mut dyn AssetGateway,
        from: u64,
        to: u64,
    ) -> Result<Funds, TokenError> {
        if from > to {
            return Err(TokenError::Precondition(format!(
                "claim range [{}, {}) is reversed",
                from, to
            )));
        }
        if to > self.dividends.len() {
            return Err(TokenError::Precondition(format!(
                "claim range end {} exceeds the {} existing records",
                to,
                self.dividends.len()
            )));
        }
        let eligible: Vec<u64> = (from..to)
            .filter(|id| self.dividends.claimable(*id, caller).is_ok())
            .collect();
        self.settle_claims(caller, gateway, &eligible)
    }

    /// Settle a set of claimable record ids, grouped by currency. Each
    /// currency group is its own all-or-nothing unit: one payout, then
    /// the group's claim marks. A failed payout leaves its group and
    /// every later group unclaimed; groups already paid stay committed,
    /// so the book's escrow never drifts from gateway custody.
    fn settle_claims(
        &mut self,
        caller: &Address,
        gateway: &mut dyn AssetGateway,
        ids: &[u64],
    ) -> Result<Funds, TokenError> {
        let mut groups: BTreeMap<CurrencyKind, (Vec<(u64, Funds)>, Funds)> = BTreeMap::new();
        for &id in ids {
            let record = self.dividends.claimable(id, caller)?;
            let balance = self.ledger.balance_of_at(caller, record.checkpoint_index);
            let owed = record.entitlement(balance)?;
            let (payouts, total) = groups.entry(record.currency).or_default();
            payouts.push((id, owed));
            *total = total.saturating_add(owed);
        }
        let mut paid: Funds = 0;
        for (currency, (payouts, total)) in &groups {
            if *total > 0 {
                gateway.transfer_out(currency, *caller, *total)?;
            }
            for (id, owed) in payouts {
                self.dividends.mark_claimed(*id, *caller, *owed)?;
                paid = paid.saturating_add(*owed);
            }
        }
        if !ids.is_empty() {
            tracing::debug!(
                "Settled {} record claims for {}: {} paid",
                ids.len(),
                caller,
                paid
            );
        }
        Ok(paid)
    }

    /// Sweep a record's unclaimed remainder into a fresh record once the
    /// lock period has elapsed.
    ///
    /// The fresh record snapshots the *current* supply and height, so its
    /// claims follow current balances — holders who received shares after
    /// the original deposit share in the remainder.
    pub fn recycle_dividend(
        &mut self,
        caller: &Address,
        record_id: u64,
        now: DateTime<Utc>,
    ) -> Result<RecycleOutcome, TokenError> {
        self.lifecycle.authorize(Gate::RecycleDividend, caller)?;
        let outcome = self.dividends.recycle(
            record_id,
            now,
            self.ledger.total_supply(),
            self.ledger.height(),
        )?;
        tracing::info!(
            "Recycled record {}: {} swept into record {:?}",
            record_id,
            outcome.swept,
            outcome.new_record_id
        );
        Ok(outcome)
    }

    /// Sweep an asset accidentally sent to the token's custody out to
    /// `to`.
    ///
    /// Refuses any currency with claimable dividends still escrowed in
    /// it — rescuing must never drain funds holders can claim.
    pub fn rescue_token(
        &mut self,
        caller: &Address,
        gateway: &mut dyn AssetGateway,
        currency: CurrencyKind,
        to: Address,
    ) -> Result<Funds, TokenError> {
        self.lifecycle.authorize(Gate::RescueToken, caller)?;
        require_account(&to, "rescue target")?;
        let escrowed = self.dividends.escrowed(&currency);
        if escrowed > 0 {
            return Err(TokenError::Precondition(format!(
                "{} {} is escrowed for dividend claims and cannot be rescued",
                escrowed, currency
            )));
        }
        let held = gateway.held(&currency);
        if held == 0 {
            return Err(TokenError::Precondition(format!(
                "custody holds no {} to rescue",
                currency
            )));
        }
        gateway.transfer_out(&currency, to, held)?;
        tracing::info!("Rescued {} {} to {}", held, currency, to);
        Ok(held)
    }

    // -----------------------------------------------------------------
    // Lifecycle and configuration
    // -----------------------------------------------------------------

    pub fn set_token_configured(&mut self, caller: &Address) -> Result<(), TokenError> {
        self.lifecycle.set_configured(caller)
    }

    pub fn set_token_alive(&mut self, caller: &Address) -> Result<(), TokenError> {
        self.lifecycle.set_alive(caller)
    }

    pub fn set_roles(
        &mut self,
        caller: &Address,
        pause_control: Address,
        token_rescue_control: Address,
    ) -> Result<(), TokenError> {
        self.lifecycle.set_roles(caller, pause_control, token_rescue_control)
    }

    pub fn set_pause_control(
        &mut self,
        caller: &Address,
        pause_control: Address,
    ) -> Result<(), TokenError> {
        self.lifecycle.set_pause_control(caller, pause_control)
    }

    pub fn set_capital_control(
        &mut self,
        caller: &Address,
        capital_control: Address,
    ) -> Result<(), TokenError> {
        self.lifecycle.set_capital_control(caller, capital_control)
    }

    pub fn update_capital_control(
        &mut self,
        caller: &Address,
        new_capital_control: Address,
    ) -> Result<(), TokenError> {
        self.lifecycle.update_capital_control(caller, new_capital_control)
    }

    pub fn set_mint_control(
        &mut self,
        caller: &Address,
        mint_control: Address,
    ) -> Result<(), TokenError> {
        self.lifecycle.set_mint_control(caller, mint_control)
    }

    pub fn finish_minting(&mut self, caller: &Address) -> Result<(), TokenError> {
        self.lifecycle.finish_minting(caller)
    }

    pub fn reopen_crowdsale(
        &mut self,
        caller: &Address,
        new_mint_control: Address,
    ) -> Result<(), TokenError> {
        self.lifecycle.reopen_crowdsale(caller, new_mint_control)
    }

    pub fn enable_transfers(&mut self, caller: &Address, enabled: bool) -> Result<(), TokenError> {
        self.lifecycle.enable_transfers(caller, enabled)
    }

    pub fn pause_transfer(&mut self, caller: &Address, enabled: bool) -> Result<(), TokenError> {
        self.lifecycle.pause_transfer(caller, enabled)
    }

    pub fn pause_capital_increase_or_decrease(
        &mut self,
        caller: &Address,
        enabled: bool,
    ) -> Result<(), TokenError> {
        self.lifecycle.pause_capital_increase_or_decrease(caller, enabled)
    }

    pub fn set_name(&mut self, caller: &Address, name: String) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::SetMetadata, caller)?;
        self.metadata.name = name;
        Ok(())
    }

    pub fn set_symbol(&mut self, caller: &Address, symbol: String) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::SetMetadata, caller)?;
        self.metadata.symbol = symbol;
        Ok(())
    }

    pub fn set_short_description(
        &mut self,
        caller: &Address,
        short_description: String,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::SetMetadata, caller)?;
        self.metadata.short_description = short_description;
        Ok(())
    }

    pub fn set_base_rate(&mut self, caller: &Address, base_rate: u64) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::SetMetadata, caller)?;
        self.metadata.base_rate = base_rate;
        Ok(())
    }

    pub fn set_base_currency(
        &mut self,
        caller: &Address,
        base_currency: CurrencyKind,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::SetMetadata, caller)?;
        if let CurrencyKind::Asset(asset) = &base_currency {
            require_account(asset, "base currency asset")?;
        }
        self.metadata.base_currency = base_currency;
        Ok(())
    }

    /// Combined name/symbol/base-currency assignment.
    pub fn set_metadata(
        &mut self,
        caller: &Address,
        name: String,
        symbol: String,
        base_currency: CurrencyKind,
    ) -> Result<(), TokenError> {
        self.lifecycle.authorize(Gate::SetMetadata, caller)?;
        if let CurrencyKind::Asset(asset) = &base_currency {
            require_account(asset, "base currency asset")?;
        }
        self.metadata.name = name;
        self.metadata.symbol = symbol;
        self.metadata.base_currency = base_currency;
        Ok(())
    }

    /// One record by id, read-only.
    pub fn dividend_record(&self, id: u64) -> Option<&DividendRecord> {
        self.dividends.get(id)
    }
}
