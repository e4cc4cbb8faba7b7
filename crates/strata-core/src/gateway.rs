// crates/strata-core/src/gateway.rs
//
// In-memory asset gateway for local simulation and tests.
//
// Tracks external account balances per currency alongside the amount held
// in the token's custody. transfer_in moves value from an external account
// into custody; transfer_out moves custody back out. A failure switch lets
// callers exercise assets that report failure instead of aborting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::Funds;
use crate::currency::CurrencyKind;
use crate::error::TokenError;
use crate::traits::AssetGateway;

/// Bookkeeping implementation of [`AssetGateway`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryGateway {
    /// External balances: currency -> account -> amount.
    accounts: BTreeMap<CurrencyKind, BTreeMap<Address, Funds>>,
    /// Amount of each currency currently in the token's custody.
    custody: BTreeMap<CurrencyKind, Funds>,
    /// When set, every transfer reports failure (an asset contract that
    /// returns false instead of aborting).
    #[serde(default)]
    fail_transfers: bool,
}

impl MemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an external account (simulation setup).
    pub fn credit(&mut self, currency: CurrencyKind, account: Address, amount: Funds) {
        let balance = self
            .accounts
            .entry(currency)
            .or_default()
            .entry(account)
            .or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// External balance of `account` in `currency`.
    pub fn balance(&self, currency: &CurrencyKind, account: &Address) -> Funds {
        self.accounts
            .get(currency)
            .and_then(|m| m.get(account))
            .copied()
            .unwrap_or(0)
    }

    /// Credit the token's custody directly, bypassing transfer_in.
    ///
    /// Simulates an asset sent straight to the token's address — the
    /// situation rescue_token exists to recover from.
    pub fn credit_custody(&mut self, currency: CurrencyKind, amount: Funds) {
        let held = self.custody.entry(currency).or_insert(0);
        *held = held.saturating_add(amount);
    }

    /// Toggle simulated transfer failure.
    pub fn set_fail_transfers(&mut self, fail: bool) {
        self.fail_transfers = fail;
    }
}

impl AssetGateway for MemoryGateway {
    fn transfer_in(
        &mut self,
        currency: &CurrencyKind,
        from: Address,
        amount: Funds,
    ) -> Result<(), TokenError> {
        if self.fail_transfers {
            return Err(TokenError::ExternalTransfer(format!(
                "transfer of {} {} from {} was not confirmed",
                amount, currency, from
            )));
        }
        let balance = self
            .accounts
            .entry(*currency)
            .or_default()
            .entry(from)
            .or_insert(0);
        if *balance < amount {
            return Err(TokenError::ExternalTransfer(format!(
                "transfer of {} {} from {} failed: only {} available",
                amount, currency, from, balance
            )));
        }
        *balance -= amount;
        let held = self.custody.entry(*currency).or_insert(0);
        *held = held.saturating_add(amount);
        Ok(())
    }

    fn transfer_out(
        &mut self,
        currency: &CurrencyKind,
        to: Address,
        amount: Funds,
    ) -> Result<(), TokenError> {
        if self.fail_transfers {
            return Err(TokenError::ExternalTransfer(format!(
                "transfer of {} {} to {} was not confirmed",
                amount, currency, to
            )));
        }
        let held = self.custody.entry(*currency).or_insert(0);
        if *held < amount {
            return Err(TokenError::ExternalTransfer(format!(
                "custody holds only {} {} but {} was requested",
                held, currency, amount
            )));
        }
        *held -= amount;
        self.credit(*currency, to, amount);
        Ok(())
    }

    fn held(&self, currency: &CurrencyKind) -> Funds {
        self.custody.get(currency).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    #[test]
    fn test_transfer_in_moves_to_custody() {
        let mut gw = MemoryGateway::new();
        gw.credit(CurrencyKind::Native, acct(1), 1_000);

        gw.transfer_in(&CurrencyKind::Native, acct(1), 400).unwrap();

        assert_eq!(gw.balance(&CurrencyKind::Native, &acct(1)), 600);
        assert_eq!(gw.held(&CurrencyKind::Native), 400);
    }

    #[test]
    fn test_transfer_in_insufficient_external_balance() {
        let mut gw = MemoryGateway::new();
        gw.credit(CurrencyKind::Native, acct(1), 100);

        let result = gw.transfer_in(&CurrencyKind::Native, acct(1), 400);
        assert!(matches!(result, Err(TokenError::ExternalTransfer(_))));
        // Nothing moved.
        assert_eq!(gw.balance(&CurrencyKind::Native, &acct(1)), 100);
        assert_eq!(gw.held(&CurrencyKind::Native), 0);
    }

    #[test]
    fn test_transfer_out_pays_account() {
        let mut gw = MemoryGateway::new();
        gw.credit_custody(CurrencyKind::Native, 500);

        gw.transfer_out(&CurrencyKind::Native, acct(2), 200).unwrap();

        assert_eq!(gw.held(&CurrencyKind::Native), 300);
        assert_eq!(gw.balance(&CurrencyKind::Native, &acct(2)), 200);
    }

    #[test]
    fn test_transfer_out_exceeding_custody() {
        let mut gw = MemoryGateway::new();
        gw.credit_custody(CurrencyKind::Native, 100);

        let result = gw.transfer_out(&CurrencyKind::Native, acct(2), 200);
        assert!(matches!(result, Err(TokenError::ExternalTransfer(_))));
        assert_eq!(gw.held(&CurrencyKind::Native), 100);
    }

    #[test]
    fn test_fail_switch_rejects_transfers() {
        let mut gw = MemoryGateway::new();
        gw.credit(CurrencyKind::Native, acct(1), 1_000);
        gw.set_fail_transfers(true);

        assert!(gw.transfer_in(&CurrencyKind::Native, acct(1), 1).is_err());
        assert!(gw.transfer_out(&CurrencyKind::Native, acct(1), 0).is_err());

        gw.set_fail_transfers(false);
        assert!(gw.transfer_in(&CurrencyKind::Native, acct(1), 1).is_ok());
    }

    #[test]
    fn test_currencies_are_independent() {
        let asset = CurrencyKind::Asset(acct(99));
        let mut gw = MemoryGateway::new();
        gw.credit_custody(CurrencyKind::Native, 10);
        gw.credit_custody(asset, 20);

        assert_eq!(gw.held(&CurrencyKind::Native), 10);
        assert_eq!(gw.held(&asset), 20);
    }
}
