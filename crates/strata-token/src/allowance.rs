// crates/strata-token/src/allowance.rs
//
// The allowance table behind approve/transferFrom.
//
// Plain owner -> spender -> remaining-shares bookkeeping. Gating and
// checkpointing live in the facade; spending an allowance never touches
// the ledger because allowances are not balances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use strata_core::{Address, Shares, TokenError};

/// owner -> spender -> shares the spender may still move.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Allowances {
    grants: BTreeMap<Address, BTreeMap<Address, Shares>>,
}

impl Allowances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining allowance from `owner` to `spender`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.grants
            .get(owner)
            .and_then(|m| m.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Set the allowance outright. Zero clears the grant.
    pub fn set(&mut self, owner: Address, spender: Address, amount: Shares) {
        if amount == 0 {
            if let Some(grants) = self.grants.get_mut(&owner) {
                grants.remove(&spender);
            }
        } else {
            self.grants.entry(owner).or_default().insert(spender, amount);
        }
    }

    /// Raise the allowance by `amount`, saturating at the share maximum.
    pub fn increase(&mut self, owner: Address, spender: Address, amount: Shares) {
        let current = self.allowance(&owner, &spender);
        self.set(owner, spender, current.saturating_add(amount));
    }

    /// Lower the allowance by `amount`, flooring at zero.
    pub fn decrease(&mut self, owner: Address, spender: Address, amount: Shares) {
        let current = self.allowance(&owner, &spender);
        self.set(owner, spender, current.saturating_sub(amount));
    }

    /// Consume `amount` of the grant from `owner` to `spender`.
    ///
    /// # Errors
    /// `TokenError::InsufficientBalance` when the grant is too small;
    /// nothing is consumed in that case.
    pub fn spend(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Shares,
    ) -> Result<(), TokenError> {
        let current = self.allowance(&owner, &spender);
        if current < amount {
            return Err(TokenError::InsufficientBalance(format!(
                "allowance from {} to {} is {}, {} requested",
                owner, spender, current, amount
            )));
        }
        self.set(owner, spender, current - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    #[test]
    fn test_unset_allowance_is_zero() {
        let allowances = Allowances::new();
        assert_eq!(allowances.allowance(&acct(1), &acct(2)), 0);
    }

    #[test]
    fn test_set_and_spend() {
        let mut allowances = Allowances::new();
        allowances.set(acct(1), acct(2), 100);
        allowances.spend(acct(1), acct(2), 40).unwrap();
        assert_eq!(allowances.allowance(&acct(1), &acct(2)), 60);
    }

    #[test]
    fn test_spend_beyond_grant_fails() {
        let mut allowances = Allowances::new();
        allowances.set(acct(1), acct(2), 10);
        let result = allowances.spend(acct(1), acct(2), 11);
        assert!(matches!(result, Err(TokenError::InsufficientBalance(_))));
        assert_eq!(allowances.allowance(&acct(1), &acct(2)), 10);
    }

    #[test]
    fn test_increase_and_decrease() {
        let mut allowances = Allowances::new();
        allowances.increase(acct(1), acct(2), 50);
        allowances.increase(acct(1), acct(2), 25);
        assert_eq!(allowances.allowance(&acct(1), &acct(2)), 75);

        allowances.decrease(acct(1), acct(2), 30);
        assert_eq!(allowances.allowance(&acct(1), &acct(2)), 45);
    }

    #[test]
    fn test_decrease_floors_at_zero() {
        let mut allowances = Allowances::new();
        allowances.set(acct(1), acct(2), 10);
        allowances.decrease(acct(1), acct(2), 1_000);
        assert_eq!(allowances.allowance(&acct(1), &acct(2)), 0);
    }

    #[test]
    fn test_grants_are_pairwise_independent() {
        let mut allowances = Allowances::new();
        allowances.set(acct(1), acct(2), 10);
        allowances.set(acct(1), acct(3), 20);
        allowances.set(acct(2), acct(1), 30);

        allowances.spend(acct(1), acct(2), 10).unwrap();
        assert_eq!(allowances.allowance(&acct(1), &acct(3)), 20);
        assert_eq!(allowances.allowance(&acct(2), &acct(1)), 30);
    }
}
