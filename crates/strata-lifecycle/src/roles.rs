// crates/strata-lifecycle/src/roles.rs
//
// Role assignments for one token instance.
//
// owner: the deployer, until an alive-promotion hands the role to
// capitalControl. capitalControl: the post-launch administrator with
// supervisory override authority. mintControl: the delegated minter
// (typically a crowdsale). pauseControl and tokenRescueControl: delegated
// operational roles.

use serde::{Deserialize, Serialize};

use strata_core::Address;

/// Role holders. Optional roles stay unassigned until set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    pub owner: Address,
    pub capital_control: Option<Address>,
    pub mint_control: Option<Address>,
    pub pause_control: Option<Address>,
    pub token_rescue_control: Option<Address>,
}

impl Roles {
    /// Fresh role set with only the owner assigned.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            capital_control: None,
            mint_control: None,
            pause_control: None,
            token_rescue_control: None,
        }
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        self.owner == *caller
    }

    pub fn is_capital_control(&self, caller: &Address) -> bool {
        self.capital_control.as_ref() == Some(caller)
    }

    pub fn is_mint_control(&self, caller: &Address) -> bool {
        self.mint_control.as_ref() == Some(caller)
    }

    pub fn is_pause_control(&self, caller: &Address) -> bool {
        self.pause_control.as_ref() == Some(caller)
    }

    pub fn is_rescue_control(&self, caller: &Address) -> bool {
        self.token_rescue_control.as_ref() == Some(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_roles_match_nobody() {
        let roles = Roles::new(Address::from_low_u64(1));
        let stranger = Address::from_low_u64(9);
        assert!(!roles.is_capital_control(&stranger));
        assert!(!roles.is_mint_control(&stranger));
        assert!(!roles.is_pause_control(&stranger));
        assert!(!roles.is_rescue_control(&stranger));
    }

    #[test]
    fn test_owner_matches() {
        let owner = Address::from_low_u64(1);
        let roles = Roles::new(owner);
        assert!(roles.is_owner(&owner));
        assert!(!roles.is_owner(&Address::from_low_u64(2)));
    }

    #[test]
    fn test_assigned_role_matches_only_holder() {
        let mut roles = Roles::new(Address::from_low_u64(1));
        let holder = Address::from_low_u64(5);
        roles.capital_control = Some(holder);
        assert!(roles.is_capital_control(&holder));
        assert!(!roles.is_capital_control(&Address::from_low_u64(6)));
    }
}
