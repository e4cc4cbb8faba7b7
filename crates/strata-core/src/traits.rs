// crates/strata-core/src/traits.rs
//
// Trait seams for the Strata token engine's external collaborators.
//
// The core is a pure state machine: anything that touches the outside
// world — moving escrowed value, collecting mint fees — crosses one of
// these traits. Operations take the collaborator as a &mut dyn parameter
// so the token state itself stays plain serializable data.

use crate::address::Address;
use crate::amount::{Funds, Shares};
use crate::currency::CurrencyKind;
use crate::error::TokenError;

/// Boundary through which escrowed value enters and leaves the token's
/// custody.
///
/// Implementations must confirm success: an asset that signals failure by
/// returning false (rather than aborting) maps to
/// `TokenError::ExternalTransfer`, never to a silent Ok.
pub trait AssetGateway {
    /// Pull `amount` of `currency` from an external account into custody.
    fn transfer_in(
        &mut self,
        currency: &CurrencyKind,
        from: Address,
        amount: Funds,
    ) -> Result<(), TokenError>;

    /// Push `amount` of `currency` out of custody to an external account.
    fn transfer_out(
        &mut self,
        currency: &CurrencyKind,
        to: Address,
        amount: Funds,
    ) -> Result<(), TokenError>;

    /// Total amount of `currency` currently held in the token's custody.
    fn held(&self, currency: &CurrencyKind) -> Funds;
}

/// Fee-clearing collaborator consulted during privileged mint operations.
///
/// Fee calculation itself is outside this system; a failing clearing call
/// fails the mint.
pub trait FeeClearing {
    fn clear_mint_fee(&mut self, recipient: Address, amount: Shares) -> Result<(), TokenError>;
}

/// Clearing implementation that collects no fee.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopClearing;

impl FeeClearing for NoopClearing {
    fn clear_mint_fee(&mut self, _recipient: Address, _amount: Shares) -> Result<(), TokenError> {
        Ok(())
    }
}
