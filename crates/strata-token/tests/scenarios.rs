// crates/strata-token/tests/scenarios.rs
//
// End-to-end scenarios for the AssetToken facade: the dividend reference
// flow (deposit, claim, double-claim, recycle under current balances),
// batch overlap safety, multi-period reconciliation, supply conservation,
// and the capital-control override paths.

use chrono::{DateTime, Duration, TimeZone, Utc};

use strata_core::{
    Address, AssetGateway, CurrencyKind, Funds, MemoryGateway, NoopClearing, TokenError,
};
use strata_token::AssetToken;

const OWNER: u64 = 1;
const CAPITAL: u64 = 2;
const MINTER: u64 = 3;
const PAUSER: u64 = 4;
const RESCUER: u64 = 5;

fn addr(n: u64) -> Address {
    Address::from_low_u64(n)
}

fn day_zero() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn after_lock() -> DateTime<Utc> {
    day_zero() + Duration::days(366)
}

/// Alive token with every role assigned, transfers enabled, native base
/// currency, and an owner funded with a million units.
fn make_world() -> (AssetToken, MemoryGateway) {
    let mut token = AssetToken::with_capital_control(addr(OWNER), addr(CAPITAL), false).unwrap();
    token.set_mint_control(&addr(OWNER), addr(MINTER)).unwrap();
    token
        .set_roles(&addr(OWNER), addr(PAUSER), addr(RESCUER))
        .unwrap();
    token
        .set_metadata(
            &addr(OWNER),
            "Strata Shares".to_string(),
            "STRA".to_string(),
            CurrencyKind::Native,
        )
        .unwrap();
    token.set_token_configured(&addr(OWNER)).unwrap();
    token.set_token_alive(&addr(OWNER)).unwrap();
    token.enable_transfers(&addr(CAPITAL), true).unwrap();

    let mut gateway = MemoryGateway::new();
    gateway.credit(CurrencyKind::Native, addr(OWNER), 1_000_000);
    (token, gateway)
}

fn mint(token: &mut AssetToken, to: u64, amount: u64) {
    token
        .mint(&addr(MINTER), addr(to), amount, &mut NoopClearing)
        .unwrap();
}

/// Gateway that rejects outbound transfers in one currency, like an
/// asset contract returning false on payout while others keep working.
struct SelectiveGateway {
    inner: MemoryGateway,
    blocked: Option<CurrencyKind>,
}

impl AssetGateway for SelectiveGateway {
    fn transfer_in(
        &mut self,
        currency: &CurrencyKind,
        from: Address,
        amount: Funds,
    ) -> Result<(), TokenError> {
        self.inner.transfer_in(currency, from, amount)
    }

    fn transfer_out(
        &mut self,
        currency: &CurrencyKind,
        to: Address,
        amount: Funds,
    ) -> Result<(), TokenError> {
        if self.blocked == Some(*currency) {
            return Err(TokenError::ExternalTransfer(format!(
                "transfer of {} {} to {} was not confirmed",
                amount, currency, to
            )));
        }
        self.inner.transfer_out(currency, to, amount)
    }

    fn held(&self, currency: &CurrencyKind) -> Funds {
        self.inner.held(currency)
    }
}

#[test]
fn test_reference_claim_and_recycle_flow() {
    let (mut token, mut gateway) = make_world();
    // A holds 100 of 1000 total supply.
    mint(&mut token, 10, 100);
    mint(&mut token, 11, 900);

    let id = token
        .deposit_dividend(&addr(OWNER), &mut gateway, 1_000, day_zero())
        .unwrap();

    // A claims and receives 1000 * 100 / 1000 = 100 units.
    let paid = token.claim_dividend(&addr(10), &mut gateway, id).unwrap();
    assert_eq!(paid, 100);

    // A second claim fails with AlreadyClaimed.
    assert!(matches!(
        token.claim_dividend(&addr(10), &mut gateway, id),
        Err(TokenError::AlreadyClaimed(_))
    ));

    // A hands everything to a newcomer before the recycle.
    token.transfer(&addr(10), addr(12), 100).unwrap();

    // After a year, the 900 unclaimed units are swept into a new record
    // pinned to the *current* ledger state.
    let outcome = token
        .recycle_dividend(&addr(OWNER), id, after_lock())
        .unwrap();
    assert_eq!(outcome.swept, 900);
    let new_id = outcome.new_record_id.unwrap();

    // The old record is closed for everyone, claimed or not.
    assert!(token.claim_dividend(&addr(11), &mut gateway, id).is_err());

    // Claims on the new record follow current balances: A holds nothing
    // now, the newcomer holds A's former 100.
    assert_eq!(
        token.claim_dividend(&addr(10), &mut gateway, new_id).unwrap(),
        0
    );
    assert_eq!(
        token.claim_dividend(&addr(12), &mut gateway, new_id).unwrap(),
        90 // 900 * 100 / 1000
    );
    assert_eq!(
        token.claim_dividend(&addr(11), &mut gateway, new_id).unwrap(),
        810 // 900 * 900 / 1000
    );
}

#[test]
fn test_batch_overlap_never_double_pays() {
    let (mut token, mut gateway) = make_world();
    mint(&mut token, 10, 100);
    mint(&mut token, 11, 900);

    // Records 0..8, each 1000 units over the same supply.
    for _ in 0..8 {
        token
            .deposit_dividend(&addr(OWNER), &mut gateway, 1_000, day_zero())
            .unwrap();
    }

    let first = token
        .claim_in_batches(&addr(10), &mut gateway, 1, 5)
        .unwrap();
    assert_eq!(first, 400); // records 1..4, 100 each.

    // The overlap (3 and 4) is skipped, not double-paid and not an error.
    let second = token
        .claim_in_batches(&addr(10), &mut gateway, 3, 8)
        .unwrap();
    assert_eq!(second, 300); // records 5..7 only.

    assert_eq!(gateway.balance(&CurrencyKind::Native, &addr(10)), 700);
}

#[test]
fn test_batch_range_validation() {
    let (mut token, mut gateway) = make_world();
    mint(&mut token, 10, 100);
    token
        .deposit_dividend(&addr(OWNER), &mut gateway, 1_000, day_zero())
        .unwrap();

    assert!(matches!(
        token.claim_in_batches(&addr(10), &mut gateway, 3, 1),
        Err(TokenError::Precondition(_))
    ));
    assert!(matches!(
        token.claim_in_batches(&addr(10), &mut gateway, 0, 2),
        Err(TokenError::Precondition(_))
    ));
    // An empty range inside bounds is a no-op, not an error.
    assert_eq!(
        token.claim_in_batches(&addr(10), &mut gateway, 1, 1).unwrap(),
        0
    );
}

#[test]
fn test_failed_payout_leaves_whole_batch_unclaimed() {
    let (mut token, mut gateway) = make_world();
    mint(&mut token, 10, 100);
    mint(&mut token, 11, 900);
    for _ in 0..4 {
        token
            .deposit_dividend(&addr(OWNER), &mut gateway, 1_000, day_zero())
            .unwrap();
    }

    gateway.set_fail_transfers(true);
    assert!(matches!(
        token.claim_in_batches(&addr(10), &mut gateway, 0, 4),
        Err(TokenError::ExternalTransfer(_))
    ));
    // Every record stays claimable; escrow is untouched.
    assert_eq!(token.pending_dividends(&addr(10)), vec![0, 1, 2, 3]);
    assert_eq!(token.dividends().escrowed(&CurrencyKind::Native), 4_000);
    assert_eq!(gateway.balance(&CurrencyKind::Native, &addr(10)), 0);

    gateway.set_fail_transfers(false);
    assert_eq!(
        token.claim_dividend_all(&addr(10), &mut gateway).unwrap(),
        400
    );
}

#[test]
fn test_claim_all_across_currencies_keeps_escrow_consistent() {
    let (mut token, mut inner) = make_world();
    mint(&mut token, 10, 100);
    mint(&mut token, 11, 900);

    let asset = CurrencyKind::Asset(addr(77));
    inner.credit(asset, addr(OWNER), 50_000);
    let mut gateway = SelectiveGateway {
        inner,
        blocked: None,
    };

    // Record 0 in the native currency, then the base currency moves on
    // and record 1 lands in the asset.
    token
        .deposit_dividend(&addr(OWNER), &mut gateway, 1_000, day_zero())
        .unwrap();
    token.set_base_currency(&addr(CAPITAL), asset).unwrap();
    token
        .deposit_asset_dividend(&addr(OWNER), &mut gateway, addr(77), 2_000, day_zero())
        .unwrap();

    // The asset payout fails mid-drain. The native group settled and
    // committed; the asset record stays pending.
    gateway.blocked = Some(asset);
    assert!(matches!(
        token.claim_dividend_all(&addr(10), &mut gateway),
        Err(TokenError::ExternalTransfer(_))
    ));
    assert_eq!(gateway.inner.balance(&CurrencyKind::Native, &addr(10)), 100);
    assert_eq!(token.pending_dividends(&addr(10)), vec![1]);

    // Book escrow still matches gateway custody in both currencies.
    assert_eq!(
        token.dividends().escrowed(&CurrencyKind::Native),
        gateway.held(&CurrencyKind::Native)
    );
    assert_eq!(token.dividends().escrowed(&asset), gateway.held(&asset));

    // Once the asset pays out again, the drain finishes without
    // double-paying the native record.
    gateway.blocked = None;
    assert_eq!(
        token.claim_dividend_all(&addr(10), &mut gateway).unwrap(),
        200
    );
    assert_eq!(gateway.inner.balance(&CurrencyKind::Native, &addr(10)), 100);
    assert_eq!(gateway.inner.balance(&asset, &addr(10)), 200);
    assert!(token.pending_dividends(&addr(10)).is_empty());
}

#[test]
fn test_monthly_deposits_reconcile_with_claim_all() {
    let (mut token, mut gateway) = make_world();
    mint(&mut token, 10, 250);
    mint(&mut token, 11, 750);

    // Twelve monthly deposits of varying size.
    for month in 0..12u32 {
        let when = day_zero() + Duration::days(30 * month as i64);
        token
            .deposit_dividend(&addr(OWNER), &mut gateway, 1_000 + month as u128, when)
            .unwrap();
    }

    // Holder A drains the backlog in two batches; holder B in one call.
    let batched = token
        .claim_in_batches(&addr(10), &mut gateway, 0, 6)
        .unwrap()
        + token
            .claim_in_batches(&addr(10), &mut gateway, 6, 12)
            .unwrap();
    let one_shot = token.claim_dividend_all(&addr(11), &mut gateway).unwrap();

    let total_deposited: u128 = (0..12u128).map(|m| 1_000 + m).sum();
    let per_a: u128 = (0..12u128).map(|m| (1_000 + m) * 250 / 1_000).sum();
    let per_b: u128 = (0..12u128).map(|m| (1_000 + m) * 750 / 1_000).sum();
    assert_eq!(batched, per_a);
    assert_eq!(one_shot, per_b);
    assert!(batched + one_shot <= total_deposited);

    // Nothing is left pending for either holder.
    assert!(token.pending_dividends(&addr(10)).is_empty());
    assert!(token.pending_dividends(&addr(11)).is_empty());
}

#[test]
fn test_recycled_remainder_shared_under_current_balances() {
    let (mut token, mut gateway) = make_world();
    // 100 / 250 / 500 / 150 of 1000.
    mint(&mut token, 10, 100);
    mint(&mut token, 11, 250);
    mint(&mut token, 12, 500);
    mint(&mut token, 13, 150);

    let id = token
        .deposit_dividend(&addr(OWNER), &mut gateway, 10_000, day_zero())
        .unwrap();

    // Only the first two holders claim the original record.
    token.claim_dividend(&addr(10), &mut gateway, id).unwrap();
    token.claim_dividend(&addr(11), &mut gateway, id).unwrap();
    let remainder = token.dividend_record(id).unwrap().outstanding();
    assert_eq!(remainder, 6_500); // 10000 - 1000 - 2500.

    let outcome = token
        .recycle_dividend(&addr(CAPITAL), id, after_lock())
        .unwrap();
    let new_id = outcome.new_record_id.unwrap();

    // Every holder shares the recycled remainder pro rata, including the
    // two who already claimed the original.
    assert_eq!(
        token.claim_dividend(&addr(10), &mut gateway, new_id).unwrap(),
        650
    );
    assert_eq!(
        token.claim_dividend(&addr(11), &mut gateway, new_id).unwrap(),
        1_625
    );
    assert_eq!(
        token.claim_dividend(&addr(12), &mut gateway, new_id).unwrap(),
        3_250
    );
    assert_eq!(
        token.claim_dividend(&addr(13), &mut gateway, new_id).unwrap(),
        975
    );

    // Fully distributed: escrow holds nothing for the base currency.
    assert_eq!(token.dividends().escrowed(&CurrencyKind::Native), 0);
}

#[test]
fn test_supply_conservation_across_operations() {
    let (mut token, _) = make_world();
    mint(&mut token, 10, 100);
    mint(&mut token, 11, 250);
    token.transfer(&addr(11), addr(12), 75).unwrap();
    mint(&mut token, 12, 10);
    token.burn(&addr(MINTER), addr(10), 40).unwrap();
    token.transfer(&addr(10), addr(11), 60).unwrap();

    for height in 0..=token.height() {
        let sum: u64 = token
            .ledger()
            .accounts()
            .map(|a| token.balance_of_at(a, height))
            .sum();
        assert_eq!(sum, token.total_supply_at(height), "height {}", height);
    }
}

#[test]
fn test_checkpoint_correctness_for_every_height() {
    let (mut token, _) = make_world();
    // Replay a balance trace for account 10 and record what it should be
    // after each height.
    let mut expected = vec![0u64]; // height 0.
    mint(&mut token, 10, 100);
    expected.push(100);
    mint(&mut token, 11, 50);
    expected.push(100);
    token.transfer(&addr(10), addr(11), 30).unwrap();
    expected.push(70);
    token.burn(&addr(MINTER), addr(10), 20).unwrap();
    expected.push(50);
    token.transfer(&addr(11), addr(10), 5).unwrap();
    expected.push(55);

    for (height, want) in expected.iter().enumerate() {
        assert_eq!(
            token.balance_of_at(&addr(10), height as u64),
            *want,
            "height {}",
            height
        );
    }
}

#[test]
fn test_capital_control_overrides_mint_gates() {
    let mut token = AssetToken::with_capital_control(addr(OWNER), addr(CAPITAL), false).unwrap();
    token.set_mint_control(&addr(OWNER), addr(MINTER)).unwrap();
    token
        .set_roles(&addr(OWNER), addr(PAUSER), addr(RESCUER))
        .unwrap();

    // Before alive: the minter is blocked, capitalControl is not.
    assert!(token
        .mint(&addr(MINTER), addr(10), 100, &mut NoopClearing)
        .is_err());
    token
        .mint(&addr(CAPITAL), addr(10), 100, &mut NoopClearing)
        .unwrap();

    token.set_token_configured(&addr(OWNER)).unwrap();
    token.set_token_alive(&addr(OWNER)).unwrap();

    // Paused: same split.
    token
        .pause_capital_increase_or_decrease(&addr(PAUSER), false)
        .unwrap();
    assert!(token
        .mint(&addr(MINTER), addr(10), 100, &mut NoopClearing)
        .is_err());
    token
        .mint(&addr(CAPITAL), addr(10), 100, &mut NoopClearing)
        .unwrap();
    token
        .pause_capital_increase_or_decrease(&addr(PAUSER), true)
        .unwrap();

    // Finished: same split again, until the crowdsale reopens.
    token.finish_minting(&addr(CAPITAL)).unwrap();
    assert!(token
        .mint(&addr(MINTER), addr(10), 100, &mut NoopClearing)
        .is_err());
    token
        .burn(&addr(CAPITAL), addr(10), 50)
        .unwrap();

    token.reopen_crowdsale(&addr(CAPITAL), addr(6)).unwrap();
    token
        .mint(&addr(6), addr(10), 100, &mut NoopClearing)
        .unwrap();
}

#[test]
fn test_promotion_moves_depositor_rights() {
    let mut token = AssetToken::with_capital_control(addr(OWNER), addr(CAPITAL), true).unwrap();
    token.set_mint_control(&addr(OWNER), addr(MINTER)).unwrap();
    token
        .set_roles(&addr(OWNER), addr(PAUSER), addr(RESCUER))
        .unwrap();
    token.set_token_configured(&addr(OWNER)).unwrap();
    token.set_token_alive(&addr(OWNER)).unwrap();

    // The owner role now sits with capitalControl.
    assert_eq!(token.lifecycle().roles().owner, addr(CAPITAL));

    let mut gateway = MemoryGateway::new();
    gateway.credit(CurrencyKind::Native, addr(CAPITAL), 10_000);
    gateway.credit(CurrencyKind::Native, addr(OWNER), 10_000);

    // The former owner can no longer deposit; capitalControl can.
    assert!(matches!(
        token.deposit_dividend(&addr(OWNER), &mut gateway, 1_000, day_zero()),
        Err(TokenError::Authorization(_))
    ));
    token
        .deposit_dividend(&addr(CAPITAL), &mut gateway, 1_000, day_zero())
        .unwrap();
}

#[test]
fn test_asset_dividend_end_to_end() {
    let (mut token, mut gateway) = make_world();
    let asset = addr(77);
    token
        .set_base_currency(&addr(CAPITAL), CurrencyKind::Asset(asset))
        .unwrap();
    gateway.credit(CurrencyKind::Asset(asset), addr(OWNER), 50_000);
    mint(&mut token, 10, 400);
    mint(&mut token, 11, 600);

    // Native deposits are now the wrong currency.
    assert!(token
        .deposit_dividend(&addr(OWNER), &mut gateway, 1_000, day_zero())
        .is_err());

    let id = token
        .deposit_asset_dividend(&addr(OWNER), &mut gateway, asset, 10_000, day_zero())
        .unwrap();
    assert_eq!(
        token.claim_dividend(&addr(10), &mut gateway, id).unwrap(),
        4_000
    );
    assert_eq!(
        gateway.balance(&CurrencyKind::Asset(asset), &addr(10)),
        4_000
    );

    // The asset backs claimable dividends, so rescue refuses it.
    assert!(token
        .rescue_token(
            &addr(RESCUER),
            &mut gateway,
            CurrencyKind::Asset(asset),
            addr(RESCUER)
        )
        .is_err());
}

#[test]
fn test_deposit_while_supply_is_zero() {
    let (mut token, mut gateway) = make_world();
    let id = token
        .deposit_dividend(&addr(OWNER), &mut gateway, 5_000, day_zero())
        .unwrap();

    mint(&mut token, 10, 1_000);

    // The record entitles nobody to anything; the mint came after.
    assert_eq!(token.claim_dividend(&addr(10), &mut gateway, id).unwrap(), 0);

    // Recycling sweeps the full amount forward to current holders.
    let outcome = token
        .recycle_dividend(&addr(OWNER), id, after_lock())
        .unwrap();
    assert_eq!(outcome.swept, 5_000);
    let new_id = outcome.new_record_id.unwrap();
    assert_eq!(
        token.claim_dividend(&addr(10), &mut gateway, new_id).unwrap(),
        5_000
    );
}

#[test]
fn test_dust_travels_with_recycle() {
    let (mut token, mut gateway) = make_world();
    // 3 holders of 1 share each; a 10-unit deposit floors to 3 apiece.
    mint(&mut token, 10, 1);
    mint(&mut token, 11, 1);
    mint(&mut token, 12, 1);

    let id = token
        .deposit_dividend(&addr(OWNER), &mut gateway, 10, day_zero())
        .unwrap();
    for holder in [10, 11, 12] {
        assert_eq!(
            token.claim_dividend(&addr(holder), &mut gateway, id).unwrap(),
            3
        );
    }

    // The 1-unit dust remains escrowed and re-enters through the recycle.
    assert_eq!(token.dividends().escrowed(&CurrencyKind::Native), 1);
    let outcome = token
        .recycle_dividend(&addr(OWNER), id, after_lock())
        .unwrap();
    assert_eq!(outcome.swept, 1);
}
