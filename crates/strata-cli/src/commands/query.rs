// crates/strata-cli/src/commands/query.rs
//
// Read-only listings: status, accounts, records, history, balances,
// allowances, and pending claims.

use strata_core::Address;

use crate::output::{account_rows, format_table, history_rows, record_rows};
use crate::world::World;

/// `strata status` — metadata, phase, flags, supply, and escrow.
pub fn status(world: &World) {
    let token = &world.token;
    let metadata = token.metadata();
    let lifecycle = token.lifecycle();
    let roles = lifecycle.roles();

    println!("Token: {} ({})", metadata.name, metadata.symbol);
    if !metadata.short_description.is_empty() {
        println!("  {}", metadata.short_description);
    }
    println!("  Base currency:    {}", metadata.base_currency);
    println!("  Base rate:        {}", metadata.base_rate);
    println!("  Phase:            {}", lifecycle.phase());
    println!("  Transfers:        {}", on_off(lifecycle.transfers_enabled()));
    println!("  Mint/burn paused: {}", lifecycle.mint_burn_paused());
    println!("  Minting finished: {}", lifecycle.mint_burn_finished());
    println!("  Total supply:     {}", token.total_supply());
    println!("  Ledger height:    {}", token.height());
    println!(
        "  Escrowed:         {} {}",
        token.dividends().escrowed(&metadata.base_currency),
        metadata.base_currency
    );
    println!("Roles:");
    println!("  Owner:           {}", roles.owner);
    println!("  Capital control: {}", role(&roles.capital_control));
    println!("  Mint control:    {}", role(&roles.mint_control));
    println!("  Pause control:   {}", role(&roles.pause_control));
    println!("  Rescue control:  {}", role(&roles.token_rescue_control));
}

/// `strata accounts` — every account the ledger has checkpointed.
pub fn accounts(world: &World) {
    let rows = account_rows(&world.token);
    if rows.is_empty() {
        println!("No accounts have held shares yet.");
    } else {
        println!("{}", format_table(&rows));
    }
}

/// `strata records` — every dividend record.
pub fn records(world: &World) {
    let rows = record_rows(&world.token);
    if rows.is_empty() {
        println!("No dividend records yet.");
    } else {
        println!("{}", format_table(&rows));
    }
}

/// `strata history <account>` — one account's checkpoint history.
pub fn history(world: &World, account: &Address) {
    let rows = history_rows(&world.token, account);
    if rows.is_empty() {
        println!("{} has no checkpoint history.", account);
    } else {
        println!("{}", format_table(&rows));
    }
}

/// `strata balance <account>` — shares plus external funds.
pub fn balance(world: &World, account: &Address) {
    let currency = world.token.metadata().base_currency;
    println!("{}", account);
    println!("  Shares: {}", world.token.balance_of(account));
    println!(
        "  Funds:  {} {}",
        world.gateway.balance(&currency, account),
        currency
    );
}

/// `strata allowance <owner> <spender>`.
pub fn allowance(world: &World, owner: &Address, spender: &Address) {
    println!("{}", world.token.allowance(owner, spender));
}

/// `strata pending <account>` — record ids still claimable.
pub fn pending(world: &World, account: &Address) {
    let pending = world.token.pending_dividends(account);
    if pending.is_empty() {
        println!("{} has no pending dividend records.", account);
    } else {
        let ids: Vec<String> = pending.iter().map(|id| id.to_string()).collect();
        println!("{}", ids.join(", "));
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

fn role(holder: &Option<Address>) -> String {
    match holder {
        Some(address) => address.to_string(),
        None => "(unassigned)".to_string(),
    }
}
