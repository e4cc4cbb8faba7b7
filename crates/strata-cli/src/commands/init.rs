// crates/strata-cli/src/commands/init.rs
//
// `strata init` — create a fresh token state file.

use clap::Args;

use strata_core::Address;

use crate::world::World;

/// Arguments for `strata init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Owner (deployer) address.
    #[arg(long)]
    pub owner: Address,

    /// Capital-control address, assigned from the start.
    #[arg(long)]
    pub capital_control: Option<Address>,

    /// Hand the owner role to capital control when the token goes alive.
    #[arg(long)]
    pub promote_on_alive: bool,

    /// Overwrite an existing state file.
    #[arg(long)]
    pub force: bool,
}

/// Run `strata init`.
pub fn run(args: &InitArgs, state_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    if std::path::Path::new(state_path).exists() && !args.force {
        return Err(format!(
            "state file {} already exists; pass --force to overwrite",
            state_path
        )
        .into());
    }
    if args.promote_on_alive && args.capital_control.is_none() {
        return Err("--promote-on-alive requires --capital-control".into());
    }

    let world = World::create(args.owner, args.capital_control, args.promote_on_alive)?;
    world.save(state_path)?;

    println!("Initialized token state at {}", state_path);
    println!("  Owner:           {}", args.owner);
    match &args.capital_control {
        Some(capital_control) => println!("  Capital control: {}", capital_control),
        None => println!("  Capital control: (unassigned)"),
    }
    Ok(())
}
