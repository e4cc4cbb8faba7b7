// crates/strata-cli/src/main.rs
//
// CLI entrypoint for the Strata equity token simulator.
//
// Operates a token instance persisted as a JSON state file: lifecycle and
// role administration, share movement, dividend deposits, claims and
// recycling, plus read-only listings. The caller identity and wall-clock
// time are explicit flags so any scenario — including lock-period
// expiry — can be replayed deterministically.

mod commands;
mod output;
mod world;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use strata_core::{Address, CurrencyKind, Funds};

use commands::admin::AdminCmd;
use commands::dividend::DividendCmd;
use commands::init::InitArgs;
use commands::share::ShareCmd;
use world::World;

/// Strata CLI — checkpointed share ledger and dividend engine.
#[derive(Parser, Debug)]
#[command(
    name = "strata",
    version = "0.1.0",
    about = "Strata equity token simulator: checkpointed balances, pro-rata dividends, recycling"
)]
struct Cli {
    /// Path to the JSON state file.
    #[arg(long, global = true, default_value_t = world::default_state_path())]
    state: String,

    /// Caller identity for mutating operations (0x-prefixed hex address).
    #[arg(long, global = true)]
    caller: Option<Address>,

    /// Simulated wall-clock time (RFC 3339); defaults to the real clock.
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a fresh token state file.
    Init(InitArgs),

    /// Show metadata, phase, flags, supply, and escrow.
    Status,

    /// List every account that has ever held shares.
    Accounts,

    /// List every dividend record.
    Records,

    /// Show one account's checkpoint history.
    History { account: Address },

    /// Show one account's shares and external funds.
    Balance { account: Address },

    /// Show the remaining allowance from owner to spender.
    Allowance { owner: Address, spender: Address },

    /// List record ids still claimable by an account.
    Pending { account: Address },

    /// Generate a fresh random account address.
    NewAccount,

    /// Credit simulated external funds to an account.
    Fund {
        account: Address,
        amount: Funds,
        /// "native" or an asset address.
        #[arg(long, default_value = "native")]
        currency: CurrencyKind,
    },

    /// Share movement: mint, burn, transfer, approvals, recovery.
    #[command(subcommand)]
    Share(ShareCmd),

    /// Dividends: deposit, claim, recycle, rescue.
    #[command(subcommand)]
    Dividend(DividendCmd),

    /// Lifecycle, roles, pause switches, and metadata.
    #[command(subcommand)]
    Admin(AdminCmd),
}

fn require_caller(caller: &Option<Address>) -> Result<Address, Box<dyn std::error::Error>> {
    caller.ok_or_else(|| "this operation needs --caller <address>".into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let state = world::expand_tilde(&cli.state);
    let now = cli.now.unwrap_or_else(Utc::now);

    match &cli.command {
        Commands::Init(args) => commands::init::run(args, &state)?,

        Commands::NewAccount => println!("{}", Address::random()),

        Commands::Status => commands::query::status(&World::load(&state)?),
        Commands::Accounts => commands::query::accounts(&World::load(&state)?),
        Commands::Records => commands::query::records(&World::load(&state)?),
        Commands::History { account } => commands::query::history(&World::load(&state)?, account),
        Commands::Balance { account } => commands::query::balance(&World::load(&state)?, account),
        Commands::Allowance { owner, spender } => {
            commands::query::allowance(&World::load(&state)?, owner, spender)
        }
        Commands::Pending { account } => commands::query::pending(&World::load(&state)?, account),

        Commands::Fund {
            account,
            amount,
            currency,
        } => {
            let mut world = World::load(&state)?;
            world.gateway.credit(*currency, *account, *amount);
            world.save(&state)?;
            println!("Credited {} {} to {}", amount, currency, account);
        }

        Commands::Share(cmd) => {
            let caller = require_caller(&cli.caller)?;
            let mut world = World::load(&state)?;
            commands::share::run(&mut world, &caller, cmd)?;
            world.save(&state)?;
        }

        Commands::Dividend(cmd) => {
            let caller = require_caller(&cli.caller)?;
            let mut world = World::load(&state)?;
            commands::dividend::run(&mut world, &caller, now, cmd)?;
            world.save(&state)?;
        }

        Commands::Admin(cmd) => {
            let caller = require_caller(&cli.caller)?;
            let mut world = World::load(&state)?;
            commands::admin::run(&mut world, &caller, cmd)?;
            world.save(&state)?;
        }
    }

    Ok(())
}
