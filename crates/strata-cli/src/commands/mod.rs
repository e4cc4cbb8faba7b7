// crates/strata-cli/src/commands/mod.rs
//
// Subcommand implementations for the Strata CLI.

pub mod admin;
pub mod dividend;
pub mod init;
pub mod query;
pub mod share;
