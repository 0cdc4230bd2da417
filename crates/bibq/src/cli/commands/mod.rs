//! Command implementations and dispatch.

pub mod config;
pub mod init;
pub mod keywords;
pub mod matching;
pub mod parse;
pub mod rewrite;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Parse(cmd) => parse::run(ctx, &cmd),
        Commands::Rewrite(cmd) => rewrite::run(ctx, &cmd),
        Commands::Match(cmd) => matching::run(ctx, &cmd),
        Commands::Keywords => keywords::run(),
        Commands::Config => config::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
