//! Command-line interface for `bibq`, the bibliographic query tool.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use crate::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands,
};

/// Initializes logging: warnings by default, `-v` for debug, `-vv` for trace.
/// `RUST_LOG` takes precedence when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load(&cli.keywords)
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
