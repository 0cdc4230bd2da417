//! Implementation of `bibq rewrite`.

use std::process::ExitCode;

use crate::cli::{
    args::RewriteCommand, commands::parse::render, context::CommandContext, exit_codes,
};

/// Parses a query and prints it with SPIRES mnemonics replaced by canonical field names.
pub fn run(ctx: &CommandContext, cmd: &RewriteCommand) -> ExitCode {
    match ctx.parse_query(&cmd.query, true) {
        Ok(expr) => {
            println!("{}", render(&expr, cmd.repr));
            exit_codes::OK
        }
        Err(code) => code,
    }
}
