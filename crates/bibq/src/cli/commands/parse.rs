//! Implementation of `bibq parse`.

use std::process::ExitCode;

use bibq_query::{QueryExpr, ReprPrinter, TreePrinter};

use crate::cli::{args::ParseCommand, context::CommandContext, exit_codes};

/// Parses a query and prints the resulting tree without rewriting it.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    match ctx.parse_query(&cmd.query, false) {
        Ok(expr) => {
            println!("{}", render(&expr, cmd.repr));
            exit_codes::OK
        }
        Err(code) => code,
    }
}

/// Renders a tree in canonical text or diagnostic form.
pub fn render(expr: &QueryExpr, repr: bool) -> String {
    if repr {
        expr.accept(&mut ReprPrinter)
    } else {
        expr.accept(&mut TreePrinter)
    }
}
