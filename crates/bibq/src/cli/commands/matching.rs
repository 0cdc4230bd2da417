//! Implementation of `bibq match`.

use std::{fs, path::Path, process::ExitCode};

use bibq_match::{Record, matches};
use bibq_query::{QueryExpr, TreePrinter};
use log::debug;
use serde::Serialize;

use crate::cli::{args::MatchCommand, context::CommandContext, exit_codes};

/// Outcome for one record file.
#[derive(Serialize)]
struct MatchResult {
    /// Record file as given on the command line.
    record: String,
    /// Whether the record satisfies the query.
    matched: bool,
}

/// JSON output for `bibq match --json`.
#[derive(Serialize)]
struct JsonMatchOutput {
    /// The query as given.
    query: String,
    /// Canonical text of the evaluated tree.
    parsed: String,
    /// One entry per record file, in command-line order.
    results: Vec<MatchResult>,
}

/// Tests each record file against the query.
pub fn run(ctx: &CommandContext, cmd: &MatchCommand) -> ExitCode {
    let expr = match ctx.parse_query(&cmd.query, ctx.config.parser.rewrite_spires) {
        Ok(expr) => expr,
        Err(code) => return code,
    };

    let mut results = Vec::with_capacity(cmd.records.len());
    for path in &cmd.records {
        match evaluate(&expr, path) {
            Ok(matched) => results.push(MatchResult {
                record: path.display().to_string(),
                matched,
            }),
            Err(message) => {
                eprintln!("error: {}: {message}", path.display());
                return exit_codes::error();
            }
        }
    }

    if cmd.json {
        let output = JsonMatchOutput {
            query: cmd.query.clone(),
            parsed: expr.accept(&mut TreePrinter),
            results,
        };
        return match serde_json::to_string_pretty(&output) {
            Ok(json) => {
                println!("{json}");
                status(&output.results)
            }
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                exit_codes::error()
            }
        };
    }

    for result in &results {
        let verdict = if result.matched { "match" } else { "no match" };
        println!("{}: {verdict}", result.record);
    }
    status(&results)
}

/// Reads one JSON record file and evaluates the query against it.
fn evaluate(expr: &QueryExpr, path: &Path) -> Result<bool, String> {
    let contents = fs::read_to_string(path).map_err(|e| format!("failed to read record: {e}"))?;
    let record: Record =
        serde_json::from_str(&contents).map_err(|e| format!("invalid JSON record: {e}"))?;
    let matched = matches(expr, &record).map_err(|e| e.to_string())?;
    debug!("{} -> {matched}", path.display());
    Ok(matched)
}

/// Exit status for a completed run.
fn status(results: &[MatchResult]) -> ExitCode {
    if results.iter().any(|r| r.matched) {
        exit_codes::OK
    } else {
        exit_codes::NO_MATCH
    }
}
