//! Implementation of `bibq config`.

use std::process::ExitCode;

use bibq_config::is_global_config;

use crate::cli::{context::CommandContext, exit_codes};

/// Shows the configuration files in effect and the merged settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    if config.sources.is_empty() {
        println!("# no configuration files found; using defaults");
    } else {
        println!("# configuration files (highest precedence first):");
        for path in &config.sources {
            let scope = if is_global_config(path) { " (global)" } else { "" };
            println!("#   {}{scope}", path.display());
        }
    }
    println!();

    match config.settings_to_toml() {
        Ok(toml) => {
            print!("{toml}");
            exit_codes::OK
        }
        Err(e) => {
            eprintln!("error: {e}");
            exit_codes::error()
        }
    }
}
