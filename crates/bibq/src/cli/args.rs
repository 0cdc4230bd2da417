//! Clap argument definitions for the `bibq` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "bibq")]
#[command(about = "Parse, rewrite and evaluate bibliographic search queries")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v for debug logging, -vv for trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Restrict field keywords to this list, replacing any configured list
    /// (can be specified multiple times)
    #[arg(short = 'k', long = "keyword", global = true)]
    pub keywords: Vec<String>,
}

/// Arguments for `bibq parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Query to parse
    pub query: String,

    /// Print the diagnostic form of the tree
    #[arg(long)]
    pub repr: bool,
}

/// Arguments for `bibq rewrite`.
#[derive(Args, Debug, Clone)]
pub struct RewriteCommand {
    /// Query to rewrite
    pub query: String,

    /// Print the diagnostic form of the tree
    #[arg(long)]
    pub repr: bool,
}

/// Arguments for `bibq match`.
#[derive(Args, Debug, Clone)]
pub struct MatchCommand {
    /// Query to evaluate
    pub query: String,

    /// JSON record files to test
    #[arg(required = true)]
    pub records: Vec<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `bibq init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.bibq.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `bibq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a query and print its tree
    #[command(after_help = "EXAMPLES:
  bibq parse 'title:higgs and author:\"Ellis, J\"'
  bibq parse 'find a ellis and t higgs' --repr")]
    Parse(ParseCommand),

    /// Parse a query and rewrite SPIRES keywords to canonical field names
    Rewrite(RewriteCommand),

    /// Test JSON records against a query
    #[command(after_help = "EXIT STATUS:
  0  at least one record matched
  1  no record matched
  2  an error occurred")]
    Match(MatchCommand),

    /// List SPIRES keyword mnemonics and their canonical field names
    Keywords,

    /// Show configuration files and effective settings
    Config,

    /// Initialize bibq configuration in current directory
    Init(InitCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli =
            Cli::try_parse_from(["bibq", "parse", "foo:bar", "-vv", "-k", "foo", "--keyword", "bar"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.keywords, vec!["foo", "bar"]);
        assert!(matches!(cli.command, Commands::Parse(ParseCommand { repr: false, .. })));
    }

    #[test]
    fn match_requires_records() {
        assert!(Cli::try_parse_from(["bibq", "match", "foo:bar"]).is_err());
    }
}
