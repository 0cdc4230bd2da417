//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use bibq_config::Config;
use bibq_query::{Parser, ParserConfig, QueryExpr, QueryError};
use log::debug;

use super::exit_codes;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Parser built from the configuration and command-line overrides.
    pub parser: Parser,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    ///
    /// A non-empty `keywords` list replaces the configured keyword allow-list.
    pub fn load(keywords: &[String]) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        let parser = build_parser(&config, keywords).map_err(|e| {
            eprintln!("error: invalid keyword configuration: {e}");
            exit_codes::error()
        })?;
        Ok(Self {
            cwd,
            config,
            parser,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            parser: Parser::default(),
        })
    }

    /// Parses `query`, rewriting SPIRES keywords when `canonical` is set.
    ///
    /// Syntax errors are printed with a caret under the offending position.
    pub fn parse_query(&self, query: &str, canonical: bool) -> Result<QueryExpr, ExitCode> {
        let parsed = if canonical {
            self.parser.parse_canonical(query)
        } else {
            self.parser.parse(query)
        };
        parsed.map_err(|e| {
            match e {
                QueryError::Syntax(ref syntax) => eprintln!("{}", syntax.format_with_context()),
                _ => eprintln!("error: {e}"),
            }
            exit_codes::error()
        })
    }
}

/// Builds the query parser from configuration, letting `keywords` override the allow-list.
fn build_parser(config: &Config, keywords: &[String]) -> Result<Parser, QueryError> {
    let allowed: &[String] = if keywords.is_empty() {
        &config.parser.allowed_keywords
    } else {
        keywords
    };
    debug!("allowed keywords: {allowed:?}");
    Ok(Parser::new(ParserConfig::with_allowed_keywords(allowed)?))
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        exit_codes::error()
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        exit_codes::error()
    })
}
