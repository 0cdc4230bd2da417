//! CLI support for the `bibq` binary.

pub mod args;
pub mod commands;
pub mod context;

pub use context::CommandContext;

/// Process exit codes.
pub mod exit_codes {
    use std::process::ExitCode;

    /// The command succeeded; for `match`, at least one record matched.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// `match` ran but no record matched.
    pub const NO_MATCH: ExitCode = ExitCode::FAILURE;
    /// Status reported when a command fails.
    pub const ERROR_STATUS: u8 = 2;

    /// The command failed.
    pub fn error() -> ExitCode {
        ExitCode::from(ERROR_STATUS)
    }
}
