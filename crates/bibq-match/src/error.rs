//! Error types for record matching.

use thiserror::Error;

/// Errors that can occur while evaluating a query against a record.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A value could not be compiled as a regular expression.
    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        /// The pattern as written in the query.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },

    /// A record value cannot be ordered against a range bound.
    #[error("cannot compare '{value}' with range bound '{bound}'")]
    Incomparable {
        /// The record value.
        value: String,
        /// The offending bound.
        bound: String,
    },

    /// The tree contains a node the matcher cannot evaluate.
    #[error("cannot evaluate {kind}: {reason}")]
    Unsupported {
        /// Kind of the offending node.
        kind: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}
