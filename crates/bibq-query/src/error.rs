//! Error types for query parsing and rewriting.

use std::fmt;

use thiserror::Error;

/// A query string that matches neither the field syntax nor the SPIRES syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// The original query string.
    pub input: String,
    /// Byte offset of the furthest point the grammar reached.
    pub position: usize,
    /// What the grammar would have accepted at `position`.
    pub expected: Vec<String>,
}

impl SyntaxError {
    /// Creates a new syntax error.
    pub fn new(input: &str, position: usize, expected: Vec<String>) -> Self {
        Self {
            input: input.to_string(),
            position,
            expected,
        }
    }

    /// Input from the failure position on, or empty if the position is not
    /// a char boundary inside the input.
    fn rest(&self) -> &str {
        self.input.get(self.position..).unwrap_or_default()
    }

    /// Returns the short error message without context.
    pub fn message(&self) -> String {
        let found = match self.rest().chars().next() {
            Some(c) => format!("'{c}'"),
            None => "end of query".to_string(),
        };
        if self.expected.is_empty() {
            format!("unexpected {found}")
        } else {
            format!("unexpected {found}, expected {}", self.expected.join(" or "))
        }
    }

    /// Returns a suggestion for common mistakes.
    pub fn suggestion(&self) -> Option<&'static str> {
        let rest = self.rest();
        let opens = self.input.matches('(').count();
        let closes = self.input.matches(')').count();
        if rest.is_empty() && opens > closes {
            Some("Add a closing parenthesis ) to match the opening one")
        } else if rest.starts_with(')') {
            Some("Remove the unmatched closing parenthesis")
        } else if rest.starts_with(':') {
            Some("Field queries need a field name before ':', e.g. 'title:higgs'")
        } else if rest.is_empty() {
            Some("Operators need an expression on both sides, e.g. 'higgs and boson'")
        } else {
            None
        }
    }

    /// Formats the error with a caret pointing at the failure position.
    pub fn format_with_context(&self) -> String {
        let column = self
            .input
            .get(..self.position)
            .map_or_else(|| self.input.chars().count(), |before| before.chars().count());
        let mut result = format!("query syntax error: {}\n", self.message());
        result.push_str(&format!("  {}\n", self.input));
        result.push_str(&format!("  {}^", " ".repeat(column)));
        if let Some(hint) = self.suggestion() {
            result.push_str(&format!("\nhint: {hint}"));
        }
        result
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_context())
    }
}

impl std::error::Error for SyntaxError {}

/// Errors produced while parsing, configuring or rewriting queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query string could not be parsed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A SPIRES mnemonic has no canonical field.
    #[error("unknown SPIRES keyword: {keyword}")]
    UnknownKeyword {
        /// The mnemonic as written in the tree.
        keyword: String,
    },

    /// An allow-list entry is not a valid field name.
    #[error("invalid allowed keyword '{keyword}': expected word characters separated by dots")]
    InvalidKeyword {
        /// The rejected entry.
        keyword: String,
    },

    /// A different parser configuration was already installed process-wide.
    #[error("a different global parser configuration is already installed")]
    ConflictingConfig,
}
