//! Parser configuration and entry points.

use std::{collections::BTreeSet, sync::OnceLock};

use log::{debug, trace};

use crate::{
    ast::QueryExpr,
    convert::convert,
    error::QueryError,
    grammar::parse_syntax,
    spires::SpiresToCanonical,
    syntax::Syntax,
};

/// Process-wide configuration used by [`parse`].
static GLOBAL: OnceLock<ParserConfig> = OnceLock::new();

/// Immutable parser settings.
///
/// The default accepts any word-like field name in `field:value` queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Field names accepted on the left of `:`, if restricted.
    allowed_keywords: Option<BTreeSet<String>>,
}

impl ParserConfig {
    /// Creates the unrestricted configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts field queries to the given keywords and MARC tags.
    ///
    /// Each keyword must be word characters, optionally separated by single dots.
    /// An empty list leaves the configuration unrestricted.
    pub fn with_allowed_keywords<I, S>(keywords: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut allowed = BTreeSet::new();
        for keyword in keywords {
            let keyword = keyword.into();
            let valid = keyword
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_alphanumeric() || c == '_'));
            if !valid {
                return Err(QueryError::InvalidKeyword { keyword });
            }
            allowed.insert(keyword);
        }
        Ok(Self {
            allowed_keywords: (!allowed.is_empty()).then_some(allowed),
        })
    }

    /// Returns the allow-list, or `None` if any keyword is accepted.
    pub fn allowed_keywords(&self) -> Option<&BTreeSet<String>> {
        self.allowed_keywords.as_ref()
    }
}

/// A query parser bound to one configuration.
///
/// Parsers are cheap to build and share nothing, so several configurations can
/// be live at once.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    /// Settings applied to every parse.
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the given configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser's configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses `input` into a concrete parse tree.
    pub fn parse_tree(&self, input: &str) -> Result<Syntax, QueryError> {
        trace!("parsing {input:?}");
        Ok(parse_syntax(input, self.config.allowed_keywords())?)
    }

    /// Parses `input` into a query tree. SPIRES field queries are kept as
    /// [`QueryExpr::SpiresOp`].
    pub fn parse(&self, input: &str) -> Result<QueryExpr, QueryError> {
        let expr = convert(self.parse_tree(input)?);
        debug!("parsed {input:?} as {expr}");
        Ok(expr)
    }

    /// Parses `input` and rewrites SPIRES mnemonics into canonical field names.
    pub fn parse_canonical(&self, input: &str) -> Result<QueryExpr, QueryError> {
        let expr = self.parse(input)?;
        if !expr.contains_spires() {
            return Ok(expr);
        }
        let canonical = SpiresToCanonical::rewrite(&expr)?;
        debug!("rewrote {expr} as {canonical}");
        Ok(canonical)
    }
}

/// Installs the configuration used by [`parse`] for the rest of the process.
///
/// Installing an equal configuration again is a no-op. Installing a different
/// one fails with [`QueryError::ConflictingConfig`].
pub fn install_global(config: ParserConfig) -> Result<(), QueryError> {
    match GLOBAL.set(config) {
        Ok(()) => Ok(()),
        Err(config) if GLOBAL.get() == Some(&config) => Ok(()),
        Err(_) => Err(QueryError::ConflictingConfig),
    }
}

/// Returns the installed process-wide configuration, if any.
pub fn global_config() -> Option<&'static ParserConfig> {
    GLOBAL.get()
}

/// Parses `input` with the installed configuration, or the default one.
pub fn parse(input: &str) -> Result<QueryExpr, QueryError> {
    Parser::new(global_config().cloned().unwrap_or_default()).parse(input)
}
