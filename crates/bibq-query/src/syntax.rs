//! Concrete parse tree.
//!
//! One variant per grammar production that survives into conversion. Values
//! hold the text exactly as matched; case folding and node construction happen
//! in [`crate::convert`].

/// A parse tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Syntax {
    /// Blank input, with the whitespace it contained.
    Empty(String),
    /// A field-syntax query: a first term and its continuations.
    Query {
        /// Leading term.
        first: Box<Self>,
        /// Following terms with their connectives.
        rest: Vec<Continuation>,
    },
    /// A SPIRES query: a first term and its continuations.
    SpiresQuery {
        /// Leading term.
        first: Box<Self>,
        /// Following terms with their connectives.
        rest: Vec<Continuation>,
    },
    /// `find ...` wrapper around a SPIRES query.
    Find(Box<Self>),
    /// A query between parentheses.
    Parenthesized(Box<Self>),
    /// `keyword : value`.
    KeywordQuery {
        /// A [`Syntax::KeywordRule`].
        keyword: Box<Self>,
        /// Value, nested keyword query or parenthesized query.
        value: Box<Self>,
    },
    /// `mnemonic value` or `mnemonic: value` in SPIRES mode.
    SpiresKeywordQuery {
        /// A [`Syntax::SpiresKeywordRule`] or [`Syntax::NestableKeyword`].
        keyword: Box<Self>,
        /// Value, comparison or nested query.
        value: Box<Self>,
    },
    /// A bare value searched everywhere.
    ValueQuery(Box<Self>),
    /// A `word:` token whose word is not an allowed keyword.
    NotKeywordValue(String),
    /// A SPIRES comparison (`> 1984`, `200+`, `before 2000`).
    Comparison {
        /// Direction of the comparison.
        comparison: Comparison,
        /// Compared value.
        value: Box<Self>,
    },
    /// Field name in field syntax.
    KeywordRule(String),
    /// SPIRES mnemonic, lowercased.
    SpiresKeywordRule(String),
    /// `refersto` or `citedby`, lowercased.
    NestableKeyword(String),
    /// `'...'` contents.
    SingleQuotedString(String),
    /// `"..."` contents.
    DoubleQuotedString(String),
    /// `/.../` contents.
    SlashQuotedString(String),
    /// Bare value token.
    SimpleValue(String),
    /// `low->high`.
    RangeOp(Box<Self>, Box<Self>),
    /// SPIRES free-form value, spacing preserved.
    SpiresValue(String),
    /// Digits preceding `+` or `-`.
    Number(String),
}

/// A term following the first one in a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    /// How the term joins what precedes it.
    pub connective: Connective,
    /// The term itself.
    pub term: Box<Syntax>,
}

impl Continuation {
    /// Creates a continuation.
    pub fn new(connective: Connective, term: Syntax) -> Self {
        Self {
            connective,
            term: Box::new(term),
        }
    }
}

/// Boolean connective between two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// `and` or `+`.
    And,
    /// `or` or `|`.
    Or,
    /// `not`, `and not` or `-`.
    AndNot,
    /// Two adjacent terms.
    Implicit,
}

/// Direction of a SPIRES comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `>` or `after`.
    Greater,
    /// `>=` or `N+`.
    GreaterEqual,
    /// `<` or `before`.
    Lower,
    /// `<=` or `N-`.
    LowerEqual,
}
