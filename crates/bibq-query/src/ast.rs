//! Canonical query abstract syntax tree.
//!
//! Both concrete syntaxes (field queries and SPIRES `find` queries) convert into
//! this tree. Nodes are plain values: every walker builds a new result instead of
//! mutating the tree it visits.

use std::fmt;

use crate::{
    printer::ReprPrinter,
    visitor::{Visitor, walk},
};

/// A node of the canonical query tree.
///
/// Variants fall into four families: leaves holding a string, unary operators
/// holding one child, binary operators holding a left and a right child, and the
/// empty query. A tree produced by [`crate::Parser::parse_canonical`] never
/// contains [`QueryExpr::SpiresOp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpr {
    /// Field name on the left of a keyword query.
    Keyword(String),
    /// Bare value token.
    Value(String),
    /// Value written as `'text'`.
    SingleQuotedValue(String),
    /// Value written as `"text"`.
    DoubleQuotedValue(String),
    /// Value written as `/pattern/`.
    RegexValue(String),
    /// Blank input. Holds the original whitespace.
    EmptyQuery(String),

    /// Negation.
    NotOp(Box<Self>),
    /// Value searched in every field of a record.
    ValueQuery(Box<Self>),
    /// Strictly lower than the operand.
    LowerOp(Box<Self>),
    /// Lower than or equal to the operand.
    LowerEqualOp(Box<Self>),
    /// Strictly greater than the operand.
    GreaterOp(Box<Self>),
    /// Greater than or equal to the operand.
    GreaterEqualOp(Box<Self>),

    /// Conjunction.
    AndOp(Box<Self>, Box<Self>),
    /// Disjunction.
    OrOp(Box<Self>, Box<Self>),
    /// Field-qualified query: a [`QueryExpr::Keyword`] and the value or query it scopes.
    KeywordOp(Box<Self>, Box<Self>),
    /// Inclusive range between two value leaves.
    RangeOp(Box<Self>, Box<Self>),
    /// Field-qualified query written with a SPIRES mnemonic, before rewriting.
    SpiresOp(Box<Self>, Box<Self>),
}

impl QueryExpr {
    /// Creates a keyword leaf.
    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword(value.into())
    }

    /// Creates a bare value leaf.
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    /// Creates a single-quoted value leaf.
    pub fn single_quoted(value: impl Into<String>) -> Self {
        Self::SingleQuotedValue(value.into())
    }

    /// Creates a double-quoted value leaf.
    pub fn double_quoted(value: impl Into<String>) -> Self {
        Self::DoubleQuotedValue(value.into())
    }

    /// Creates a regex value leaf.
    pub fn regex(value: impl Into<String>) -> Self {
        Self::RegexValue(value.into())
    }

    /// Creates an empty query.
    pub fn empty(value: impl Into<String>) -> Self {
        Self::EmptyQuery(value.into())
    }

    /// Creates a negation.
    pub fn not(op: Self) -> Self {
        Self::NotOp(Box::new(op))
    }

    /// Creates a free-text value query.
    pub fn value_query(op: Self) -> Self {
        Self::ValueQuery(Box::new(op))
    }

    /// Creates a conjunction.
    pub fn and(left: Self, right: Self) -> Self {
        Self::AndOp(Box::new(left), Box::new(right))
    }

    /// Creates a disjunction.
    pub fn or(left: Self, right: Self) -> Self {
        Self::OrOp(Box::new(left), Box::new(right))
    }

    /// Creates a field-qualified query.
    pub fn keyword_op(keyword: Self, value: Self) -> Self {
        Self::KeywordOp(Box::new(keyword), Box::new(value))
    }

    /// Creates an inclusive range.
    pub fn range(low: Self, high: Self) -> Self {
        Self::RangeOp(Box::new(low), Box::new(high))
    }

    /// Creates a SPIRES field-qualified query.
    pub fn spires_op(keyword: Self, value: Self) -> Self {
        Self::SpiresOp(Box::new(keyword), Box::new(value))
    }

    /// Returns the name of the node kind, as used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Keyword(_) => "Keyword",
            Self::Value(_) => "Value",
            Self::SingleQuotedValue(_) => "SingleQuotedValue",
            Self::DoubleQuotedValue(_) => "DoubleQuotedValue",
            Self::RegexValue(_) => "RegexValue",
            Self::EmptyQuery(_) => "EmptyQuery",
            Self::NotOp(_) => "NotOp",
            Self::ValueQuery(_) => "ValueQuery",
            Self::LowerOp(_) => "LowerOp",
            Self::LowerEqualOp(_) => "LowerEqualOp",
            Self::GreaterOp(_) => "GreaterOp",
            Self::GreaterEqualOp(_) => "GreaterEqualOp",
            Self::AndOp(..) => "AndOp",
            Self::OrOp(..) => "OrOp",
            Self::KeywordOp(..) => "KeywordOp",
            Self::RangeOp(..) => "RangeOp",
            Self::SpiresOp(..) => "SpiresOp",
        }
    }

    /// Returns the string held by a leaf node, or `None` for operators.
    pub fn leaf_value(&self) -> Option<&str> {
        match self {
            Self::Keyword(v)
            | Self::Value(v)
            | Self::SingleQuotedValue(v)
            | Self::DoubleQuotedValue(v)
            | Self::RegexValue(v)
            | Self::EmptyQuery(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the field a SPIRES term mentions, if any.
    ///
    /// A [`QueryExpr::SpiresOp`] yields its own keyword, a negation forwards to its
    /// operand, and a conjunction or disjunction yields the keyword of its right
    /// child, falling back to its left child. This is the "last seen field" a bare
    /// SPIRES value inherits.
    pub fn spires_keyword(&self) -> Option<&Self> {
        match self {
            Self::SpiresOp(keyword, _) => Some(keyword),
            Self::NotOp(op) => op.spires_keyword(),
            Self::AndOp(left, right) | Self::OrOp(left, right) => {
                right.spires_keyword().or_else(|| left.spires_keyword())
            }
            _ => None,
        }
    }

    /// Returns true if this node or any descendant is a [`QueryExpr::SpiresOp`].
    pub fn contains_spires(&self) -> bool {
        match self {
            Self::SpiresOp(..) => true,
            Self::NotOp(op)
            | Self::ValueQuery(op)
            | Self::LowerOp(op)
            | Self::LowerEqualOp(op)
            | Self::GreaterOp(op)
            | Self::GreaterEqualOp(op) => op.contains_spires(),
            Self::AndOp(left, right)
            | Self::OrOp(left, right)
            | Self::KeywordOp(left, right)
            | Self::RangeOp(left, right) => left.contains_spires() || right.contains_spires(),
            _ => false,
        }
    }

    /// Walks the tree post-order with the given visitor.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        walk(visitor, self)
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.accept(&mut ReprPrinter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spires(keyword: &str, value: &str) -> QueryExpr {
        QueryExpr::spires_op(QueryExpr::keyword(keyword), QueryExpr::value(value))
    }

    #[test]
    fn equality_is_structural() {
        let a = QueryExpr::and(QueryExpr::value("x"), QueryExpr::value("y"));
        let b = QueryExpr::and(QueryExpr::value("x"), QueryExpr::value("y"));
        assert_eq!(a, b);
    }

    #[test]
    fn child_order_matters() {
        let a = QueryExpr::and(QueryExpr::value("x"), QueryExpr::value("y"));
        let b = QueryExpr::and(QueryExpr::value("y"), QueryExpr::value("x"));
        assert_ne!(a, b);
    }

    #[test]
    fn variant_matters() {
        assert_ne!(QueryExpr::value("x"), QueryExpr::double_quoted("x"));
        assert_ne!(
            QueryExpr::and(QueryExpr::value("x"), QueryExpr::value("y")),
            QueryExpr::or(QueryExpr::value("x"), QueryExpr::value("y"))
        );
    }

    #[test]
    fn spires_keyword_of_spires_op() {
        let node = spires("a", "ellis");
        assert_eq!(node.spires_keyword(), Some(&QueryExpr::keyword("a")));
    }

    #[test]
    fn spires_keyword_through_not() {
        let node = QueryExpr::not(spires("t", "quark"));
        assert_eq!(node.spires_keyword(), Some(&QueryExpr::keyword("t")));
    }

    #[test]
    fn spires_keyword_prefers_right_child() {
        let node = QueryExpr::or(spires("a", "ellis"), spires("t", "quark"));
        assert_eq!(node.spires_keyword(), Some(&QueryExpr::keyword("t")));

        let node = QueryExpr::or(
            spires("a", "ellis"),
            QueryExpr::value_query(QueryExpr::value("x")),
        );
        assert_eq!(node.spires_keyword(), Some(&QueryExpr::keyword("a")));
    }

    #[test]
    fn spires_keyword_absent() {
        let node = QueryExpr::and(
            QueryExpr::value_query(QueryExpr::value("x")),
            QueryExpr::keyword_op(QueryExpr::keyword("title"), QueryExpr::value("y")),
        );
        assert_eq!(node.spires_keyword(), None);
    }

    #[test]
    fn contains_spires_finds_nested_nodes() {
        let node = QueryExpr::and(
            QueryExpr::value_query(QueryExpr::value("x")),
            QueryExpr::not(spires("a", "y")),
        );
        assert!(node.contains_spires());
        assert!(!QueryExpr::value("x").contains_spires());
    }

    #[test]
    fn leaf_value() {
        assert_eq!(QueryExpr::regex("a.*").leaf_value(), Some("a.*"));
        assert_eq!(QueryExpr::not(QueryExpr::value("x")).leaf_value(), None);
    }
}
