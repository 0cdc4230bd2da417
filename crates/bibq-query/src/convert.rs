//! Parse tree to AST conversion.
//!
//! Term sequences are folded left to right, so `a and b or c` becomes
//! `((a and b) or c)`. In SPIRES sequences a bare value inherits the field of the
//! most recently mentioned field term before folding.

use crate::{
    ast::QueryExpr,
    syntax::{Comparison, Connective, Continuation, Syntax},
};

/// Boolean operator of a pending continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoolOp {
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
}

/// A continuation converted but not yet attached to its left operand.
#[derive(Debug)]
struct Pending {
    /// Operator joining it to the tree built so far.
    op: BoolOp,
    /// Right-hand operand.
    right: QueryExpr,
}

impl From<Continuation> for Pending {
    fn from(continuation: Continuation) -> Self {
        let term = convert(*continuation.term);
        match continuation.connective {
            Connective::And | Connective::Implicit => Self {
                op: BoolOp::And,
                right: term,
            },
            Connective::AndNot => Self {
                op: BoolOp::And,
                right: QueryExpr::not(term),
            },
            Connective::Or => Self {
                op: BoolOp::Or,
                right: term,
            },
        }
    }
}

/// Converts a parse tree into a query tree.
pub fn convert(tree: Syntax) -> QueryExpr {
    match tree {
        Syntax::Empty(whitespace) => QueryExpr::EmptyQuery(whitespace),
        Syntax::Query { first, rest } => {
            let first = convert(*first);
            fold(first, rest.into_iter().map(Pending::from).collect())
        }
        Syntax::SpiresQuery { first, rest } => {
            let first = convert(*first);
            let implicit = first.spires_keyword().cloned();
            let pending = rest.into_iter().map(Pending::from).collect();
            fold(first, propagate_keyword(implicit, pending))
        }
        Syntax::Find(query) | Syntax::Parenthesized(query) => convert(*query),
        Syntax::KeywordQuery { keyword, value } => {
            QueryExpr::keyword_op(convert(*keyword), convert(*value))
        }
        Syntax::SpiresKeywordQuery { keyword, value } => {
            QueryExpr::spires_op(convert(*keyword), convert(*value))
        }
        Syntax::ValueQuery(value) => QueryExpr::value_query(convert(*value)),
        Syntax::NotKeywordValue(value) => QueryExpr::value_query(QueryExpr::Value(value)),
        Syntax::Comparison { comparison, value } => {
            let value = Box::new(convert(*value));
            match comparison {
                Comparison::Greater => QueryExpr::GreaterOp(value),
                Comparison::GreaterEqual => QueryExpr::GreaterEqualOp(value),
                Comparison::Lower => QueryExpr::LowerOp(value),
                Comparison::LowerEqual => QueryExpr::LowerEqualOp(value),
            }
        }
        Syntax::KeywordRule(keyword)
        | Syntax::SpiresKeywordRule(keyword)
        | Syntax::NestableKeyword(keyword) => QueryExpr::Keyword(keyword),
        Syntax::SingleQuotedString(value) => QueryExpr::SingleQuotedValue(value),
        Syntax::DoubleQuotedString(value) => QueryExpr::DoubleQuotedValue(value),
        Syntax::SlashQuotedString(value) => QueryExpr::RegexValue(value),
        Syntax::SimpleValue(value) | Syntax::SpiresValue(value) | Syntax::Number(value) => {
            QueryExpr::Value(value)
        }
        Syntax::RangeOp(low, high) => QueryExpr::range(convert(*low), convert(*high)),
    }
}

/// Folds `first` and the pending continuations into a left-leaning tree.
fn fold(first: QueryExpr, pending: Vec<Pending>) -> QueryExpr {
    pending
        .into_iter()
        .fold(first, |tree, Pending { op, right }| match op {
            BoolOp::And => QueryExpr::and(tree, right),
            BoolOp::Or => QueryExpr::or(tree, right),
        })
}

/// Qualifies bare values with the field last mentioned before them.
///
/// `implicit` is the field of the first term, if any. Each continuation that
/// mentions a field replaces it.
fn propagate_keyword(mut implicit: Option<QueryExpr>, pending: Vec<Pending>) -> Vec<Pending> {
    pending
        .into_iter()
        .map(|Pending { op, right }| {
            if let Some(keyword) = right.spires_keyword() {
                implicit = Some(keyword.clone());
            }
            let right = match &implicit {
                Some(keyword) => qualify(keyword, right),
                None => right,
            };
            Pending { op, right }
        })
        .collect()
}

/// Rebuilds a bare value query, possibly under negations, as a SPIRES field query.
fn qualify(keyword: &QueryExpr, expr: QueryExpr) -> QueryExpr {
    match expr {
        QueryExpr::ValueQuery(value) => QueryExpr::SpiresOp(Box::new(keyword.clone()), value),
        QueryExpr::NotOp(op) => QueryExpr::not(qualify(keyword, *op)),
        other => other,
    }
}
