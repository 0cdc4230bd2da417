//! Evaluating a canonical query tree against a record.

use std::ops::Bound;

use bibq_query::{QueryExpr, Visitor};
use log::{debug, trace};

use crate::{
    error::MatchError,
    record::{Located, Record, lookup},
    unit::{Pattern, match_unit},
};

/// Intermediate result for one node.
#[derive(Debug)]
pub enum Partial {
    /// A field path waiting for its value.
    Keyword(String),
    /// Search text, compiled only when applied to the record.
    Text(String),
    /// A value pattern waiting to be applied.
    Pattern(Pattern),
    /// A finished boolean result.
    Bool(bool),
}

impl Partial {
    /// Takes the boolean result of a finished subquery.
    fn into_bool(self, kind: &'static str) -> Result<bool, MatchError> {
        match self {
            Self::Bool(b) => Ok(b),
            Self::Keyword(_) | Self::Text(_) | Self::Pattern(_) => Err(MatchError::Unsupported {
                kind,
                reason: "operand is not a query",
            }),
        }
    }

    /// Takes a value pattern, compiling search text.
    fn into_pattern(self, kind: &'static str) -> Result<Pattern, MatchError> {
        match self {
            Self::Text(text) => Pattern::search(&text),
            Self::Pattern(pattern) => Ok(pattern),
            Self::Keyword(_) | Self::Bool(_) => Err(MatchError::Unsupported {
                kind,
                reason: "operand is not a value",
            }),
        }
    }

    /// Takes the text of a value, for use as a range bound.
    fn into_bound_text(self, kind: &'static str) -> Result<String, MatchError> {
        if let Self::Text(text) = self {
            return Ok(text);
        }
        let pattern = self.into_pattern(kind)?;
        pattern
            .source()
            .map(str::to_string)
            .ok_or(MatchError::Unsupported {
                kind,
                reason: "bound is itself a range",
            })
    }
}

/// Post-order evaluator of a canonical tree against one record.
///
/// Leaves become keywords or patterns; `KeywordOp` and `ValueQuery` apply a
/// pattern to the record and yield booleans, which the boolean operators then
/// combine. SPIRES nodes are rejected, so trees must be rewritten first.
#[derive(Debug)]
pub struct RecordMatcher<'r> {
    /// The record being tested.
    record: &'r Record,
}

impl<'r> RecordMatcher<'r> {
    /// Creates a matcher for `record`.
    pub const fn new(record: &'r Record) -> Self {
        Self { record }
    }

    /// Builds a one-sided range from a comparison operand.
    fn half_range(
        op: Result<Partial, MatchError>,
        kind: &'static str,
        make: fn(String) -> (Bound<String>, Bound<String>),
    ) -> Result<Partial, MatchError> {
        let (low, high) = make(op?.into_bound_text(kind)?);
        Ok(Partial::Pattern(Pattern::Range { low, high }))
    }
}

impl Visitor for RecordMatcher<'_> {
    type Output = Result<Partial, MatchError>;

    fn visit_keyword(&mut self, value: &str) -> Self::Output {
        Ok(Partial::Keyword(value.to_string()))
    }

    fn visit_value(&mut self, value: &str) -> Self::Output {
        Ok(Partial::Text(value.to_string()))
    }

    fn visit_single_quoted(&mut self, value: &str) -> Self::Output {
        Ok(Partial::Text(value.to_string()))
    }

    fn visit_double_quoted(&mut self, value: &str) -> Self::Output {
        Ok(Partial::Pattern(Pattern::exact(value)))
    }

    fn visit_regex(&mut self, value: &str) -> Self::Output {
        Pattern::search(value).map(Partial::Pattern)
    }

    fn visit_empty(&mut self, _value: &str) -> Self::Output {
        Ok(Partial::Bool(true))
    }

    fn visit_not(&mut self, op: Self::Output) -> Self::Output {
        Ok(Partial::Bool(!op?.into_bool("NotOp")?))
    }

    fn visit_value_query(&mut self, op: Self::Output) -> Self::Output {
        let pattern = op?.into_pattern("ValueQuery")?;
        let matched = match_unit(&Located::Found(self.record), Some(&pattern))?;
        trace!("value {pattern:?} -> {matched}");
        Ok(Partial::Bool(matched))
    }

    fn visit_lower(&mut self, op: Self::Output) -> Self::Output {
        Self::half_range(op, "LowerOp", |v| (Bound::Unbounded, Bound::Excluded(v)))
    }

    fn visit_lower_equal(&mut self, op: Self::Output) -> Self::Output {
        Self::half_range(op, "LowerEqualOp", |v| (Bound::Unbounded, Bound::Included(v)))
    }

    fn visit_greater(&mut self, op: Self::Output) -> Self::Output {
        Self::half_range(op, "GreaterOp", |v| (Bound::Excluded(v), Bound::Unbounded))
    }

    fn visit_greater_equal(&mut self, op: Self::Output) -> Self::Output {
        Self::half_range(op, "GreaterEqualOp", |v| (Bound::Included(v), Bound::Unbounded))
    }

    fn visit_and(&mut self, left: Self::Output, right: Self::Output) -> Self::Output {
        let left = left?.into_bool("AndOp")?;
        let right = right?.into_bool("AndOp")?;
        Ok(Partial::Bool(left && right))
    }

    fn visit_or(&mut self, left: Self::Output, right: Self::Output) -> Self::Output {
        let left = left?.into_bool("OrOp")?;
        let right = right?.into_bool("OrOp")?;
        Ok(Partial::Bool(left || right))
    }

    fn visit_keyword_op(&mut self, keyword: Self::Output, value: Self::Output) -> Self::Output {
        let Partial::Keyword(path) = keyword? else {
            return Err(MatchError::Unsupported {
                kind: "KeywordOp",
                reason: "left operand is not a keyword",
            });
        };
        let pattern = match value? {
            Partial::Text(text) => Pattern::search(&text)?,
            Partial::Pattern(pattern) => pattern,
            Partial::Keyword(_) | Partial::Bool(_) => {
                return Err(MatchError::Unsupported {
                    kind: "KeywordOp",
                    reason: "nested keyword queries cannot be matched",
                });
            }
        };
        let matched = match_unit(&lookup(self.record, &path), Some(&pattern))?;
        trace!("{path}: {pattern:?} -> {matched}");
        Ok(Partial::Bool(matched))
    }

    fn visit_range(&mut self, low: Self::Output, high: Self::Output) -> Self::Output {
        let low = low?.into_bound_text("RangeOp")?;
        let high = high?.into_bound_text("RangeOp")?;
        Ok(Partial::Pattern(Pattern::inclusive(low, high)))
    }

    fn visit_spires(&mut self, _keyword: Self::Output, _value: Self::Output) -> Self::Output {
        Err(MatchError::Unsupported {
            kind: "SpiresOp",
            reason: "rewrite SPIRES keywords to canonical names first",
        })
    }
}

/// Returns whether `record` satisfies the canonical query `expr`.
pub fn matches(expr: &QueryExpr, record: &Record) -> Result<bool, MatchError> {
    let result = expr
        .accept(&mut RecordMatcher::new(record))?
        .into_bool(expr.kind())?;
    debug!("{expr} -> {result}");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record() -> Record {
        Record::from(json!({
            "title": "Search for the Higgs boson",
            "year": 2004,
            "authors": [{"name": "Ellis, J"}, {"name": "Higgs, P"}],
        }))
    }

    fn kw(keyword: &str, value: QueryExpr) -> QueryExpr {
        QueryExpr::keyword_op(QueryExpr::keyword(keyword), value)
    }

    #[test]
    fn keyword_value_searches_the_field() {
        let r = record();
        assert!(matches(&kw("title", QueryExpr::value("Higgs")), &r).unwrap());
        assert!(!matches(&kw("title", QueryExpr::value("higgs")), &r).unwrap());
        assert!(matches(&kw("authors.name", QueryExpr::value("^Ellis")), &r).unwrap());
        assert!(!matches(&kw("journal", QueryExpr::value("Phys")), &r).unwrap());
    }

    #[test]
    fn comparisons_are_half_ranges() {
        let r = record();
        let year = |op: fn(Box<QueryExpr>) -> QueryExpr, v: &str| {
            matches(&kw("year", op(Box::new(QueryExpr::value(v)))), &r).unwrap()
        };
        assert!(year(QueryExpr::GreaterOp, "2003"));
        assert!(!year(QueryExpr::GreaterOp, "2004"));
        assert!(year(QueryExpr::GreaterEqualOp, "2004"));
        assert!(year(QueryExpr::LowerOp, "2005"));
        assert!(!year(QueryExpr::LowerOp, "2004"));
        assert!(year(QueryExpr::LowerEqualOp, "2004"));
    }

    #[test]
    fn range_bounds_are_plain_text() {
        let r = record();
        let range = |lo: &str, hi: &str| {
            kw("title", QueryExpr::range(QueryExpr::value(lo), QueryExpr::value(hi)))
        };
        assert!(matches(&range("S[", "Z"), &r).unwrap());
        assert!(matches(&kw("title", QueryExpr::LowerOp(Box::new(QueryExpr::value("T(")))), &r).unwrap());
        assert!(matches(&range("*", "T"), &r).unwrap());
    }

    #[test]
    fn value_query_searches_everywhere() {
        let r = record();
        let vq = |v: QueryExpr| matches(&QueryExpr::value_query(v), &r).unwrap();
        assert!(vq(QueryExpr::value("Higgs, P")));
        assert!(vq(QueryExpr::double_quoted("Ellis, J")));
        assert!(!vq(QueryExpr::double_quoted("Ellis")));
    }

    #[test]
    fn spires_nodes_are_rejected() {
        let expr = QueryExpr::spires_op(QueryExpr::keyword("t"), QueryExpr::value("higgs"));
        assert!(matches!(
            matches(&expr, &record()),
            Err(MatchError::Unsupported { kind: "SpiresOp", .. })
        ));
    }

    #[test]
    fn nested_keyword_values_are_rejected() {
        let expr = kw("refersto", kw("author", QueryExpr::value("Ellis")));
        assert!(matches(&expr, &record()).is_err());
    }

    #[test]
    fn bare_value_is_not_a_query() {
        assert!(matches(&QueryExpr::value("x"), &record()).is_err());
    }
}
