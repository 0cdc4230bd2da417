//! Matching a single value pattern against record data.

use std::ops::Bound;

use regex::Regex;

use crate::{
    error::MatchError,
    record::{Located, Record},
};

/// A compiled value pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Regular-expression search anywhere in the value.
    Search {
        /// Text as written in the query.
        source: String,
        /// Compiled form of `source`.
        regex: Regex,
    },
    /// Whole-value string equality.
    Exact(String),
    /// Ordered range. Either end may be open or unbounded.
    Range {
        /// Lower bound.
        low: Bound<String>,
        /// Upper bound.
        high: Bound<String>,
    },
}

impl Pattern {
    /// Compiles `source` as a search pattern.
    pub fn search(source: &str) -> Result<Self, MatchError> {
        let regex = Regex::new(source).map_err(|source_err| MatchError::InvalidRegex {
            pattern: source.to_string(),
            source: source_err,
        })?;
        Ok(Self::Search {
            source: source.to_string(),
            regex,
        })
    }

    /// Creates an exact-equality pattern.
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(text.into())
    }

    /// Creates an inclusive range.
    pub fn inclusive(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self::Range {
            low: Bound::Included(low.into()),
            high: Bound::Included(high.into()),
        }
    }

    /// Returns the query text this pattern was built from, if it has one.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Search { source, .. } => Some(source),
            Self::Exact(text) => Some(text),
            Self::Range { .. } => None,
        }
    }

    /// Matches a scalar record value.
    fn matches_scalar(&self, value: &Record) -> Result<bool, MatchError> {
        let Some(text) = value.scalar_text() else {
            return Ok(false);
        };
        match self {
            Self::Search { regex, .. } => Ok(regex.is_match(&text)),
            Self::Exact(expected) => Ok(text == *expected),
            Self::Range { low, high } => match value {
                Record::Number(n) => {
                    let number = n.as_f64().unwrap_or(f64::NAN);
                    let low = numeric_bound(low, &text)?;
                    let high = numeric_bound(high, &text)?;
                    Ok(within(&number, low.as_ref(), high.as_ref()))
                }
                Record::String(s) => Ok(within(s, low.as_ref(), high.as_ref())),
                _ => Err(MatchError::Incomparable {
                    value: text,
                    bound: bound_text(low).or_else(|| bound_text(high)).unwrap_or_default(),
                }),
            },
        }
    }
}

/// Returns the text of a finite bound.
fn bound_text(bound: &Bound<String>) -> Option<String> {
    match bound {
        Bound::Included(text) | Bound::Excluded(text) => Some(text.clone()),
        Bound::Unbounded => None,
    }
}

/// Parses a bound for comparison with the number `value`.
fn numeric_bound(bound: &Bound<String>, value: &str) -> Result<Bound<f64>, MatchError> {
    let parse = |text: &String| {
        text.trim().parse::<f64>().map_err(|_| MatchError::Incomparable {
            value: value.to_string(),
            bound: text.clone(),
        })
    };
    Ok(match bound {
        Bound::Included(text) => Bound::Included(parse(text)?),
        Bound::Excluded(text) => Bound::Excluded(parse(text)?),
        Bound::Unbounded => Bound::Unbounded,
    })
}

/// Returns true if `value` lies between `low` and `high`.
fn within<T: PartialOrd + ?Sized>(value: &T, low: Bound<&T>, high: Bound<&T>) -> bool {
    let above = match low {
        Bound::Included(low) => low <= value,
        Bound::Excluded(low) => low < value,
        Bound::Unbounded => true,
    };
    let below = match high {
        Bound::Included(high) => value <= high,
        Bound::Excluded(high) => value < high,
        Bound::Unbounded => true,
    };
    above && below
}

/// Matches a whole record, descending into every sequence element and mapping
/// value.
fn match_record(record: &Record, pattern: &Pattern) -> Result<bool, MatchError> {
    match record {
        Record::Null => Ok(false),
        Record::Sequence(items) => any(items.iter(), pattern),
        Record::Mapping(map) => any(map.values(), pattern),
        scalar => pattern.matches_scalar(scalar),
    }
}

/// Matches every record and ORs the results. All records are evaluated, so an
/// error anywhere is reported.
fn any<'r>(
    mut records: impl Iterator<Item = &'r Record>,
    pattern: &Pattern,
) -> Result<bool, MatchError> {
    records.try_fold(false, |matched, record| {
        Ok(match_record(record, pattern)? || matched)
    })
}

/// Matches located data against a pattern.
///
/// Missing data matches only a missing pattern. Sequences and mappings match
/// when any element does.
pub fn match_unit(data: &Located<'_>, pattern: Option<&Pattern>) -> Result<bool, MatchError> {
    match (data, pattern) {
        (Located::Missing | Located::Found(Record::Null), pattern) => Ok(pattern.is_none()),
        (Located::Many(items), _) => items.iter().try_fold(false, |matched, item| {
            Ok(match_unit(item, pattern)? || matched)
        }),
        (Located::Found(_), None) => Ok(false),
        (Located::Found(record), Some(pattern)) => match_record(record, pattern),
    }
}
