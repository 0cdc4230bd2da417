//! Evaluates bibq queries against in-memory records.
//!
//! A record is any JSON-like value ([`Record`]). A canonical query tree from
//! `bibq-query` is walked post-order by [`RecordMatcher`]:
//!
//! - `field:value` looks up the dotted `field` path and matches the value there
//! - bare values search the whole record
//! - bare, `'single'` and `/regex/` values are regex searches, `"double"` values
//!   are exact
//! - ranges and comparisons order numbers numerically and strings lexically
//!
//! Lists and mappings met along the way match when any element matches.
//!
//! ```
//! use bibq_match::{Record, matches};
//! use bibq_query::Parser;
//!
//! let record: Record = serde_json::from_str(r#"{"title": "Test", "year": 2004}"#).unwrap();
//! let query = Parser::default().parse("title:\"Test\" and year:2000->2010").unwrap();
//! assert!(matches(&query, &record).unwrap());
//! ```

#![warn(missing_docs)]

mod error;
mod matcher;
mod record;
mod unit;

pub use error::MatchError;
pub use matcher::{Partial, RecordMatcher, matches};
pub use record::{Located, Record, lookup};
pub use unit::{Pattern, match_unit};
