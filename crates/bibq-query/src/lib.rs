//! Bibliographic query parsing for bibq.
//!
//! Two query syntaxes are understood and turned into one tree, [`QueryExpr`]:
//!
//! - **Field syntax**: `title:higgs and (author:"Ellis, J" or year:2000->2012)`
//! - **SPIRES syntax**: `find a ellis and t higgs`, selected by a leading
//!   `find`, `fin` or `f`
//!
//! Values are bare (`higgs*`), `'single-quoted'`, `"double-quoted"` (exact),
//! `/regex/` or ranges (`lo->hi`). Boolean operators are `and`/`+`, `or`/`|`,
//! `not`/`and not`/`-`, and adjacency, all folded strictly left to right.
//!
//! Trees are consumed by implementing [`Visitor`]. This crate ships two
//! printers and [`SpiresToCanonical`], which rewrites SPIRES mnemonics into
//! canonical field names.
//!
//! # Example
//!
//! ```
//! use bibq_query::{Parser, TreePrinter};
//!
//! let parser = Parser::default();
//! let expr = parser.parse_canonical("find a ellis and t higgs").unwrap();
//! assert_eq!(expr.accept(&mut TreePrinter), "(author:ellis and title:higgs)");
//! ```

#![warn(missing_docs)]

mod ast;
mod config;
mod convert;
mod error;
mod grammar;
mod printer;
mod spires;
mod syntax;
mod visitor;

pub use ast::QueryExpr;
pub use config::{Parser, ParserConfig, global_config, install_global, parse};
pub use error::{QueryError, SyntaxError};
pub use printer::{ReprPrinter, TreePrinter};
pub use spires::{NESTABLE_KEYWORDS, SPIRES_KEYWORDS, SpiresToCanonical, canonical_keyword};
pub use syntax::{Comparison, Connective, Continuation, Syntax};
pub use visitor::{Visitor, walk};
