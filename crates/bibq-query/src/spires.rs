//! SPIRES mnemonics and their rewrite into canonical field names.

use log::trace;

use crate::{ast::QueryExpr, error::QueryError, visitor::Visitor};

/// SPIRES mnemonic to canonical field name.
///
/// Mnemonics are lowercase; the grammar lowercases them before lookup. Fields
/// without a canonical name map to their MARC tag.
pub const SPIRES_KEYWORDS: &[(&str, &str)] = &[
    // address
    ("address", "address"),
    // affiliation
    ("affiliation", "affiliation"),
    ("affil", "affiliation"),
    ("aff", "affiliation"),
    ("af", "affiliation"),
    ("institution", "affiliation"),
    ("inst", "affiliation"),
    // any field
    ("any", "anyfield"),
    // bulletin
    ("bb", "reportnumber"),
    ("bbn", "reportnumber"),
    ("bull", "reportnumber"),
    ("bulletin-bd", "reportnumber"),
    ("bulletin-bd-no", "reportnumber"),
    ("eprint", "reportnumber"),
    // citation / reference
    ("c", "reference"),
    ("citation", "reference"),
    ("jour-vol-page", "reference"),
    ("jvp", "reference"),
    // collaboration
    ("collaboration", "collaboration"),
    ("collab-name", "collaboration"),
    ("cn", "collaboration"),
    // conference number
    ("conf-number", "111__g"),
    ("cnum", "773__w"),
    // country
    ("cc", "044__a"),
    ("country", "044__a"),
    // date
    ("date", "year"),
    ("d", "year"),
    // date added
    ("date-added", "datecreated"),
    ("dadd", "datecreated"),
    ("da", "datecreated"),
    // date updated
    ("date-updated", "datemodified"),
    ("dupd", "datemodified"),
    ("du", "datemodified"),
    // first author
    ("first-author", "firstauthor"),
    ("fa", "firstauthor"),
    // author
    ("author", "author"),
    ("a", "author"),
    ("au", "author"),
    ("name", "author"),
    // exact author
    ("exact-author", "exactauthor"),
    ("ea", "exactauthor"),
    // experiment
    ("experiment", "experiment"),
    ("exp", "experiment"),
    ("expno", "experiment"),
    ("sd", "experiment"),
    ("se", "experiment"),
    // journal
    ("journal", "journal"),
    ("j", "journal"),
    ("published_in", "journal"),
    ("spicite", "journal"),
    ("vol", "volume"),
    ("volume", "volume"),
    // journal page
    ("journal-page", "773__c"),
    ("jp", "773__c"),
    // journal year
    ("journal-year", "773__y"),
    ("jy", "773__y"),
    // key
    ("key", "970__a"),
    ("irn", "970__a"),
    ("record", "970__a"),
    ("document", "970__a"),
    ("documents", "970__a"),
    // keywords
    ("keyword", "keyword"),
    ("keywords", "keyword"),
    ("kw", "keyword"),
    ("k", "keyword"),
    // note
    ("note", "500__a"),
    // old title
    ("old-title", "246__a"),
    ("old-t", "246__a"),
    ("ex-ti", "246__a"),
    ("et", "246__a"),
    // postal code
    ("postalcode", "postalcode"),
    ("zip", "postalcode"),
    // ppf subject
    ("ppf-subject", "650__a"),
    ("status", "650__a"),
    // recid
    ("recid", "recid"),
    // report number
    ("report-num", "reportnumber"),
    ("report", "reportnumber"),
    ("rept", "reportnumber"),
    ("rn", "reportnumber"),
    ("r", "reportnumber"),
    // title
    ("title", "title"),
    ("t", "title"),
    ("ti", "title"),
    ("with-language", "title"),
    // fulltext
    ("fulltext", "fulltext"),
    ("ft", "fulltext"),
    // topic
    ("topic", "695__a"),
    ("tp", "695__a"),
    ("hep-topic", "695__a"),
    ("desy-keyword", "695__a"),
    ("desy-keywords", "695__a"),
    // citations
    ("refersto", "refersto"),
    ("refs", "refersto"),
    ("citedby", "citedby"),
    // arXiv category
    ("arx", "037__c"),
    ("category", "037__c"),
    ("parx", "037__c"),
    ("primarch", "037__c"),
    // texkey
    ("texkey", "035__z"),
    // type code
    ("tc", "690C_a"),
    ("ty", "690C_a"),
    ("type", "690C_a"),
    ("type-code", "690C_a"),
    ("scl", "690C_a"),
    ("ps", "690C_a"),
    // field code
    ("f", "65017a"),
    ("fc", "65017a"),
    ("field", "65017a"),
    ("field-code", "65017a"),
    ("subject", "65017a"),
    // coden
    ("bc", "journal"),
    ("browse-only-indx", "journal"),
    ("coden", "journal"),
    ("journal-coden", "journal"),
    // jobs
    ("job", "title"),
    ("position", "title"),
    ("region", "region"),
    ("continent", "region"),
    ("deadline", "046__a"),
    ("rank", "rank"),
    // citation counts
    ("cited", "cited"),
    ("topcite", "cited"),
    ("citedexcludingselfcites", "citedexcludingselfcites"),
    // misc
    ("caption", "caption"),
    ("doi", "doi"),
];

/// Mnemonics that take a whole query as their value.
pub const NESTABLE_KEYWORDS: &[&str] = &["refersto", "citedby"];

/// Returns the canonical field name for a lowercase SPIRES mnemonic.
pub fn canonical_keyword(mnemonic: &str) -> Option<&'static str> {
    SPIRES_KEYWORDS
        .iter()
        .find(|(spires, _)| *spires == mnemonic)
        .map(|(_, canonical)| *canonical)
}

/// Rewrites [`QueryExpr::SpiresOp`] nodes into [`QueryExpr::KeywordOp`] nodes.
///
/// Every other node is rebuilt unchanged, so the output never shares structure
/// with the input. A mnemonic missing from [`SPIRES_KEYWORDS`] fails the whole
/// rewrite with [`QueryError::UnknownKeyword`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SpiresToCanonical;

impl SpiresToCanonical {
    /// Rewrites `expr`.
    pub fn rewrite(expr: &QueryExpr) -> Result<QueryExpr, QueryError> {
        expr.accept(&mut Self)
    }
}

/// Output of the rewriter for one node.
type Rewritten = Result<QueryExpr, QueryError>;

impl Visitor for SpiresToCanonical {
    type Output = Rewritten;

    fn visit_keyword(&mut self, value: &str) -> Rewritten {
        Ok(QueryExpr::keyword(value))
    }

    fn visit_value(&mut self, value: &str) -> Rewritten {
        Ok(QueryExpr::value(value))
    }

    fn visit_single_quoted(&mut self, value: &str) -> Rewritten {
        Ok(QueryExpr::single_quoted(value))
    }

    fn visit_double_quoted(&mut self, value: &str) -> Rewritten {
        Ok(QueryExpr::double_quoted(value))
    }

    fn visit_regex(&mut self, value: &str) -> Rewritten {
        Ok(QueryExpr::regex(value))
    }

    fn visit_empty(&mut self, value: &str) -> Rewritten {
        Ok(QueryExpr::empty(value))
    }

    fn visit_not(&mut self, op: Rewritten) -> Rewritten {
        Ok(QueryExpr::not(op?))
    }

    fn visit_value_query(&mut self, op: Rewritten) -> Rewritten {
        Ok(QueryExpr::value_query(op?))
    }

    fn visit_lower(&mut self, op: Rewritten) -> Rewritten {
        Ok(QueryExpr::LowerOp(Box::new(op?)))
    }

    fn visit_lower_equal(&mut self, op: Rewritten) -> Rewritten {
        Ok(QueryExpr::LowerEqualOp(Box::new(op?)))
    }

    fn visit_greater(&mut self, op: Rewritten) -> Rewritten {
        Ok(QueryExpr::GreaterOp(Box::new(op?)))
    }

    fn visit_greater_equal(&mut self, op: Rewritten) -> Rewritten {
        Ok(QueryExpr::GreaterEqualOp(Box::new(op?)))
    }

    fn visit_and(&mut self, left: Rewritten, right: Rewritten) -> Rewritten {
        Ok(QueryExpr::and(left?, right?))
    }

    fn visit_or(&mut self, left: Rewritten, right: Rewritten) -> Rewritten {
        Ok(QueryExpr::or(left?, right?))
    }

    fn visit_keyword_op(&mut self, keyword: Rewritten, value: Rewritten) -> Rewritten {
        Ok(QueryExpr::keyword_op(keyword?, value?))
    }

    fn visit_range(&mut self, low: Rewritten, high: Rewritten) -> Rewritten {
        Ok(QueryExpr::range(low?, high?))
    }

    fn visit_spires(&mut self, keyword: Rewritten, value: Rewritten) -> Rewritten {
        let keyword = keyword?;
        let mnemonic = keyword.leaf_value().unwrap_or_default();
        let canonical = canonical_keyword(mnemonic).ok_or_else(|| QueryError::UnknownKeyword {
            keyword: mnemonic.to_string(),
        })?;
        trace!("rewriting SPIRES keyword {mnemonic} as {canonical}");
        Ok(QueryExpr::keyword_op(QueryExpr::keyword(canonical), value?))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn spires(keyword: &str, value: QueryExpr) -> QueryExpr {
        QueryExpr::spires_op(QueryExpr::keyword(keyword), value)
    }

    fn keyword_op(keyword: &str, value: QueryExpr) -> QueryExpr {
        QueryExpr::keyword_op(QueryExpr::keyword(keyword), value)
    }

    #[test]
    fn mnemonics_are_unique_and_lowercase() {
        let mut seen = BTreeSet::new();
        for (mnemonic, canonical) in SPIRES_KEYWORDS {
            assert!(seen.insert(*mnemonic), "duplicate mnemonic {mnemonic}");
            assert_eq!(*mnemonic, mnemonic.to_lowercase());
            assert!(!canonical.is_empty());
        }
    }

    #[test]
    fn nestable_keywords_are_in_table() {
        for keyword in NESTABLE_KEYWORDS {
            assert_eq!(canonical_keyword(keyword), Some(*keyword));
        }
    }

    #[test]
    fn canonical_lookup() {
        assert_eq!(canonical_keyword("a"), Some("author"));
        assert_eq!(canonical_keyword("t"), Some("title"));
        assert_eq!(canonical_keyword("d"), Some("year"));
        assert_eq!(canonical_keyword("topcite"), Some("cited"));
        assert_eq!(canonical_keyword("A"), None);
    }

    #[test]
    fn rewrites_spires_op() {
        let expr = spires("t", QueryExpr::value("quark"));
        assert_eq!(
            SpiresToCanonical::rewrite(&expr),
            Ok(keyword_op("title", QueryExpr::value("quark")))
        );
    }

    #[test]
    fn rewrites_nested_spires_op() {
        let expr = QueryExpr::or(
            spires("refersto", spires("a", QueryExpr::value("ellis"))),
            QueryExpr::not(spires(
                "date",
                QueryExpr::GreaterOp(Box::new(QueryExpr::value("yesterday"))),
            )),
        );
        let expected = QueryExpr::or(
            keyword_op("refersto", keyword_op("author", QueryExpr::value("ellis"))),
            QueryExpr::not(keyword_op(
                "year",
                QueryExpr::GreaterOp(Box::new(QueryExpr::value("yesterday"))),
            )),
        );
        assert_eq!(SpiresToCanonical::rewrite(&expr), Ok(expected));
    }

    #[test]
    fn tree_without_spires_is_unchanged() {
        let expr = QueryExpr::and(
            keyword_op(
                "year",
                QueryExpr::range(QueryExpr::value("2000"), QueryExpr::double_quoted("2012")),
            ),
            QueryExpr::not(QueryExpr::value_query(QueryExpr::regex("h.*s"))),
        );
        assert_eq!(SpiresToCanonical::rewrite(&expr), Ok(expr));
    }

    #[test]
    fn unknown_mnemonic_is_an_error() {
        let expr = QueryExpr::and(
            spires("t", QueryExpr::value("x")),
            spires("nosuchfield", QueryExpr::value("y")),
        );
        assert_eq!(
            SpiresToCanonical::rewrite(&expr),
            Err(QueryError::UnknownKeyword {
                keyword: "nosuchfield".to_string()
            })
        );
    }
}
