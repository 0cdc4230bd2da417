//! Process-wide parser configuration.
//!
//! Kept in its own test binary so the installed configuration does not leak
//! into other tests.

#![allow(clippy::tests_outside_test_module)]

use bibq_query::{ParserConfig, QueryError, QueryExpr, global_config, install_global, parse};

#[test]
fn global_config_is_installed_once() {
    assert!(global_config().is_none());
    assert_eq!(
        parse("foo:bar"),
        Ok(QueryExpr::keyword_op(
            QueryExpr::keyword("foo"),
            QueryExpr::value("bar")
        ))
    );

    let restricted = ParserConfig::with_allowed_keywords(["title"]).unwrap();
    install_global(restricted.clone()).unwrap();
    assert_eq!(global_config(), Some(&restricted));

    // Reinstalling the same configuration is accepted.
    assert_eq!(install_global(restricted.clone()), Ok(()));
    assert_eq!(
        install_global(ParserConfig::new()),
        Err(QueryError::ConflictingConfig)
    );
    assert_eq!(global_config(), Some(&restricted));

    assert_eq!(
        parse("title:higgs"),
        Ok(QueryExpr::keyword_op(
            QueryExpr::keyword("title"),
            QueryExpr::value("higgs")
        ))
    );
    assert_eq!(
        parse("foo:bar"),
        Ok(QueryExpr::and(
            QueryExpr::value_query(QueryExpr::value("foo:")),
            QueryExpr::value_query(QueryExpr::value("bar"))
        ))
    );
}
