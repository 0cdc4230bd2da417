//! Text renderings of a query tree.

use crate::visitor::Visitor;

/// Renders a tree back into query syntax.
///
/// Boolean operators are fully parenthesised and whitespace is normalised, so
/// the output re-parses to an equivalent tree but is not a byte-for-byte copy of
/// the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreePrinter;

impl Visitor for TreePrinter {
    type Output = String;

    fn visit_keyword(&mut self, value: &str) -> String {
        value.to_string()
    }

    fn visit_value(&mut self, value: &str) -> String {
        value.to_string()
    }

    fn visit_single_quoted(&mut self, value: &str) -> String {
        format!("'{value}'")
    }

    fn visit_double_quoted(&mut self, value: &str) -> String {
        format!("\"{value}\"")
    }

    fn visit_regex(&mut self, value: &str) -> String {
        format!("/{value}/")
    }

    fn visit_empty(&mut self, _value: &str) -> String {
        String::new()
    }

    fn visit_not(&mut self, op: String) -> String {
        format!("(not {op})")
    }

    fn visit_value_query(&mut self, op: String) -> String {
        op
    }

    fn visit_lower(&mut self, op: String) -> String {
        format!("< {op}")
    }

    fn visit_lower_equal(&mut self, op: String) -> String {
        format!("<= {op}")
    }

    fn visit_greater(&mut self, op: String) -> String {
        format!("> {op}")
    }

    fn visit_greater_equal(&mut self, op: String) -> String {
        format!(">= {op}")
    }

    fn visit_and(&mut self, left: String, right: String) -> String {
        format!("({left} and {right})")
    }

    fn visit_or(&mut self, left: String, right: String) -> String {
        format!("({left} or {right})")
    }

    fn visit_keyword_op(&mut self, keyword: String, value: String) -> String {
        format!("{keyword}:{value}")
    }

    fn visit_range(&mut self, low: String, high: String) -> String {
        format!("{low}->{high}")
    }

    fn visit_spires(&mut self, keyword: String, value: String) -> String {
        format!("find {keyword} {value}")
    }
}

/// Renders a tree in an unambiguous diagnostic form.
///
/// Keywords are backquoted, bare values single-quoted, and an empty query is
/// shown as `__empty__`. This is what `Display` for [`crate::QueryExpr`] prints.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReprPrinter;

impl Visitor for ReprPrinter {
    type Output = String;

    fn visit_keyword(&mut self, value: &str) -> String {
        format!("`{value}`")
    }

    fn visit_value(&mut self, value: &str) -> String {
        format!("'{value}'")
    }

    fn visit_single_quoted(&mut self, value: &str) -> String {
        format!("'{value}'")
    }

    fn visit_double_quoted(&mut self, value: &str) -> String {
        format!("\"{value}\"")
    }

    fn visit_regex(&mut self, value: &str) -> String {
        format!("/{value}/")
    }

    fn visit_empty(&mut self, _value: &str) -> String {
        "__empty__".to_string()
    }

    fn visit_not(&mut self, op: String) -> String {
        format!("(not {op})")
    }

    fn visit_value_query(&mut self, op: String) -> String {
        op
    }

    fn visit_lower(&mut self, op: String) -> String {
        format!("< {op}")
    }

    fn visit_lower_equal(&mut self, op: String) -> String {
        format!("<= {op}")
    }

    fn visit_greater(&mut self, op: String) -> String {
        format!("> {op}")
    }

    fn visit_greater_equal(&mut self, op: String) -> String {
        format!(">= {op}")
    }

    fn visit_and(&mut self, left: String, right: String) -> String {
        format!("({left} and {right})")
    }

    fn visit_or(&mut self, left: String, right: String) -> String {
        format!("({left} or {right})")
    }

    fn visit_keyword_op(&mut self, keyword: String, value: String) -> String {
        format!("{keyword}:{value}")
    }

    fn visit_range(&mut self, low: String, high: String) -> String {
        format!("{low}->{high}")
    }

    fn visit_spires(&mut self, keyword: String, value: String) -> String {
        format!("find {keyword} {value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::QueryExpr;

    fn sample() -> QueryExpr {
        QueryExpr::and(
            QueryExpr::keyword_op(
                QueryExpr::keyword("year"),
                QueryExpr::range(QueryExpr::value("2000"), QueryExpr::double_quoted("2012")),
            ),
            QueryExpr::not(QueryExpr::or(
                QueryExpr::value_query(QueryExpr::value("higgs")),
                QueryExpr::keyword_op(QueryExpr::keyword("title"), QueryExpr::regex("bo.on")),
            )),
        )
    }

    #[test]
    fn tree_printer_renders_query_syntax() {
        assert_eq!(
            sample().accept(&mut TreePrinter),
            "(year:2000->\"2012\" and (not (higgs or title:/bo.on/)))"
        );
    }

    #[test]
    fn repr_printer_marks_keywords_and_values() {
        assert_eq!(
            sample().to_string(),
            "(`year`:'2000'->\"2012\" and (not ('higgs' or `title`:/bo.on/)))"
        );
    }

    #[test]
    fn empty_query() {
        assert_eq!(QueryExpr::empty(" ").accept(&mut TreePrinter), "");
        assert_eq!(QueryExpr::empty(" ").to_string(), "__empty__");
    }

    #[test]
    fn spires_and_comparisons() {
        let expr = QueryExpr::spires_op(
            QueryExpr::keyword("date"),
            QueryExpr::GreaterEqualOp(Box::new(QueryExpr::value("1984"))),
        );
        assert_eq!(expr.accept(&mut TreePrinter), "find date >= 1984");
        assert_eq!(expr.to_string(), "find `date` >= '1984'");
    }
}
