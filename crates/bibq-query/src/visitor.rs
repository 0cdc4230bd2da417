//! Post-order tree walking over [`QueryExpr`].
//!
//! Every consumer of the tree (printers, the SPIRES rewriter, the record matcher)
//! implements [`Visitor`]. The walker dispatches on the node variant, visits
//! children first and hands their *outputs* to the parent's method, so a handler
//! never has to recurse by itself.

use crate::ast::QueryExpr;

/// A post-order tree walker with one method per node kind.
///
/// All methods are required: a walker must say what it does with every kind of
/// node, and the compiler checks that it does.
pub trait Visitor {
    /// Result produced for each node.
    type Output;

    /// Visits a [`QueryExpr::Keyword`].
    fn visit_keyword(&mut self, value: &str) -> Self::Output;
    /// Visits a [`QueryExpr::Value`].
    fn visit_value(&mut self, value: &str) -> Self::Output;
    /// Visits a [`QueryExpr::SingleQuotedValue`].
    fn visit_single_quoted(&mut self, value: &str) -> Self::Output;
    /// Visits a [`QueryExpr::DoubleQuotedValue`].
    fn visit_double_quoted(&mut self, value: &str) -> Self::Output;
    /// Visits a [`QueryExpr::RegexValue`].
    fn visit_regex(&mut self, value: &str) -> Self::Output;
    /// Visits a [`QueryExpr::EmptyQuery`].
    fn visit_empty(&mut self, value: &str) -> Self::Output;

    /// Visits a [`QueryExpr::NotOp`] given its operand's output.
    fn visit_not(&mut self, op: Self::Output) -> Self::Output;
    /// Visits a [`QueryExpr::ValueQuery`] given its operand's output.
    fn visit_value_query(&mut self, op: Self::Output) -> Self::Output;
    /// Visits a [`QueryExpr::LowerOp`] given its operand's output.
    fn visit_lower(&mut self, op: Self::Output) -> Self::Output;
    /// Visits a [`QueryExpr::LowerEqualOp`] given its operand's output.
    fn visit_lower_equal(&mut self, op: Self::Output) -> Self::Output;
    /// Visits a [`QueryExpr::GreaterOp`] given its operand's output.
    fn visit_greater(&mut self, op: Self::Output) -> Self::Output;
    /// Visits a [`QueryExpr::GreaterEqualOp`] given its operand's output.
    fn visit_greater_equal(&mut self, op: Self::Output) -> Self::Output;

    /// Visits a [`QueryExpr::AndOp`] given both children's outputs.
    fn visit_and(&mut self, left: Self::Output, right: Self::Output) -> Self::Output;
    /// Visits a [`QueryExpr::OrOp`] given both children's outputs.
    fn visit_or(&mut self, left: Self::Output, right: Self::Output) -> Self::Output;
    /// Visits a [`QueryExpr::KeywordOp`] given both children's outputs.
    fn visit_keyword_op(&mut self, keyword: Self::Output, value: Self::Output) -> Self::Output;
    /// Visits a [`QueryExpr::RangeOp`] given both bounds' outputs.
    fn visit_range(&mut self, low: Self::Output, high: Self::Output) -> Self::Output;
    /// Visits a [`QueryExpr::SpiresOp`] given both children's outputs.
    fn visit_spires(&mut self, keyword: Self::Output, value: Self::Output) -> Self::Output;
}

/// Walks `expr` post-order, dispatching each node to `visitor`.
///
/// Recursion depth is bounded by the nesting depth of the tree, which the parser
/// bounds by the length of the input.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, expr: &QueryExpr) -> V::Output {
    match expr {
        QueryExpr::Keyword(v) => visitor.visit_keyword(v),
        QueryExpr::Value(v) => visitor.visit_value(v),
        QueryExpr::SingleQuotedValue(v) => visitor.visit_single_quoted(v),
        QueryExpr::DoubleQuotedValue(v) => visitor.visit_double_quoted(v),
        QueryExpr::RegexValue(v) => visitor.visit_regex(v),
        QueryExpr::EmptyQuery(v) => visitor.visit_empty(v),

        QueryExpr::NotOp(op) => {
            let op = walk(visitor, op);
            visitor.visit_not(op)
        }
        QueryExpr::ValueQuery(op) => {
            let op = walk(visitor, op);
            visitor.visit_value_query(op)
        }
        QueryExpr::LowerOp(op) => {
            let op = walk(visitor, op);
            visitor.visit_lower(op)
        }
        QueryExpr::LowerEqualOp(op) => {
            let op = walk(visitor, op);
            visitor.visit_lower_equal(op)
        }
        QueryExpr::GreaterOp(op) => {
            let op = walk(visitor, op);
            visitor.visit_greater(op)
        }
        QueryExpr::GreaterEqualOp(op) => {
            let op = walk(visitor, op);
            visitor.visit_greater_equal(op)
        }

        QueryExpr::AndOp(left, right) => {
            let (left, right) = walk_pair(visitor, left, right);
            visitor.visit_and(left, right)
        }
        QueryExpr::OrOp(left, right) => {
            let (left, right) = walk_pair(visitor, left, right);
            visitor.visit_or(left, right)
        }
        QueryExpr::KeywordOp(left, right) => {
            let (left, right) = walk_pair(visitor, left, right);
            visitor.visit_keyword_op(left, right)
        }
        QueryExpr::RangeOp(left, right) => {
            let (left, right) = walk_pair(visitor, left, right);
            visitor.visit_range(left, right)
        }
        QueryExpr::SpiresOp(left, right) => {
            let (left, right) = walk_pair(visitor, left, right);
            visitor.visit_spires(left, right)
        }
    }
}

/// Walks a left child then a right child.
fn walk_pair<V: Visitor + ?Sized>(
    visitor: &mut V,
    left: &QueryExpr,
    right: &QueryExpr,
) -> (V::Output, V::Output) {
    let left = walk(visitor, left);
    let right = walk(visitor, right);
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the order in which nodes are visited.
    #[derive(Default)]
    struct Trace {
        /// Visited node kinds, in order.
        seen: Vec<String>,
    }

    impl Visitor for Trace {
        type Output = ();

        fn visit_keyword(&mut self, value: &str) {
            self.seen.push(format!("keyword {value}"));
        }
        fn visit_value(&mut self, value: &str) {
            self.seen.push(format!("value {value}"));
        }
        fn visit_single_quoted(&mut self, value: &str) {
            self.seen.push(format!("single {value}"));
        }
        fn visit_double_quoted(&mut self, value: &str) {
            self.seen.push(format!("double {value}"));
        }
        fn visit_regex(&mut self, value: &str) {
            self.seen.push(format!("regex {value}"));
        }
        fn visit_empty(&mut self, _value: &str) {
            self.seen.push("empty".into());
        }
        fn visit_not(&mut self, (): ()) {
            self.seen.push("not".into());
        }
        fn visit_value_query(&mut self, (): ()) {
            self.seen.push("value query".into());
        }
        fn visit_lower(&mut self, (): ()) {
            self.seen.push("<".into());
        }
        fn visit_lower_equal(&mut self, (): ()) {
            self.seen.push("<=".into());
        }
        fn visit_greater(&mut self, (): ()) {
            self.seen.push(">".into());
        }
        fn visit_greater_equal(&mut self, (): ()) {
            self.seen.push(">=".into());
        }
        fn visit_and(&mut self, (): (), (): ()) {
            self.seen.push("and".into());
        }
        fn visit_or(&mut self, (): (), (): ()) {
            self.seen.push("or".into());
        }
        fn visit_keyword_op(&mut self, (): (), (): ()) {
            self.seen.push("keyword op".into());
        }
        fn visit_range(&mut self, (): (), (): ()) {
            self.seen.push("range".into());
        }
        fn visit_spires(&mut self, (): (), (): ()) {
            self.seen.push("spires".into());
        }
    }

    /// Counts leaves by summing child outputs.
    struct LeafCount;

    impl Visitor for LeafCount {
        type Output = usize;

        fn visit_keyword(&mut self, _: &str) -> usize {
            1
        }
        fn visit_value(&mut self, _: &str) -> usize {
            1
        }
        fn visit_single_quoted(&mut self, _: &str) -> usize {
            1
        }
        fn visit_double_quoted(&mut self, _: &str) -> usize {
            1
        }
        fn visit_regex(&mut self, _: &str) -> usize {
            1
        }
        fn visit_empty(&mut self, _: &str) -> usize {
            0
        }
        fn visit_not(&mut self, op: usize) -> usize {
            op
        }
        fn visit_value_query(&mut self, op: usize) -> usize {
            op
        }
        fn visit_lower(&mut self, op: usize) -> usize {
            op
        }
        fn visit_lower_equal(&mut self, op: usize) -> usize {
            op
        }
        fn visit_greater(&mut self, op: usize) -> usize {
            op
        }
        fn visit_greater_equal(&mut self, op: usize) -> usize {
            op
        }
        fn visit_and(&mut self, left: usize, right: usize) -> usize {
            left + right
        }
        fn visit_or(&mut self, left: usize, right: usize) -> usize {
            left + right
        }
        fn visit_keyword_op(&mut self, keyword: usize, value: usize) -> usize {
            keyword + value
        }
        fn visit_range(&mut self, low: usize, high: usize) -> usize {
            low + high
        }
        fn visit_spires(&mut self, keyword: usize, value: usize) -> usize {
            keyword + value
        }
    }

    #[test]
    fn children_are_visited_before_parents() {
        let expr = QueryExpr::and(
            QueryExpr::keyword_op(QueryExpr::keyword("title"), QueryExpr::value("higgs")),
            QueryExpr::not(QueryExpr::value_query(QueryExpr::double_quoted("boson"))),
        );
        let mut trace = Trace::default();
        expr.accept(&mut trace);
        assert_eq!(
            trace.seen,
            vec![
                "keyword title",
                "value higgs",
                "keyword op",
                "double boson",
                "value query",
                "not",
                "and",
            ]
        );
    }

    #[test]
    fn outputs_flow_to_parents() {
        let expr = QueryExpr::or(
            QueryExpr::keyword_op(
                QueryExpr::keyword("year"),
                QueryExpr::range(QueryExpr::value("2000"), QueryExpr::value("2012")),
            ),
            QueryExpr::spires_op(
                QueryExpr::keyword("date"),
                QueryExpr::GreaterOp(Box::new(QueryExpr::value("1984"))),
            ),
        );
        assert_eq!(expr.accept(&mut LeafCount), 5);
        assert_eq!(QueryExpr::empty("  ").accept(&mut LeafCount), 0);
    }
}
