//! Query grammar.
//!
//! A backtracking recursive-descent recogniser with PEG semantics: alternatives
//! are tried in order and the first one that matches wins. Each rule either
//! consumes input and returns a node, or restores the position and returns
//! `None`.
//!
//! # Field syntax
//!
//! ```text
//! main          → _ (find | query) _ END | blank
//! query         → (paren | simple) (_ continuation)*
//! continuation  → not operand | "-" simple
//!               | and operand | "+" simple
//!               | or operand  | "|" simple
//!               | paren | simple
//! operand       → WS simple | _ paren
//! simple        → not_keyword_value | keyword_query | value
//! keyword_query → KEYWORD _ ":" _ (keyword_query | value | paren)
//! value         → range | 'single' | "double" | /regex/ | simple_value
//! ```
//!
//! # SPIRES syntax
//!
//! ```text
//! find          → ("find" | "fin" | "f") WS spires_query
//! spires_query  → (paren | spires_simple) (_ spires_continuation)*
//! spires_simple → NESTABLE _ ":" _ spires_simple | NESTABLE WS spires_simple
//!               | MNEMONIC _ ":" _ value
//!               | MNEMONIC WS (comparison | spires_value)
//!               | spires_value
//! ```

use std::{cmp::Ordering, collections::BTreeSet};

use crate::{
    error::SyntaxError,
    spires::{NESTABLE_KEYWORDS, SPIRES_KEYWORDS},
    syntax::{Comparison, Connective, Continuation, Syntax},
};

/// A grammar rule usable as a parameter.
type Rule<'a> = fn(&mut Grammar<'a>) -> Option<Syntax>;

/// Boolean keywords that end a SPIRES value.
const CONNECTIVES: &[&str] = &["and", "or", "not"];

/// Parses `input` into a parse tree.
///
/// Blank input yields [`Syntax::Empty`]. With an allow-list, only the listed
/// keywords and MARC tags are accepted as field names.
pub fn parse_syntax(
    input: &str,
    allowed: Option<&BTreeSet<String>>,
) -> Result<Syntax, SyntaxError> {
    if input.trim().is_empty() {
        return Ok(Syntax::Empty(input.to_string()));
    }
    let mut grammar = Grammar::new(input, allowed);
    grammar.main().ok_or_else(|| grammar.error())
}

/// Returns true for characters matched by `\w`.
fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters that end a field-syntax value unit.
fn ends_simple_value(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | ':')
}

/// Characters that end a SPIRES value unit.
fn ends_spires_value(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')')
}

/// Returns true for MARC-style tags such as `999`, `999C5` or `999__u`.
fn is_marc_tag(word: &str) -> bool {
    let length = word.chars().count();
    word.chars().take(3).all(|c| c.is_ascii_digit())
        && (3..=6).contains(&length)
        && word.chars().all(is_word)
}

/// Returns the longest SPIRES mnemonic `text` starts with, ignoring case.
///
/// The mnemonic must end at a word boundary.
fn mnemonic_prefix(text: &str) -> Option<&'static str> {
    SPIRES_KEYWORDS
        .iter()
        .map(|(mnemonic, _)| *mnemonic)
        .filter(|mnemonic| {
            text.get(..mnemonic.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(mnemonic))
                && !text[mnemonic.len()..].starts_with(is_word)
        })
        .max_by_key(|mnemonic| mnemonic.len())
}

/// Returns true if `text` starts with `mnemonic:`.
fn starts_with_mnemonic_colon(text: &str) -> bool {
    mnemonic_prefix(text).is_some_and(|mnemonic| text[mnemonic.len()..].starts_with(':'))
}

/// Returns true if the first token of `text` is `and`, `or` or `not`.
fn starts_with_connective(text: &str) -> bool {
    let token = text.split(ends_spires_value).next().unwrap_or_default();
    CONNECTIVES
        .iter()
        .any(|connective| token.eq_ignore_ascii_case(connective))
}

/// Recogniser state.
struct Grammar<'a> {
    /// The whole input.
    input: &'a str,
    /// Current byte offset.
    pos: usize,
    /// Field names accepted by the keyword rule, if restricted.
    allowed: Option<&'a BTreeSet<String>>,
    /// Furthest byte offset at which a terminal failed.
    furthest: usize,
    /// What was expected at `furthest`.
    expected: BTreeSet<String>,
}

impl<'a> Grammar<'a> {
    /// Creates a recogniser at the start of `input`.
    fn new(input: &'a str, allowed: Option<&'a BTreeSet<String>>) -> Self {
        Self {
            input,
            pos: 0,
            allowed,
            furthest: 0,
            expected: BTreeSet::new(),
        }
    }

    /// Builds the error for a failed parse.
    fn error(&self) -> SyntaxError {
        SyntaxError::new(
            self.input,
            self.furthest,
            self.expected.iter().cloned().collect(),
        )
    }

    /// Unconsumed input.
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Runs `rule`, restoring the position if it fails.
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let result = rule(self);
        if result.is_none() {
            self.pos = start;
        }
        result
    }

    /// Records a failed expectation at the current position.
    fn fail<T>(&mut self, expected: &str) -> Option<T> {
        match self.pos.cmp(&self.furthest) {
            Ordering::Greater => {
                self.furthest = self.pos;
                self.expected.clear();
                self.expected.insert(expected.to_string());
            }
            Ordering::Equal => {
                self.expected.insert(expected.to_string());
            }
            Ordering::Less => {}
        }
        None
    }

    /// Consumes `text` exactly.
    fn literal(&mut self, text: &str) -> Option<()> {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            Some(())
        } else {
            self.fail(&format!("'{text}'"))
        }
    }

    /// Consumes the character `c`.
    fn char_literal(&mut self, c: char) -> Option<()> {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            Some(())
        } else {
            self.fail(&format!("'{c}'"))
        }
    }

    /// Consumes `word` ignoring ASCII case. No word boundary is required.
    fn word_ci(&mut self, word: &str) -> Option<()> {
        match self.rest().get(..word.len()) {
            Some(head) if head.eq_ignore_ascii_case(word) => {
                self.pos += word.len();
                Some(())
            }
            _ => self.fail(&format!("'{word}'")),
        }
    }

    /// Consumes characters while `pred` holds and returns them.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Skips whitespace, returning whether any was skipped.
    fn skip_whitespace(&mut self) -> bool {
        !self.eat_while(char::is_whitespace).is_empty()
    }

    /// Consumes at least one whitespace character.
    fn whitespace(&mut self) -> Option<()> {
        if self.skip_whitespace() {
            Some(())
        } else {
            self.fail("whitespace")
        }
    }

    /// Consumes `_ ":" _`.
    fn colon(&mut self) -> Option<()> {
        self.skip_whitespace();
        self.char_literal(':')?;
        self.skip_whitespace();
        Some(())
    }

    /// Succeeds at the end of input.
    fn end(&mut self) -> Option<()> {
        if self.rest().is_empty() {
            Some(())
        } else {
            self.fail("end of query")
        }
    }

    /// Entry rule: a SPIRES query if the input starts with `find`, else a field query.
    fn main(&mut self) -> Option<Syntax> {
        self.skip_whitespace();
        match self.complete(Self::find_query) {
            Some(tree) => Some(tree),
            None => self.complete(Self::query),
        }
    }

    /// Runs `rule` and requires it to consume the rest of the input.
    fn complete(&mut self, rule: Rule<'a>) -> Option<Syntax> {
        self.attempt(|g| {
            let tree = rule(g)?;
            g.skip_whitespace();
            g.end()?;
            Some(tree)
        })
    }

    /// `(paren | simple)`.
    fn term(&mut self, simple: Rule<'a>, inner: Rule<'a>) -> Option<Syntax> {
        match self.parenthesized(inner) {
            Some(tree) => Some(tree),
            None => simple(self),
        }
    }

    /// `"(" _ inner _ ")"`.
    fn parenthesized(&mut self, inner: Rule<'a>) -> Option<Syntax> {
        self.attempt(|g| {
            g.char_literal('(')?;
            g.skip_whitespace();
            let query = inner(g)?;
            g.skip_whitespace();
            g.char_literal(')')?;
            Some(Syntax::Parenthesized(Box::new(query)))
        })
    }

    /// Right-hand side of an operator: `WS simple | _ paren`.
    fn operand(&mut self, simple: Rule<'a>, inner: Rule<'a>) -> Option<Syntax> {
        if let Some(term) = self.attempt(|g| {
            g.whitespace()?;
            simple(g)
        }) {
            return Some(term);
        }
        self.attempt(|g| {
            g.skip_whitespace();
            g.parenthesized(inner)
        })
    }

    /// `and\s+not | not`, plus `-` when `symbols` is set.
    fn not_connective(&mut self, symbols: bool) -> Option<()> {
        let and_not = self.attempt(|g| {
            g.word_ci("and")?;
            g.whitespace()?;
            g.word_ci("not")
        });
        if and_not.is_some() || self.word_ci("not").is_some() {
            return Some(());
        }
        if symbols { self.char_literal('-') } else { None }
    }

    /// A sequence of field-syntax terms.
    fn query(&mut self) -> Option<Syntax> {
        let first = self.term(Self::simple_query, Self::query)?;
        let mut rest = Vec::new();
        while let Some(next) = self.attempt(|g| {
            g.skip_whitespace();
            g.continuation()
        }) {
            rest.push(next);
        }
        Some(Syntax::Query {
            first: Box::new(first),
            rest,
        })
    }

    /// A connective and the term it introduces, in field syntax.
    fn continuation(&mut self) -> Option<Continuation> {
        let simple: Rule<'a> = Self::simple_query;
        let inner: Rule<'a> = Self::query;

        let operators: [(Connective, &str, char); 3] = [
            (Connective::AndNot, "", '-'),
            (Connective::And, "and", '+'),
            (Connective::Or, "or", '|'),
        ];
        for (connective, word, symbol) in operators {
            let spelled = self.attempt(|g| {
                if connective == Connective::AndNot {
                    g.not_connective(true)?;
                } else if g.word_ci(word).is_none() {
                    g.char_literal(symbol)?;
                }
                g.operand(simple, inner)
            });
            let term = spelled.or_else(|| {
                self.attempt(|g| {
                    g.char_literal(symbol)?;
                    simple(g)
                })
            });
            if let Some(term) = term {
                return Some(Continuation::new(connective, term));
            }
        }

        self.term(simple, inner)
            .map(|term| Continuation::new(Connective::Implicit, term))
    }

    /// `not_keyword_value | keyword_query | value`.
    fn simple_query(&mut self) -> Option<Syntax> {
        if self.allowed.is_some()
            && let Some(value) = self.not_keyword_value()
        {
            return Some(value);
        }
        if let Some(query) = self.keyword_query() {
            return Some(query);
        }
        self.value()
            .map(|value| Syntax::ValueQuery(Box::new(value)))
    }

    /// `KEYWORD _ ":" _ (keyword_query | value | paren)`.
    fn keyword_query(&mut self) -> Option<Syntax> {
        self.attempt(|g| {
            let keyword = g.keyword_rule()?;
            g.colon()?;
            let value = match g.keyword_query() {
                Some(nested) => nested,
                None => match g.value() {
                    Some(value) => value,
                    None => g.parenthesized(Self::query)?,
                },
            };
            Some(Syntax::KeywordQuery {
                keyword: Box::new(keyword),
                value: Box::new(value),
            })
        })
    }

    /// A field name: dot-separated word runs, restricted by the allow-list.
    fn keyword_rule(&mut self) -> Option<Syntax> {
        let start = self.pos;
        self.eat_while(is_word);
        if self.pos == start {
            return self.fail("keyword");
        }
        loop {
            let mut chars = self.rest().chars();
            if chars.next() == Some('.') && chars.next().is_some_and(is_word) {
                self.pos += 1;
                self.eat_while(is_word);
            } else {
                break;
            }
        }
        let word = &self.input[start..self.pos];
        if let Some(allowed) = self.allowed
            && !allowed.contains(word)
            && !is_marc_tag(word)
        {
            self.pos = start;
            return self.fail("allowed keyword");
        }
        Some(Syntax::KeywordRule(word.to_string()))
    }

    /// A `word:` token whose word is not an allowed keyword.
    ///
    /// Takes the non-space run and cuts it after its last `:` that follows a
    /// word character.
    fn not_keyword_value(&mut self) -> Option<Syntax> {
        let allowed = self.allowed?;
        let rest = self.rest();
        if !rest.starts_with(is_word) {
            return None;
        }
        let run = rest.split(char::is_whitespace).next().unwrap_or_default();
        if run.chars().take(3).filter(char::is_ascii_digit).count() == 3 {
            return None;
        }
        if allowed.iter().any(|keyword| {
            run.strip_prefix(keyword.as_str())
                .is_some_and(|after| after.starts_with(':'))
        }) {
            return None;
        }
        let cut = run
            .char_indices()
            .filter(|&(i, c)| c == ':' && run[..i].chars().next_back().is_some_and(is_word))
            .map(|(i, _)| i)
            .last()?;
        self.pos += cut + 1;
        Some(Syntax::NotKeywordValue(run[..=cut].to_string()))
    }

    /// `range | 'single' | "double" | /regex/ | simple_value`.
    fn value(&mut self) -> Option<Syntax> {
        if let Some(range) = self.range() {
            return Some(range);
        }
        if let Some(quoted) = self.quoted_value() {
            return Some(quoted);
        }
        self.simple_value().map(Syntax::SimpleValue)
    }

    /// Any of the three quoted forms.
    fn quoted_value(&mut self) -> Option<Syntax> {
        if let Some(text) = self.quoted('\'') {
            return Some(Syntax::SingleQuotedString(text));
        }
        if let Some(text) = self.quoted('"') {
            return Some(Syntax::DoubleQuotedString(text));
        }
        self.quoted('/').map(Syntax::SlashQuotedString)
    }

    /// Text between two `delimiter`s. A backslash escapes the next character.
    fn quoted(&mut self, delimiter: char) -> Option<String> {
        self.attempt(|g| {
            g.char_literal(delimiter)?;
            let rest = g.rest();
            let mut escaped = false;
            let close = rest.char_indices().find_map(|(i, c)| {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == delimiter {
                    return Some(i);
                }
                None
            });
            match close {
                Some(i) => {
                    g.pos += i + delimiter.len_utf8();
                    Some(rest[..i].to_string())
                }
                None => {
                    g.pos += rest.len();
                    g.fail(&format!("closing {delimiter}"))
                }
            }
        })
    }

    /// `range_value "->" range_value`.
    fn range(&mut self) -> Option<Syntax> {
        self.attempt(|g| {
            let low = g.range_value()?;
            g.literal("->")?;
            let high = g.range_value()?;
            Some(Syntax::RangeOp(Box::new(low), Box::new(high)))
        })
    }

    /// A range bound: a double-quoted string or a run that stops before `->`.
    fn range_value(&mut self) -> Option<Syntax> {
        if let Some(text) = self.quoted('"') {
            return Some(Syntax::DoubleQuotedString(text));
        }
        let start = self.pos;
        loop {
            let rest = self.rest();
            match rest.chars().next() {
                Some('-') => {
                    let dashes = rest.len() - rest.trim_start_matches('-').len();
                    match rest[dashes..].chars().next() {
                        Some(c) if c != '>' && !ends_spires_value(c) => {
                            self.pos += dashes + c.len_utf8();
                        }
                        _ => break,
                    }
                }
                Some(c) if !ends_spires_value(c) => self.pos += c.len_utf8(),
                _ => break,
            }
        }
        if self.pos == start {
            return self.fail("value");
        }
        Some(Syntax::SimpleValue(self.input[start..self.pos].to_string()))
    }

    /// A bare field-syntax value. Balanced parentheses belong to the value.
    fn simple_value(&mut self) -> Option<String> {
        let start = self.pos;
        if !self.value_units(ends_simple_value) {
            return self.fail("value");
        }
        Some(self.input[start..self.pos].to_string())
    }

    /// Consumes runs of characters not matching `stop`, and `(...)` groups of
    /// such runs. Returns whether anything was consumed.
    fn value_units(&mut self, stop: fn(char) -> bool) -> bool {
        let start = self.pos;
        loop {
            if !self.eat_while(|c| !stop(c)).is_empty() {
                continue;
            }
            let group = self.attempt(|g| {
                g.char_literal('(')?;
                if !g.value_units(stop) {
                    return g.fail("value");
                }
                g.char_literal(')')
            });
            if group.is_none() {
                break;
            }
        }
        self.pos > start
    }

    /// `("find" | "fin" | "f") WS spires_query`.
    fn find_query(&mut self) -> Option<Syntax> {
        ["find", "fin", "f"].into_iter().find_map(|word| {
            self.attempt(|g| {
                g.word_ci(word)?;
                g.whitespace()?;
                let query = g.spires_query()?;
                Some(Syntax::Find(Box::new(query)))
            })
        })
    }

    /// A sequence of SPIRES terms.
    fn spires_query(&mut self) -> Option<Syntax> {
        let first = self.term(Self::spires_simple, Self::spires_query)?;
        let mut rest = Vec::new();
        while let Some(next) = self.attempt(|g| {
            g.skip_whitespace();
            g.spires_continuation()
        }) {
            rest.push(next);
        }
        Some(Syntax::SpiresQuery {
            first: Box::new(first),
            rest,
        })
    }

    /// A connective and the term it introduces, in SPIRES syntax.
    ///
    /// Adjacent terms are joined only when the second one is parenthesized or
    /// starts with `mnemonic:`.
    fn spires_continuation(&mut self) -> Option<Continuation> {
        let simple: Rule<'a> = Self::spires_simple;
        let inner: Rule<'a> = Self::spires_query;

        if let Some(term) = self.attempt(|g| {
            g.not_connective(false)?;
            g.operand(simple, inner)
        }) {
            return Some(Continuation::new(Connective::AndNot, term));
        }
        for (connective, word) in [(Connective::And, "and"), (Connective::Or, "or")] {
            if let Some(term) = self.attempt(|g| {
                g.word_ci(word)?;
                g.operand(simple, inner)
            }) {
                return Some(Continuation::new(connective, term));
            }
        }

        let term = if starts_with_mnemonic_colon(self.rest()) {
            self.spires_simple()
        } else {
            self.parenthesized(inner)
        };
        term.map(|term| Continuation::new(Connective::Implicit, term))
    }

    /// A SPIRES field query, or a bare SPIRES value.
    fn spires_simple(&mut self) -> Option<Syntax> {
        if let Some(query) = self.spires_keyword_query() {
            return Some(query);
        }
        self.spires_value()
            .map(|value| Syntax::ValueQuery(Box::new(value)))
    }

    /// The four keyword forms of SPIRES syntax, in priority order.
    fn spires_keyword_query(&mut self) -> Option<Syntax> {
        let query = |keyword, value| Syntax::SpiresKeywordQuery {
            keyword: Box::new(keyword),
            value: Box::new(value),
        };

        if let Some(nested) = self.attempt(|g| {
            let keyword = g.nestable_keyword()?;
            g.colon()?;
            Some(query(keyword, g.spires_simple()?))
        }) {
            return Some(nested);
        }
        if let Some(nested) = self.attempt(|g| {
            let keyword = g.nestable_keyword()?;
            g.whitespace()?;
            Some(query(keyword, g.spires_simple()?))
        }) {
            return Some(nested);
        }
        if let Some(field) = self.attempt(|g| {
            let keyword = g.spires_keyword_rule()?;
            g.colon()?;
            Some(query(keyword, g.value()?))
        }) {
            return Some(field);
        }
        self.attempt(|g| {
            let keyword = g.spires_keyword_rule()?;
            g.whitespace()?;
            let value = match g.comparison() {
                Some(comparison) => comparison,
                None => g.spires_value()?,
            };
            Some(query(keyword, value))
        })
    }

    /// `refersto` or `citedby`, ending at a word boundary.
    fn nestable_keyword(&mut self) -> Option<Syntax> {
        NESTABLE_KEYWORDS.iter().find_map(|keyword| {
            self.attempt(|g| {
                g.word_ci(keyword)?;
                if g.rest().starts_with(is_word) {
                    return g.fail("word boundary");
                }
                Some(Syntax::NestableKeyword((*keyword).to_string()))
            })
        })
    }

    /// The longest SPIRES mnemonic at the current position.
    fn spires_keyword_rule(&mut self) -> Option<Syntax> {
        match mnemonic_prefix(self.rest()) {
            Some(mnemonic) => {
                self.pos += mnemonic.len();
                Some(Syntax::SpiresKeywordRule(mnemonic.to_string()))
            }
            None => self.fail("SPIRES keyword"),
        }
    }

    /// `> v`, `>= v`, `< v`, `<= v`, `after v`, `before v`, `N+` or `N-`.
    fn comparison(&mut self) -> Option<Syntax> {
        let compare = |comparison, value| Syntax::Comparison {
            comparison,
            value: Box::new(value),
        };

        let symbolic = [
            (">=", Comparison::GreaterEqual),
            (">", Comparison::Greater),
            ("<=", Comparison::LowerEqual),
            ("<", Comparison::Lower),
        ];
        for (symbol, comparison) in symbolic {
            if let Some(value) = self.attempt(|g| {
                g.literal(symbol)?;
                g.skip_whitespace();
                g.spires_value()
            }) {
                return Some(compare(comparison, value));
            }
        }

        for (word, comparison) in [("after", Comparison::Greater), ("before", Comparison::Lower)] {
            if let Some(value) = self.attempt(|g| {
                g.word_ci(word)?;
                g.whitespace()?;
                g.spires_value()
            }) {
                return Some(compare(comparison, value));
            }
        }

        for (sign, comparison) in [('+', Comparison::GreaterEqual), ('-', Comparison::LowerEqual)] {
            if let Some(number) = self.attempt(|g| {
                let digits = g.eat_while(|c| c.is_ascii_digit());
                if digits.is_empty() {
                    return g.fail("number");
                }
                g.char_literal(sign)?;
                let rest = g.rest();
                if !(rest.is_empty() || rest.starts_with(char::is_whitespace) || rest.starts_with(')'))
                {
                    return g.fail("end of number");
                }
                Some(Syntax::Number(digits.to_string()))
            }) {
                return Some(compare(comparison, number));
            }
        }

        None
    }

    /// A SPIRES value.
    ///
    /// A quoted string counts only when the term ends right after it. Otherwise
    /// the value is a run of whitespace-separated tokens, kept with its original
    /// spacing, that stops before `and`/`or`/`not` and before a later
    /// `mnemonic:` token.
    fn spires_value(&mut self) -> Option<Syntax> {
        if let Some(quoted) = self.attempt(|g| {
            let quoted = g.quoted_value()?;
            g.at_term_boundary().then_some(quoted)
        }) {
            return Some(quoted);
        }

        let start = self.pos;
        if starts_with_connective(self.rest()) || !self.value_units(ends_spires_value) {
            self.pos = start;
            return self.fail("value");
        }
        let mut end = self.pos;
        while self.skip_whitespace() {
            let rest = self.rest();
            if starts_with_connective(rest)
                || starts_with_mnemonic_colon(rest)
                || !self.value_units(ends_spires_value)
            {
                break;
            }
            end = self.pos;
        }
        self.pos = end;
        Some(Syntax::SpiresValue(self.input[start..end].to_string()))
    }

    /// Returns true if the current SPIRES term ends here.
    fn at_term_boundary(&self) -> bool {
        let rest = self.rest().trim_start();
        rest.is_empty()
            || rest.starts_with(')')
            || starts_with_connective(rest)
            || starts_with_mnemonic_colon(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Syntax {
        match parse_syntax(input, None) {
            Ok(tree) => tree,
            Err(err) => panic!("{input:?} failed to parse:\n{err}"),
        }
    }

    fn value_query(value: &str) -> Syntax {
        Syntax::ValueQuery(Box::new(Syntax::SimpleValue(value.to_string())))
    }

    fn single(first: Syntax) -> Syntax {
        Syntax::Query {
            first: Box::new(first),
            rest: vec![],
        }
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(parse(""), Syntax::Empty(String::new()));
        assert_eq!(parse(" \t"), Syntax::Empty(" \t".to_string()));
    }

    #[test]
    fn bare_value() {
        assert_eq!(parse("bar"), single(value_query("bar")));
    }

    #[test]
    fn keyword_query() {
        assert_eq!(
            parse("  foo  :  bar  "),
            single(Syntax::KeywordQuery {
                keyword: Box::new(Syntax::KeywordRule("foo".into())),
                value: Box::new(Syntax::SimpleValue("bar".into())),
            })
        );
    }

    #[test]
    fn dotted_keyword() {
        assert_eq!(
            parse("foo.bar:baz"),
            single(Syntax::KeywordQuery {
                keyword: Box::new(Syntax::KeywordRule("foo.bar".into())),
                value: Box::new(Syntax::SimpleValue("baz".into())),
            })
        );
    }

    #[test]
    fn continuations_record_connectives() {
        let Syntax::Query { rest, .. } = parse("a and b or c not d -e +f |g h") else {
            panic!("expected a query");
        };
        let connectives: Vec<_> = rest.iter().map(|c| c.connective).collect();
        assert_eq!(
            connectives,
            vec![
                Connective::And,
                Connective::Or,
                Connective::AndNot,
                Connective::AndNot,
                Connective::And,
                Connective::Or,
                Connective::Implicit,
            ]
        );
    }

    #[test]
    fn words_starting_with_operators_are_values() {
        let Syntax::Query { rest, .. } = parse("foo nothing orange android") else {
            panic!("expected a query");
        };
        assert!(rest.iter().all(|c| c.connective == Connective::Implicit));
    }

    #[test]
    fn escaped_delimiter_does_not_close_string() {
        assert_eq!(
            parse(r#""a\"b""#),
            single(Syntax::ValueQuery(Box::new(Syntax::DoubleQuotedString(
                r#"a\"b"#.into()
            ))))
        );
    }

    #[test]
    fn range_bounds_may_contain_dashes() {
        assert_eq!(
            parse("2000-10->2012-09"),
            single(Syntax::ValueQuery(Box::new(Syntax::RangeOp(
                Box::new(Syntax::SimpleValue("2000-10".into())),
                Box::new(Syntax::SimpleValue("2012-09".into())),
            ))))
        );
    }

    #[test]
    fn find_prefix_needs_whitespace() {
        assert!(matches!(parse("find t quark"), Syntax::Find(_)));
        assert!(matches!(parse("f a x"), Syntax::Find(_)));
        assert!(matches!(parse("findings"), Syntax::Query { .. }));
    }

    #[test]
    fn unknown_mnemonic_is_a_spires_value() {
        let Syntax::Find(query) = parse("find zzz quark") else {
            panic!("expected a find query");
        };
        let Syntax::SpiresQuery { first, .. } = *query else {
            panic!("expected a SPIRES query");
        };
        assert!(matches!(*first, Syntax::ValueQuery(_)));
    }

    #[test]
    fn longest_mnemonic_wins() {
        assert_eq!(mnemonic_prefix("af oxford"), Some("af"));
        assert_eq!(mnemonic_prefix("date-added 2012"), Some("date-added"));
        assert_eq!(mnemonic_prefix("date 2012"), Some("date"));
        assert_eq!(mnemonic_prefix("TITLE x"), Some("title"));
        assert_eq!(mnemonic_prefix("john"), None);
    }

    #[test]
    fn spires_value_keeps_spacing() {
        let Syntax::Find(query) = parse("find da today - 2") else {
            panic!("expected find");
        };
        let Syntax::SpiresQuery { first, .. } = *query else {
            panic!("expected spires query");
        };
        assert_eq!(
            *first,
            Syntax::SpiresKeywordQuery {
                keyword: Box::new(Syntax::SpiresKeywordRule("da".into())),
                value: Box::new(Syntax::SpiresValue("today - 2".into())),
            }
        );
    }

    #[test]
    fn marc_tags() {
        assert!(is_marc_tag("999"));
        assert!(is_marc_tag("999C5"));
        assert!(is_marc_tag("999__u"));
        assert!(!is_marc_tag("99"));
        assert!(!is_marc_tag("9999999"));
        assert!(!is_marc_tag("title"));
    }

    #[test]
    fn allow_list_restricts_keywords() {
        let allowed: BTreeSet<String> = ["title".to_string()].into();
        let tree = parse_syntax("foo:bar", Some(&allowed));
        assert_eq!(
            tree,
            Ok(Syntax::Query {
                first: Box::new(Syntax::NotKeywordValue("foo:".into())),
                rest: vec![Continuation::new(Connective::Implicit, value_query("bar"))],
            })
        );
        assert!(matches!(
            parse_syntax("title:bar", Some(&allowed)),
            Ok(Syntax::Query { rest, .. }) if rest.is_empty()
        ));
    }

    #[test]
    fn error_reports_furthest_position() {
        let err = parse_syntax("foo:bar)", None).unwrap_err();
        assert_eq!(err.position, 7);
        assert!(err.expected.contains(&"end of query".to_string()));
    }

    #[test]
    fn unbalanced_parenthesis_is_an_error() {
        let err = parse_syntax("(foo:bar", None).unwrap_err();
        assert_eq!(err.position, 8);
        assert!(err.expected.contains(&"')'".to_string()));
    }
}
