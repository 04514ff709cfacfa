//! Engine instances and grammar construction
//!
//! An [`Engine`] is configured once (an optional ignore parser invoked
//! between tokens, plus an optional reserved-key set) and every parser it
//! builds shares that configuration through one immutable, reference-
//! counted config object. Combinators are methods on the engine so a
//! grammar's skip and keyword policy is uniform across all of its rules.
//!
//! Construction happens once at setup; matching is then driven through
//! [`Parser::parse`] with no further engine involvement.
//!
//! ```rust
//! let r = Engine::<f64>::builder().ignore(" ").build();
//! let list = r.delimit_fold(r.real(), "+", |_, n, sum| sum + n);
//! let m = list.parse("765 + 346", 0, 0.0).unwrap();
//! assert_eq!(m.attr, 1111.0);
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::combinators::atom::{End, LineBreak, Literal, Pattern, Real};
use crate::combinators::keyword::{EqualsId, Key, NotKey};
use crate::combinators::predicate::{AttrOf, Bind, Cond, Lookahead};
use crate::combinators::repeat::{Delimit, Times};
use crate::combinators::sequence::{Choice, Sequence};
use crate::error::GrammarError;
use crate::keywords::KeywordTrie;
use crate::parser::{Attribute, IntoParsers, Parser};

/// Immutable per-engine configuration shared by every parser the engine
/// builds. Never mutated after construction.
#[derive(Debug)]
pub(crate) struct EngineConfig<A> {
    pub(crate) ignore: Option<Parser<A>>,
    pub(crate) keywords: Option<KeywordTrie>,
}

impl<A: Attribute> EngineConfig<A> {
    /// Advance past ignorable material at `pos`.
    ///
    /// The ignore parser runs with a clone of the current attribute; its
    /// synthesized value is discarded and only the end position kept. A
    /// failed skip consumes nothing.
    pub(crate) fn skip(&self, input: &str, pos: usize, attr: &A) -> usize {
        match &self.ignore {
            Some(ignore) => ignore
                .parse(input, pos, attr.clone())
                .map_or(pos, |m| m.end),
            None => pos,
        }
    }
}

/// A grammar-building instance.
///
/// Generic over the single attribute type `A` threaded through every
/// rule of the grammars it builds. Cloning shares the configuration.
#[derive(Debug)]
pub struct Engine<A> {
    config: Arc<EngineConfig<A>>,
}

impl<A> Clone for Engine<A> {
    fn clone(&self) -> Self {
        Engine {
            config: Arc::clone(&self.config),
        }
    }
}

/// Configuration for an [`Engine`] under construction.
#[derive(Debug)]
pub struct EngineBuilder<A> {
    ignore: Option<Parser<A>>,
    keys: Option<Vec<String>>,
}

impl<A: Attribute> EngineBuilder<A> {
    /// Set the parser invoked between sequence and repetition elements
    /// to silently skip separator material. Accepts a literal, a
    /// compiled pattern, or any parser.
    pub fn ignore<P: Into<Parser<A>>>(mut self, ignore: P) -> Self {
        self.ignore = Some(ignore.into());
        self
    }

    /// Set the reserved tokens recognized by [`Engine::key`],
    /// [`Engine::not_key`], and the [`Engine::equals_id`] boundary
    /// check.
    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Engine<A> {
        Engine {
            config: Arc::new(EngineConfig {
                ignore: self.ignore,
                keywords: self.keys.map(KeywordTrie::new),
            }),
        }
    }
}

impl<A: Attribute> Default for Engine<A> {
    fn default() -> Self {
        Engine::new()
    }
}

impl<A: Attribute> Engine<A> {
    /// An engine with no ignore parser and no reserved keys.
    pub fn new() -> Self {
        Engine::builder().build()
    }

    pub fn builder() -> EngineBuilder<A> {
        EngineBuilder {
            ignore: None,
            keys: None,
        }
    }

    pub(crate) fn config(&self) -> Arc<EngineConfig<A>> {
        Arc::clone(&self.config)
    }

    /// Exact-text parser. Equivalent to lifting the literal at a
    /// combinator boundary, but with the attribute type pinned by the
    /// engine.
    pub fn literal(&self, text: impl Into<String>) -> Parser<A> {
        Parser::from_rule(Literal::new(text))
    }

    /// Compile `pattern` and wrap it as an anchored pattern parser.
    ///
    /// The one construction-time failure: a pattern the regex engine
    /// rejects surfaces here as a fatal [`GrammarError`], never as a
    /// match-time failure.
    pub fn pattern(&self, pattern: &str) -> Result<Parser<A>, GrammarError> {
        let regex = Regex::new(pattern).map_err(|e| GrammarError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Parser::from_rule(Pattern::new(regex)))
    }

    /// Ordered sequence. Threads positions and attributes left to
    /// right, skipping ignorable material after every element.
    pub fn then<L: IntoParsers<A>>(&self, items: L) -> Parser<A> {
        Parser::from_rule(Sequence::new(items.into_parsers(), self.config()))
    }

    /// First-wins ordered choice.
    pub fn choice<L: IntoParsers<A>>(&self, alternatives: L) -> Parser<A> {
        Parser::from_rule(Choice::new(alternatives.into_parsers()))
    }

    /// Repeat `expr` between `min` and `max` times (`None` = no upper
    /// bound); each iteration's synthesized attribute replaces the
    /// accumulator.
    pub fn times<P: Into<Parser<A>>>(&self, min: usize, max: Option<usize>, expr: P) -> Parser<A> {
        Parser::from_rule(Times::new(min, max, expr.into(), None, self.config()))
    }

    /// [`times`](Engine::times) with an explicit fold
    /// `(iteration_text, synthesized, accumulator) -> accumulator`.
    pub fn times_fold<P, F>(&self, min: usize, max: Option<usize>, expr: P, fold: F) -> Parser<A>
    where
        P: Into<Parser<A>>,
        F: Fn(&str, A, A) -> A + Send + Sync + 'static,
    {
        Parser::from_rule(Times::new(
            min,
            max,
            expr.into(),
            Some(Arc::new(fold)),
            self.config(),
        ))
    }

    /// At least `count` repetitions, unbounded above.
    pub fn at_least<P: Into<Parser<A>>>(&self, count: usize, expr: P) -> Parser<A> {
        self.times(count, None, expr)
    }

    pub fn at_least_fold<P, F>(&self, count: usize, expr: P, fold: F) -> Parser<A>
    where
        P: Into<Parser<A>>,
        F: Fn(&str, A, A) -> A + Send + Sync + 'static,
    {
        self.times_fold(count, None, expr, fold)
    }

    /// Up to `count` repetitions, zero allowed.
    pub fn at_most<P: Into<Parser<A>>>(&self, count: usize, expr: P) -> Parser<A> {
        self.times(0, Some(count), expr)
    }

    pub fn at_most_fold<P, F>(&self, count: usize, expr: P, fold: F) -> Parser<A>
    where
        P: Into<Parser<A>>,
        F: Fn(&str, A, A) -> A + Send + Sync + 'static,
    {
        self.times_fold(0, Some(count), expr, fold)
    }

    pub fn one_or_more<P: Into<Parser<A>>>(&self, expr: P) -> Parser<A> {
        self.times(1, None, expr)
    }

    pub fn one_or_more_fold<P, F>(&self, expr: P, fold: F) -> Parser<A>
    where
        P: Into<Parser<A>>,
        F: Fn(&str, A, A) -> A + Send + Sync + 'static,
    {
        self.times_fold(1, None, expr, fold)
    }

    pub fn zero_or_more<P: Into<Parser<A>>>(&self, expr: P) -> Parser<A> {
        self.times(0, None, expr)
    }

    pub fn zero_or_more_fold<P, F>(&self, expr: P, fold: F) -> Parser<A>
    where
        P: Into<Parser<A>>,
        F: Fn(&str, A, A) -> A + Send + Sync + 'static,
    {
        self.times_fold(0, None, expr, fold)
    }

    /// Zero or one occurrence; the attribute passes through unchanged
    /// when the expression is absent.
    pub fn maybe<P: Into<Parser<A>>>(&self, expr: P) -> Parser<A> {
        self.times(0, Some(1), expr)
    }

    /// `expr (delimiter expr)*`, tolerating a trailing delimiter; each
    /// element's synthesized attribute replaces the accumulator.
    pub fn delimit<P, D>(&self, expr: P, delimiter: D) -> Parser<A>
    where
        P: Into<Parser<A>>,
        D: Into<Parser<A>>,
    {
        Parser::from_rule(Delimit::new(
            expr.into(),
            delimiter.into(),
            None,
            self.config(),
        ))
    }

    /// [`delimit`](Engine::delimit) with an explicit fold applied once
    /// per matched element.
    pub fn delimit_fold<P, D, F>(&self, expr: P, delimiter: D, fold: F) -> Parser<A>
    where
        P: Into<Parser<A>>,
        D: Into<Parser<A>>,
        F: Fn(&str, A, A) -> A + Send + Sync + 'static,
    {
        Parser::from_rule(Delimit::new(
            expr.into(),
            delimiter.into(),
            Some(Arc::new(fold)),
            self.config(),
        ))
    }

    /// Zero-width positive lookahead: succeeds, consuming nothing, iff
    /// `expr` matches here.
    pub fn lookahead<P: Into<Parser<A>>>(&self, expr: P) -> Parser<A> {
        Parser::from_rule(Lookahead::new(expr.into(), true))
    }

    /// Zero-width negative lookahead: succeeds, consuming nothing, iff
    /// `expr` does not match here.
    pub fn lookahead_not<P: Into<Parser<A>>>(&self, expr: P) -> Parser<A> {
        Parser::from_rule(Lookahead::new(expr.into(), false))
    }

    /// Zero-width attribute injection: always succeeds and installs
    /// `value` as the synthesized attribute, seeding inherited context
    /// for a sub-grammar.
    pub fn attr(&self, value: A) -> Parser<A> {
        Parser::from_rule(AttrOf::new(value))
    }

    /// Zero-width guard: succeeds with the attribute unchanged iff the
    /// predicate holds for the current attribute.
    pub fn cond<F>(&self, pred: F) -> Parser<A>
    where
        F: Fn(&A) -> bool + Send + Sync + 'static,
    {
        Parser::from_rule(Cond::new(Arc::new(pred)))
    }

    /// Semantic action: on success, recompute the synthesized attribute
    /// from `(matched_text, sub_synthesized, inherited_at_entry)`.
    pub fn action<P, F>(&self, expr: P, action: F) -> Parser<A>
    where
        P: Into<Parser<A>>,
        F: Fn(&str, A, A) -> A + Send + Sync + 'static,
    {
        Parser::from_rule(Bind::new(expr.into(), Arc::new(action)))
    }

    /// Reserved token under maximal munch: matches only when the
    /// longest registered key here is exactly `text`.
    pub fn key(&self, text: impl Into<String>) -> Parser<A> {
        Parser::from_rule(Key::new(text, self.config()))
    }

    /// Zero-width assertion that no registered key starts here.
    pub fn not_key(&self) -> Parser<A> {
        Parser::from_rule(NotKey::new(self.config()))
    }

    /// Keyword with a right-hand word boundary; see
    /// [`EqualsId`](crate::combinators::keyword::EqualsId) for the
    /// boundary rules.
    pub fn equals_id(&self, text: impl Into<String>) -> Parser<A> {
        Parser::from_rule(EqualsId::new(text, self.config()))
    }

    /// Signed decimal literal; the parsed value becomes the synthesized
    /// attribute through `A::from`.
    pub fn real(&self) -> Parser<A>
    where
        A: From<f64>,
    {
        Parser::from_rule(Real::new(A::from))
    }

    /// Signed decimal literal with an explicit value-to-attribute
    /// conversion, for attribute types without a `From<f64>`.
    pub fn real_map<F>(&self, convert: F) -> Parser<A>
    where
        F: Fn(f64) -> A + Send + Sync + 'static,
    {
        Parser::from_rule(Real::new(convert))
    }

    /// One line break: CRLF, CR, or LF, in that priority order.
    pub fn br(&self) -> Parser<A> {
        Parser::from_rule(LineBreak)
    }

    /// Zero-width end-of-input assertion.
    pub fn end(&self) -> Parser<A> {
        Parser::from_rule(End)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_engine_skips_nothing() {
        let r = Engine::<i32>::new();
        let p = r.then(("765", "pro"));
        assert_eq!(p.parse("765pro", 0, 0).unwrap().end, 6);
        assert!(p.parse("765 pro", 0, 0).is_none());
    }

    #[test]
    fn test_configured_ignore_is_shared_by_all_rules() {
        let r = Engine::<i32>::builder().ignore(" ").build();
        let seq = r.then(("765", "pro"));
        let rep = r.one_or_more("a");
        assert_eq!(seq.parse("765 pro", 0, 0).unwrap().end, 7);
        assert_eq!(rep.parse("a a", 0, 0).unwrap().end, 3);
    }

    #[test]
    fn test_failed_skip_consumes_nothing() {
        let r = Engine::<i32>::builder().ignore(" ").build();
        let p = r.then(("a", "b"));
        let m = p.parse("ab", 0, 0).unwrap();
        assert_eq!(m.end, 2);
        assert_eq!(m.span, "ab");
    }

    #[test]
    fn test_pattern_rejects_bad_syntax_at_construction() {
        let r = Engine::<i32>::new();
        let err = r.pattern("[a-").unwrap_err();
        let GrammarError::Pattern { pattern, .. } = err;
        assert_eq!(pattern, "[a-");
    }

    #[test]
    fn test_cloned_engine_observes_same_config() {
        let r = Engine::<i32>::builder().keys(["++"]).build();
        let other = r.clone();
        assert_eq!(other.key("++").parse("++", 0, 0).unwrap().end, 2);
    }
}
