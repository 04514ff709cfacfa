//! Zero-width guards, attribute injection, and semantic actions.

use crate::combinators::{FoldFn, PredFn};
use crate::parser::{span_between, Attribute, Match, Parse, Parser};

/// Zero-width lookahead.
///
/// Probes the wrapped parser at the current position without consuming
/// input; the inherited attribute is returned untouched, never the
/// probe's synthesized value. `positive: false` inverts the probe.
pub struct Lookahead<A> {
    inner: Parser<A>,
    positive: bool,
}

impl<A> Lookahead<A> {
    pub(crate) fn new(inner: Parser<A>, positive: bool) -> Self {
        Lookahead { inner, positive }
    }
}

impl<A: Attribute> Parse<A> for Lookahead<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        let hit = self.inner.parse(input, pos, attr.clone()).is_some();
        if hit != self.positive {
            return None;
        }
        Some(Match {
            span: span_between(input, pos, pos),
            end: pos,
            attr,
        })
    }
}

/// Zero-width attribute injection: always succeeds, installing a fixed
/// synthesized attribute and discarding the inherited one.
pub struct AttrOf<A> {
    value: A,
}

impl<A> AttrOf<A> {
    pub(crate) fn new(value: A) -> Self {
        AttrOf { value }
    }
}

impl<A: Attribute> Parse<A> for AttrOf<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, _attr: A) -> Option<Match<'i, A>> {
        Some(Match {
            span: span_between(input, pos, pos),
            end: pos,
            attr: self.value.clone(),
        })
    }
}

/// Zero-width guard on the threaded attribute: succeeds, attribute
/// unchanged, only when the predicate holds.
pub struct Cond<A> {
    pred: PredFn<A>,
}

impl<A> Cond<A> {
    pub(crate) fn new(pred: PredFn<A>) -> Self {
        Cond { pred }
    }
}

impl<A: Attribute> Parse<A> for Cond<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        if !(self.pred)(&attr) {
            return None;
        }
        Some(Match {
            span: span_between(input, pos, pos),
            end: pos,
            attr,
        })
    }
}

/// Semantic action.
///
/// On success the synthesized attribute is recomputed from the matched
/// text, the sub-parser's synthesized value, and the inherited attribute
/// at entry; the one place all three are visible together. Failure
/// propagates untouched.
pub struct Bind<A> {
    inner: Parser<A>,
    action: FoldFn<A>,
}

impl<A> Bind<A> {
    pub(crate) fn new(inner: Parser<A>, action: FoldFn<A>) -> Self {
        Bind { inner, action }
    }
}

impl<A: Attribute> Parse<A> for Bind<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        let m = self.inner.parse(input, pos, attr.clone())?;
        let Match { span, end, attr: synth } = m;
        Some(Match {
            span,
            end,
            attr: (self.action)(span, synth, attr),
        })
    }
}
