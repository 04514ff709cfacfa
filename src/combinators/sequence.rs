//! Ordered sequence and first-wins choice.

use std::sync::Arc;

use crate::engine::EngineConfig;
use crate::parser::{span_between, Attribute, Match, Parse, Parser};

/// Fixed ordered list of sub-parsers.
///
/// Each element starts at the previous element's end position after an
/// ignore-skip and inherits the previous element's synthesized
/// attribute (left-to-right threading). The skip runs after every
/// element, including the last, but never before the first. A failed
/// element fails the whole sequence.
pub struct Sequence<A> {
    items: Vec<Parser<A>>,
    config: Arc<EngineConfig<A>>,
}

impl<A> Sequence<A> {
    pub(crate) fn new(items: Vec<Parser<A>>, config: Arc<EngineConfig<A>>) -> Self {
        Sequence { items, config }
    }
}

impl<A: Attribute> Parse<A> for Sequence<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        let mut cur = pos;
        let mut attr = attr;
        for item in &self.items {
            let Match { end, attr: next, .. } = item.parse(input, cur, attr)?;
            attr = next;
            cur = self.config.skip(input, end, &attr);
        }
        Some(Match {
            span: span_between(input, pos, cur),
            end: cur,
            attr,
        })
    }
}

/// Ordered alternatives.
///
/// Tries each alternative at the same start position with the same
/// inherited attribute and returns the first success; deterministic
/// first-wins, no cross-alternative state.
pub struct Choice<A> {
    alternatives: Vec<Parser<A>>,
}

impl<A> Choice<A> {
    pub(crate) fn new(alternatives: Vec<Parser<A>>) -> Self {
        Choice { alternatives }
    }
}

impl<A: Attribute> Parse<A> for Choice<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        for alternative in &self.alternatives {
            if let Some(m) = alternative.parse(input, pos, attr.clone()) {
                return Some(m);
            }
        }
        None
    }
}
