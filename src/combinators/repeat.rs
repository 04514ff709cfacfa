//! Bounded repetition and delimited lists.

use std::sync::Arc;

use crate::combinators::FoldFn;
use crate::engine::EngineConfig;
use crate::parser::{span_between, Attribute, Match, Parse, Parser};

/// Repeats a sub-parser between `min` and `max` times (`max: None` for
/// unbounded).
///
/// The accumulator starts as the inherited attribute. Each iteration
/// runs the sub-parser with the current accumulator as its inherited
/// value, then folds `(iteration_text, synthesized, accumulator)`; the
/// default fold replaces the accumulator with the synthesized value.
/// An ignore-skip runs after each successful iteration. Succeeds only
/// when the iteration count reached `min`; there is no partial match.
pub struct Times<A> {
    min: usize,
    max: Option<usize>,
    expr: Parser<A>,
    fold: Option<FoldFn<A>>,
    config: Arc<EngineConfig<A>>,
}

impl<A> Times<A> {
    pub(crate) fn new(
        min: usize,
        max: Option<usize>,
        expr: Parser<A>,
        fold: Option<FoldFn<A>>,
        config: Arc<EngineConfig<A>>,
    ) -> Self {
        Times {
            min,
            max,
            expr,
            fold,
            config,
        }
    }
}

impl<A: Attribute> Parse<A> for Times<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        let mut count = 0;
        let mut cur = pos;
        let mut acc = attr;
        while self.max.map_or(true, |max| count < max) {
            let Some(m) = self.expr.parse(input, cur, acc.clone()) else {
                break;
            };
            let Match { span, end, attr: synth } = m;
            acc = match &self.fold {
                Some(fold) => fold(span, synth, acc),
                None => synth,
            };
            cur = self.config.skip(input, end, &acc);
            count += 1;
        }
        if count < self.min {
            return None;
        }
        Some(Match {
            span: span_between(input, pos, cur),
            end: cur,
            attr: acc,
        })
    }
}

/// `expr (delimiter expr)*` with an ignore-skip between every token.
///
/// Requires at least one `expr`. A matched delimiter followed by a
/// failed `expr` is tolerated: the list backs off to the last position
/// recorded after the previous `expr`'s skip and succeeds with what was
/// matched so far. The fold runs once per matched `expr`; delimiter
/// attributes are discarded.
pub struct Delimit<A> {
    expr: Parser<A>,
    delimiter: Parser<A>,
    fold: Option<FoldFn<A>>,
    config: Arc<EngineConfig<A>>,
}

impl<A> Delimit<A> {
    pub(crate) fn new(
        expr: Parser<A>,
        delimiter: Parser<A>,
        fold: Option<FoldFn<A>>,
        config: Arc<EngineConfig<A>>,
    ) -> Self {
        Delimit {
            expr,
            delimiter,
            fold,
            config,
        }
    }

    fn fold_step<'i>(&self, m: Match<'i, A>, acc: A) -> A {
        let Match { span, attr: synth, .. } = m;
        match &self.fold {
            Some(fold) => fold(span, synth, acc),
            None => synth,
        }
    }
}

impl<A: Attribute> Parse<A> for Delimit<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        let first = self.expr.parse(input, pos, attr.clone())?;
        let first_end = first.end;
        let mut acc = self.fold_step(first, attr);
        let mut good = self.config.skip(input, first_end, &acc);
        loop {
            let Some(delim) = self.delimiter.parse(input, good, acc.clone()) else {
                break;
            };
            let after_delim = self.config.skip(input, delim.end, &acc);
            let Some(m) = self.expr.parse(input, after_delim, acc.clone()) else {
                // Trailing delimiter: back off to the last good position
                break;
            };
            let end = m.end;
            acc = self.fold_step(m, acc);
            good = self.config.skip(input, end, &acc);
        }
        Some(Match {
            span: span_between(input, pos, good),
            end: good,
            attr: acc,
        })
    }
}
