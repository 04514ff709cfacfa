//! Atomic rules: literals, compiled patterns, numbers, line breaks, and
//! the end-of-input assertion.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::{span_between, Attribute, Match, Parse};

/// Signed decimal literal with optional fraction and exponent.
static REAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
});

/// One line break; CRLF is preferred over a lone CR or LF.
static LINE_BREAK_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Exact-text match. Attribute passes through unchanged.
pub struct Literal {
    text: String,
}

impl Literal {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Literal { text: text.into() }
    }
}

impl<A: Attribute> Parse<A> for Literal {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        let rest = input.get(pos..)?;
        if !rest.starts_with(&self.text) {
            return None;
        }
        let end = pos + self.text.len();
        Some(Match {
            span: &input[pos..end],
            end,
            attr,
        })
    }
}

/// Compiled-pattern match, anchored at the current position. Attribute
/// passes through unchanged.
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub(crate) fn new(regex: Regex) -> Self {
        Pattern { regex }
    }
}

impl<A: Attribute> Parse<A> for Pattern {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        if pos > input.len() || !input.is_char_boundary(pos) {
            return None;
        }
        let found = self.regex.find_at(input, pos)?;
        if found.start() != pos {
            return None;
        }
        Some(Match {
            span: found.as_str(),
            end: found.end(),
            attr,
        })
    }
}

/// Signed decimal literal; synthesizes the parsed value.
pub struct Real<A> {
    convert: Arc<dyn Fn(f64) -> A + Send + Sync>,
}

impl<A> Real<A> {
    pub(crate) fn new<F>(convert: F) -> Self
    where
        F: Fn(f64) -> A + Send + Sync + 'static,
    {
        Real {
            convert: Arc::new(convert),
        }
    }
}

impl<A: Attribute> Parse<A> for Real<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, _attr: A) -> Option<Match<'i, A>> {
        if pos > input.len() || !input.is_char_boundary(pos) {
            return None;
        }
        let found = REAL_PATTERN.find_at(input, pos)?;
        if found.start() != pos {
            return None;
        }
        let value = found.as_str().parse::<f64>().ok()?;
        Some(Match {
            span: found.as_str(),
            end: found.end(),
            attr: (self.convert)(value),
        })
    }
}

/// One line break: CRLF, CR, or LF, in that priority order. Attribute
/// passes through unchanged.
pub struct LineBreak;

impl<A: Attribute> Parse<A> for LineBreak {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        if pos > input.len() || !input.is_char_boundary(pos) {
            return None;
        }
        let found = LINE_BREAK_PATTERN.find_at(input, pos)?;
        if found.start() != pos {
            return None;
        }
        Some(Match {
            span: found.as_str(),
            end: found.end(),
            attr,
        })
    }
}

/// Zero-width end-of-input assertion.
pub struct End;

impl<A: Attribute> Parse<A> for End {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        if pos == input.len() {
            Some(Match {
                span: span_between(input, pos, pos),
                end: pos,
                attr,
            })
        } else {
            None
        }
    }
}
