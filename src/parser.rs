//! Core parser abstraction
//!
//! Everything a grammar is built from is normalized to one shape: a rule
//! that, given an input string, a byte position, and an inherited
//! attribute, either consumes a span and synthesizes an attribute or
//! yields no match. The [`Parse`] trait is that shape; [`Parser`] is a
//! cheap-to-clone immutable handle around a rule object, so one
//! constructed grammar graph can be shared and invoked freely.
//!
//! Three construction origins feed into this shape:
//!
//! 1. Literal strings, lifted via `From<&str>` / `From<String>`
//! 2. Compiled [`regex::Regex`] patterns, lifted via `From<Regex>`
//! 3. Combinator output from [`Engine`](crate::engine::Engine), already
//!    conforming
//!
//! Lifting happens implicitly at every combinator boundary, so literals
//! can be handed to combinators directly:
//!
//! ```rust
//! let r = Engine::<i32>::new();
//! let p = r.then(("(", inner, ")"));
//! ```

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::combinators::atom::{Literal, Pattern};

/// Bound required of attribute types flowing through a grammar.
///
/// Blanket-implemented; any clonable thread-safe type qualifies. One
/// concrete attribute type is shared by all rules of a grammar
/// instantiation.
pub trait Attribute: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Attribute for T {}

/// A successful match.
///
/// `span` is the full consumed text from the invocation start to `end`,
/// inter-token skips included. `attr` is the synthesized attribute.
/// Failure carries no data; the overall outcome is `Option<Match>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'i, A> {
    /// Consumed text, borrowed from the input.
    pub span: &'i str,
    /// Byte position just past the consumed text.
    pub end: usize,
    /// Synthesized attribute.
    pub attr: A,
}

/// A rule: attempt to match at a position, given an inherited attribute.
///
/// Implementations hold no per-call state; a rule may be invoked
/// concurrently from multiple threads.
pub trait Parse<A>: Send + Sync {
    /// Match at `pos`, threading `attr` as the inherited attribute.
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>>;
}

/// An immutable, shareable parser handle.
///
/// Built once during grammar setup and reused across invocations.
/// Cloning is cheap (reference-counted) and clones observe the same rule.
pub struct Parser<A> {
    rule: Arc<dyn Parse<A>>,
}

impl<A> Parser<A> {
    pub(crate) fn from_rule<R>(rule: R) -> Self
    where
        R: Parse<A> + 'static,
    {
        Parser {
            rule: Arc::new(rule),
        }
    }

    /// Match `input` at `pos` with `attr` as the initial inherited
    /// attribute.
    ///
    /// Returns the consumed span, end position, and synthesized attribute
    /// on success, `None` on failure. Identical invocations yield
    /// identical results.
    pub fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        self.rule.parse(input, pos, attr)
    }
}

impl<A> Clone for Parser<A> {
    fn clone(&self) -> Self {
        Parser {
            rule: Arc::clone(&self.rule),
        }
    }
}

impl<A> fmt::Debug for Parser<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

impl<A: Attribute> Parse<A> for Parser<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        Parser::parse(self, input, pos, attr)
    }
}

impl<A: Attribute> From<&str> for Parser<A> {
    fn from(text: &str) -> Self {
        Parser::from_rule(Literal::new(text))
    }
}

impl<A: Attribute> From<String> for Parser<A> {
    fn from(text: String) -> Self {
        Parser::from_rule(Literal::new(text))
    }
}

impl<A: Attribute> From<Regex> for Parser<A> {
    fn from(regex: Regex) -> Self {
        Parser::from_rule(Pattern::new(regex))
    }
}

impl<A> From<&Parser<A>> for Parser<A> {
    fn from(parser: &Parser<A>) -> Self {
        parser.clone()
    }
}

/// Conversion of combinator argument lists into parser vectors.
///
/// Implemented for tuples of mixed literal/pattern/parser arguments
/// (arities 1 through 8) and for `Vec<Parser<A>>`, so the variadic
/// combinators accept their sub-expressions directly:
/// `r.choice(("765", "346"))`.
pub trait IntoParsers<A> {
    fn into_parsers(self) -> Vec<Parser<A>>;
}

impl<A> IntoParsers<A> for Vec<Parser<A>> {
    fn into_parsers(self) -> Vec<Parser<A>> {
        self
    }
}

macro_rules! tuple_into_parsers {
    ($($p:ident),+) => {
        impl<A: Attribute, $($p: Into<Parser<A>>),+> IntoParsers<A> for ($($p,)+) {
            fn into_parsers(self) -> Vec<Parser<A>> {
                #[allow(non_snake_case)]
                let ($($p,)+) = self;
                vec![$($p.into()),+]
            }
        }
    };
}

tuple_into_parsers!(P1);
tuple_into_parsers!(P1, P2);
tuple_into_parsers!(P1, P2, P3);
tuple_into_parsers!(P1, P2, P3, P4);
tuple_into_parsers!(P1, P2, P3, P4, P5);
tuple_into_parsers!(P1, P2, P3, P4, P5, P6);
tuple_into_parsers!(P1, P2, P3, P4, P5, P6, P7);
tuple_into_parsers!(P1, P2, P3, P4, P5, P6, P7, P8);

/// Slice `input` between two byte positions, tolerating out-of-range
/// positions from callers by degrading to an empty span.
pub(crate) fn span_between<'i>(input: &'i str, start: usize, end: usize) -> &'i str {
    input.get(start..end).unwrap_or("")
}
