//! # matcha
//!
//! Attribute-threading parser combinators for hand-rolled grammars.
//!
//! matcha is a small engine for assembling recursive-descent parsers
//! over strings without a separate grammar-compiler step. Every parser
//! produces two things at once: the consumed span, and a flowed
//! *attribute* (an inherited/synthesized value pair in the
//! attribute-grammar sense), so a grammar computes its result while it
//! matches.
//!
//! # Core concepts
//!
//! ## 1. Parsers
//!
//! A [`Parser`] is an immutable, shareable unit of behavior:
//! `(input, position, inherited attribute) -> Option<Match>`. Literal
//! strings and compiled [`regex::Regex`] patterns lift into parsers
//! implicitly at every combinator boundary, so grammars read naturally:
//!
//! ```rust
//! let assignment = r.then((identifier, "=", expression, r.end()));
//! ```
//!
//! ## 2. Engines
//!
//! An [`Engine`] is configured once (an optional ignore parser skipped
//! between tokens, plus an optional reserved-key set) and every rule it
//! builds observes that same policy. Combinators are engine methods:
//! sequence, choice, repetition, delimited lists, lookahead,
//! conditionals, semantic actions, keyword helpers, and numeric and
//! line-break atoms.
//!
//! ## 3. Attribute flow
//!
//! Sequences thread each element's synthesized attribute into the next
//! element as its inherited value; repetition and delimited lists fold
//! iteration results into an accumulator; [`Engine::action`] is the
//! extension point where matched text, sub-result, and inherited
//! context are all visible for building ASTs or computed values.
//!
//! ## 4. Recursive rules
//!
//! [`Engine::letrec`] and [`Engine::letrec_family`] build self- and
//! mutually-recursive rule families from definitions that receive lazy
//! handles to the rules being defined, resolved on first use during
//! matching rather than eagerly at construction.
//!
//! # Example
//!
//! A left-associative adder with whitespace skipping:
//!
//! ```rust
//! let r = Engine::<f64>::builder().ignore(" ").build();
//! let sum = r.delimit_fold(r.real(), "+", |_, n, acc| acc + n);
//! let m = sum.parse("765 + 1 + 2", 0, 0.0).unwrap();
//! assert_eq!(m.attr, 768.0);
//! assert_eq!(m.end, 11);
//! ```
//!
//! # Failure model
//!
//! Matching has a single failure signal: `None`. No positions, no
//! messages, no recovery; a failed alternative simply lets the next one
//! try. The only error type in the crate, [`GrammarError`], covers
//! construction-time misuse (a malformed pattern), which fails fast at
//! setup instead of surfacing during matching.

pub mod combinators;
pub mod engine;
pub mod error;
pub mod keywords;
pub mod parser;
pub mod recurse;

pub use engine::{Engine, EngineBuilder};
pub use error::GrammarError;
pub use keywords::KeywordTrie;
pub use parser::{Attribute, IntoParsers, Match, Parse, Parser};
pub use recurse::RuleDef;
