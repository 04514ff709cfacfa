//! Combinator rule objects
//!
//! Each combinator is a named rule struct implementing
//! [`Parse`](crate::parser::Parse); the methods on
//! [`Engine`](crate::engine::Engine) construct them and hand back opaque
//! [`Parser`](crate::parser::Parser) handles. The structs are grouped by
//! family:
//!
//! - [`atom`]: literal, compiled pattern, numeric and line-break atoms,
//!   end-of-input assertion
//! - [`sequence`]: ordered sequence and first-wins choice
//! - [`repeat`]: bounded repetition and delimited lists
//! - [`predicate`]: zero-width guards, attribute injection, semantic
//!   actions
//! - [`keyword`]: reserved-token recognition against the engine's trie

use std::sync::Arc;

pub mod atom;
pub mod keyword;
pub mod predicate;
pub mod repeat;
pub mod sequence;

/// Fold applied to each successful sub-match:
/// `(matched_text, synthesized, accumulator) -> new_accumulator`.
pub(crate) type FoldFn<A> = Arc<dyn Fn(&str, A, A) -> A + Send + Sync>;

/// Attribute predicate for conditional matching.
pub(crate) type PredFn<A> = Arc<dyn Fn(&A) -> bool + Send + Sync>;
