//! Construction-time errors.
//!
//! Matching itself never produces an error value: a parser that cannot
//! consume input at a position simply yields no match. The only failures
//! surfaced as errors are grammar construction mistakes, caught once at
//! setup before any matching runs.

use std::fmt;

/// Error raised while building a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A pattern string was rejected by the regex engine.
    Pattern { pattern: String, message: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Pattern { pattern, message } => {
                write!(f, "invalid pattern '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for GrammarError {}
