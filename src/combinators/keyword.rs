//! Reserved-token recognition against the engine's keyword trie.

use std::sync::Arc;

use crate::engine::EngineConfig;
use crate::parser::{span_between, Attribute, Match, Parse};

/// Exact reserved token under maximal munch.
///
/// Succeeds only when the longest registered key at the position is
/// exactly the requested token, so `++` never matches as a prefix of a
/// registered `+++`. Without a configured key set this never matches.
pub struct Key<A> {
    text: String,
    config: Arc<EngineConfig<A>>,
}

impl<A> Key<A> {
    pub(crate) fn new(text: impl Into<String>, config: Arc<EngineConfig<A>>) -> Self {
        Key {
            text: text.into(),
            config,
        }
    }
}

impl<A: Attribute> Parse<A> for Key<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        let trie = self.config.keywords.as_ref()?;
        let longest = trie.longest_match(input, pos)?;
        if longest != self.text {
            return None;
        }
        let end = pos + longest.len();
        Some(Match {
            span: longest,
            end,
            attr,
        })
    }
}

/// Zero-width assertion that no registered key starts here.
///
/// Without a configured key set this always succeeds.
pub struct NotKey<A> {
    config: Arc<EngineConfig<A>>,
}

impl<A> NotKey<A> {
    pub(crate) fn new(config: Arc<EngineConfig<A>>) -> Self {
        NotKey { config }
    }
}

impl<A: Attribute> Parse<A> for NotKey<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        if let Some(trie) = &self.config.keywords {
            if trie.matches_at(input, pos) {
                return None;
            }
        }
        Some(Match {
            span: span_between(input, pos, pos),
            end: pos,
            attr,
        })
    }
}

/// Identifier-style keyword with a right-hand word boundary.
///
/// Matches the keyword literally, then checks the position just past it:
/// end of input always satisfies the boundary; with neither an ignore
/// pattern nor a key set configured there is no boundary concept and any
/// literal match is accepted; an ignore pattern satisfies the boundary
/// by actually consuming something (which then extends the match); a key
/// set satisfies it when a registered key starts there. Otherwise the
/// keyword was only a prefix of a longer token and the match fails.
pub struct EqualsId<A> {
    text: String,
    config: Arc<EngineConfig<A>>,
}

impl<A> EqualsId<A> {
    pub(crate) fn new(text: impl Into<String>, config: Arc<EngineConfig<A>>) -> Self {
        EqualsId {
            text: text.into(),
            config,
        }
    }
}

impl<A: Attribute> Parse<A> for EqualsId<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        let rest = input.get(pos..)?;
        if !rest.starts_with(&self.text) {
            return None;
        }
        let end = pos + self.text.len();
        if end == input.len() {
            return Some(Match {
                span: span_between(input, pos, end),
                end,
                attr,
            });
        }
        if self.config.ignore.is_none() && self.config.keywords.is_none() {
            return Some(Match {
                span: span_between(input, pos, end),
                end,
                attr,
            });
        }
        if self.config.ignore.is_some() {
            let after = self.config.skip(input, end, &attr);
            if after > end {
                return Some(Match {
                    span: span_between(input, pos, after),
                    end: after,
                    attr,
                });
            }
        }
        if let Some(trie) = &self.config.keywords {
            if trie.matches_at(input, end) {
                return Some(Match {
                    span: span_between(input, pos, end),
                    end,
                    attr,
                });
            }
        }
        None
    }
}
