//! Fixed-point construction for recursive rules
//!
//! A recursive grammar rule refers to itself, or to siblings defined
//! later, before those parsers exist. Building such a family eagerly
//! would recurse forever at construction time, so each member is
//! represented by a deferred slot: a parser handle whose target is
//! filled in once the defining closure returns. The slot resolves its
//! target only when it is actually invoked during matching, so stack
//! growth happens at the natural recursion depth of the match, never at
//! construction.
//!
//! ```rust
//! // X = "(" X? ")"
//! let r = Engine::<i32>::new();
//! let parens = r.letrec(|x| r.then(("(", r.maybe(x), ")")));
//! assert_eq!(parens.parse("((()))", 0, 0).unwrap().end, 6);
//! ```

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::engine::Engine;
use crate::parser::{Attribute, Match, Parse, Parser};

/// One member of a mutually-recursive family: receives lazy handles to
/// every member (itself included) and returns the member's body.
pub type RuleDef<'a, A> = Box<dyn FnOnce(&[Parser<A>]) -> Parser<A> + 'a>;

/// Deferred slot standing in for a parser that is still being defined.
/// Invoking a slot whose definition never completed matches nothing.
struct RecSlot<A> {
    cell: Arc<OnceCell<Parser<A>>>,
}

impl<A: Attribute> Parse<A> for RecSlot<A> {
    fn parse<'i>(&self, input: &'i str, pos: usize, attr: A) -> Option<Match<'i, A>> {
        let target = self.cell.get()?;
        target.parse(input, pos, attr)
    }
}

fn slot<A: Attribute>() -> (Parser<A>, Arc<OnceCell<Parser<A>>>) {
    let cell = Arc::new(OnceCell::new());
    let parser = Parser::from_rule(RecSlot {
        cell: Arc::clone(&cell),
    });
    (parser, cell)
}

impl<A: Attribute> Engine<A> {
    /// Build a self-recursive rule.
    ///
    /// The closure receives a lazy handle to the rule being defined and
    /// returns its body; the handle may be embedded anywhere in the
    /// body, including forward of material not yet constructed.
    pub fn letrec<F>(&self, def: F) -> Parser<A>
    where
        F: FnOnce(Parser<A>) -> Parser<A>,
    {
        let (parser, cell) = slot();
        let built = def(parser);
        let _ = cell.set(built.clone());
        built
    }

    /// Build a family of mutually-recursive rules and return the first
    /// as the entry point.
    ///
    /// Every definition receives lazy handles to all members, so a rule
    /// body may reference rules defined later with no separate
    /// declare-before-define step. An empty family yields a parser that
    /// never matches.
    pub fn letrec_family<'a>(&self, defs: Vec<RuleDef<'a, A>>) -> Parser<A> {
        let (parsers, cells): (Vec<_>, Vec<_>) = defs.iter().map(|_| slot()).unzip();
        let mut entry = None;
        for (def, cell) in defs.into_iter().zip(&cells) {
            let built = def(&parsers);
            let _ = cell.set(built.clone());
            if entry.is_none() {
                entry = Some(built);
            }
        }
        entry.unwrap_or_else(|| slot().0)
    }
}
