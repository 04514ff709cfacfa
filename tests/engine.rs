//! Integration tests for the combinator engine.
//!
//! These cover the normative position and attribute tables for every
//! combinator, including the ignore-skip and keyword-boundary
//! interactions that are easy to get subtly wrong.

use matcha::{Attribute, Engine, Parser};
use regex::Regex;

fn end_of<A: Attribute>(parser: &Parser<A>, input: &str, attr: A) -> Option<usize> {
    parser.parse(input, 0, attr).map(|m| m.end)
}

fn result_of<A: Attribute>(parser: &Parser<A>, input: &str, attr: A) -> Option<(usize, A)> {
    parser.parse(input, 0, attr).map(|m| (m.end, m.attr))
}

// -------- literals and patterns --------

#[test]
fn test_literal_match() {
    let r = Engine::<i32>::new();
    let p = r.literal("765");
    assert_eq!(end_of(&p, "765", 0), Some(3));
    assert_eq!(end_of(&p, "765pro", 0), Some(3));
    assert_eq!(end_of(&p, "961", 0), None);
    assert_eq!(end_of(&p, "", 0), None);
}

#[test]
fn test_literal_at_offset() {
    let r = Engine::<i32>::new();
    let p = r.literal("pro");
    let m = p.parse("765pro", 3, 0).unwrap();
    assert_eq!(m.span, "pro");
    assert_eq!(m.end, 6);
}

#[test]
fn test_pattern_match() {
    let r = Engine::<i32>::new();
    let p = r.pattern("ab+").unwrap();
    assert_eq!(end_of(&p, "abbbbb", 0), Some(6));
    assert_eq!(end_of(&p, "ab", 0), Some(2));
    assert_eq!(end_of(&p, "a", 0), None);
}

#[test]
fn test_precompiled_pattern_lifts() {
    let r = Engine::<i32>::new();
    let p = r.then((Regex::new("[0-9]+").unwrap(), "px"));
    assert_eq!(end_of(&p, "42px", 0), Some(4));
    assert_eq!(end_of(&p, "px", 0), None);
}

// -------- sequence --------

#[test]
fn test_then_positions() {
    let r = Engine::<i32>::new();
    let p = r.then(("765", "pro"));
    assert_eq!(end_of(&p, "765pro", 0), Some(6));
    assert_eq!(end_of(&p, "961pro", 0), None);
    assert_eq!(end_of(&p, "765ab", 0), None);
    assert_eq!(end_of(&p, "", 0), None);
}

#[test]
fn test_then_with_ignore() {
    let r = Engine::<i32>::builder().ignore(" ").build();
    let p = r.then(("765", "pro"));
    assert_eq!(end_of(&p, "765pro", 0), Some(6));
    assert_eq!(end_of(&p, "765 pro", 0), Some(7));
    // The skip after the last element consumes the trailing space
    assert_eq!(end_of(&p, "765 pro ", 0), Some(8));
}

#[test]
fn test_then_span_includes_skipped_material() {
    let r = Engine::<i32>::builder().ignore(" ").build();
    let p = r.then(("765", "pro"));
    let m = p.parse("765 pro ", 0, 0).unwrap();
    assert_eq!(m.span, "765 pro ");
}

#[test]
fn test_then_threads_attributes_left_to_right() {
    let r = Engine::<i64>::new();
    let p = r.then((
        r.attr(5),
        r.action("a", |_, _, inherited| inherited * 2),
        r.action("b", |_, _, inherited| inherited + 1),
    ));
    assert_eq!(result_of(&p, "ab", 0), Some((2, 11)));
}

// -------- choice --------

#[test]
fn test_choice_first_wins() {
    let r = Engine::<i32>::new();
    let p = r.choice(("765", "346"));
    assert_eq!(end_of(&p, "765", 0), Some(3));
    assert_eq!(end_of(&p, "346", 0), Some(3));
    assert_eq!(end_of(&p, "961", 0), None);

    // Declaration order decides, not match length
    let q = r.choice(("a", "ab"));
    assert_eq!(end_of(&q, "abc", 0), Some(1));
}

#[test]
fn test_choice_gives_each_alternative_the_same_inherited_attr() {
    let r = Engine::<i64>::new();
    let p = r.choice((
        r.then(("x", r.cond(|a| *a == 7))),
        r.action("a", |_, _, inherited| inherited + 1),
    ));
    // First alternative fails on the text, second sees the original attr
    assert_eq!(result_of(&p, "a", 7), Some((1, 8)));
}

// -------- repetition --------

#[test]
fn test_times_bounded() {
    let r = Engine::<i32>::new();
    let p = r.times(2, Some(4), "a");
    assert_eq!(end_of(&p, "aaa", 0), Some(3));
    assert_eq!(end_of(&p, "aa", 0), Some(2));
    assert_eq!(end_of(&p, "aaaa", 0), Some(4));
    // Stops at the upper bound rather than consuming the fifth
    assert_eq!(end_of(&p, "aaaaa", 0), Some(4));
    assert_eq!(end_of(&p, "a", 0), None);
}

#[test]
fn test_times_unbounded() {
    let r = Engine::<i32>::new();
    let p = r.times(2, None, "a");
    assert_eq!(end_of(&p, "aa", 0), Some(2));
    assert_eq!(end_of(&p, "aaaaa", 0), Some(5));
    assert_eq!(end_of(&p, "a", 0), None);
}

#[test]
fn test_times_with_ignore() {
    let r = Engine::<i32>::builder().ignore(" ").build();
    let p = r.times(2, Some(4), "a");
    assert_eq!(end_of(&p, "aaa", 0), Some(3));
    assert_eq!(end_of(&p, "a aa", 0), Some(4));
    assert_eq!(end_of(&p, "aa a", 0), Some(4));
    assert_eq!(end_of(&p, "a a a ", 0), Some(6));
}

#[test]
fn test_times_fold_over_matched_text() {
    let r = Engine::<String>::new();
    let p = r.times_fold(2, Some(4), r.pattern("[a-z]").unwrap(), |text, _, acc| {
        format!("{text}{acc}")
    });
    assert_eq!(
        result_of(&p, "abc", String::new()),
        Some((3, "cba".to_string()))
    );
}

#[test]
fn test_times_fold_over_synthesized_values() {
    let r = Engine::<i64>::new();
    let digit = r.action(r.pattern("[1-9]").unwrap(), |text, _, _| {
        text.parse().unwrap()
    });
    let p = r.times_fold(2, Some(4), digit, |_, value, sum| sum + value);
    assert_eq!(result_of(&p, "123", 0), Some((3, 6)));
}

#[test]
fn test_at_least() {
    let r = Engine::<i32>::new();
    let p = r.at_least(2, "a");
    assert_eq!(end_of(&p, "aa", 0), Some(2));
    assert_eq!(end_of(&p, "aaaaa", 0), Some(5));
    assert_eq!(end_of(&p, "a", 0), None);
}

#[test]
fn test_at_most() {
    let r = Engine::<i32>::new();
    let p = r.at_most(4, "a");
    assert_eq!(end_of(&p, "aaa", 0), Some(3));
    assert_eq!(end_of(&p, "aaaa", 0), Some(4));
    assert_eq!(end_of(&p, "aaaaa", 0), Some(4));
    assert_eq!(end_of(&p, "", 0), Some(0));
}

#[test]
fn test_one_or_more() {
    let r = Engine::<i32>::new();
    let p = r.one_or_more("a");
    assert_eq!(end_of(&p, "aaa", 0), Some(3));
    assert_eq!(end_of(&p, "a", 0), Some(1));
    assert_eq!(end_of(&p, "", 0), None);
}

#[test]
fn test_zero_or_more() {
    let r = Engine::<i32>::new();
    let p = r.zero_or_more("a");
    assert_eq!(end_of(&p, "aaa", 0), Some(3));
    assert_eq!(end_of(&p, "a", 0), Some(1));
    assert_eq!(end_of(&p, "", 0), Some(0));
}

#[test]
fn test_maybe() {
    let r = Engine::<i32>::new();
    let p = r.maybe("a");
    assert_eq!(end_of(&p, "a", 0), Some(1));
    assert_eq!(end_of(&p, "aa", 0), Some(1));
    assert_eq!(end_of(&p, "", 0), Some(0));
}

#[test]
fn test_maybe_passes_attribute_through_when_absent() {
    let r = Engine::<i64>::new();
    let p = r.maybe(r.attr(99));
    assert_eq!(result_of(&p, "", 42), Some((0, 99)));
    let q = r.maybe("a");
    assert_eq!(result_of(&q, "", 42), Some((0, 42)));
}

// -------- delimited lists --------

#[test]
fn test_delimit_positions() {
    let r = Engine::<i32>::new();
    let p = r.delimit(r.pattern("[a-z]").unwrap(), ",");
    assert_eq!(end_of(&p, "a", 0), Some(1));
    assert_eq!(end_of(&p, "a,b,c", 0), Some(5));
    // Trailing delimiter is tolerated, not consumed
    assert_eq!(end_of(&p, "a,b,", 0), Some(3));
    assert_eq!(end_of(&p, "", 0), None);
    assert_eq!(end_of(&p, ",", 0), None);
}

#[test]
fn test_delimit_with_ignore() {
    let r = Engine::<i32>::builder().ignore(" ").build();
    let p = r.delimit(r.pattern("[a-z]").unwrap(), ",");
    assert_eq!(end_of(&p, "a,a", 0), Some(3));
    assert_eq!(end_of(&p, "a ,a", 0), Some(4));
    assert_eq!(end_of(&p, "a, a", 0), Some(4));
    assert_eq!(end_of(&p, "a,a ", 0), Some(4));
    assert_eq!(end_of(&p, "a,a ,", 0), Some(4));
    assert_eq!(end_of(&p, "a , a ,", 0), Some(6));
}

#[test]
fn test_delimit_fold_sums_elements() {
    let r = Engine::<f64>::new();
    let p = r.delimit_fold(r.real(), "+", |_, value, sum| sum + value);
    assert_eq!(result_of(&p, "765", 0.0), Some((3, 765.0)));
    assert_eq!(result_of(&p, "765+346", 0.0), Some((7, 1111.0)));
    assert_eq!(result_of(&p, "765+1+2", 0.0), Some((7, 768.0)));
}

#[test]
fn test_delimit_fold_over_matched_text() {
    let r = Engine::<String>::new();
    let number = r.real_map(|_| String::new());
    let p = r.delimit_fold(number, "+", |text, _, acc| format!("{acc}{text}"));
    assert_eq!(
        result_of(&p, "765+1+2", String::new()),
        Some((7, "76512".to_string()))
    );
}

// -------- lookahead --------

#[test]
fn test_lookahead_consumes_nothing() {
    let r = Engine::<i32>::new();
    let p = r.then(("765", r.lookahead("pro")));
    assert_eq!(end_of(&p, "765pro", 0), Some(3));
    assert_eq!(end_of(&p, "765pr", 0), None);
    assert_eq!(end_of(&p, "961pro", 0), None);
}

#[test]
fn test_lookahead_not() {
    let r = Engine::<i32>::new();
    let p = r.then(("765", r.lookahead_not("aaa")));
    assert_eq!(end_of(&p, "765pro", 0), Some(3));
    assert_eq!(end_of(&p, "765aaa", 0), None);
    assert_eq!(end_of(&p, "961pro", 0), None);
}

#[test]
fn test_lookahead_preserves_inherited_attribute() {
    let r = Engine::<i64>::new();
    let probe = r.action("x", |_, _, _| 999);
    let p = r.lookahead(probe);
    // The probe's synthesized value never leaks out
    assert_eq!(result_of(&p, "x", 7), Some((0, 7)));
}

// -------- attribute injection, guards, actions --------

#[test]
fn test_attr_injects_value() {
    let r = Engine::<i64>::new();
    let p = r.attr(27);
    assert_eq!(result_of(&p, "", 0), Some((0, 27)));
    assert_eq!(result_of(&p, "anything", 0), Some((0, 27)));
}

#[test]
fn test_cond_guards_on_attribute() {
    let r = Engine::<i64>::new();
    let p = r.cond(|a| *a == 27);
    assert_eq!(result_of(&p, "", 27), Some((0, 27)));
    assert_eq!(result_of(&p, "", 29), None);
}

#[test]
fn test_action_sees_text_and_inherited() {
    let r = Engine::<String>::new();
    let p = r.action("765", |text, _, _| text.to_string());
    assert_eq!(result_of(&p, "765", String::new()), Some((3, "765".into())));

    let r = Engine::<i64>::new();
    let q = r.action("765", |_, _, inherited| inherited * inherited);
    assert_eq!(result_of(&q, "765", 29), Some((3, 841)));
    assert_eq!(result_of(&q, "961", 29), None);
}

// -------- keyword recognition --------

fn keyed() -> Engine<i32> {
    Engine::builder().keys(["++", "+++", "-"]).build()
}

#[test]
fn test_key_requires_exact_longest_match() {
    let r = keyed();
    assert_eq!(end_of(&r.key("++"), "++", 0), Some(2));
    assert_eq!(end_of(&r.key("-"), "-", 0), Some(1));
    // The longest key here is "+++", so "++" must not match
    assert_eq!(end_of(&r.key("++"), "+++", 0), None);
    assert_eq!(end_of(&r.key("++"), "+", 0), None);
}

#[test]
fn test_key_without_configured_keys_never_matches() {
    let r = Engine::<i32>::new();
    assert_eq!(end_of(&r.key("++"), "++", 0), None);
}

#[test]
fn test_not_key() {
    let r = keyed();
    let p = r.not_key();
    assert_eq!(end_of(&p, "+", 0), Some(0));
    assert_eq!(end_of(&p, "a", 0), Some(0));
    assert_eq!(end_of(&p, "++", 0), None);
    assert_eq!(end_of(&p, "-", 0), None);
    assert_eq!(end_of(&p, "+++", 0), None);
}

#[test]
fn test_not_key_without_configured_keys_always_succeeds() {
    let r = Engine::<i32>::new();
    assert_eq!(end_of(&r.not_key(), "++", 0), Some(0));
}

#[test]
fn test_equals_id_without_boundary_concept() {
    // No ignore, no keys: any literal match is accepted
    let r = Engine::<i32>::new();
    let p = r.equals_id("key");
    assert_eq!(end_of(&p, "key", 0), Some(3));
    assert_eq!(end_of(&p, "key ", 0), Some(3));
    assert_eq!(end_of(&p, "keys", 0), Some(3));
    assert_eq!(end_of(&p, "key++", 0), Some(3));
    assert_eq!(end_of(&p, "key+", 0), Some(3));
}

#[test]
fn test_equals_id_with_ignore_only() {
    let r = Engine::<i32>::builder().ignore(" ").build();
    let p = r.equals_id("key");
    assert_eq!(end_of(&p, "key", 0), Some(3));
    // The consumed separator extends the match
    assert_eq!(end_of(&p, "key ", 0), Some(4));
    assert_eq!(end_of(&p, "keys", 0), None);
    assert_eq!(end_of(&p, "key++", 0), None);
    assert_eq!(end_of(&p, "key+", 0), None);
}

#[test]
fn test_equals_id_with_ignore_and_keys() {
    let r = Engine::<i32>::builder().ignore(" ").keys(["++"]).build();
    let p = r.equals_id("key");
    assert_eq!(end_of(&p, "key", 0), Some(3));
    assert_eq!(end_of(&p, "key ", 0), Some(4));
    assert_eq!(end_of(&p, "keys", 0), None);
    // A registered key right after the literal satisfies the boundary
    assert_eq!(end_of(&p, "key++", 0), Some(3));
    // "+" alone is not a registered key
    assert_eq!(end_of(&p, "key+", 0), None);
}

// -------- structural atoms --------

#[test]
fn test_br_priority() {
    let r = Engine::<i32>::new();
    let p = r.br();
    assert_eq!(end_of(&p, "\r\n", 0), Some(2));
    assert_eq!(end_of(&p, "\r", 0), Some(1));
    assert_eq!(end_of(&p, "\n", 0), Some(1));
    assert_eq!(end_of(&p, "a\r\n", 0), None);
}

#[test]
fn test_br_inside_sequence() {
    let r = Engine::<i32>::new();
    let p = r.then(("a", r.br(), "b"));
    assert_eq!(end_of(&p, "a\r\nb", 0), Some(4));
    assert_eq!(end_of(&p, "a\nb", 0), Some(3));
}

#[test]
fn test_end_asserts_input_exhausted() {
    let r = Engine::<i32>::new();
    let p = r.then(("765", r.end()));
    assert_eq!(end_of(&p, "765", 0), Some(3));
    assert_eq!(end_of(&p, "765aaa", 0), None);
}

// -------- recursive rules --------

#[test]
fn test_letrec_balanced_parens() {
    let r = Engine::<i32>::new();
    let parens = r.letrec(|x| r.then(("(", r.maybe(x), ")")));
    assert_eq!(end_of(&parens, "((()))", 0), Some(6));
    // Greedy match of the balanced prefix
    assert_eq!(end_of(&parens, "(()))", 0), Some(4));
    assert_eq!(end_of(&parens, "((())", 0), None);
}

// -------- engine behavior --------

#[test]
fn test_ignore_attribute_is_discarded() {
    let r = Engine::<i64>::builder()
        .ignore(Engine::<i64>::new().action(" ", |_, _, _| 999))
        .build();
    let p = r.then(("a", "b"));
    let m = p.parse("a b", 0, 7).unwrap();
    assert_eq!(m.end, 3);
    assert_eq!(m.span, "a b");
    // The skip's synthesized value never reaches the grammar
    assert_eq!(m.attr, 7);
}

#[test]
fn test_pattern_ignore_skips_runs() {
    let r = Engine::<i32>::builder()
        .ignore(Regex::new(r"[ \t]+").unwrap())
        .build();
    let p = r.then(("765", "pro"));
    assert_eq!(end_of(&p, "765   \tpro", 0), Some(10));
}

#[test]
fn test_same_parser_is_reusable_and_pure() {
    let r = Engine::<i32>::builder().ignore(" ").build();
    let p = r.delimit(r.pattern("[a-z]+").unwrap(), ",");
    let first = result_of(&p, "ab, cd,", 0);
    let second = result_of(&p, "ab, cd,", 0);
    assert_eq!(first, second);
    assert_eq!(first.map(|(end, _)| end), Some(6));
}
