#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use sprout_ir::GrammarBuilder;

#[test]
fn test_terminals_are_not_nullable() {
    let mut b = GrammarBuilder::new();
    let a = b.literal("a");
    let re = b.pattern("[0-9]+").unwrap();
    let eof = b.end_of_input("EOF");
    let arena = b.finish();
    assert!(nullable_fixpoint(&arena, &[a, re, eof]).is_empty());
}

#[test]
fn test_choice_and_sequence_rules() {
    let mut b = GrammarBuilder::new();
    let a = b.literal("a");
    let eps = b.epsilon("EPS");
    let a_opt = b.optional(a);
    let alt = b.choice("a|EPS", [a, eps]);
    let seq_all = b.sequence("EPS a?", [eps, a_opt]);
    let seq_some = b.sequence("EPS a", [eps, a]);
    let arena = b.finish();

    let set = nullable_fixpoint(&arena, &[a, eps, a_opt, alt, seq_all, seq_some]);
    assert!(set.contains(&alt));
    assert!(set.contains(&seq_all));
    assert!(!set.contains(&seq_some));
    assert!(!set.contains(&a));
}

#[test]
fn test_needs_more_than_one_pass() {
    // Listed outermost-first, so each pass only learns one more level.
    let mut b = GrammarBuilder::new();
    let eps = b.epsilon("EPS");
    let lit = b.literal("x");
    let inner = b.choice("inner", [lit, eps]);
    let middle = b.sequence("middle", [inner, inner]);
    let outer = b.choice("outer", [lit, middle]);
    let arena = b.finish();

    let set = nullable_fixpoint(&arena, &[outer, middle, inner, lit, eps]);
    let mut got: Vec<&str> = set.iter().map(|&id| arena.name(id)).collect();
    got.sort_unstable();
    assert_eq!(got, vec!["EPS", "inner", "middle", "outer"]);
}

#[test]
fn test_order_independent() {
    let mut b = GrammarBuilder::new();
    let eps = b.epsilon("EPS");
    let lit = b.literal("x");
    let inner = b.choice("inner", [lit, eps]);
    let middle = b.sequence("middle", [inner, inner]);
    let outer = b.choice("outer", [lit, middle]);
    let blocked = b.sequence("blocked", [middle, lit]);
    let arena = b.finish();

    let forward = nullable_fixpoint(&arena, &[eps, lit, inner, middle, outer, blocked]);
    let backward = nullable_fixpoint(&arena, &[blocked, outer, middle, inner, lit, eps]);
    assert_eq!(forward, backward);
}

#[test]
fn test_empty_combinators() {
    let mut b = GrammarBuilder::new();
    let empty_seq = b.sequence("()", []);
    let empty_alt = b.choice("<none>", []);
    let arena = b.finish();
    let set = nullable_fixpoint(&arena, &[empty_seq, empty_alt]);
    // Neither can ever match.
    assert!(set.is_empty());
}

#[test]
fn test_empty_literal_propagates() {
    let mut b = GrammarBuilder::new();
    let empty = b.literal("");
    let x = b.literal("x");
    let seq = b.sequence("'' ''", [empty, empty]);
    let alt = b.choice("x|''", [x, empty]);
    let arena = b.finish();
    let set = nullable_fixpoint(&arena, &[empty, x, seq, alt]);
    let mut got: Vec<&str> = set.iter().map(|&id| arena.name(id)).collect();
    got.sort_unstable();
    assert_eq!(got, vec!["", "'' ''", "x|''"]);
}
