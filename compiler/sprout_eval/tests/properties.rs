//! Property-based tests over randomly generated grammars.
//!
//! Grammars are built from literals over `{a, b}`, epsilon and the composite
//! combinators, with a few forward references bound to arbitrary rules so
//! that cycles (including left-recursive ones) are common.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::needless_pass_by_value,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use rustc_hash::FxHashSet;
use sprout_eval::{EvalConfig, EvalError, Evaluator};
use sprout_grammar::{nullable_fixpoint, Grammar};
use sprout_ir::{GrammarBuilder, RuleId};

const PLACEHOLDERS: usize = 3;

#[derive(Clone, Debug)]
enum Shape {
    Literal(String),
    Epsilon,
    Sequence(Vec<usize>),
    Choice(Vec<usize>),
    Optional(usize),
    Repetition(usize),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop_oneof![
        "[ab]{1,2}".prop_map(Shape::Literal),
        Just(Shape::Epsilon),
        prop::collection::vec(any::<usize>(), 1..4).prop_map(Shape::Sequence),
        prop::collection::vec(any::<usize>(), 1..4).prop_map(Shape::Choice),
        any::<usize>().prop_map(Shape::Optional),
        any::<usize>().prop_map(Shape::Repetition),
    ]
}

/// A random grammar plus the order in which to register its rules.
fn grammar_strategy() -> impl Strategy<Value = (Vec<Shape>, Vec<usize>)> {
    prop::collection::vec(shape_strategy(), 1..10)
        .prop_flat_map(|shapes| {
            let order: Vec<usize> = (0..shapes.len()).collect();
            (Just(shapes), Just(order).prop_shuffle())
        })
}

/// Build the rules described by `shapes`. Child indices address the
/// placeholders followed by every earlier rule; placeholder `i` is then bound
/// to rule `i % len`.
fn build(shapes: &[Shape]) -> (GrammarBuilder, Vec<RuleId>) {
    let mut b = GrammarBuilder::new();
    let mut pool: Vec<RuleId> = (0..PLACEHOLDERS).map(|_| b.forward_reference()).collect();
    let mut rules = Vec::with_capacity(shapes.len());

    for (i, shape) in shapes.iter().enumerate() {
        let pick = |n: usize| pool[n % pool.len()];
        let name = format!("r{i}");
        let id = match shape {
            Shape::Literal(text) => b.literal(text.clone()),
            Shape::Epsilon => b.epsilon(name),
            Shape::Sequence(children) => {
                let children: Vec<RuleId> = children.iter().map(|&n| pick(n)).collect();
                b.sequence(name, children)
            }
            Shape::Choice(children) => {
                let children: Vec<RuleId> = children.iter().map(|&n| pick(n)).collect();
                b.choice(name, children)
            }
            Shape::Optional(child) => b.optional(pick(*child)),
            Shape::Repetition(child) => b.repetition(name, pick(*child)),
        };
        pool.push(id);
        rules.push(id);
    }
    for i in 0..PLACEHOLDERS {
        b.bind(pool[i], rules[i % rules.len()]).unwrap();
    }
    (b, rules)
}

fn registered(shapes: &[Shape], order: &[usize]) -> (Grammar, Vec<RuleId>) {
    let (b, rules) = build(shapes);
    let mut grammar = Grammar::from(b);
    let roots: Vec<RuleId> = order.iter().map(|&i| rules[i]).collect();
    let roots = grammar.register(&roots).unwrap();
    (grammar, roots)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn nullability_is_order_independent((shapes, order) in grammar_strategy()) {
        let (grammar, _) = registered(&shapes, &order);
        let forward: Vec<RuleId> = grammar.rules().to_vec();
        let mut backward = forward.clone();
        backward.reverse();

        let a = nullable_fixpoint(grammar.arena(), &forward);
        let b = nullable_fixpoint(grammar.arena(), &backward);
        prop_assert_eq!(&a, &b);

        // Registration order does not matter either; building is
        // deterministic, so both grammars share rule handles.
        let in_order: Vec<usize> = (0..shapes.len()).collect();
        let (mut sorted, _) = registered(&shapes, &in_order);
        sorted.analyze();
        let mut shuffled = grammar;
        shuffled.analyze();
        let nullable = |g: &Grammar| -> FxHashSet<RuleId> { g.nullable_rules().collect() };
        prop_assert_eq!(nullable(&sorted), nullable(&shuffled));
        prop_assert_eq!(nullable(&shuffled), a);
    }

    #[test]
    fn evaluation_terminates_within_input(
        (shapes, order) in grammar_strategy(),
        input in "[ab]{0,8}",
    ) {
        let (mut grammar, roots) = registered(&shapes, &order);
        grammar.analyze();
        let evaluator = Evaluator::for_grammar(&grammar, EvalConfig::new().with_step_limit(1_000_000));

        for root in roots {
            let mut session = evaluator.session(&input);
            let first = session.apply(root, 0);
            let limited = matches!(first, Err(EvalError::StepLimitExceeded { .. }));
            prop_assert!(!limited, "step limit hit on {:?}", input);
            let first = first.unwrap();
            prop_assert!(first.length() <= input.len());
            prop_assert!(first.matched() || first.length() == 0);
            for id in first.descendants() {
                prop_assert!(first.node(id).end() <= input.len());
            }

            let second = session.apply(root, 0).unwrap();
            prop_assert_eq!(&first, &second);
        }
    }

    #[test]
    fn repetition_stops_on_empty_items(input in "[ab]{0,12}") {
        let mut b = GrammarBuilder::new();
        let a = b.literal("a");
        let maybe_a = b.optional(a);
        let star = b.repetition("A*", maybe_a);
        let eps = b.epsilon("EPS");
        let eps_star = b.repetition("EPS*", eps);
        let arena = b.finish();
        let evaluator = Evaluator::new(&arena, EvalConfig::default());

        let leading = input.len() - input.trim_start_matches('a').len();
        let tree = evaluator.evaluate(star, &input).unwrap();
        prop_assert!(tree.matched());
        prop_assert_eq!(tree.length(), leading);
        prop_assert_eq!(tree.children(tree.root()).len(), leading);

        let tree = evaluator.evaluate(eps_star, &input).unwrap();
        prop_assert!(tree.matched());
        prop_assert_eq!(tree.length(), 0);
    }
}
