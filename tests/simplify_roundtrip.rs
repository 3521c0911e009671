//! `simplify` applied to a tree built solely from the smart constructors
//! must be the identity, and `simplify` must always agree with the tree's
//! own truth table under full enumeration of its support.

use boolexpr::build::{lit, mk_and, mk_atleast, mk_eq, mk_ite, mk_impl, mk_not, mk_or, mk_xor};
use boolexpr::point::iter_points;
use boolexpr::transform::{restrict, simplify};
use boolexpr::Arena;

fn sample_formulas(arena: &mut Arena) -> Vec<boolexpr::NodeId> {
    let a = lit(arena, 1).unwrap();
    let b = lit(arena, 2).unwrap();
    let c = lit(arena, 3).unwrap();
    let na = mk_not(arena, a);

    vec![
        mk_and(arena, vec![a, b, c]),
        mk_or(arena, vec![a, na, c]),
        mk_xor(arena, vec![a, b]),
        mk_eq(arena, vec![a, b, c]),
        mk_impl(arena, a, b),
        mk_ite(arena, a, b, c),
        mk_atleast(arena, 2, vec![a, b, c]),
        mk_and(arena, vec![mk_or(arena, vec![a, b]), mk_not(arena, c)]),
    ]
}

#[test]
fn simplify_is_identity_on_constructor_built_trees() {
    let mut arena = Arena::new();
    for formula in sample_formulas(&mut arena) {
        let simplified = simplify(&mut arena, formula);
        assert_eq!(simplified, formula, "simplify moved an already-canonical node");
    }
}

#[test]
fn simplify_preserves_truth_table() {
    let mut arena = Arena::new();
    for formula in sample_formulas(&mut arena) {
        let simplified = simplify(&mut arena, formula);
        let support: Vec<u32> = arena.support(formula).into_iter().collect();
        for point in iter_points(&support) {
            let original = restrict(&mut arena, formula, &point);
            let reduced = restrict(&mut arena, simplified, &point);
            assert_eq!(arena.is_one(original), arena.is_one(reduced));
        }
    }
}
