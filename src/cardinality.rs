//! Cardinality encoder: `AtLeast(k, operands)` and its `LessThan`/`Exactly`
//! derivatives, CNF/DNF expansion by direct combinatorial enumeration, and
//! `expand` — the shared-variable-factored variant that keeps the
//! expansion compact when operands are not literal-disjoint.

use std::collections::HashMap;

use crate::arena::Arena;
use crate::build::{lit, mk_and, mk_atleast, mk_not, mk_or};
use crate::node::NodeId;
use crate::point::iter_points;
use crate::transform::restrict;

/// `k ≤ 0`, or `k` no greater than the number of `One` operands — the
/// cardinality constraint is trivially satisfied regardless of the other
/// operands.
pub fn is_tautology(arena: &Arena, k: i64, operands: &[NodeId]) -> bool {
    let ones = operands.iter().filter(|&&o| arena.is_one(o)).count() as i64;
    k <= 0 || k <= ones
}

/// `k` greater than the number of operands that could possibly be true
/// (i.e. total operands minus those already `Zero`).
pub fn is_contradiction(arena: &Arena, k: i64, operands: &[NodeId]) -> bool {
    let zeros = operands.iter().filter(|&&o| arena.is_zero(o)).count() as i64;
    let n = operands.len() as i64;
    k > n - zeros
}

/// `C(n, k)`, the binomial coefficient, computed without overflow for the
/// small `n` this encoder is meant for.
pub fn choose(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}

/// The clause/cube counts of the CNF and DNF expansions respectively,
/// before any shared-variable factoring: `(C(n, n-k+1), C(n, k))`. An
/// implementer choosing between the two encodings (or between the plain
/// and `expand`-factored encodings) treats these as upper bounds, per the
/// specification's open question on the relationship between these
/// estimates and the actual factored size.
pub fn size_estimate(n: usize, k: i64) -> (u64, u64) {
    if k <= 0 || k > n as i64 {
        return (0, 0);
    }
    let n = n as u64;
    let k = k as u64;
    (choose(n, n - k + 1), choose(n, k))
}

fn combinations(items: &[NodeId], r: usize) -> Vec<Vec<NodeId>> {
    if r == 0 {
        return vec![Vec::new()];
    }
    if r > items.len() {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(r);
    combine_helper(items, r, 0, &mut current, &mut result);
    result
}

fn combine_helper(
    items: &[NodeId],
    r: usize,
    start: usize,
    current: &mut Vec<NodeId>,
    result: &mut Vec<Vec<NodeId>>,
) {
    if current.len() == r {
        result.push(current.clone());
        return;
    }
    for i in start..items.len() {
        current.push(items[i]);
        combine_helper(items, r, i + 1, current, result);
        current.pop();
    }
}

/// CNF expansion: `And` over every `(n-k+1)`-subset `S` of `Or(S)`.
pub fn cnf_atleast(arena: &mut Arena, k: i64, operands: &[NodeId]) -> NodeId {
    let n = operands.len() as i64;
    if k <= 0 {
        return arena.one();
    }
    if k > n {
        return arena.zero();
    }
    let r = (n - k + 1) as usize;
    let clauses: Vec<NodeId> = combinations(operands, r)
        .into_iter()
        .map(|s| mk_or(arena, s))
        .collect();
    mk_and(arena, clauses)
}

/// DNF expansion: `Or` over every `k`-subset `S` of `And(S)`.
pub fn dnf_atleast(arena: &mut Arena, k: i64, operands: &[NodeId]) -> NodeId {
    let n = operands.len() as i64;
    if k <= 0 {
        return arena.one();
    }
    if k > n {
        return arena.zero();
    }
    let r = k as usize;
    let cubes: Vec<NodeId> = combinations(operands, r)
        .into_iter()
        .map(|s| mk_and(arena, s))
        .collect();
    mk_or(arena, cubes)
}

/// Factored `AtLeast` expansion. Operands that share variables make the
/// plain combinatorial expansion needlessly large (it treats every operand
/// as an opaque input even when two operands are related). This instead
/// case-splits on every assignment to the variables that occur in more
/// than one operand's support, restricts each operand under that
/// assignment, re-derives `k` for the reduced operand list exactly as
/// [`crate::build::mk_atleast`] does (dropping `Zero`s, decrementing `k`
/// per `One`), expands the *reduced* list combinatorially, and guards each
/// branch with the cube describing that assignment before disjoining all
/// branches back together.
pub fn expand(arena: &mut Arena, k: i64, operands: &[NodeId], as_cnf: bool) -> NodeId {
    let mut var_count: HashMap<u32, usize> = HashMap::new();
    for &o in operands {
        for v in arena.support(o) {
            *var_count.entry(v).or_insert(0) += 1;
        }
    }
    let mut shared_vars: Vec<u32> = var_count
        .into_iter()
        .filter(|&(_, c)| c > 1)
        .map(|(v, _)| v)
        .collect();
    shared_vars.sort_unstable();

    if shared_vars.is_empty() {
        tracing::debug!(k, n = operands.len(), "cardinality::expand: no shared variables");
        return if as_cnf {
            cnf_atleast(arena, k, operands)
        } else {
            dnf_atleast(arena, k, operands)
        };
    }

    tracing::debug!(k, shared = shared_vars.len(), "cardinality::expand: factoring");
    let mut disjuncts = Vec::new();
    for point in iter_points(&shared_vars) {
        let mut kk = k;
        let mut kept = Vec::new();
        for &o in operands {
            let r = restrict(arena, o, &point);
            if arena.is_zero(r) {
                continue;
            }
            if arena.is_one(r) {
                kk -= 1;
                continue;
            }
            kept.push(r);
        }
        let sub = if as_cnf {
            cnf_atleast(arena, kk, &kept)
        } else {
            dnf_atleast(arena, kk, &kept)
        };
        let mut cube_lits = Vec::with_capacity(point.len());
        for (&v, &val) in &point {
            let signed = if val { v as i64 } else { -(v as i64) };
            cube_lits.push(lit(arena, signed).expect("variable index is nonzero"));
        }
        let cube = mk_and(arena, cube_lits);
        disjuncts.push(mk_and(arena, vec![cube, sub]));
    }
    mk_or(arena, disjuncts)
}

/// `LessThan(k, operands) = Not(AtLeast(k, operands))`.
pub fn less_than(arena: &mut Arena, k: i64, operands: Vec<NodeId>) -> NodeId {
    let al = mk_atleast(arena, k, operands);
    mk_not(arena, al)
}

/// `Exactly(k, operands) = And(AtLeast(k, operands), Not(AtLeast(k+1, operands)))`.
pub fn exactly(arena: &mut Arena, k: i64, operands: Vec<NodeId>) -> NodeId {
    let al_k = mk_atleast(arena, k, operands.clone());
    let al_k1 = mk_atleast(arena, k + 1, operands);
    let not_k1 = mk_not(arena, al_k1);
    mk_and(arena, vec![al_k, not_k1])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::Kind;
    use crate::point::Point;

    /// Scenario 5: `AtLeast(2, (a,b,c))` has exactly `C(3,2)=3` CNF clauses
    /// and `C(3,2)=3` DNF cubes, and matches `(a+b+c) ≥ 2` on all 8 points.
    #[test]
    fn scenario_atleast_2_of_3() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let ops = vec![a, b, c];

        let cnf = cnf_atleast(&mut arena, 2, &ops);
        assert_eq!(arena.kind(cnf), Kind::And);
        assert_eq!(arena.operands(cnf).unwrap().len(), 3);

        let dnf = dnf_atleast(&mut arena, 2, &ops);
        assert_eq!(arena.kind(dnf), Kind::Or);
        assert_eq!(arena.operands(dnf).unwrap().len(), 3);

        for av in [false, true] {
            for bv in [false, true] {
                for cv in [false, true] {
                    let mut p = Point::new();
                    p.insert(1, av);
                    p.insert(2, bv);
                    p.insert(3, cv);
                    let expected = (av as i32 + bv as i32 + cv as i32) >= 2;
                    let r1 = restrict(&mut arena, cnf, &p);
                    let r2 = restrict(&mut arena, dnf, &p);
                    assert_eq!(arena.is_one(r1), expected);
                    assert_eq!(arena.is_one(r2), expected);
                }
            }
        }
    }

    #[test]
    fn expand_matches_plain_encoding_when_operands_share_variables() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        // Operands deliberately share variable a.
        let op0 = a;
        let op1 = mk_and(&mut arena, vec![a, b]);
        let op2 = c;
        let ops = vec![op0, op1, op2];

        let factored = expand(&mut arena, 2, &ops, true);
        let plain = cnf_atleast(&mut arena, 2, &ops);

        for av in [false, true] {
            for bv in [false, true] {
                for cv in [false, true] {
                    let mut p = Point::new();
                    p.insert(1, av);
                    p.insert(2, bv);
                    p.insert(3, cv);
                    let r1 = restrict(&mut arena, factored, &p);
                    let r2 = restrict(&mut arena, plain, &p);
                    assert_eq!(arena.is_one(r1), arena.is_one(r2));
                }
            }
        }
    }

    #[test]
    fn tautology_and_contradiction_checks() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let one = arena.one();
        let zero = arena.zero();
        assert!(is_tautology(&arena, 0, &[a]));
        assert!(is_tautology(&arena, 1, &[one, a]));
        assert!(is_contradiction(&arena, 2, &[zero, a]));
        assert!(!is_contradiction(&arena, 1, &[zero, a]));
    }

    #[test]
    fn less_than_and_exactly_are_consistent_with_atleast() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let ops = vec![a, b, c];
        let lt2 = less_than(&mut arena, 2, ops.clone());
        let eq2 = exactly(&mut arena, 2, ops);

        for av in [false, true] {
            for bv in [false, true] {
                for cv in [false, true] {
                    let mut p = Point::new();
                    p.insert(1, av);
                    p.insert(2, bv);
                    p.insert(3, cv);
                    let sum = av as i32 + bv as i32 + cv as i32;
                    let r_lt = restrict(&mut arena, lt2, &p);
                    let r_eq = restrict(&mut arena, eq2, &p);
                    assert_eq!(arena.is_one(r_lt), sum < 2);
                    assert_eq!(arena.is_one(r_eq), sum == 2);
                }
            }
        }
    }
}
