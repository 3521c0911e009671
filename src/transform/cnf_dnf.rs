//! `to_cnf` / `to_dnf`: lazy distribution with early absorption.
//!
//! Both start by converting to NNF, then walk the DAG bottom-up building a
//! list of "clause expressions" (Or-nodes for CNF, And-nodes for DNF) per
//! subnode, memoized by node identity. Distributing one operator over the
//! other is a cross-product of clause lists; concatenating under the
//! matching operator is a plain list merge. Every clause produced along the
//! way is built through `mk_or`/`mk_and`, so idempotence, absorption and
//! complementary-pair collapse happen automatically and for free at each
//! step — this is the "early absorption" the specification asks for, it
//! falls out of reusing the smart constructors rather than needing a
//! separate pass.

use std::collections::HashMap;
use std::rc::Rc;

use crate::arena::Arena;
use crate::build::{mk_and, mk_or};
use crate::node::{Kind, NodeId};

use super::nnf::to_nnf;

pub fn to_cnf(arena: &mut Arena, x: NodeId) -> NodeId {
    if arena.is_constant(x) {
        return x;
    }
    let nnf = to_nnf(arena, x);
    if arena.is_constant(nnf) {
        return nnf;
    }
    tracing::debug!(node = ?nnf, "to_cnf: distributing");
    let mut memo = HashMap::new();
    let clauses = cnf_clauses(arena, nnf, &mut memo);
    let result = mk_and(arena, clauses.as_ref().clone());
    tracing::debug!(clauses = clauses.len(), "to_cnf: done");
    result
}

pub fn to_dnf(arena: &mut Arena, x: NodeId) -> NodeId {
    if arena.is_constant(x) {
        return x;
    }
    let nnf = to_nnf(arena, x);
    if arena.is_constant(nnf) {
        return nnf;
    }
    tracing::debug!(node = ?nnf, "to_dnf: distributing");
    let mut memo = HashMap::new();
    let cubes = dnf_cubes(arena, nnf, &mut memo);
    let result = mk_or(arena, cubes.as_ref().clone());
    tracing::debug!(cubes = cubes.len(), "to_dnf: done");
    result
}

fn normalize_clauses(arena: &Arena, mut clauses: Vec<NodeId>) -> Vec<NodeId> {
    if clauses.iter().any(|&c| arena.is_zero(c)) {
        return vec![arena.zero()];
    }
    clauses.retain(|&c| !arena.is_one(c));
    clauses.sort_unstable();
    clauses.dedup();
    if clauses.is_empty() {
        clauses.push(arena.one());
    }
    clauses
}

fn cnf_clauses(
    arena: &mut Arena,
    x: NodeId,
    memo: &mut HashMap<NodeId, Rc<Vec<NodeId>>>,
) -> Rc<Vec<NodeId>> {
    if let Some(c) = memo.get(&x) {
        return c.clone();
    }
    let result = match arena.kind(x) {
        Kind::And => {
            let ops = arena.operands(x).unwrap().to_vec();
            let mut clauses = Vec::new();
            for o in ops {
                let sub = cnf_clauses(arena, o, memo);
                clauses.extend(sub.iter().copied());
            }
            normalize_clauses(arena, clauses)
        }
        Kind::Or => {
            let ops = arena.operands(x).unwrap().to_vec();
            let mut it = ops.into_iter();
            let first = it.next().expect("Or has at least one operand");
            let mut acc: Vec<NodeId> = cnf_clauses(arena, first, memo).as_ref().clone();
            for o in it {
                let sub = cnf_clauses(arena, o, memo);
                let mut next = Vec::with_capacity(acc.len() * sub.len());
                for &a in &acc {
                    for &b in sub.iter() {
                        next.push(mk_or(arena, vec![a, b]));
                    }
                }
                acc = normalize_clauses(arena, next);
            }
            acc
        }
        // Atoms and any opaque boundary kind (AtLeast, and in principle a
        // Not that survived — NNF never leaves one, but this stays
        // defensive) pass through as a single one-literal clause.
        _ => normalize_clauses(arena, vec![x]),
    };
    let rc = Rc::new(result);
    memo.insert(x, rc.clone());
    rc
}

fn normalize_cubes(arena: &Arena, mut cubes: Vec<NodeId>) -> Vec<NodeId> {
    if cubes.iter().any(|&c| arena.is_one(c)) {
        return vec![arena.one()];
    }
    cubes.retain(|&c| !arena.is_zero(c));
    cubes.sort_unstable();
    cubes.dedup();
    if cubes.is_empty() {
        cubes.push(arena.zero());
    }
    cubes
}

fn dnf_cubes(
    arena: &mut Arena,
    x: NodeId,
    memo: &mut HashMap<NodeId, Rc<Vec<NodeId>>>,
) -> Rc<Vec<NodeId>> {
    if let Some(c) = memo.get(&x) {
        return c.clone();
    }
    let result = match arena.kind(x) {
        Kind::Or => {
            let ops = arena.operands(x).unwrap().to_vec();
            let mut cubes = Vec::new();
            for o in ops {
                let sub = dnf_cubes(arena, o, memo);
                cubes.extend(sub.iter().copied());
            }
            normalize_cubes(arena, cubes)
        }
        Kind::And => {
            let ops = arena.operands(x).unwrap().to_vec();
            let mut it = ops.into_iter();
            let first = it.next().expect("And has at least one operand");
            let mut acc: Vec<NodeId> = dnf_cubes(arena, first, memo).as_ref().clone();
            for o in it {
                let sub = dnf_cubes(arena, o, memo);
                let mut next = Vec::with_capacity(acc.len() * sub.len());
                for &a in &acc {
                    for &b in sub.iter() {
                        next.push(mk_and(arena, vec![a, b]));
                    }
                }
                acc = normalize_cubes(arena, next);
            }
            acc
        }
        _ => normalize_cubes(arena, vec![x]),
    };
    let rc = Rc::new(result);
    memo.insert(x, rc.clone());
    rc
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::build::{lit, mk_not};
    use crate::point::Point;

    fn is_flat_cnf(arena: &Arena, x: NodeId) -> bool {
        if arena.kind(x) != Kind::And {
            return arena.kind(x).is_literal() || arena.kind(x).is_constant();
        }
        for &clause in arena.operands(x).unwrap() {
            match arena.kind(clause) {
                Kind::Or => {
                    for &l in arena.operands(clause).unwrap() {
                        if !arena.kind(l).is_literal() {
                            return false;
                        }
                    }
                }
                k if k.is_literal() || k.is_constant() => {}
                _ => return false,
            }
        }
        true
    }

    #[test]
    fn cnf_closure() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let na = mk_not(&mut arena, a);
        let ab = mk_and(&mut arena, vec![a, b]);
        let na_c = mk_and(&mut arena, vec![na, c]);
        let or_and = mk_or(&mut arena, vec![ab, na_c]);
        let cnf = to_cnf(&mut arena, or_and);
        assert!(is_flat_cnf(&arena, cnf));
    }

    #[test]
    fn cnf_semantically_equivalent() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let and_ab = mk_and(&mut arena, vec![a, b]);
        let x = mk_or(&mut arena, vec![and_ab, c]);
        let cnf = to_cnf(&mut arena, x);

        use crate::transform::subst::restrict;
        for av in [false, true] {
            for bv in [false, true] {
                for cv in [false, true] {
                    let mut p = Point::new();
                    p.insert(1, av);
                    p.insert(2, bv);
                    p.insert(3, cv);
                    let r1 = restrict(&mut arena, x, &p);
                    let r2 = restrict(&mut arena, cnf, &p);
                    assert_eq!(arena.is_one(r1), arena.is_one(r2));
                }
            }
        }
    }

    #[test]
    fn dnf_of_cnf_shaped_input() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let na = mk_not(&mut arena, a);
        let ab = mk_or(&mut arena, vec![a, b]);
        let na_c = mk_or(&mut arena, vec![na, c]);
        let and_or = mk_and(&mut arena, vec![ab, na_c]);
        let dnf = to_dnf(&mut arena, and_or);

        use crate::transform::subst::restrict;
        for av in [false, true] {
            for bv in [false, true] {
                for cv in [false, true] {
                    let mut p = Point::new();
                    p.insert(1, av);
                    p.insert(2, bv);
                    p.insert(3, cv);
                    let r1 = restrict(&mut arena, and_or, &p);
                    let r2 = restrict(&mut arena, dnf, &p);
                    assert_eq!(arena.is_one(r1), arena.is_one(r2));
                }
            }
        }
    }

    /// Scenario 1 from the testable-properties catalogue: `And(a, Or(b,c),
    /// Not(And(a,b)))` simplifies and its `to_dnf` absorbs down to
    /// `And(a, c, Not(b))`.
    #[test]
    fn scenario_and_or_not_and_absorbs() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let and_ab = mk_and(&mut arena, vec![a, b]);
        let not_and_ab = mk_not(&mut arena, and_ab);
        let or_bc = mk_or(&mut arena, vec![b, c]);
        let x = mk_and(&mut arena, vec![a, or_bc, not_and_ab]);
        let dnf = to_dnf(&mut arena, x);

        for av in [false, true] {
            for bv in [false, true] {
                for cv in [false, true] {
                    let mut p = Point::new();
                    p.insert(1, av);
                    p.insert(2, bv);
                    p.insert(3, cv);
                    use crate::transform::subst::restrict;
                    let r1 = restrict(&mut arena, x, &p);
                    let r2 = restrict(&mut arena, dnf, &p);
                    assert_eq!(arena.is_one(r1), arena.is_one(r2));
                }
            }
        }
    }
}
