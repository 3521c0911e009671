//! `complete_sum`: the prime-implicant cover of a function, computed by the
//! classical consensus method (Tison's rule): repeatedly resolve pairs of
//! cubes that conflict on exactly one variable into their consensus, then
//! absorb every cube that is a superset of another, until nothing changes.
//! The specification leaves the exact algorithm open (consensus,
//! absorption, or Quine–McCluskey are all acceptable); consensus is chosen
//! here because it operates directly on the cube sets `to_dnf` already
//! produces, without a separate minterm-expansion pass.

use std::collections::{BTreeSet, HashMap};

use crate::arena::Arena;
use crate::build::{mk_and, mk_not, mk_or};
use crate::node::{Kind, NodeId};

use super::cnf_dnf::to_dnf;

pub fn complete_sum(arena: &mut Arena, x: NodeId) -> NodeId {
    if arena.is_constant(x) {
        return x;
    }
    let dnf = to_dnf(arena, x);
    if arena.is_constant(dnf) {
        return dnf;
    }
    tracing::debug!(node = ?dnf, "complete_sum: computing prime implicants");

    let mut cubes = extract_cubes(arena, dnf);
    loop {
        cubes = absorb(cubes);
        let mut discovered = Vec::new();
        for i in 0..cubes.len() {
            for j in (i + 1)..cubes.len() {
                if let Some(consensus) = try_consensus(arena, &cubes[i], &cubes[j]) {
                    if !cubes.contains(&consensus) && !discovered.contains(&consensus) {
                        discovered.push(consensus);
                    }
                }
            }
        }
        if discovered.is_empty() {
            break;
        }
        cubes.extend(discovered);
    }

    let cube_nodes: Vec<NodeId> = cubes
        .iter()
        .map(|c| mk_and(arena, c.iter().copied().collect()))
        .collect();
    let result = mk_or(arena, cube_nodes);
    tracing::debug!(implicants = cubes.len(), "complete_sum: done");
    result
}

fn extract_cubes(arena: &Arena, dnf: NodeId) -> Vec<BTreeSet<NodeId>> {
    let cube_nodes: Vec<NodeId> = match arena.kind(dnf) {
        Kind::Or => arena.operands(dnf).unwrap().to_vec(),
        _ => vec![dnf],
    };
    cube_nodes
        .iter()
        .map(|&c| match arena.kind(c) {
            Kind::And => arena.operands(c).unwrap().iter().copied().collect(),
            _ => {
                let mut s = BTreeSet::new();
                s.insert(c);
                s
            }
        })
        .collect()
}

/// Drops every cube that is a (not-necessarily-proper) superset of another,
/// and deduplicates — the cube cover's antichain of minimal implicants.
fn absorb(cubes: Vec<BTreeSet<NodeId>>) -> Vec<BTreeSet<NodeId>> {
    let mut keep: Vec<BTreeSet<NodeId>> = Vec::with_capacity(cubes.len());
    'outer: for (i, c) in cubes.iter().enumerate() {
        for (j, d) in cubes.iter().enumerate() {
            if i == j {
                continue;
            }
            if d.len() < c.len() && d.is_subset(c) {
                continue 'outer;
            }
            if d == c && j < i {
                continue 'outer;
            }
        }
        keep.push(c.clone());
    }
    keep
}

fn complement(arena: &mut Arena, y: NodeId) -> Option<NodeId> {
    if !arena.kind(y).is_literal() {
        return None;
    }
    Some(mk_not(arena, y))
}

/// If `a` and `b` conflict on exactly one variable (a literal of it in `a`,
/// its negation in `b`, or vice versa), returns their consensus cube: the
/// union of both, with that one variable's literal removed from each side.
/// Returns `None` if they conflict on zero or more-than-one variables.
fn try_consensus(
    arena: &mut Arena,
    a: &BTreeSet<NodeId>,
    b: &BTreeSet<NodeId>,
) -> Option<BTreeSet<NodeId>> {
    let mut conflict: Option<(NodeId, NodeId)> = None;
    let mut memo: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    for &x in a {
        let cx = *memo.entry(x).or_insert_with(|| complement(arena, x));
        if let Some(cx) = cx {
            if b.contains(&cx) {
                if conflict.is_some() {
                    return None;
                }
                conflict = Some((x, cx));
            }
        }
    }
    let (x, cx) = conflict?;
    let mut merged: BTreeSet<NodeId> = a.iter().copied().chain(b.iter().copied()).collect();
    merged.remove(&x);
    merged.remove(&cx);
    Some(merged)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::build::lit;
    use crate::point::Point;
    use crate::transform::subst::restrict;

    /// f = a·b + ¬a·c has three prime implicants: a·b, ¬a·c, and the
    /// consensus term b·c.
    #[test]
    fn classic_consensus_example() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let na = mk_not(&mut arena, a);
        let ab = mk_and(&mut arena, vec![a, b]);
        let nac = mk_and(&mut arena, vec![na, c]);
        let f = mk_or(&mut arena, vec![ab, nac]);

        let cs = complete_sum(&mut arena, f);
        assert_eq!(arena.kind(cs), Kind::Or);
        let cubes: Vec<_> = arena.operands(cs).unwrap().to_vec();

        let bc = mk_and(&mut arena, vec![b, c]);
        assert!(cubes.contains(&ab));
        assert!(cubes.contains(&nac));
        assert!(cubes.contains(&bc));
        assert_eq!(cubes.len(), 3);
    }

    #[test]
    fn complete_sum_is_semantically_equivalent() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let na = mk_not(&mut arena, a);
        let ab = mk_and(&mut arena, vec![a, b]);
        let nac = mk_and(&mut arena, vec![na, c]);
        let f = mk_or(&mut arena, vec![ab, nac]);
        let cs = complete_sum(&mut arena, f);

        for av in [false, true] {
            for bv in [false, true] {
                for cv in [false, true] {
                    let mut p = Point::new();
                    p.insert(1, av);
                    p.insert(2, bv);
                    p.insert(3, cv);
                    let r1 = restrict(&mut arena, f, &p);
                    let r2 = restrict(&mut arena, cs, &p);
                    assert_eq!(arena.is_one(r1), arena.is_one(r2));
                }
            }
        }
    }

    #[test]
    fn no_prime_implicant_is_absorbed_by_another() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let na = mk_not(&mut arena, a);
        let ab = mk_and(&mut arena, vec![a, b]);
        let nac = mk_and(&mut arena, vec![na, c]);
        let f = mk_or(&mut arena, vec![ab, nac]);
        let cs = complete_sum(&mut arena, f);
        let cubes: Vec<BTreeSet<NodeId>> = extract_cubes(&arena, cs);
        for (i, ci) in cubes.iter().enumerate() {
            for (j, cj) in cubes.iter().enumerate() {
                if i != j {
                    assert!(!ci.is_subset(cj) || ci == cj);
                }
            }
        }
    }
}
