//! Substitution engine: `restrict` (variable → constant) and `compose`
//! (variable → expression). Both walk the DAG once, memoized by node
//! identity, and rebuild exclusively through the smart constructors so that
//! any subtree that collapses to a constant short-circuits the rest of its
//! ancestors for free.

use std::collections::HashMap;

use crate::arena::Arena;
use crate::build::{mk_and, mk_atleast, mk_eq, mk_ite, mk_impl, mk_not, mk_or, mk_xor};
use crate::node::{Kind, NodeId};
use crate::point::Point;

/// Substitutes each literal whose variable appears in `point` with the
/// corresponding constant, then rebuilds bottom-up through the smart
/// constructors (which simplify as they go).
pub fn restrict(arena: &mut Arena, x: NodeId, point: &Point) -> NodeId {
    let mut memo = HashMap::new();
    restrict_rec(arena, x, point, &mut memo)
}

fn restrict_rec(
    arena: &mut Arena,
    x: NodeId,
    point: &Point,
    memo: &mut HashMap<NodeId, NodeId>,
) -> NodeId {
    if let Some(&y) = memo.get(&x) {
        return y;
    }
    let result = match arena.kind(x) {
        Kind::Zero | Kind::One => x,
        Kind::Var => {
            let v = arena.literal(x).unwrap() as u32;
            match point.get(&v) {
                Some(true) => arena.one(),
                Some(false) => arena.zero(),
                None => x,
            }
        }
        Kind::Comp => {
            let v = (-arena.literal(x).unwrap()) as u32;
            match point.get(&v) {
                Some(true) => arena.zero(),
                Some(false) => arena.one(),
                None => x,
            }
        }
        Kind::Not => {
            let c = arena.not_operand(x).unwrap();
            let c2 = restrict_rec(arena, c, point, memo);
            mk_not(arena, c2)
        }
        Kind::And => rebuild_nary(arena, x, point, memo, mk_and),
        Kind::Or => rebuild_nary(arena, x, point, memo, mk_or),
        Kind::Xor => rebuild_nary(arena, x, point, memo, mk_xor),
        Kind::Eq => rebuild_nary(arena, x, point, memo, mk_eq),
        Kind::Impl => {
            let (p, q) = arena.impl_parts(x).unwrap();
            let p2 = restrict_rec(arena, p, point, memo);
            let q2 = restrict_rec(arena, q, point, memo);
            mk_impl(arena, p2, q2)
        }
        Kind::Ite => {
            let (s, d1, d0) = arena.ite_parts(x).unwrap();
            let s2 = restrict_rec(arena, s, point, memo);
            let d12 = restrict_rec(arena, d1, point, memo);
            let d02 = restrict_rec(arena, d0, point, memo);
            mk_ite(arena, s2, d12, d02)
        }
        Kind::AtLeast => {
            let (k, ops) = arena.atleast_parts(x).unwrap();
            let ops = ops.to_vec();
            let ops: Vec<_> = ops
                .into_iter()
                .map(|o| restrict_rec(arena, o, point, memo))
                .collect();
            mk_atleast(arena, k, ops)
        }
    };
    memo.insert(x, result);
    result
}

fn rebuild_nary(
    arena: &mut Arena,
    x: NodeId,
    point: &Point,
    memo: &mut HashMap<NodeId, NodeId>,
    f: impl Fn(&mut Arena, Vec<NodeId>) -> NodeId,
) -> NodeId {
    let ops = arena.operands(x).unwrap().to_vec();
    let ops: Vec<_> = ops
        .into_iter()
        .map(|o| restrict_rec(arena, o, point, memo))
        .collect();
    f(arena, ops)
}

/// Substitutes each literal whose variable appears in `map` with the
/// mapped expression (a negative literal gets the negation of the mapped
/// expression), then rebuilds through the smart constructors.
pub fn compose(arena: &mut Arena, x: NodeId, map: &HashMap<u32, NodeId>) -> NodeId {
    let mut memo = HashMap::new();
    compose_rec(arena, x, map, &mut memo)
}

fn compose_rec(
    arena: &mut Arena,
    x: NodeId,
    map: &HashMap<u32, NodeId>,
    memo: &mut HashMap<NodeId, NodeId>,
) -> NodeId {
    if let Some(&y) = memo.get(&x) {
        return y;
    }
    let result = match arena.kind(x) {
        Kind::Zero | Kind::One => x,
        Kind::Var => {
            let v = arena.literal(x).unwrap() as u32;
            match map.get(&v) {
                Some(&e) => e,
                None => x,
            }
        }
        Kind::Comp => {
            let v = (-arena.literal(x).unwrap()) as u32;
            match map.get(&v) {
                Some(&e) => mk_not(arena, e),
                None => x,
            }
        }
        Kind::Not => {
            let c = arena.not_operand(x).unwrap();
            let c2 = compose_rec(arena, c, map, memo);
            mk_not(arena, c2)
        }
        Kind::And => rebuild_nary_compose(arena, x, map, memo, mk_and),
        Kind::Or => rebuild_nary_compose(arena, x, map, memo, mk_or),
        Kind::Xor => rebuild_nary_compose(arena, x, map, memo, mk_xor),
        Kind::Eq => rebuild_nary_compose(arena, x, map, memo, mk_eq),
        Kind::Impl => {
            let (p, q) = arena.impl_parts(x).unwrap();
            let p2 = compose_rec(arena, p, map, memo);
            let q2 = compose_rec(arena, q, map, memo);
            mk_impl(arena, p2, q2)
        }
        Kind::Ite => {
            let (s, d1, d0) = arena.ite_parts(x).unwrap();
            let s2 = compose_rec(arena, s, map, memo);
            let d12 = compose_rec(arena, d1, map, memo);
            let d02 = compose_rec(arena, d0, map, memo);
            mk_ite(arena, s2, d12, d02)
        }
        Kind::AtLeast => {
            let (k, ops) = arena.atleast_parts(x).unwrap();
            let ops = ops.to_vec();
            let ops: Vec<_> = ops
                .into_iter()
                .map(|o| compose_rec(arena, o, map, memo))
                .collect();
            mk_atleast(arena, k, ops)
        }
    };
    memo.insert(x, result);
    result
}

fn rebuild_nary_compose(
    arena: &mut Arena,
    x: NodeId,
    map: &HashMap<u32, NodeId>,
    memo: &mut HashMap<NodeId, NodeId>,
    f: impl Fn(&mut Arena, Vec<NodeId>) -> NodeId,
) -> NodeId {
    let ops = arena.operands(x).unwrap().to_vec();
    let ops: Vec<_> = ops
        .into_iter()
        .map(|o| compose_rec(arena, o, map, memo))
        .collect();
    f(arena, ops)
}
