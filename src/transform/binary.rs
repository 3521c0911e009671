//! `to_binary`: rewrite every n-ary operator with more than two operands
//! into a binary tree — left-associated for the commutative n-ary kinds,
//! right-associated for `Impl` (which is already binary and so untouched,
//! included here only for uniformity with the rest of the recursive walk).
//!
//! The binary nesting is built through [`raw_binary`], not through
//! `mk_and`/`mk_or`/`mk_xor`: those smart constructors flatten a nested
//! operand of the same kind back into their parent's operand list
//! (`build.rs`'s `flatten_nary`), which would silently re-collapse the tree
//! this transform exists to build — `mk_and(vec![mk_and(vec![a,b]), c])`
//! re-flattens straight back to the ternary `And(a,b,c)`. `raw_binary` skips
//! that flattening (and every other local reduction) and interns the
//! two-operand shape directly, so the result is a genuine binary tree.
//! `Eq` additionally is not folded through a chain of nested `Eq` nodes —
//! `Eq(x,y)` reduces to `Xnor(x,y)`, so folding three-or-more operands that
//! way computes `((x==y)==z)` rather than "`x`, `y` and `z` are all equal"
//! (they agree only at `x=y=z=1`, not at `x=y=z=0`). Instead, all-equal is
//! decomposed into the conjunction of every consecutive pair,
//! `And(Eq(x0,x1), Eq(x1,x2), ..., Eq(xn-2,xn-1))`, itself folded through
//! [`raw_binary`] so the conjunction is binary too.

use std::collections::HashMap;

use crate::arena::{Arena, Shape};
use crate::build::{mk_atleast, mk_eq, mk_ite, mk_impl, mk_not};
use crate::node::{Kind, NodeId};

pub fn to_binary(arena: &mut Arena, x: NodeId) -> NodeId {
    let mut memo = HashMap::new();
    go(arena, x, &mut memo)
}

fn go(arena: &mut Arena, x: NodeId, memo: &mut HashMap<NodeId, NodeId>) -> NodeId {
    if let Some(&y) = memo.get(&x) {
        return y;
    }
    let result = match arena.kind(x) {
        Kind::Zero | Kind::One | Kind::Var | Kind::Comp => x,
        Kind::Not => {
            let c = arena.not_operand(x).unwrap();
            let c2 = go(arena, c, memo);
            mk_not(arena, c2)
        }
        Kind::And => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| go(arena, o, memo)).collect();
            raw_left_fold(arena, Kind::And, &ops)
        }
        Kind::Or => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| go(arena, o, memo)).collect();
            raw_left_fold(arena, Kind::Or, &ops)
        }
        Kind::Xor => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| go(arena, o, memo)).collect();
            raw_left_fold(arena, Kind::Xor, &ops)
        }
        Kind::Eq => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| go(arena, o, memo)).collect();
            let pairs: Vec<NodeId> = ops.windows(2).map(|w| mk_eq(arena, vec![w[0], w[1]])).collect();
            raw_left_fold(arena, Kind::And, &pairs)
        }
        Kind::Impl => {
            let (p, q) = arena.impl_parts(x).unwrap();
            let p2 = go(arena, p, memo);
            let q2 = go(arena, q, memo);
            mk_impl(arena, p2, q2)
        }
        Kind::Ite => {
            let (s, d1, d0) = arena.ite_parts(x).unwrap();
            let s2 = go(arena, s, memo);
            let d12 = go(arena, d1, memo);
            let d02 = go(arena, d0, memo);
            mk_ite(arena, s2, d12, d02)
        }
        Kind::AtLeast => {
            let (k, ops) = arena.atleast_parts(x).unwrap();
            let ops = ops.to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| go(arena, o, memo)).collect();
            mk_atleast(arena, k, ops)
        }
    };
    memo.insert(x, result);
    result
}

/// Interns a genuine two-operand `And`/`Or`/`Xor` node directly, bypassing
/// the smart constructors (and therefore their flattening, absorption, and
/// idempotence reductions) so that nesting one of these inside another of
/// the same kind does not collapse back into a wider n-ary node. Operands
/// are still sorted by id, matching the ordering convention the rest of
/// the arena uses for these kinds, so two binary pairs built from the same
/// two operands always share one node.
fn raw_binary(arena: &mut Arena, kind: Kind, a: NodeId, b: NodeId) -> NodeId {
    let mut ops = vec![a, b];
    ops.sort_unstable();
    let shape = match kind {
        Kind::And => Shape::And(ops.into()),
        Kind::Or => Shape::Or(ops.into()),
        Kind::Xor => Shape::Xor(ops.into()),
        other => unreachable!("raw_binary only supports And/Or/Xor, got {other:?}"),
    };
    arena.intern(shape)
}

/// Folds `ops` left-associatively through [`raw_binary`]:
/// `f(f(f(x0,x1), x2), x3), ...`. A single operand passes through
/// unchanged (the binary tree of one leaf is the leaf itself).
fn raw_left_fold(arena: &mut Arena, kind: Kind, ops: &[NodeId]) -> NodeId {
    let mut it = ops.iter().copied();
    let mut acc = it.next().expect("n-ary operator has at least one operand");
    for o in it {
        acc = raw_binary(arena, kind, acc, o);
    }
    acc
}
