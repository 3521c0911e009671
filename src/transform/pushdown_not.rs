//! `pushdown_not`: move negation toward the leaves by one De Morgan step per
//! operator, without eliminating any operator kind. `to_nnf` (in
//! `super::nnf`) reuses the same descent after first eliminating
//! Impl/Ite/Eq/Xor, at which point every `Not` this pass produces lands on
//! a literal.

use std::collections::HashMap;

use crate::arena::Arena;
use crate::build::{mk_and, mk_atleast, mk_eq, mk_ite, mk_impl, mk_not, mk_or, mk_xor};
use crate::node::{Kind, NodeId};

/// Two memo tables: `pos` for "process `x` as-is", `neg` for "process the
/// negation of `x`". They are distinct transforms of the same node and must
/// not share a cache slot.
pub(crate) struct Memo {
    pos: HashMap<NodeId, NodeId>,
    neg: HashMap<NodeId, NodeId>,
}

impl Memo {
    pub(crate) fn new() -> Self {
        Memo {
            pos: HashMap::new(),
            neg: HashMap::new(),
        }
    }
}

pub fn pushdown_not(arena: &mut Arena, x: NodeId) -> NodeId {
    let mut memo = Memo::new();
    pos(arena, x, &mut memo)
}

pub(crate) fn pos(arena: &mut Arena, x: NodeId, memo: &mut Memo) -> NodeId {
    if let Some(&y) = memo.pos.get(&x) {
        return y;
    }
    let result = match arena.kind(x) {
        Kind::Zero | Kind::One | Kind::Var | Kind::Comp => x,
        Kind::Not => {
            let c = arena.not_operand(x).unwrap();
            neg(arena, c, memo)
        }
        Kind::And => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| pos(arena, o, memo)).collect();
            mk_and(arena, ops)
        }
        Kind::Or => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| pos(arena, o, memo)).collect();
            mk_or(arena, ops)
        }
        Kind::Xor => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| pos(arena, o, memo)).collect();
            mk_xor(arena, ops)
        }
        Kind::Eq => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| pos(arena, o, memo)).collect();
            mk_eq(arena, ops)
        }
        Kind::Impl => {
            let (p, q) = arena.impl_parts(x).unwrap();
            let p2 = pos(arena, p, memo);
            let q2 = pos(arena, q, memo);
            mk_impl(arena, p2, q2)
        }
        Kind::Ite => {
            let (s, d1, d0) = arena.ite_parts(x).unwrap();
            let s2 = pos(arena, s, memo);
            let d12 = pos(arena, d1, memo);
            let d02 = pos(arena, d0, memo);
            mk_ite(arena, s2, d12, d02)
        }
        Kind::AtLeast => {
            let (k, ops) = arena.atleast_parts(x).unwrap();
            let ops = ops.to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| pos(arena, o, memo)).collect();
            mk_atleast(arena, k, ops)
        }
    };
    memo.pos.insert(x, result);
    result
}

/// Processes "`Not(x)`" — pushes a negation one level into `x` according to
/// De Morgan's laws, then recurses. `Eq` has no single-step De Morgan rule
/// for arity ≥ 3 (negating an n-ary "all equal" predicate is not expressible
/// by flipping one operand once n exceeds 2, unlike Xor), so a `Not` wrapping
/// an `Eq` is preserved verbatim; only the `Eq`'s own operands are
/// recursively processed. `AtLeast` has no De Morgan rule in the
/// specification either and is treated the same way.
pub(crate) fn neg(arena: &mut Arena, x: NodeId, memo: &mut Memo) -> NodeId {
    if let Some(&y) = memo.neg.get(&x) {
        return y;
    }
    let result = match arena.kind(x) {
        Kind::Zero | Kind::One | Kind::Var | Kind::Comp => mk_not(arena, x),
        Kind::Not => {
            let c = arena.not_operand(x).unwrap();
            pos(arena, c, memo)
        }
        Kind::And => {
            // Not(And(xs)) = Or(Not(x) for x in xs)
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| neg(arena, o, memo)).collect();
            mk_or(arena, ops)
        }
        Kind::Or => {
            // Not(Or(xs)) = And(Not(x) for x in xs)
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| neg(arena, o, memo)).collect();
            mk_and(arena, ops)
        }
        Kind::Xor => {
            // Not(Xor(x0,...,xn)) = Xor(Not(x0), x1, ..., xn)
            let ops = arena.operands(x).unwrap().to_vec();
            let mut it = ops.into_iter();
            let first = it.next().unwrap();
            let first_neg = neg(arena, first, memo);
            let mut rebuilt = vec![first_neg];
            rebuilt.extend(it.map(|o| pos(arena, o, memo)));
            mk_xor(arena, rebuilt)
        }
        Kind::Eq => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| pos(arena, o, memo)).collect();
            let eq = mk_eq(arena, ops);
            mk_not(arena, eq)
        }
        Kind::Impl => {
            // Not(Impl(p,q)) = And(p, Not(q))
            let (p, q) = arena.impl_parts(x).unwrap();
            let p2 = pos(arena, p, memo);
            let q2 = neg(arena, q, memo);
            mk_and(arena, vec![p2, q2])
        }
        Kind::Ite => {
            // Not(Ite(s,d1,d0)) = Ite(s, Not(d1), Not(d0)) — flips branches only
            let (s, d1, d0) = arena.ite_parts(x).unwrap();
            let s2 = pos(arena, s, memo);
            let d12 = neg(arena, d1, memo);
            let d02 = neg(arena, d0, memo);
            mk_ite(arena, s2, d12, d02)
        }
        Kind::AtLeast => {
            let (k, ops) = arena.atleast_parts(x).unwrap();
            let ops = ops.to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| pos(arena, o, memo)).collect();
            let al = mk_atleast(arena, k, ops);
            mk_not(arena, al)
        }
    };
    memo.neg.insert(x, result);
    result
}
