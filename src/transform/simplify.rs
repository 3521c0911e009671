//! `simplify`: bottom-up rebuild through the smart constructors, memoized
//! by node identity.
//!
//! Every constructor already applies its local reductions at construction
//! time (`crate::build`), so a tree built entirely through this API is
//! already maximally reduced — `simplify` exists for the case where a node
//! was assembled out of band (or just to give callers an explicit,
//! idempotent re-normalization step to call after a sequence of
//! restrictions or compositions). Processing children before parents means
//! one bottom-up pass already reaches the fixed point: by the time a parent
//! is rebuilt, every reduction opportunity its (already-simplified) children
//! could expose has been applied.

use std::collections::HashMap;

use crate::arena::Arena;
use crate::build::{mk_and, mk_atleast, mk_eq, mk_ite, mk_impl, mk_not, mk_or, mk_xor};
use crate::node::{Kind, NodeId};

pub fn simplify(arena: &mut Arena, x: NodeId) -> NodeId {
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
            mk_and(arena, ops)
        }
        Kind::Or => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| go(arena, o, memo)).collect();
            mk_or(arena, ops)
        }
        Kind::Xor => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| go(arena, o, memo)).collect();
            mk_xor(arena, ops)
        }
        Kind::Eq => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| go(arena, o, memo)).collect();
            mk_eq(arena, ops)
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::build::lit;

    #[test]
    fn simplify_is_idempotent() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let x = mk_and(&mut arena, vec![a, b]);
        let once = simplify(&mut arena, x);
        let twice = simplify(&mut arena, once);
        assert_eq!(once, twice);
        assert_eq!(once, x);
    }

    #[test]
    fn simplify_already_reduced_tree_is_identity() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let na = mk_not(&mut arena, a);
        let o = arena.one();
        let x = mk_or(&mut arena, vec![a, na, o]);
        assert_eq!(x, o); // already absorbed at construction
        assert_eq!(simplify(&mut arena, x), o);
    }
}
