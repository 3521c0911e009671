//! `to_nnf`: eliminate Impl, Ite, Eq, Xor in terms of And/Or/Not, then push
//! every remaining negation to a literal. `AtLeast` is left as an opaque
//! boundary (the cardinality encoder in `crate::cardinality` is the
//! dedicated transform for it, as the specification treats it as a
//! separate, independent component rather than part of the core rewrite
//! pipeline) — its operands are still recursively brought to NNF.

use std::collections::HashMap;

use crate::arena::Arena;
use crate::build::{mk_and, mk_atleast, mk_not, mk_or};
use crate::node::{Kind, NodeId};

use super::pushdown_not::{neg, pos, Memo};

pub fn to_nnf(arena: &mut Arena, x: NodeId) -> NodeId {
    let mut memo = HashMap::new();
    let eliminated = eliminate(arena, x, &mut memo);
    let mut push_memo = Memo::new();
    pos(arena, eliminated, &mut push_memo)
}

fn eliminate(arena: &mut Arena, x: NodeId, memo: &mut HashMap<NodeId, NodeId>) -> NodeId {
    if let Some(&y) = memo.get(&x) {
        return y;
    }
    let result = match arena.kind(x) {
        Kind::Zero | Kind::One | Kind::Var | Kind::Comp => x,
        Kind::Not => {
            let c = arena.not_operand(x).unwrap();
            let c2 = eliminate(arena, c, memo);
            mk_not(arena, c2)
        }
        Kind::And => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| eliminate(arena, o, memo)).collect();
            mk_and(arena, ops)
        }
        Kind::Or => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| eliminate(arena, o, memo)).collect();
            mk_or(arena, ops)
        }
        Kind::Xor => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| eliminate(arena, o, memo)).collect();
            expand_xor(arena, &ops)
        }
        Kind::Eq => {
            let ops = arena.operands(x).unwrap().to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| eliminate(arena, o, memo)).collect();
            let all = mk_and(arena, ops.clone());
            let negs: Vec<_> = ops.iter().map(|&o| mk_not(arena, o)).collect();
            let none = mk_and(arena, negs);
            mk_or(arena, vec![all, none])
        }
        Kind::Impl => {
            let (p, q) = arena.impl_parts(x).unwrap();
            let p2 = eliminate(arena, p, memo);
            let q2 = eliminate(arena, q, memo);
            let np2 = mk_not(arena, p2);
            mk_or(arena, vec![np2, q2])
        }
        Kind::Ite => {
            let (s, d1, d0) = arena.ite_parts(x).unwrap();
            let s2 = eliminate(arena, s, memo);
            let d12 = eliminate(arena, d1, memo);
            let d02 = eliminate(arena, d0, memo);
            let ns2 = mk_not(arena, s2);
            let a = mk_and(arena, vec![s2, d12]);
            let b = mk_and(arena, vec![ns2, d02]);
            mk_or(arena, vec![a, b])
        }
        Kind::AtLeast => {
            let (k, ops) = arena.atleast_parts(x).unwrap();
            let ops = ops.to_vec();
            let ops: Vec<_> = ops.into_iter().map(|o| eliminate(arena, o, memo)).collect();
            mk_atleast(arena, k, ops)
        }
    };
    memo.insert(x, result);
    result
}

/// Left-folds a chain of binary Xor-to-And/Or expansions:
/// `Xor(a,b) = Or(And(a,¬b), And(¬a,b))`, generalized to n operands by
/// repeated pairwise folding.
fn expand_xor(arena: &mut Arena, ops: &[NodeId]) -> NodeId {
    let mut acc = ops[0];
    for &o in &ops[1..] {
        let na = mk_not(arena, acc);
        let no = mk_not(arena, o);
        let t1 = mk_and(arena, vec![acc, no]);
        let t2 = mk_and(arena, vec![na, o]);
        acc = mk_or(arena, vec![t1, t2]);
    }
    acc
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::build::{lit, mk_eq, mk_ite, mk_xor};

    fn every_not_wraps_a_literal(arena: &Arena, x: NodeId) -> bool {
        for n in arena.iter_dag(x) {
            if arena.kind(n) == Kind::Not {
                let c = arena.not_operand(n).unwrap();
                if !arena.kind(c).is_literal() {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn nnf_closure_over_xor() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let x = mk_xor(&mut arena, vec![a, b, c]);
        let nnf = to_nnf(&mut arena, x);
        assert!(every_not_wraps_a_literal(&arena, nnf));
    }

    #[test]
    fn nnf_closure_over_ite_and_eq() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let d = lit(&mut arena, 4).unwrap();
        let ite = mk_ite(&mut arena, a, b, c);
        let eq = mk_eq(&mut arena, vec![a, b, c, d]);
        let combo = mk_and(&mut arena, vec![ite, eq]);
        let nnf = to_nnf(&mut arena, combo);
        assert!(every_not_wraps_a_literal(&arena, nnf));
    }

    #[test]
    fn nnf_is_idempotent() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let x = mk_xor(&mut arena, vec![a, b]);
        let once = to_nnf(&mut arena, x);
        let twice = to_nnf(&mut arena, once);
        assert_eq!(once, twice);
    }
}
