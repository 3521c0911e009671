//! Smart constructors: every node in the arena is created through one of
//! these functions, never through `Shape` directly. Each applies the local
//! algebraic reductions from the specification before consulting the
//! hash-cons table, so that `simplify` on an already-built tree is the
//! identity — the reductions are baked into construction, not bolted on
//! afterwards.

use std::collections::HashMap;

use crate::arena::{Arena, Shape};
use crate::error::{Error, Result};
use crate::node::{Kind, NodeId};

/// `lit(+i)` returns the positive literal `x_i`; `lit(-i)` returns `¬x_i`.
/// Fails if `i` is zero.
pub fn lit(arena: &mut Arena, idx: i64) -> Result<NodeId> {
    if idx == 0 {
        return Err(Error::InvalidLiteralIndex);
    }
    Ok(if idx > 0 {
        arena.intern(Shape::Var(idx as u32))
    } else {
        arena.intern(Shape::Comp((-idx) as u32))
    })
}

/// `Not(One)→Zero`, `Not(Zero)→One`, `Not(Not(x))→x`, and the literal
/// polarity flip; otherwise allocates a genuine `Not` node.
pub fn mk_not(arena: &mut Arena, x: NodeId) -> NodeId {
    if arena.is_one(x) {
        return arena.zero();
    }
    if arena.is_zero(x) {
        return arena.one();
    }
    if let Some(y) = arena.not_operand(x) {
        return y;
    }
    if let Some(idx) = arena.literal(x) {
        return if idx > 0 {
            arena.intern(Shape::Comp(idx as u32))
        } else {
            arena.intern(Shape::Var((-idx) as u32))
        };
    }
    arena.intern(Shape::Not(x))
}

/// Expands one level of nesting: any child already of kind `kind` is
/// replaced by its own operands. Used by the four n-ary constructors to
/// enforce "no operator appears as its own direct child".
fn flatten_nary(arena: &Arena, children: Vec<NodeId>, kind: Kind) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(children.len());
    for x in children {
        if arena.kind(x) == kind {
            if let Some(ops) = arena.operands(x) {
                out.extend_from_slice(ops);
                continue;
            }
        }
        out.push(x);
    }
    out
}

/// True if some operand's negation is also an operand — the And/Or/Eq
/// short-circuit condition. Building `mk_not` for each operand is cheap:
/// the operands are already-reduced nodes, so this never recurses deeply.
fn has_complement_pair(arena: &mut Arena, operands: &[NodeId]) -> bool {
    let set: std::collections::HashSet<NodeId> = operands.iter().copied().collect();
    for &x in operands {
        let notx = mk_not(arena, x);
        if set.contains(&notx) {
            return true;
        }
    }
    false
}

/// Drops `One` operands, short-circuits to `Zero` on any `Zero` operand or
/// complementary pair, flattens nested `And`s, deduplicates, and collapses
/// to the sole remaining operand or to `One` if none remain.
pub fn mk_and(arena: &mut Arena, children: Vec<NodeId>) -> NodeId {
    let mut operands = flatten_nary(arena, children, Kind::And);
    operands.retain(|&x| !arena.is_one(x));
    if operands.iter().any(|&x| arena.is_zero(x)) {
        return arena.zero();
    }
    operands.sort_unstable();
    operands.dedup();
    if has_complement_pair(arena, &operands) {
        return arena.zero();
    }
    match operands.len() {
        0 => arena.one(),
        1 => operands[0],
        _ => arena.intern(Shape::And(operands.into())),
    }
}

/// Dual of [`mk_and`]: `Zero`/`One` and the short-circuit constant swap.
pub fn mk_or(arena: &mut Arena, children: Vec<NodeId>) -> NodeId {
    let mut operands = flatten_nary(arena, children, Kind::Or);
    operands.retain(|&x| !arena.is_zero(x));
    if operands.iter().any(|&x| arena.is_one(x)) {
        return arena.one();
    }
    operands.sort_unstable();
    operands.dedup();
    if has_complement_pair(arena, &operands) {
        return arena.one();
    }
    match operands.len() {
        0 => arena.zero(),
        1 => operands[0],
        _ => arena.intern(Shape::Or(operands.into())),
    }
}

/// Flattens nested `Xor`s, drops `Zero` operands, folds `One` operands into
/// an outer-parity flag, cancels operands occurring an even number of times
/// (XOR is its own inverse), and emits the flag as an outer `Not` if odd.
pub fn mk_xor(arena: &mut Arena, children: Vec<NodeId>) -> NodeId {
    let flat = flatten_nary(arena, children, Kind::Xor);
    let mut flip = false;
    let mut counts: HashMap<NodeId, usize> = HashMap::new();
    for x in flat {
        if arena.is_zero(x) {
            continue;
        }
        if arena.is_one(x) {
            flip = !flip;
            continue;
        }
        *counts.entry(x).or_insert(0) += 1;
    }
    let mut operands: Vec<NodeId> = counts
        .into_iter()
        .filter(|&(_, c)| c % 2 == 1)
        .map(|(id, _)| id)
        .collect();
    operands.sort_unstable();
    let base = match operands.len() {
        0 => arena.zero(),
        1 => operands[0],
        _ => arena.intern(Shape::Xor(operands.into())),
    };
    if flip {
        mk_not(arena, base)
    } else {
        base
    }
}

/// `Eq()` and `Eq(x)` are `One`. `Eq(x, y)` reduces to `Not(Xor(x, y))`. A
/// constant operand forces every other operand to equal that constant
/// (`And` for `One`, `And` of negations for `Zero`). A complementary pair
/// among three-or-more operands is a contradiction (`Zero`), since no
/// assignment can make a variable equal to its own negation. Otherwise the
/// operands are deduplicated and kept in n-ary form.
///
/// Nested `Eq`s are deliberately *not* flattened: unlike And/Or/Xor, `Eq`
/// is not associative in a way that lets a nested `Eq` be absorbed into its
/// parent's operand list without changing meaning.
pub fn mk_eq(arena: &mut Arena, children: Vec<NodeId>) -> NodeId {
    let has_one = children.iter().any(|&x| arena.is_one(x));
    let has_zero = children.iter().any(|&x| arena.is_zero(x));
    if has_one && has_zero {
        return arena.zero();
    }
    if has_one {
        let rest: Vec<NodeId> = children.into_iter().filter(|&x| !arena.is_one(x)).collect();
        return mk_and(arena, rest);
    }
    if has_zero {
        let rest: Vec<NodeId> = children.into_iter().filter(|&x| !arena.is_zero(x)).collect();
        let negated: Vec<NodeId> = rest.iter().map(|&x| mk_not(arena, x)).collect();
        return mk_and(arena, negated);
    }

    let mut operands = children;
    operands.sort_unstable();
    operands.dedup();
    match operands.len() {
        0 => arena.one(),
        1 => arena.one(),
        2 => {
            let x = mk_xor(arena, vec![operands[0], operands[1]]);
            mk_not(arena, x)
        }
        _ => {
            if has_complement_pair(arena, &operands) {
                arena.zero()
            } else {
                arena.intern(Shape::Eq(operands.into()))
            }
        }
    }
}

/// `Impl(Zero,_)→One`, `Impl(_,One)→One`, `Impl(One,q)→q`, `Impl(p,Zero)→
/// Not(p)`, `Impl(p,p)→One`; otherwise a genuine `Impl` node.
pub fn mk_impl(arena: &mut Arena, p: NodeId, q: NodeId) -> NodeId {
    if arena.is_zero(p) {
        return arena.one();
    }
    if arena.is_one(q) {
        return arena.one();
    }
    if arena.is_one(p) {
        return q;
    }
    if arena.is_zero(q) {
        return mk_not(arena, p);
    }
    if p == q {
        return arena.one();
    }
    arena.intern(Shape::Impl(p, q))
}

/// `Ite(One,a,_)→a`, `Ite(Zero,_,b)→b`, `Ite(s,a,a)→a`, `Ite(s,One,Zero)→s`,
/// `Ite(s,Zero,One)→Not(s)`, `Ite(Not(s),a,b)→Ite(s,b,a)`; otherwise a
/// genuine `Ite` node.
pub fn mk_ite(arena: &mut Arena, s: NodeId, d1: NodeId, d0: NodeId) -> NodeId {
    if arena.is_one(s) {
        return d1;
    }
    if arena.is_zero(s) {
        return d0;
    }
    if d1 == d0 {
        return d1;
    }
    if arena.is_one(d1) && arena.is_zero(d0) {
        return s;
    }
    if arena.is_zero(d1) && arena.is_one(d0) {
        return mk_not(arena, s);
    }
    if let Some(ns) = arena.not_operand(s) {
        return mk_ite(arena, ns, d0, d1);
    }
    arena.intern(Shape::Ite(s, d1, d0))
}

/// "At least `k` of `operands` are true." Removes `Zero` operands,
/// decrements `k` once per `One` operand removed, then applies the edge
/// forms: `k≤0→One`, `k>n→Zero`, `k=1→Or`, `k=n→And`. A genuine `AtLeast`
/// node is allocated only when `2 ≤ k < n`. Operands form a multiset:
/// unlike the other n-ary kinds, duplicates are not removed, since they are
/// semantically meaningful cardinality inputs — only sorted for canonical
/// form.
pub fn mk_atleast(arena: &mut Arena, k: i64, operands: Vec<NodeId>) -> NodeId {
    let mut k = k;
    let mut kept = Vec::with_capacity(operands.len());
    for x in operands {
        if arena.is_zero(x) {
            continue;
        }
        if arena.is_one(x) {
            k -= 1;
            continue;
        }
        kept.push(x);
    }
    let n = kept.len() as i64;
    if k <= 0 {
        return arena.one();
    }
    if k > n {
        return arena.zero();
    }
    if k == 1 {
        return mk_or(arena, kept);
    }
    if k == n {
        return mk_and(arena, kept);
    }
    kept.sort_unstable();
    arena.intern(Shape::AtLeast(k, kept.into()))
}
