//! Cofactor-based operations: `iter_cofactors` and the derived universal /
//! existential quantification, derivative, and Shannon decomposition.

use crate::arena::Arena;
use crate::build::{lit, mk_and, mk_not, mk_or, mk_xor};
use crate::node::NodeId;
use crate::point::iter_points;
use crate::transform::subst::restrict;

/// Yields the `2^|vars|` restrictions of `x` over every 0/1 assignment to
/// `vars`, in the same enumeration order as [`crate::point::iter_points`].
pub fn iter_cofactors(arena: &mut Arena, x: NodeId, vars: &[u32]) -> Vec<NodeId> {
    let points: Vec<_> = iter_points(vars).collect();
    points
        .into_iter()
        .map(|p| restrict(arena, x, &p))
        .collect()
}

/// Universal quantification: `∀vars. x`, the conjunction of every cofactor.
pub fn universal(arena: &mut Arena, x: NodeId, vars: &[u32]) -> NodeId {
    let cofactors = iter_cofactors(arena, x, vars);
    mk_and(arena, cofactors)
}

/// Existential quantification: `∃vars. x`, the disjunction of every
/// cofactor.
pub fn existential(arena: &mut Arena, x: NodeId, vars: &[u32]) -> NodeId {
    let cofactors = iter_cofactors(arena, x, vars);
    mk_or(arena, cofactors)
}

/// The Boolean derivative of `x` with respect to `v`: `cofactor(x,v=1) ⊕
/// cofactor(x,v=0)` — true exactly where flipping `v` flips `x`.
pub fn derivative(arena: &mut Arena, x: NodeId, v: u32) -> NodeId {
    let mut cofactors = iter_cofactors(arena, x, &[v]);
    let c0 = cofactors.remove(0); // v=0, per iter_points' MSB-first counting order
    let c1 = cofactors.remove(0); // v=1
    mk_xor(arena, vec![c0, c1])
}

/// Shannon decomposition of `x` around `v`:
/// `Or(And(v, restrict(x,v=1)), And(¬v, restrict(x,v=0)))`.
pub fn shannon(arena: &mut Arena, x: NodeId, v: u32) -> Result<NodeId, crate::error::Error> {
    let mut cofactors = iter_cofactors(arena, x, &[v]);
    let c0 = cofactors.remove(0);
    let c1 = cofactors.remove(0);
    let pv = lit(arena, v as i64)?;
    let nv = mk_not(arena, pv);
    let a = mk_and(arena, vec![pv, c1]);
    let b = mk_and(arena, vec![nv, c0]);
    Ok(mk_or(arena, vec![a, b]))
}
