//! DIMACS text emission: the `p cnf` clause format for a [`ConjNormalForm`],
//! and the `p sat`/`p sate`/`p satx`/`p satex` prefix-operator format for
//! arbitrary (non-CNF) formulas.
//!
//! Grounded in `examples/original_source/src/boolexpr/expr.py`'s
//! `DimacsCNF.__str__` (header line plus `NormalForm.__str__`'s clause
//! body) and `expr2dimacssat`/`_expr2sat` for the SAT variant — the format
//! name is chosen by whether the formula contains an Xor ("x") and/or an
//! Eq ("e") node, exactly as the original's `"xor" in formula` /
//! `"=" in formula` string checks do, done here by tracking two booleans
//! during the same recursive walk instead of re-scanning the rendered
//! string.

use std::fmt;

use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::node::{Kind, NodeId};
use crate::normalform::{ConjNormalForm, LitMap};

/// Wraps a [`ConjNormalForm`] so its `Display` impl emits a complete
/// DIMACS CNF file: a `p cnf <nvars> <nclauses>` header followed by one
/// clause per line, each ending in ` 0`.
pub struct DimacsCnf<'a>(pub &'a ConjNormalForm);

impl fmt::Display for DimacsCnf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.0.nvars, self.0.nclauses())?;
        write!(f, "{}", self.0)
    }
}

/// Renders `expr` as a DIMACS SAT prefix-notation string under `litmap`,
/// choosing the header format (`sat`, `sate`, `satx`, `satex`) based on
/// whether an Eq and/or Xor node occurs. `expr` must be built only from
/// literals, `Not`, `Or`, `And`, `Xor`, and `Eq` — `Impl`, `Ite`, and
/// `AtLeast` have no DIMACS SAT prefix operator and must be eliminated
/// first (e.g. via [`crate::transform::to_nnf`], which removes all three).
pub fn to_dimacs_sat(arena: &Arena, expr: NodeId, litmap: &LitMap) -> Result<String> {
    let mut has_xor = false;
    let mut has_eq = false;
    let body = sat_body(arena, expr, litmap, &mut has_xor, &mut has_eq)?;
    let fmt = match (has_xor, has_eq) {
        (true, true) => "satex",
        (true, false) => "satx",
        (false, true) => "sate",
        (false, false) => "sat",
    };
    Ok(format!("p {fmt} {}\n{body}", litmap.nvars))
}

fn sat_body(arena: &Arena, x: NodeId, litmap: &LitMap, has_xor: &mut bool, has_eq: &mut bool) -> Result<String> {
    match arena.kind(x) {
        k if k.is_literal() => Ok(litmap.signed_of(x)?.to_string()),
        Kind::Not => {
            let c = arena.not_operand(x).unwrap();
            Ok(format!("-({})", sat_body(arena, c, litmap, has_xor, has_eq)?))
        }
        Kind::Or => {
            let parts = join_children(arena, x, litmap, has_xor, has_eq)?;
            Ok(format!("+({parts})"))
        }
        Kind::And => {
            let parts = join_children(arena, x, litmap, has_xor, has_eq)?;
            Ok(format!("*({parts})"))
        }
        Kind::Xor => {
            *has_xor = true;
            let parts = join_children(arena, x, litmap, has_xor, has_eq)?;
            Ok(format!("xor({parts})"))
        }
        Kind::Eq => {
            *has_eq = true;
            let parts = join_children(arena, x, litmap, has_xor, has_eq)?;
            Ok(format!("=({parts})"))
        }
        other => Err(Error::ShapeError(format!(
            "DIMACS SAT output supports Literal/Not/Or/And/Xor/Eq only, got {other:?}"
        ))),
    }
}

fn join_children(
    arena: &Arena,
    x: NodeId,
    litmap: &LitMap,
    has_xor: &mut bool,
    has_eq: &mut bool,
) -> Result<String> {
    let ops = arena.operands(x).unwrap();
    let parts: Result<Vec<String>> = ops.iter().map(|&o| sat_body(arena, o, litmap, has_xor, has_eq)).collect();
    Ok(parts?.join(" "))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::build::{lit, mk_and, mk_not, mk_or, mk_xor};
    use crate::normalform::encode_cnf;
    use crate::normalform::encode_inputs;

    /// Scenario 6: DIMACS emission of `And(Or(a, Not(b)), Or(b, c))` with
    /// a->1, b->2, c->3 yields header `p cnf 3 2` and the two clauses.
    #[test]
    fn scenario_dimacs_cnf_header_and_body() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let c = lit(&mut arena, 3).unwrap();
        let nb = mk_not(&mut arena, b);
        let clause1 = mk_or(&mut arena, vec![a, nb]);
        let clause2 = mk_or(&mut arena, vec![b, c]);
        let expr = mk_and(&mut arena, vec![clause1, clause2]);

        let (_, cnf) = encode_cnf(&mut arena, expr, false).unwrap();
        let rendered = format!("{}", DimacsCnf(&cnf));
        let mut lines: Vec<&str> = rendered.lines().collect();
        let header = lines.remove(0);
        assert_eq!(header, "p cnf 3 2");
        lines.sort_unstable();
        assert_eq!(lines, vec!["1 -2 0", "2 3 0"]);
    }

    #[test]
    fn dimacs_sat_plain_formula_has_no_suffix() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let na = mk_not(&mut arena, a);
        let or_b_na = mk_or(&mut arena, vec![b, na]);
        let expr = mk_and(&mut arena, vec![a, or_b_na]);
        let litmap = encode_inputs(&mut arena, expr, false).unwrap();
        let rendered = to_dimacs_sat(&arena, expr, &litmap).unwrap();
        assert!(rendered.starts_with("p sat 2\n"));
    }

    #[test]
    fn dimacs_sat_xor_formula_gets_satx_header() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let expr = mk_xor(&mut arena, vec![a, b]);
        let litmap = encode_inputs(&mut arena, expr, false).unwrap();
        let rendered = to_dimacs_sat(&arena, expr, &litmap).unwrap();
        assert!(rendered.starts_with("p satx 2\n"));
        assert!(rendered.contains("xor("));
    }

    #[test]
    fn dimacs_sat_rejects_impl_and_ite() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let expr = crate::build::mk_impl(&mut arena, a, b);
        let litmap = encode_inputs(&mut arena, expr, false).unwrap();
        assert!(to_dimacs_sat(&arena, expr, &litmap).is_err());
    }
}
