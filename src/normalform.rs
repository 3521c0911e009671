//! The CNF/DNF clause-set container and DIMACS variable numbering.
//!
//! Grounded in `examples/original_source/src/boolexpr/expr.py`'s
//! `NormalForm`/`DisjNormalForm`/`ConjNormalForm` trio: a pair `(nvars,
//! clauses)` where `clauses` is a set of frozensets of nonzero signed
//! integers. The Python original expresses `DisjNormalForm`/
//! `ConjNormalForm` as subclasses sharing a `NormalForm` base; this
//! implementation uses two small structs instead (no shared base trait),
//! since the only behavior that differs between them is which operator
//! `decode` rebuilds with and which concrete type `invert` produces —
//! not enough shared state to justify a trait object, and exhaustive
//! `match`es on a two-variant enum would just move the duplication
//! elsewhere.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::arena::Arena;
use crate::build::{lit, mk_and, mk_or};
use crate::error::{Error, Result};
use crate::node::{Kind, NodeId};

/// A signed, nonzero integer: positive is a positive literal, negative its
/// complement, magnitude the variable index.
pub type Literal = i64;

/// A disjunction (CNF) or conjunction (DNF) of literals, depending on
/// which container holds it.
pub type Clause = BTreeSet<Literal>;

/// A set of clauses.
pub type Clauses = BTreeSet<Clause>;

/// The expression-literal <-> signed-integer bijection produced by
/// [`encode_inputs`]. Only meaningful relative to the [`Arena`] it was
/// built against.
#[derive(Clone, Debug)]
pub struct LitMap {
    pub nvars: u32,
    lit_to_node: HashMap<Literal, NodeId>,
    node_to_lit: HashMap<NodeId, Literal>,
    /// Maps a DIMACS *position* (1..=nvars, always positive) to the
    /// underlying variable index — the identity map unless the caller
    /// asked for `renumber: true`.
    pos_to_var: HashMap<i64, u32>,
}

impl LitMap {
    /// The signed integer standing for expression node `id`, which must be
    /// one of the literals this map was built from.
    pub fn signed_of(&self, id: NodeId) -> Result<Literal> {
        self.node_to_lit
            .get(&id)
            .copied()
            .ok_or_else(|| Error::ShapeError("node is not a literal in this LitMap's support".into()))
    }

    /// The expression node standing for signed integer `signed`.
    pub fn resolve(&self, signed: Literal) -> Result<NodeId> {
        self.lit_to_node
            .get(&signed)
            .copied()
            .ok_or_else(|| Error::ShapeError(format!("{signed} is not a literal index known to this LitMap")))
    }

    /// The variable index named by DIMACS position `pos` (always positive,
    /// `1..=nvars`).
    pub fn variable_of(&self, pos: i64) -> Result<u32> {
        self.pos_to_var
            .get(&pos.abs())
            .copied()
            .ok_or_else(|| Error::ShapeError(format!("{pos} is out of range for this LitMap's {} variables", self.nvars)))
    }
}

/// Walks `expr`'s support (via the arena's DAG iterator) and assigns each
/// distinct variable a signed-integer slot. When `renumber` is `false` (the
/// common case, since this engine already uses small positive integers as
/// variable indices) the slot is the variable index itself; when `true`,
/// slots are reassigned contiguously as `1..=nvars` in ascending order of
/// variable index, for callers who want a dense DIMACS universe regardless
/// of which indices happen to occur.
pub fn encode_inputs(arena: &mut Arena, expr: NodeId, renumber: bool) -> Result<LitMap> {
    let support: Vec<u32> = arena.support(expr).into_iter().collect();
    let nvars = support.len() as u32;

    let mut lit_to_node = HashMap::new();
    let mut node_to_lit = HashMap::new();
    let mut pos_to_var = HashMap::new();

    for (i, &v) in support.iter().enumerate() {
        let slot = if renumber { (i + 1) as i64 } else { v as i64 };
        let pos_node = lit(arena, v as i64)?;
        let neg_node = lit(arena, -(v as i64))?;
        lit_to_node.insert(slot, pos_node);
        lit_to_node.insert(-slot, neg_node);
        node_to_lit.insert(pos_node, slot);
        node_to_lit.insert(neg_node, -slot);
        pos_to_var.insert(slot, v);
    }

    Ok(LitMap {
        nvars,
        lit_to_node,
        node_to_lit,
        pos_to_var,
    })
}

fn encode_literal(id: NodeId, litmap: &LitMap) -> Result<Literal> {
    litmap.signed_of(id)
}

/// Encodes one CNF clause (an `Or` of literals, or a bare literal) as a
/// set of signed integers.
fn encode_cnf_clause(arena: &Arena, clause: NodeId, litmap: &LitMap) -> Result<Clause> {
    match arena.kind(clause) {
        Kind::Or => arena
            .operands(clause)
            .unwrap()
            .iter()
            .map(|&l| encode_literal(l, litmap))
            .collect(),
        k if k.is_literal() => Ok(Clause::from([encode_literal(clause, litmap)?])),
        other => Err(Error::ShapeError(format!(
            "expected a CNF clause (Or of literals, or a literal), got {other:?}"
        ))),
    }
}

/// Encodes one DNF cube (an `And` of literals, or a bare literal) as a set
/// of signed integers.
fn encode_dnf_cube(arena: &Arena, cube: NodeId, litmap: &LitMap) -> Result<Clause> {
    match arena.kind(cube) {
        Kind::And => arena
            .operands(cube)
            .unwrap()
            .iter()
            .map(|&l| encode_literal(l, litmap))
            .collect(),
        k if k.is_literal() => Ok(Clause::from([encode_literal(cube, litmap)?])),
        other => Err(Error::ShapeError(format!(
            "expected a DNF cube (And of literals, or a literal), got {other:?}"
        ))),
    }
}

/// Projects an expression already in CNF form (per `to_cnf`'s contract: an
/// `And` of `Or`s of literals, or a degenerate literal/`Or`/constant) into
/// a compact [`ConjNormalForm`]. Fails with [`Error::ShapeError`] if `expr`
/// is not CNF-shaped.
pub fn encode_cnf(arena: &mut Arena, expr: NodeId, renumber: bool) -> Result<(LitMap, ConjNormalForm)> {
    let litmap = encode_inputs(arena, expr, renumber)?;
    if arena.is_constant(expr) {
        return Err(Error::ShapeError("encode_cnf requires a non-constant CNF expression".into()));
    }
    let top: Vec<NodeId> = match arena.kind(expr) {
        Kind::And => arena.operands(expr).unwrap().to_vec(),
        _ => vec![expr],
    };
    let mut clauses = Clauses::new();
    for c in top {
        clauses.insert(encode_cnf_clause(arena, c, &litmap)?);
    }
    Ok((litmap.clone(), ConjNormalForm::new(litmap.nvars, clauses)))
}

/// Dual of [`encode_cnf`] for an expression already in DNF form.
pub fn encode_dnf(arena: &mut Arena, expr: NodeId, renumber: bool) -> Result<(LitMap, DisjNormalForm)> {
    let litmap = encode_inputs(arena, expr, renumber)?;
    if arena.is_constant(expr) {
        return Err(Error::ShapeError("encode_dnf requires a non-constant DNF expression".into()));
    }
    let top: Vec<NodeId> = match arena.kind(expr) {
        Kind::Or => arena.operands(expr).unwrap().to_vec(),
        _ => vec![expr],
    };
    let mut cubes = Clauses::new();
    for c in top {
        cubes.insert(encode_dnf_cube(arena, c, &litmap)?);
    }
    Ok((litmap.clone(), DisjNormalForm::new(litmap.nvars, cubes)))
}

/// Expands every clause missing one or more of the `1..=nvars` variables
/// into the full set of extensions over the missing variables — the
/// "canonical full form" `NormalForm.reduce()` names. Shared by both
/// container types; which operator the expansion implies (union for a
/// clause, i.e. CNF, vs. for a cube, i.e. DNF) does not matter at this
/// level, since both are just "add one more signed-literal set member".
fn reduce_clauses(nvars: u32, clauses: Clauses) -> Clauses {
    let universe: Vec<i64> = (1..=nvars as i64).collect();
    let mut out = Clauses::new();
    for clause in clauses {
        let present: BTreeSet<i64> = clause.iter().map(|l| l.abs()).collect();
        let missing: Vec<i64> = universe.iter().copied().filter(|v| !present.contains(v)).collect();
        if missing.is_empty() {
            out.insert(clause);
            continue;
        }
        for mask in 0u64..(1u64 << missing.len()) {
            let mut extended = clause.clone();
            for (i, &v) in missing.iter().enumerate() {
                extended.insert(if (mask >> i) & 1 == 1 { v } else { -v });
            }
            out.insert(extended);
        }
    }
    out
}

/// Renders a clause's literals for text emission: ascending absolute
/// value, positive before negative on a tie — the common DIMACS
/// convention the specification names. Clause *order* within a container
/// and literal order within a [`Clause`]'s internal `BTreeSet` storage
/// remain unspecified; this is purely a display-time sort.
fn ordered_literals(clause: &Clause) -> Vec<Literal> {
    let mut out: Vec<Literal> = clause.iter().copied().collect();
    out.sort_by_key(|&l| (l.abs(), l < 0));
    out
}

/// Disjunctive normal form: semantically an `Or` of `And`s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisjNormalForm {
    pub nvars: u32,
    pub clauses: Clauses,
}

/// Conjunctive normal form: semantically an `And` of `Or`s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConjNormalForm {
    pub nvars: u32,
    pub clauses: Clauses,
}

impl DisjNormalForm {
    pub fn new(nvars: u32, clauses: Clauses) -> Self {
        DisjNormalForm { nvars, clauses }
    }

    pub fn ncubes(&self) -> usize {
        self.clauses.len()
    }

    /// De Morgan's at the container level: negate every literal and swap
    /// to the dual container.
    pub fn invert(self) -> ConjNormalForm {
        let clauses = self
            .clauses
            .into_iter()
            .map(|c| c.into_iter().map(|l| -l).collect())
            .collect();
        ConjNormalForm::new(self.nvars, clauses)
    }

    pub fn reduce(self) -> Self {
        DisjNormalForm::new(self.nvars, reduce_clauses(self.nvars, self.clauses))
    }

    /// Rebuilds this DNF as an `Or` of `And`s over the literals `litmap`
    /// names.
    pub fn decode(&self, arena: &mut Arena, litmap: &LitMap) -> Result<NodeId> {
        let mut cubes = Vec::with_capacity(self.clauses.len());
        for cube in &self.clauses {
            let lits: Vec<NodeId> = cube.iter().map(|&l| litmap.resolve(l)).collect::<Result<_>>()?;
            cubes.push(mk_and(arena, lits));
        }
        Ok(mk_or(arena, cubes))
    }
}

impl ConjNormalForm {
    pub fn new(nvars: u32, clauses: Clauses) -> Self {
        ConjNormalForm { nvars, clauses }
    }

    pub fn nclauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn invert(self) -> DisjNormalForm {
        let clauses = self
            .clauses
            .into_iter()
            .map(|c| c.into_iter().map(|l| -l).collect())
            .collect();
        DisjNormalForm::new(self.nvars, clauses)
    }

    pub fn reduce(self) -> Self {
        ConjNormalForm::new(self.nvars, reduce_clauses(self.nvars, self.clauses))
    }

    /// Rebuilds this CNF as an `And` of `Or`s over the literals `litmap`
    /// names.
    pub fn decode(&self, arena: &mut Arena, litmap: &LitMap) -> Result<NodeId> {
        let mut clause_nodes = Vec::with_capacity(self.clauses.len());
        for clause in &self.clauses {
            let lits: Vec<NodeId> = clause.iter().map(|&l| litmap.resolve(l)).collect::<Result<_>>()?;
            clause_nodes.push(mk_or(arena, lits));
        }
        Ok(mk_and(arena, clause_nodes))
    }

    /// Converts a DIMACS solver's signed-assignment vector (one entry per
    /// variable position `1..=nvars`, sign giving the assigned polarity)
    /// into a [`crate::point::Point`] over the underlying variable
    /// indices.
    pub fn soln2point(soln: &[i64], litmap: &LitMap) -> Result<crate::point::Point> {
        let mut point = crate::point::Point::new();
        for (i, &val) in soln.iter().enumerate() {
            let pos = (i + 1) as i64;
            let var = litmap.variable_of(pos)?;
            point.insert(var, val > 0);
        }
        Ok(point)
    }
}

impl fmt::Display for ConjNormalForm {
    /// One line per clause, literals space-separated, terminated by ` 0` —
    /// the clause body of the DIMACS `p cnf` format (without the header
    /// line; see [`crate::dimacs::DimacsCnf`] for the full file).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.clauses {
            let lits = ordered_literals(clause);
            let body = lits.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(" ");
            writeln!(f, "{body} 0")?;
        }
        Ok(())
    }
}
