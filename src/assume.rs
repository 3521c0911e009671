//! Scoped assumption stack.
//!
//! The specification's "assumption scope" protocol (§6): a literal, or a
//! conjunction of literals, may be pushed on entry to a scope and popped on
//! exit; scopes nest; exiting an unknown scope is a no-op; pushing a
//! non-literal is `InvalidAssumption`. Design note §9 asks for exactly this
//! — "no ambient control-flow magic... the scope object's lifetime
//! delimits the assumption" — so this is a plain stack value a caller
//! drives explicitly, not a `Drop`-guard or other RAII trick.
//!
//! This module only tracks *which* literals are currently assumed; it does
//! not implement `satisfy_one` or any other solving behavior (out of
//! scope, §1). A caller layering a SAT consumer on top reads
//! [`AssumeStack::as_point`] to pre-commit those literals.

use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::node::{Kind, NodeId};
use crate::point::Point;

/// Identifies one entered scope. Returned by [`AssumeStack::enter_scope`];
/// pass it back to [`AssumeStack::exit_scope`] to close that scope (and
/// any scope nested inside it).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Scope(u64);

/// An explicit stack of (scope, assumption) entries. Assumptions are
/// literals or conjunctions of literals; `as_point` flattens every
/// currently-active assumption into a single partial assignment.
#[derive(Default)]
pub struct AssumeStack {
    active_scopes: Vec<u64>,
    entries: Vec<(u64, NodeId)>,
    next_id: u64,
}

impl AssumeStack {
    pub fn new() -> Self {
        AssumeStack {
            active_scopes: Vec::new(),
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Opens a new scope nested inside whatever scope (if any) is
    /// currently open.
    pub fn enter_scope(&mut self) -> Scope {
        self.next_id += 1;
        self.active_scopes.push(self.next_id);
        Scope(self.next_id)
    }

    /// Closes `scope` and, since scopes nest, every scope opened after it.
    /// A `scope` that is not currently open (already exited, or from a
    /// different `AssumeStack`) is a no-op.
    pub fn exit_scope(&mut self, scope: Scope) {
        if let Some(pos) = self.active_scopes.iter().position(|&s| s == scope.0) {
            let closed: std::collections::HashSet<u64> = self.active_scopes.drain(pos..).collect();
            self.entries.retain(|(s, _)| !closed.contains(s));
        }
    }

    /// Pushes `x` as an assumption on the innermost open scope. `x` must
    /// be a literal or an `And` of literals; anything else is
    /// `Error::InvalidAssumption`. Pushing with no scope currently open
    /// (callers must `enter_scope()` first) is also `Error::InvalidAssumption`
    /// — there is no ambient default scope to fall back to.
    pub fn push(&mut self, arena: &Arena, x: NodeId) -> Result<()> {
        if !is_literal_or_literal_conjunction(arena, x) {
            return Err(Error::InvalidAssumption);
        }
        let Some(&scope) = self.active_scopes.last() else {
            return Err(Error::InvalidAssumption);
        };
        self.entries.push((scope, x));
        Ok(())
    }

    /// Every currently-assumed literal/conjunction node, outermost scope
    /// first, in push order.
    pub fn assumptions(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|&(_, x)| x)
    }

    /// Flattens every currently-active assumption into one [`Point`].
    /// Conflicting assumptions (the same variable assumed both ways across
    /// nested scopes) simply let the later push win, matching plain `Point`
    /// insertion semantics elsewhere in this crate.
    pub fn as_point(&self, arena: &Arena) -> Point {
        let mut point = Point::new();
        for &(_, x) in &self.entries {
            collect_literals(arena, x, &mut point);
        }
        point
    }

    /// Whether any scope is currently open.
    pub fn is_empty(&self) -> bool {
        self.active_scopes.is_empty()
    }
}

fn is_literal_or_literal_conjunction(arena: &Arena, x: NodeId) -> bool {
    if arena.kind(x).is_literal() {
        return true;
    }
    if arena.kind(x) == Kind::And {
        return arena.operands(x).unwrap().iter().all(|&o| arena.kind(o).is_literal());
    }
    false
}

fn collect_literals(arena: &Arena, x: NodeId, point: &mut Point) {
    match arena.kind(x) {
        Kind::Var => {
            point.insert(arena.literal(x).unwrap() as u32, true);
        }
        Kind::Comp => {
            point.insert((-arena.literal(x).unwrap()) as u32, false);
        }
        Kind::And => {
            for &o in arena.operands(x).unwrap() {
                collect_literals(arena, o, point);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::build::{lit, mk_and, mk_not};

    #[test]
    fn push_literal_and_conjunction() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let nb = mk_not(&mut arena, b);
        let conj = mk_and(&mut arena, vec![a, nb]);

        let mut stack = AssumeStack::new();
        let s = stack.enter_scope();
        stack.push(&arena, conj).unwrap();
        let point = stack.as_point(&arena);
        assert_eq!(point.get(&1), Some(&true));
        assert_eq!(point.get(&2), Some(&false));
        stack.exit_scope(s);
        assert!(stack.as_point(&arena).is_empty());
    }

    #[test]
    fn non_literal_push_is_rejected() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();
        let or_ab = crate::build::mk_or(&mut arena, vec![a, b]);

        let mut stack = AssumeStack::new();
        stack.enter_scope();
        assert!(matches!(stack.push(&arena, or_ab), Err(Error::InvalidAssumption)));
    }

    #[test]
    fn exiting_unknown_scope_is_a_no_op() {
        let mut stack = AssumeStack::new();
        let s = stack.enter_scope();
        stack.exit_scope(s);
        // Exiting again (already closed) must not panic or disturb state.
        stack.exit_scope(s);
        assert!(stack.is_empty());
    }

    #[test]
    fn exiting_outer_scope_closes_nested_scopes_too() {
        let mut arena = Arena::new();
        let a = lit(&mut arena, 1).unwrap();
        let b = lit(&mut arena, 2).unwrap();

        let mut stack = AssumeStack::new();
        let outer = stack.enter_scope();
        stack.push(&arena, a).unwrap();
        stack.enter_scope();
        stack.push(&arena, b).unwrap();

        stack.exit_scope(outer);
        assert!(stack.is_empty());
        assert!(stack.as_point(&arena).is_empty());
    }
}
