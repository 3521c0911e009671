//! The node handle and kind tag shared across the arena and every transform.

use std::fmt;

/// A stable handle to a node owned by some [`Arena`](crate::arena::Arena).
///
/// Two handles compare equal iff they name the same node. Because the arena
/// hash-conses on construction, two structurally identical expressions
/// always produce the same `NodeId` — pointer/identity equality this way
/// implies semantic equality (the converse does not hold, e.g. `a & !a` and
/// `b & !b` are semantically equal but distinct nodes).
///
/// A `NodeId` is only meaningful relative to the arena that produced it;
/// mixing ids from two different arenas silently produces nonsense, since
/// both are simply indices into a `Vec`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The tag of an expression node, one of the eleven shapes the data model
/// admits (`Var` and `Comp` are the two literal kinds over one variable
/// slot).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    /// The constant false, a singleton.
    Zero,
    /// The constant true, a singleton.
    One,
    /// A positive literal `x_v`.
    Var,
    /// A negative literal `¬x_v`.
    Comp,
    /// A negation that could not be pushed to a literal.
    Not,
    /// A conjunction of two or more operands.
    And,
    /// A disjunction of two or more operands.
    Or,
    /// A parity (XOR) of two or more operands.
    Xor,
    /// An all-equal relation over two or more operands.
    Eq,
    /// A material implication.
    Impl,
    /// An if-then-else.
    Ite,
    /// A cardinality constraint: at least `k` of the operands are true.
    AtLeast,
}

impl Kind {
    /// Whether this kind is a leaf (constant or literal).
    pub fn is_atom(self) -> bool {
        matches!(self, Kind::Zero | Kind::One | Kind::Var | Kind::Comp)
    }

    /// Whether this kind is one of the two literal kinds.
    pub fn is_literal(self) -> bool {
        matches!(self, Kind::Var | Kind::Comp)
    }

    /// Whether this kind is one of the two constant kinds.
    pub fn is_constant(self) -> bool {
        matches!(self, Kind::Zero | Kind::One)
    }

    /// Whether this kind is one of the associative/commutative n-ary
    /// operators whose operands are canonically ordered and deduplicated.
    pub fn is_nary(self) -> bool {
        matches!(self, Kind::And | Kind::Or | Kind::Xor | Kind::Eq)
    }
}
