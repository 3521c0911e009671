//! A hash-consed symbolic Boolean-expression engine.
//!
//! Callers build formulas over variables, constants, negation, and the
//! operators And/Or/Xor/Eq/Impl/Ite plus AtLeast-k cardinality through the
//! smart constructors in [`build`], which route every node through the
//! [`arena`]'s hash-cons table so that structurally identical expressions
//! always share one [`node::NodeId`]. From there, [`transform`] supplies the
//! algebraic rewrite pipeline (simplify, push-down-not, NNF, CNF, DNF,
//! complete-sum, restriction, composition, cofactors), [`cardinality`] and
//! [`tseitin`] supply the two encoders, and [`normalform`]/[`dimacs`] supply
//! the clause-set container and its DIMACS projections.
//!
//! This crate does not parse text, pretty-print expressions, or manage a
//! variable namespace — those are external collaborators that plug into the
//! constructors and the Tseitin/cardinality "fresh variable" closures.

/// Node arena and hash-cons table.
pub mod arena;

/// The node handle and kind tag.
pub mod node;

/// Smart constructors with the local algebraic reductions baked in.
pub mod build;

/// The error surface shared by every fallible operation.
pub mod error;

/// Points (partial variable assignments) and their enumeration.
pub mod point;

/// The algebraic rewrite pipeline: simplify, pushdown_not, to_nnf, to_cnf,
/// to_dnf, complete_sum, restrict, compose, cofactors.
pub mod transform;

/// AtLeast-k cardinality encoder, with shared-variable factoring.
pub mod cardinality;

/// Tseitin encoding: introduce fresh auxiliaries, get an equisatisfiable CNF.
pub mod tseitin;

/// The CNF/DNF clause-set container and DIMACS numbering.
pub mod normalform;

/// DIMACS CNF and DIMACS SAT text emission.
pub mod dimacs;

/// Scoped assumption stack.
pub mod assume;

pub use arena::Arena;
pub use error::{Error, Result};
pub use node::{Kind, NodeId};
