//! The algebraic rewrite pipeline: `simplify`, `pushdown_not`, `to_binary`,
//! `to_nnf`, `to_cnf`/`to_dnf`, `complete_sum`, and the cofactor/substitution
//! machinery they're built on. Every function here is pure: it returns a
//! (possibly identical, by identity) node and never mutates an existing
//! node's meaning.

pub mod binary;
pub mod cnf_dnf;
pub mod cofactor;
pub mod complete_sum;
pub mod nnf;
pub mod pushdown_not;
pub mod simplify;
pub mod subst;

pub use binary::to_binary;
pub use cnf_dnf::{to_cnf, to_dnf};
pub use cofactor::{derivative, existential, iter_cofactors, shannon, universal};
pub use complete_sum::complete_sum;
pub use nnf::to_nnf;
pub use pushdown_not::pushdown_not;
pub use simplify::simplify;
pub use subst::{compose, restrict};
