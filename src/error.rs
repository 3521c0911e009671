//! Error kinds shared by every fallible operation in this crate.
//!
//! Simplification and the algebraic transforms never fail — ill-formed
//! sub-nodes are opaque data to them and are passed through unchanged.
//! Only construction-time boundary checks and a handful of normal-form /
//! assumption operations can fail, and they all report one of the kinds
//! below.

use thiserror::Error;

/// The error surface of this crate.
///
/// Every public fallible operation returns `Result<T, Error>`. Variant names
/// mirror the abstract kinds named in the specification this crate
/// implements; `ParseError` is reserved for an external grammar crate that
/// wants to funnel its errors through the same enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A literal index of zero was supplied. Literal indices are signed,
    /// nonzero integers: the sign gives polarity, the magnitude the
    /// variable index.
    #[error("invalid literal index: 0 is not a valid (signed) variable index")]
    InvalidLiteralIndex,

    /// A non-literal node was pushed onto an assumption scope.
    #[error("invalid assumption: only a literal or a conjunction of literals may be pushed")]
    InvalidAssumption,

    /// A point or mapping used a key or value of the wrong shape, e.g. a
    /// point value that is not one of the two constants.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// An operation required its input to already be in a specific normal
    /// form (e.g. `encode_cnf` on a non-CNF expression).
    #[error("shape error: {0}")]
    ShapeError(String),

    /// An arity requirement was violated, e.g. a cardinality helper given a
    /// `k` larger than the number of operands when the caller opted out of
    /// the short-circuit, or an odd number of operands to a helper that
    /// requires pairs.
    #[error("arity error: {0}")]
    ArityError(String),

    /// Surface syntax did not match the external grammar. This crate never
    /// constructs this variant itself; it exists so a parser crate built on
    /// top of this one can report errors through the same type.
    #[error("parse error: {0}")]
    ParseError(String),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
