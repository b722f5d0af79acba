//! Error types shared by the theory solvers

use thiserror::Error;

/// Fatal errors raised by a theory solver.
///
/// Every error aborts the call that raised it without retaining partial
/// state; the driver is expected to treat all of these as programming
/// errors and halt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// An atom does not reduce to a supported shape.
    #[error("malformed atom: {0}")]
    Malformed(String),

    /// A literal references a variable absent from the construction-time
    /// atom set.
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// A literal references an atom id outside the construction-time set.
    #[error("unknown atom id: {0}")]
    UnknownAtom(u32),

    /// `pop` on an empty trail.
    #[error("pop on empty trail")]
    EmptyTrail,

    /// An operation was invoked in a state that does not admit it.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// An internal invariant does not hold; indicates a bug in the engine
    /// or in the caller's usage.
    #[error("internal inconsistency: {0}")]
    Inconsistent(&'static str),
}

/// Result type for theory-solver operations.
pub type TheoryResult<T> = Result<T, TheoryError>;
