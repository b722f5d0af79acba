//! Csisat2 core - shared substrate for the theory solvers
//!
//! This crate holds the vocabulary that the SMT driver and the theory
//! solvers exchange: variable symbols and linear terms, difference-logic
//! atoms, signed theory literals, and the [`TheorySolver`] contract with
//! its justification and unsat-core value types.
//!
//! Everything here is a plain value. Theory solvers return owned
//! justifications, cores, and equality lists; callers never hold references
//! into solver internals across calls.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atom;
pub mod error;
pub mod literal;
pub mod term;
pub mod theory;

pub use atom::{Atom, Domain, Rel};
pub use error::{TheoryError, TheoryResult};
pub use literal::{AtomId, TheoryLit};
pub use term::{LinTerm, SymbolTable, VarId};
pub use theory::{Justification, ProvenanceTag, TheorySolver, UnsatCore};
