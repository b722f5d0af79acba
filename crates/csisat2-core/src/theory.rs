//! Theory solver contract
//!
//! Theory solvers plug into the SMT driver through [`TheorySolver`]: the
//! driver asserts literals one at a time, backtracks in reverse order, and
//! in between queries propagated equalities over the terms shared with the
//! sibling theories (Nelson-Oppen exchange), justifications for entailed
//! literals, and unsat cores on contradiction.

use crate::error::TheoryResult;
use crate::literal::TheoryLit;
use crate::term::VarId;

/// Which theory produced a justification or core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvenanceTag {
    /// Difference logic.
    Dl,
}

/// Explanation of how a literal was deduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Justification {
    /// The literal being explained.
    pub lit: TheoryLit,
    /// The asserted literals the explanation bottoms out in (the givens);
    /// their conjunction entails `lit`.
    pub premises: Vec<TheoryLit>,
    /// Intermediate deduced literals unrolled along the way.
    pub deductions: Vec<TheoryLit>,
    /// Producing theory.
    pub tag: ProvenanceTag,
}

/// An unsatisfiable conjunction of asserted literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsatCore {
    /// The core itself: the triggering literal followed by the asserted
    /// literals justifying the contradiction.
    pub conjunction: Vec<TheoryLit>,
    /// The literal whose assertion exposed the contradiction.
    pub trigger: TheoryLit,
    /// Intermediate deduced literals encountered while unrolling the
    /// contradiction witness.
    pub deductions: Vec<TheoryLit>,
    /// Producing theory.
    pub tag: ProvenanceTag,
}

/// Contract between the SMT driver and a theory solver.
///
/// All methods are synchronous and run to completion; outputs are owned
/// values independent of solver internals.
pub trait TheorySolver {
    /// Assert a literal from the construction-time atom set. Returns the
    /// satisfiability of the asserted conjunction. Precondition: the solver
    /// is satisfiable.
    fn assert_literal(&mut self, lit: TheoryLit) -> TheoryResult<bool>;

    /// Undo the most recent assertion.
    fn backtrack(&mut self) -> TheoryResult<()>;

    /// Whether the asserted conjunction is satisfiable.
    fn is_sat(&self) -> bool;

    /// Equalities between shared terms entailed by the current assertions,
    /// in canonical `(smaller id, larger id)` form. Must not be called in
    /// an unsatisfiable state.
    fn propagated_equalities(&mut self, shared: &[VarId]) -> TheoryResult<Vec<(VarId, VarId)>>;

    /// Explain how `lit` came to hold.
    fn justify(&self, lit: TheoryLit) -> TheoryResult<Justification>;

    /// The unsat core of the current contradiction. Callable only in an
    /// unsatisfiable state.
    fn unsat_core(&self) -> TheoryResult<UnsatCore>;
}
