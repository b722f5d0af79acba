//! Signed theory literals

/// Index of an atom in a solver's construction-time atom set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub u32);

impl AtomId {
    /// Index into atom-indexed arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A signed theory literal (atom + Boolean polarity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TheoryLit {
    /// The atom this literal asserts or refutes.
    pub atom: AtomId,
    /// Polarity; `false` means the negation of the atom.
    pub positive: bool,
}

impl TheoryLit {
    /// Create a signed literal.
    #[inline]
    pub fn new(atom: AtomId, positive: bool) -> Self {
        TheoryLit { atom, positive }
    }

    /// The positive literal of `atom`.
    #[inline]
    pub fn positive(atom: AtomId) -> Self {
        TheoryLit::new(atom, true)
    }

    /// The negative literal of `atom`.
    #[inline]
    pub fn negative(atom: AtomId) -> Self {
        TheoryLit::new(atom, false)
    }

    /// The negation of this literal.
    #[inline]
    pub fn negated(self) -> Self {
        TheoryLit::new(self.atom, !self.positive)
    }
}
