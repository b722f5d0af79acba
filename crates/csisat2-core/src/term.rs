//! Variable symbols and linear terms

use core::fmt;

use hashbrown::HashMap;

/// A dense solver-variable index.
///
/// Id 0 is reserved for the synthetic zero vertex standing for the constant
/// 0; it lets unary bounds such as `x <= c` be encoded as the difference
/// `x - 0 <= c`. Ids `1..n` are problem variables in first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

impl VarId {
    /// The synthetic zero vertex.
    pub const ZERO: VarId = VarId(0);

    /// Index into vertex-indexed arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interns variable names to dense [`VarId`]s in first-seen order.
///
/// The table is seeded with the zero vertex at id 0; problem variables
/// start at id 1. The name-to-id mapping is fixed once the owning solver
/// has been constructed and never grows afterwards.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    names: Vec<String>,
    ids: HashMap<String, VarId>,
}

impl SymbolTable {
    /// A table containing only the zero vertex.
    pub fn new() -> Self {
        SymbolTable {
            names: vec!["0".to_string()],
            ids: HashMap::new(),
        }
    }

    /// Intern `name`, returning its existing id if already seen.
    pub fn intern(&mut self, name: &str) -> VarId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = VarId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Look up a name without interning.
    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.ids.get(name).copied()
    }

    /// The name of a variable; the zero vertex renders as `"0"`.
    pub fn name(&self, var: VarId) -> &str {
        &self.names[var.index()]
    }

    /// Number of vertices, zero vertex included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no problem variable has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.names.len() == 1
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A linear sum `sum(coeff * var) + constant` over named variables.
///
/// This is the shape atoms are spelled in by the host; the normalizer of a
/// theory solver decides which shapes it accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct LinTerm {
    terms: Vec<(f64, String)>,
    constant: f64,
}

impl LinTerm {
    /// The single variable `name`.
    pub fn var(name: &str) -> Self {
        LinTerm {
            terms: vec![(1.0, name.to_string())],
            constant: 0.0,
        }
    }

    /// The constant `c`.
    pub fn constant(c: f64) -> Self {
        LinTerm {
            terms: Vec::new(),
            constant: c,
        }
    }

    /// The difference `x - y`.
    pub fn difference(x: &str, y: &str) -> Self {
        LinTerm {
            terms: vec![(1.0, x.to_string()), (-1.0, y.to_string())],
            constant: 0.0,
        }
    }

    /// Append a `coeff * var` summand.
    pub fn plus(mut self, coeff: f64, name: &str) -> Self {
        self.terms.push((coeff, name.to_string()));
        self
    }

    /// The variable summands in written order.
    pub fn terms(&self) -> &[(f64, String)] {
        &self.terms
    }

    /// The constant summand.
    pub fn constant_part(&self) -> f64 {
        self.constant
    }
}

impl fmt::Display for LinTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (coeff, name) in &self.terms {
            if first {
                if *coeff == -1.0 {
                    write!(f, "-{name}")?;
                } else if *coeff == 1.0 {
                    write!(f, "{name}")?;
                } else {
                    write!(f, "{coeff}*{name}")?;
                }
                first = false;
            } else if *coeff == -1.0 {
                write!(f, " - {name}")?;
            } else if *coeff == 1.0 {
                write!(f, " + {name}")?;
            } else if *coeff < 0.0 {
                write!(f, " - {}*{name}", -coeff)?;
            } else {
                write!(f, " + {coeff}*{name}")?;
            }
        }
        if first {
            write!(f, "{}", self.constant)?;
        } else if self.constant != 0.0 {
            if self.constant < 0.0 {
                write!(f, " - {}", -self.constant)?;
            } else {
                write!(f, " + {}", self.constant)?;
            }
        }
        Ok(())
    }
}
