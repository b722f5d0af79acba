//! Atom normalization
//!
//! Rewrites a supported atom into the canonical form `(kind, u, v, c)`
//! meaning `x_u - x_v <kind> c`, with the synthetic zero vertex standing in
//! for the constant 0 on either side. Accepted shapes are `sum rel C`
//! where the sum rearranges to `x - y`, a single (possibly negated)
//! variable, or a constant; anything else is rejected. On the integer
//! domain, `< c` is rewritten to `<= c - 1` immediately, so strict bounds
//! never survive normalization there.

use hashbrown::HashMap;

use csisat2_core::{Atom, Domain, Rel, SymbolTable, TheoryError, TheoryResult, VarId};

/// Canonical relation of a normalized atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NormKind {
    /// `x_u - x_v = c`
    Equal,
    /// `x_u - x_v <= c`
    LessEq,
    /// `x_u - x_v < c`
    LessStrict,
}

/// A normalized atom `x_u - x_v <kind> c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NormAtom {
    pub(crate) kind: NormKind,
    pub(crate) u: VarId,
    pub(crate) v: VarId,
    pub(crate) c: f64,
}

impl NormAtom {
    /// Hashable identity of the normalized content, with the weight taken
    /// bit-exactly.
    pub(crate) fn key(&self) -> (NormKind, VarId, VarId, u64) {
        (self.kind, self.u, self.v, self.c.to_bits())
    }
}

/// Normalize `atom`, interning any new variable names into `symbols`.
pub(crate) fn normalize(
    atom: &Atom,
    domain: Domain,
    symbols: &mut SymbolTable,
) -> TheoryResult<NormAtom> {
    normalize_inner(atom, domain, |name| Ok(symbols.intern(name)))
}

/// Normalize `atom` against a fixed symbol table; unseen variable names are
/// an error.
pub(crate) fn normalize_lookup(
    atom: &Atom,
    domain: Domain,
    symbols: &SymbolTable,
) -> TheoryResult<NormAtom> {
    normalize_inner(atom, domain, |name| {
        symbols
            .lookup(name)
            .ok_or_else(|| TheoryError::UnknownVariable(name.to_string()))
    })
}

fn normalize_inner(
    atom: &Atom,
    domain: Domain,
    mut resolve: impl FnMut(&str) -> TheoryResult<VarId>,
) -> TheoryResult<NormAtom> {
    // Net coefficient per variable, in first-written order.
    let mut order: Vec<VarId> = Vec::with_capacity(2);
    let mut coeffs: HashMap<VarId, f64> = HashMap::with_capacity(2);
    for (coeff, name) in atom.lhs.terms() {
        let var = resolve(name)?;
        let entry = coeffs.entry(var).or_insert_with(|| {
            order.push(var);
            0.0
        });
        *entry += coeff;
    }

    let mut pos = None;
    let mut neg = None;
    for var in order {
        match coeffs[&var] {
            c if c == 0.0 => {}
            c if c == 1.0 => {
                if pos.replace(var).is_some() {
                    return Err(TheoryError::Malformed(atom.to_string()));
                }
            }
            c if c == -1.0 => {
                if neg.replace(var).is_some() {
                    return Err(TheoryError::Malformed(atom.to_string()));
                }
            }
            _ => return Err(TheoryError::Malformed(atom.to_string())),
        }
    }

    let u = pos.unwrap_or(VarId::ZERO);
    let v = neg.unwrap_or(VarId::ZERO);
    let c = atom.rhs - atom.lhs.constant_part();
    if !c.is_finite() {
        return Err(TheoryError::Malformed(atom.to_string()));
    }

    let (kind, c) = match (atom.rel, domain) {
        (Rel::Le, _) => (NormKind::LessEq, c),
        (Rel::Lt, Domain::Real) => (NormKind::LessStrict, c),
        (Rel::Lt, Domain::Integer) => (NormKind::LessEq, c - 1.0),
        (Rel::Eq, _) => (NormKind::Equal, c),
    };
    // Canonicalize negative zero so that bit-exact atom keys and edge
    // weights agree with IEEE equality.
    let c = if c == 0.0 { 0.0 } else { c };
    Ok(NormAtom { kind, u, v, c })
}
