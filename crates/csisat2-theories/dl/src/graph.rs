//! Weighted edge graph with parallel edges
//!
//! Dense vertex-indexed adjacency of parallel edges. Each edge carries its
//! bound (weight plus strictness), its assertion status, and the literal
//! that created it. Parallel edges between the same ordered vertex pair are
//! kept as a list so that justifications can name the exact source literal.
//!
//! Strict bounds on the real domain are realized with a symbolic
//! infinitesimal: internally every weight is a [`Cost`] pair of a double
//! and an epsilon count, ordered lexicographically, so that `x - y < c`
//! behaves as `x - y <= c - eps` exactly.

use core::cmp::Ordering;
use core::ops::{Add, Sub};

use csisat2_core::{TheoryLit, VarId};

/// Whether an edge encodes a strict (`<`) or non-strict (`<=`) bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// `<`
    Strict,
    /// `<=`
    NonStrict,
}

/// An exact path or potential value `weight + eps * epsilon` for an
/// arbitrarily small `epsilon > 0`.
///
/// A strict edge of weight `c` contributes `(c, -1)`; sums over paths
/// accumulate the epsilon count. The order is lexicographic on
/// `(weight, eps)`, which realizes the intended strict semantics exactly
/// as long as weights themselves combine without rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cost {
    pub(crate) weight: f64,
    pub(crate) eps: i32,
}

impl Eq for Cost {}

impl Cost {
    pub(crate) const ZERO: Cost = Cost {
        weight: 0.0,
        eps: 0,
    };

    /// Negative zero is canonicalized to positive zero so that the total
    /// order below agrees with IEEE equality on weights.
    #[inline]
    pub(crate) fn new(weight: f64, eps: i32) -> Self {
        let weight = if weight == 0.0 { 0.0 } else { weight };
        Cost { weight, eps }
    }
}

impl Add for Cost {
    type Output = Cost;

    #[inline]
    fn add(self, rhs: Cost) -> Cost {
        Cost::new(self.weight + rhs.weight, self.eps + rhs.eps)
    }
}

impl Sub for Cost {
    type Output = Cost;

    #[inline]
    fn sub(self, rhs: Cost) -> Cost {
        Cost::new(self.weight - rhs.weight, self.eps - rhs.eps)
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.eps.cmp(&other.eps))
    }
}

/// A weight paired with its strictness, as stored on an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// Numeric weight.
    pub weight: f64,
    /// Strictness of the bound.
    pub strict: Strictness,
}

impl Bound {
    /// A finite bound. Negative zero is canonicalized to positive zero.
    #[inline]
    pub fn new(weight: f64, strict: Strictness) -> Self {
        let weight = if weight == 0.0 { 0.0 } else { weight };
        Bound { weight, strict }
    }

    /// The exact cost of this bound: strictness becomes one epsilon.
    #[inline]
    pub(crate) fn cost(self) -> Cost {
        let eps = match self.strict {
            Strictness::Strict => -1,
            Strictness::NonStrict => 0,
        };
        Cost::new(self.weight, eps)
    }

    /// Whether asserting `self` makes an edge bounded by `other` redundant.
    ///
    /// This is the "weaker constraint" test applied to parallel edges when
    /// a literal is asserted: `(w, s)` is entailed by `(c, s_p)` when
    /// `c < w`, or `c = w` and either the asserted bound is strict or the
    /// other is not. Note the asymmetry: equal bounds entail each other.
    #[inline]
    pub fn entails(self, other: Bound) -> bool {
        self.cost() <= other.cost()
    }
}

impl Eq for Bound {}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bound {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost().cmp(&other.cost())
    }
}

/// Assertion status of an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeStatus {
    /// The literal has not been asserted; the edge lies dormant.
    Unassigned,
    /// The engine has been told to enforce exactly this literal.
    Assigned,
    /// The edge is implied by the listed literals.
    Consequence(Vec<TheoryLit>),
}

/// One parallel edge between an ordered vertex pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeInfo {
    /// Weight and strictness.
    pub bound: Bound,
    /// Assertion status.
    pub status: EdgeStatus,
    /// The literal that created this edge.
    pub lit: TheoryLit,
}

impl EdgeInfo {
    /// Whether the edge currently constrains the potential function.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status != EdgeStatus::Unassigned
    }
}

/// Dense `n x n` adjacency of parallel-edge lists.
#[derive(Debug, Clone)]
pub(crate) struct EdgeGraph {
    num_vertices: usize,
    /// `rows[u][v]` holds the parallel edges from `u` to `v`.
    rows: Vec<Vec<Vec<EdgeInfo>>>,
}

impl EdgeGraph {
    pub(crate) fn new(num_vertices: usize) -> Self {
        EdgeGraph {
            num_vertices,
            rows: vec![vec![Vec::new(); num_vertices]; num_vertices],
        }
    }

    pub(crate) fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Add a dormant edge; an identical `(bound, lit)` entry is not
    /// duplicated. A literal sources at most one edge per direction, the
    /// one exception being an equality on a self loop, whose two halves
    /// share the direction.
    pub(crate) fn add_edge(&mut self, u: VarId, v: VarId, bound: Bound, lit: TheoryLit) {
        let list = &mut self.rows[u.index()][v.index()];
        if list.iter().any(|e| e.lit == lit && e.bound == bound) {
            return;
        }
        list.push(EdgeInfo {
            bound,
            status: EdgeStatus::Unassigned,
            lit,
        });
    }

    /// The parallel edges from `u` to `v`.
    pub(crate) fn edges(&self, u: VarId, v: VarId) -> &[EdgeInfo] {
        &self.rows[u.index()][v.index()]
    }

    pub(crate) fn edges_mut(&mut self, u: VarId, v: VarId) -> &mut Vec<EdgeInfo> {
        &mut self.rows[u.index()][v.index()]
    }

    /// The edge from `u` to `v` with exactly this source literal and
    /// bound, if any.
    pub(crate) fn edge_for(
        &self,
        u: VarId,
        v: VarId,
        lit: TheoryLit,
        bound: Bound,
    ) -> Option<&EdgeInfo> {
        self.edges(u, v)
            .iter()
            .find(|e| e.lit == lit && e.bound == bound)
    }

    /// The strongest active edge from `u` to `v`: minimum bound, with
    /// strict winning ties.
    pub(crate) fn strongest(&self, u: VarId, v: VarId) -> Option<&EdgeInfo> {
        self.edges(u, v)
            .iter()
            .filter(|e| e.is_active())
            .min_by_key(|e| e.bound)
    }

    /// Strongest active out-edges of `u`, one per target vertex.
    pub(crate) fn strongest_out(&self, u: VarId) -> impl Iterator<Item = (VarId, Bound)> + '_ {
        (0..self.num_vertices as u32).filter_map(move |t| {
            let t = VarId(t);
            self.strongest(u, t).map(|e| (t, e.bound))
        })
    }

    /// Strongest active in-edges of `v`, one per source vertex.
    pub(crate) fn strongest_in(&self, v: VarId) -> impl Iterator<Item = (VarId, Bound)> + '_ {
        (0..self.num_vertices as u32).filter_map(move |s| {
            let s = VarId(s);
            self.strongest(s, v).map(|e| (s, e.bound))
        })
    }

    /// Literals of the strongest active edges along a vertex path.
    pub(crate) fn strongest_lits(&self, path: &[VarId]) -> Vec<TheoryLit> {
        path.windows(2)
            .filter_map(|pair| self.strongest(pair[0], pair[1]).map(|e| e.lit))
            .collect()
    }

    /// Whether some active edge from `u` to `v` is exactly tight under the
    /// potential `pi`: its reweighted cost `pi(v) + w - pi(u)` is zero.
    pub(crate) fn has_tight_edge(&self, u: VarId, v: VarId, pi: &[Cost]) -> bool {
        self.edges(u, v)
            .iter()
            .any(|e| e.is_active() && pi[v.index()] + e.bound.cost() - pi[u.index()] == Cost::ZERO)
    }
}
