//! Johnson-reweighted shortest paths
//!
//! Dijkstra over the active edges, in either direction, using the current
//! potential to reweight every edge `u -> v` to the cost
//! `pi(v) + w - pi(u)`, which is non-negative while the potential is
//! valid. Distances are reported as true path costs (weight plus epsilon
//! count); a single predecessor per target supports path reconstruction
//! for justifications and negative-cycle witnesses.

use csisat2_core::VarId;

use crate::graph::{Cost, EdgeGraph};
use crate::heap::IndexedHeap;

/// Search direction over the active edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Paths leaving the source: distances to each reachable target.
    Forward,
    /// Paths entering the source: distances from each reachable origin.
    Backward,
}

/// Single-source shortest-path results.
#[derive(Debug, Clone)]
pub(crate) struct ShortestPaths {
    source: VarId,
    direction: Direction,
    /// True path cost per vertex; `None` when unreachable.
    dist: Vec<Option<Cost>>,
    /// Tree edge per vertex, chosen by relaxation order. For a forward
    /// search this is the predecessor on the path from the source; for a
    /// backward search it is the next hop towards the source.
    pred: Vec<Option<VarId>>,
}

impl ShortestPaths {
    /// Dijkstra from `source` over the strongest active edges of `graph`,
    /// reweighted by `pi`.
    pub(crate) fn run(graph: &EdgeGraph, pi: &[Cost], source: VarId, direction: Direction) -> Self {
        let n = graph.num_vertices();
        let mut heap = IndexedHeap::new(n);
        let mut dist: Vec<Option<Cost>> = vec![None; n];
        let mut pred: Vec<Option<VarId>> = vec![None; n];

        heap.insert_or_decrease(source, Cost::ZERO);
        while let Some((x, key)) = heap.pop_min() {
            // Convert the reweighted distance back to the true path cost:
            // reweighting telescopes to pi(last) - pi(first) along the
            // path.
            let true_cost = match direction {
                Direction::Forward => key + pi[source.index()] - pi[x.index()],
                Direction::Backward => key - pi[source.index()] + pi[x.index()],
            };
            dist[x.index()] = Some(true_cost);

            let next: Vec<(VarId, Cost)> = match direction {
                Direction::Forward => graph
                    .strongest_out(x)
                    .map(|(t, b)| (t, b.cost()))
                    .collect(),
                Direction::Backward => graph
                    .strongest_in(x)
                    .map(|(s, b)| (s, b.cost()))
                    .collect(),
            };
            for (y, edge_cost) in next {
                if dist[y.index()].is_some() {
                    continue;
                }
                // The reweighted cost of an edge a -> b is
                // pi(b) + w - pi(a), non-negative while the potential
                // satisfies pi(a) - pi(b) <= w.
                let reweighted = match direction {
                    Direction::Forward => pi[y.index()] + edge_cost - pi[x.index()],
                    Direction::Backward => pi[x.index()] + edge_cost - pi[y.index()],
                };
                if heap.insert_or_decrease(y, key + reweighted) {
                    pred[y.index()] = Some(x);
                }
            }
        }

        ShortestPaths {
            source,
            direction,
            dist,
            pred,
        }
    }

    /// True path cost from/to `v`, depending on direction.
    pub(crate) fn dist(&self, v: VarId) -> Option<Cost> {
        self.dist[v.index()]
    }

    /// The path between `v` and the source as a forward-oriented vertex
    /// list: source to `v` for a forward search, `v` to source for a
    /// backward one. An unreachable `v` yields just the source; callers
    /// must check reachability first.
    pub(crate) fn vertex_path(&self, v: VarId) -> Vec<VarId> {
        if self.dist[v.index()].is_none() {
            return vec![self.source];
        }
        let mut path = vec![v];
        let mut cur = v;
        while let Some(prev) = self.pred[cur.index()] {
            path.push(prev);
            cur = prev;
        }
        if self.direction == Direction::Forward {
            path.reverse();
        }
        path
    }
}
