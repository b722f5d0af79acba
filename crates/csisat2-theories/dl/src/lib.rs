//! Csisat2 DL - incremental difference-logic theory solver
//!
//! Decides satisfiability of a growing, backtrackable conjunction of
//! difference-logic atoms (`x - y <= c`, `x - y < c`, `x - y = c`) over
//! the integer or real domain, following Cotton and Maler's incremental
//! potential-function algorithm:
//!
//! - A potential `pi` over the vertices witnesses satisfiability: every
//!   active edge `u -> v` of weight `w` keeps `pi(u) - pi(v) <= w`.
//! - Asserting a literal repairs `pi` with a Dijkstra-like relaxation over
//!   the Johnson-reweighted active graph, or exposes a negative cycle
//!   whose literals form the unsat core.
//! - A trail of potential snapshots and edge-status flips undoes
//!   assertions in reverse order.
//! - Theory propagation marks dormant edges entailed by a new assertion
//!   as consequences with justification paths, and tight edge pairs
//!   between shared terms are reported as equalities for Nelson-Oppen
//!   exchange with a sibling theory.
//!
//! ## Example
//!
//! ```
//! use csisat2_core::{Atom, Domain};
//! use csisat2_dl::DlSolver;
//!
//! let atoms = [Atom::diff_le("x", "y", 3.0), Atom::diff_le("y", "x", -4.0)];
//! let mut solver = DlSolver::new(Domain::Real, &atoms).unwrap();
//! let p = solver.lit(&atoms[0]).unwrap();
//! let q = solver.lit(&atoms[1]).unwrap();
//! assert!(solver.push(p).unwrap());
//! // The two bounds close a cycle of weight -1.
//! assert!(!solver.push(q).unwrap());
//! assert_eq!(solver.unsat_core().unwrap(), vec![q, p]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod dijkstra;
mod graph;
mod heap;
mod normalize;
mod solver;

pub use graph::Strictness;
pub use solver::{ActiveEdge, DlConfig, DlSolver, DlStats, LitStatus};
