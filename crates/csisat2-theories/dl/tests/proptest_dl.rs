//! Property-based tests for the incremental engine.
//!
//! Random small difference-logic instances are driven through random
//! push/pop sequences while checking the engine's quantified invariants:
//! potential soundness, exact round-trip on backtracking, idempotent
//! re-assertion, soundness of propagated consequences (their negations
//! must be refutable), weak core minimality, and soundness of propagated
//! equalities against a brute-force shortest-path oracle.

use hashbrown::HashSet;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use csisat2_core::{Atom, AtomId, Domain, Rel, TheoryError, TheoryLit, VarId};
use csisat2_dl::{ActiveEdge, DlSolver, LitStatus, Strictness};

const VARS: &[&str] = &["v0", "v1", "v2", "v3", "v4"];

fn domain_strategy() -> impl Strategy<Value = Domain> {
    prop_oneof![Just(Domain::Real), Just(Domain::Integer)]
}

fn atom_strategy() -> impl Strategy<Value = Atom> {
    (0..VARS.len(), 0..VARS.len(), -4i64..=4, 0..6usize).prop_map(|(x, y, c, rel)| {
        let c = c as f64;
        match rel {
            0..=2 => Atom::diff_le(VARS[x], VARS[y], c),
            3 | 4 => Atom::diff_lt(VARS[x], VARS[y], c),
            _ => Atom::diff_eq(VARS[x], VARS[y], c),
        }
    })
}

fn instance_strategy() -> impl Strategy<Value = (Domain, Vec<Atom>, Vec<(usize, bool)>)> {
    (
        domain_strategy(),
        prop::collection::vec(atom_strategy(), 1..8),
        prop::collection::vec((0..16usize, any::<bool>()), 1..14),
    )
}

/// Zero-constant instances: every propagated equality is an ordinary
/// entailment there, checkable against shortest-path distances.
fn zero_instance_strategy() -> impl Strategy<Value = (Domain, Vec<Atom>, Vec<usize>)> {
    let atom = (0..VARS.len(), 0..VARS.len(), 0..3usize).prop_map(|(x, y, rel)| match rel {
        0 | 1 => Atom::diff_le(VARS[x], VARS[y], 0.0),
        _ => Atom::diff_eq(VARS[x], VARS[y], 0.0),
    });
    (
        domain_strategy(),
        prop::collection::vec(atom, 1..8),
        prop::collection::vec(0..16usize, 1..12),
    )
}

fn vertices(solver: &DlSolver) -> Vec<VarId> {
    (0..=solver.num_vars() as u32).map(VarId).collect()
}

fn potentials(solver: &DlSolver) -> Vec<f64> {
    vertices(solver)
        .iter()
        .map(|&v| solver.potential_of(v))
        .collect()
}

fn edge_key(e: &ActiveEdge) -> (u32, u32, u64, bool, u32, bool) {
    (
        e.from.0,
        e.to.0,
        e.weight.to_bits(),
        e.strict == Strictness::Strict,
        e.lit.atom.0,
        e.lit.positive,
    )
}

fn edge_set(solver: &DlSolver) -> Vec<(u32, u32, u64, bool, u32, bool)> {
    let mut keys: Vec<_> = solver.active_edges().iter().map(edge_key).collect();
    keys.sort_unstable();
    keys
}

/// Every literal of the atom set, negated equalities excluded.
fn all_literals(solver: &DlSolver) -> Vec<TheoryLit> {
    let mut lits = Vec::new();
    for id in 0..solver.num_atoms() as u32 {
        let id = AtomId(id);
        lits.push(TheoryLit::positive(id));
        if solver.atom(id).unwrap().rel != Rel::Eq {
            lits.push(TheoryLit::negative(id));
        }
    }
    lits
}

fn assert_potential_soundness(solver: &DlSolver) -> Result<(), TestCaseError> {
    for e in solver.active_edges() {
        let slack = e.weight - (solver.potential_of(e.from) - solver.potential_of(e.to));
        prop_assert!(
            slack >= 0.0,
            "active edge {:?} violated: slack {}",
            e,
            slack
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn incremental_assertions_maintain_the_contract(
        (domain, atoms, pushes) in instance_strategy()
    ) {
        let mut solver = DlSolver::new(domain, &atoms).unwrap();
        let initial_pi = potentials(&solver);
        prop_assert!(solver.active_edges().is_empty());

        let mut live_frames = 0u64;
        let mut asserted: Vec<TheoryLit> = Vec::new();
        for (idx, positive) in pushes {
            let atom = &atoms[idx % atoms.len()];
            if atom.rel == Rel::Eq && !positive {
                continue;
            }
            let lit = TheoryLit::new(solver.atom_id(atom).unwrap(), positive);

            let recorded_before = solver.stats().pushes;
            let sat = solver.push(lit).unwrap();
            let recorded = solver.stats().pushes > recorded_before;

            if sat {
                if recorded {
                    live_frames += 1;
                    asserted.push(lit);
                }
                assert_potential_soundness(&solver)?;

                // Idempotent re-push: same verdict, nothing observable
                // changes, no new trail frame.
                let pi = potentials(&solver);
                let edges = edge_set(&solver);
                let recorded_before = solver.stats().pushes;
                prop_assert!(solver.push(lit).unwrap());
                prop_assert_eq!(solver.stats().pushes, recorded_before);
                prop_assert_eq!(potentials(&solver), pi);
                prop_assert_eq!(edge_set(&solver), edges);

                // Every consequence is entailed: asserting its negation on
                // a clone must be unsatisfiable. Justifications unroll
                // without cycles and bottom out in assertions.
                for probe_lit in all_literals(&solver) {
                    if solver.literal_status(probe_lit).unwrap() != LitStatus::Implied {
                        continue;
                    }
                    let just = solver.justify(probe_lit).unwrap();
                    prop_assert!(!just.premises.is_empty());
                    for premise in &just.premises {
                        prop_assert_eq!(
                            solver.literal_status(*premise).unwrap(),
                            LitStatus::Asserted
                        );
                    }
                    // An implied equality must be entailed in both
                    // directions: both of its edges are active, and
                    // refuting either inequality half on a replay of the
                    // assertions fails. (Its own negation cannot be
                    // pushed, so the probe goes through the halves.)
                    let probe_atom = solver.atom(probe_lit.atom).unwrap().clone();
                    if probe_atom.rel == Rel::Eq {
                        let terms = probe_atom.lhs.terms();
                        let x = terms[0].1.clone();
                        let y = terms[1].1.clone();
                        let materialized = if x == y && probe_atom.rhs == 0.0 { 1 } else { 2 };
                        let active = solver
                            .active_edges()
                            .iter()
                            .filter(|e| e.lit == probe_lit)
                            .count();
                        prop_assert_eq!(active, materialized);

                        let eq_halves = [
                            Atom::diff_le(&x, &y, probe_atom.rhs),
                            Atom::diff_le(&y, &x, -probe_atom.rhs),
                        ];
                        let mut extended = atoms.clone();
                        extended.extend(eq_halves.iter().cloned());
                        for half in &eq_halves {
                            let mut probe = DlSolver::new(domain, &extended).unwrap();
                            for l in &asserted {
                                prop_assert!(probe.push(*l).unwrap());
                            }
                            let half_lit = probe.lit(half).unwrap();
                            prop_assert_eq!(probe.push(half_lit.negated()), Ok(false));
                        }
                        continue;
                    }
                    let mut probe = solver.clone();
                    prop_assert_eq!(probe.push(probe_lit.negated()), Ok(false));
                }
            } else {
                live_frames += 1;
                let core = solver.unsat_core_with_info().unwrap();
                prop_assert_eq!(core.conjunction[0], core.trigger);
                prop_assert_eq!(core.trigger, lit);

                // The core alone is unsatisfiable.
                let mut fresh = DlSolver::new(domain, &atoms).unwrap();
                let mut verdict = true;
                for l in &core.conjunction {
                    verdict = fresh.push(*l).unwrap();
                    if !verdict {
                        break;
                    }
                }
                prop_assert!(!verdict, "core {:?} was satisfiable", core.conjunction);

                // Dropping the trigger leaves a satisfiable remainder.
                let mut fresh = DlSolver::new(domain, &atoms).unwrap();
                for l in &core.conjunction[1..] {
                    prop_assert!(fresh.push(*l).unwrap());
                }

                solver.pop().unwrap();
                live_frames -= 1;
                prop_assert!(solver.is_sat());
            }
        }

        // Unwinding the trail restores the initial state exactly.
        for _ in 0..live_frames {
            solver.pop().unwrap();
        }
        prop_assert_eq!(potentials(&solver), initial_pi);
        prop_assert!(solver.active_edges().is_empty());
        prop_assert_eq!(solver.pop(), Err(TheoryError::EmptyTrail));
    }

    #[test]
    fn propagated_equalities_are_entailed(
        (domain, atoms, pushes) in zero_instance_strategy()
    ) {
        let mut solver = DlSolver::new(domain, &atoms).unwrap();
        for idx in pushes {
            let atom = &atoms[idx % atoms.len()];
            let lit = TheoryLit::positive(solver.atom_id(atom).unwrap());
            if !solver.push(lit).unwrap() {
                solver.pop().unwrap();
            }
        }

        let shared: Vec<VarId> = (1..=solver.num_vars() as u32).map(VarId).collect();
        let shared_set: HashSet<VarId> = shared.iter().copied().collect();
        let equalities = solver.propagations(&shared).unwrap();

        // Brute-force all-pairs shortest paths over the active edges.
        let n = solver.num_vars() + 1;
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for e in solver.active_edges() {
            let d = &mut dist[e.from.index()][e.to.index()];
            *d = d.min(e.weight);
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let through = dist[i][k] + dist[k][j];
                    if through < dist[i][j] {
                        dist[i][j] = through;
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        for (a, b) in equalities {
            prop_assert!(a < b, "equalities are canonically ordered");
            prop_assert!(seen.insert((a, b)), "equalities are deduplicated");
            prop_assert!(shared_set.contains(&a) && shared_set.contains(&b));
            // Entailed: both difference bounds are at most zero.
            prop_assert!(dist[a.index()][b.index()] <= 0.0);
            prop_assert!(dist[b.index()][a.index()] <= 0.0);
        }
    }
}
