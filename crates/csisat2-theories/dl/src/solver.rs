//! Incremental difference-logic engine
//!
//! The solver maintains a potential function over the active edge graph in
//! the style of Cotton and Maler: asserting a literal either repairs the
//! potential through a Dijkstra-like relaxation of the vertices it
//! invalidates, or exposes a negative cycle whose edge literals become the
//! unsat-core witness. A trail of potential snapshots and edge-status
//! flips makes every assertion undoable in reverse order.
//!
//! After each successful assertion the engine also performs theory
//! propagation (marking still-unassigned edges that the new assertion
//! entails as consequences, with a justification path) and can report
//! entailed equalities between shared terms for Nelson-Oppen exchange with
//! a sibling theory.

use hashbrown::{HashMap, HashSet};

use csisat2_core::{
    Atom, AtomId, Domain, Justification, ProvenanceTag, SymbolTable, TheoryError, TheoryLit,
    TheoryResult, TheorySolver, UnsatCore, VarId,
};

use crate::dijkstra::{Direction, ShortestPaths};
use crate::graph::{Bound, Cost, EdgeGraph, EdgeStatus, Strictness};
use crate::heap::IndexedHeap;
use crate::normalize::{normalize, normalize_lookup, NormAtom, NormKind};

/// Tuning knobs for the engine.
#[derive(Debug, Clone, Copy)]
pub struct DlConfig {
    /// Whether to mark entailed unassigned edges as consequences after
    /// each successful assertion. Disabling this skips the two
    /// shortest-path sweeps per assertion; conflict detection, equality
    /// propagation, and unsat cores are unaffected.
    pub theory_propagation: bool,
}

impl Default for DlConfig {
    fn default() -> Self {
        DlConfig {
            theory_propagation: true,
        }
    }
}

/// Operation counters.
#[derive(Debug, Clone, Default)]
pub struct DlStats {
    /// Literals asserted (idempotent re-assertions excluded).
    pub pushes: u64,
    /// Assertions undone.
    pub pops: u64,
    /// Assertions that exposed a negative cycle.
    pub conflicts: u64,
    /// Edges flipped to consequence status.
    pub consequences: u64,
    /// Equalities reported to the Nelson-Oppen exchange.
    pub equalities: u64,
    /// Shortest-path computations performed.
    pub dijkstra_runs: u64,
}

/// Observable assertion status of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitStatus {
    /// Neither asserted nor implied.
    Unassigned,
    /// Asserted via [`DlSolver::push`].
    Asserted,
    /// Implied by the asserted literals.
    Implied,
    /// Only one directed edge of an equality is implied; the literal as a
    /// whole is not entailed.
    PartiallyImplied,
}

/// An active edge of the current graph, reported by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEdge {
    /// Source vertex.
    pub from: VarId,
    /// Target vertex.
    pub to: VarId,
    /// Edge weight.
    pub weight: f64,
    /// Edge strictness.
    pub strict: Strictness,
    /// Originating literal.
    pub lit: TheoryLit,
}

#[derive(Debug, Clone)]
enum EngineState {
    Sat,
    Unsat {
        trigger: TheoryLit,
        cycle: Vec<TheoryLit>,
    },
}

/// One recorded edge-status mutation; reversed on backtracking by matching
/// `(bound, lit)` within the row.
#[derive(Debug, Clone)]
struct Flip {
    from: VarId,
    to: VarId,
    bound: Bound,
    lit: TheoryLit,
    prev: EdgeStatus,
}

/// One step of the undo log.
#[derive(Debug, Clone)]
struct TrailFrame {
    lit: TheoryLit,
    pi: Vec<Cost>,
    flips: Vec<Flip>,
}

enum PotentialUpdate {
    Unchanged,
    Updated(Vec<Cost>),
    NegativeCycle,
}

/// Incremental satisfiability engine for difference logic.
///
/// Constructed over a fixed atom set; [`push`](DlSolver::push) asserts a
/// literal of that set and reports satisfiability,
/// [`pop`](DlSolver::pop) undoes the most recent assertion.
#[derive(Clone)]
pub struct DlSolver {
    domain: Domain,
    symbols: SymbolTable,
    atoms: Vec<Atom>,
    norms: Vec<NormAtom>,
    atom_keys: HashMap<(NormKind, VarId, VarId, u64), AtomId>,
    graph: EdgeGraph,
    /// Potential per vertex, with exact epsilon counts for strict margins.
    potential: Vec<Cost>,
    trail: Vec<TrailFrame>,
    state: EngineState,
    config: DlConfig,
    stats: DlStats,
}

impl DlSolver {
    /// Build the engine over `atoms`, materializing the dormant edge graph.
    ///
    /// Variables are interned in first-seen order; atoms normalizing to the
    /// same canonical form share one [`AtomId`]. Malformed atoms fail the
    /// construction.
    pub fn new(domain: Domain, atoms: &[Atom]) -> TheoryResult<Self> {
        Self::with_config(domain, atoms, DlConfig::default())
    }

    /// [`DlSolver::new`] with explicit configuration.
    pub fn with_config(domain: Domain, atoms: &[Atom], config: DlConfig) -> TheoryResult<Self> {
        let mut symbols = SymbolTable::new();
        let mut kept = Vec::with_capacity(atoms.len());
        let mut norms = Vec::with_capacity(atoms.len());
        let mut atom_keys = HashMap::with_capacity(atoms.len());
        for atom in atoms {
            let norm = normalize(atom, domain, &mut symbols)?;
            if atom_keys.contains_key(&norm.key()) {
                continue;
            }
            atom_keys.insert(norm.key(), AtomId(kept.len() as u32));
            kept.push(atom.clone());
            norms.push(norm);
        }

        let n = symbols.len();
        let mut graph = EdgeGraph::new(n);
        for (idx, norm) in norms.iter().enumerate() {
            let pos = TheoryLit::positive(AtomId(idx as u32));
            let neg = pos.negated();
            let (u, v, c) = (norm.u, norm.v, norm.c);
            match norm.kind {
                NormKind::Equal => {
                    graph.add_edge(u, v, Bound::new(c, Strictness::NonStrict), pos);
                    graph.add_edge(v, u, Bound::new(-c, Strictness::NonStrict), pos);
                }
                NormKind::LessEq => {
                    graph.add_edge(u, v, Bound::new(c, Strictness::NonStrict), pos);
                    match domain {
                        // On integers the strict negation x_v - x_u < -c
                        // tightens to <= -c - 1.
                        Domain::Integer => {
                            graph.add_edge(v, u, Bound::new(-c - 1.0, Strictness::NonStrict), neg)
                        }
                        Domain::Real => {
                            graph.add_edge(v, u, Bound::new(-c, Strictness::Strict), neg)
                        }
                    }
                }
                NormKind::LessStrict => {
                    graph.add_edge(u, v, Bound::new(c, Strictness::Strict), pos);
                    graph.add_edge(v, u, Bound::new(-c, Strictness::NonStrict), neg);
                }
            }
        }

        Ok(DlSolver {
            domain,
            symbols,
            atoms: kept,
            norms,
            atom_keys,
            graph,
            potential: vec![Cost::ZERO; n],
            trail: Vec::new(),
            state: EngineState::Sat,
            config,
            stats: DlStats::default(),
        })
    }

    /// The numeric domain of this instance.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Number of problem variables (the zero vertex excluded).
    pub fn num_vars(&self) -> usize {
        self.symbols.len() - 1
    }

    /// Number of distinct atoms in the construction-time set.
    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// The id of a construction-time variable.
    pub fn var(&self, name: &str) -> Option<VarId> {
        self.symbols.lookup(name)
    }

    /// The name of a variable; the zero vertex renders as `"0"`.
    pub fn var_name(&self, var: VarId) -> &str {
        self.symbols.name(var)
    }

    /// The id of a construction-time atom, matched up to normalization.
    pub fn atom_id(&self, atom: &Atom) -> Option<AtomId> {
        let norm = normalize_lookup(atom, self.domain, &self.symbols).ok()?;
        self.atom_keys.get(&norm.key()).copied()
    }

    /// The positive literal of a construction-time atom.
    pub fn lit(&self, atom: &Atom) -> Option<TheoryLit> {
        self.atom_id(atom).map(TheoryLit::positive)
    }

    /// The atom behind an id.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id.index())
    }

    /// Whether the asserted conjunction is satisfiable.
    pub fn is_sat(&self) -> bool {
        matches!(self.state, EngineState::Sat)
    }

    /// Operation counters.
    pub fn stats(&self) -> &DlStats {
        &self.stats
    }

    /// The most recently asserted literal still on the trail.
    pub fn last_pushed(&self) -> Option<TheoryLit> {
        self.trail.last().map(|frame| frame.lit)
    }

    /// The potential of `v` relative to the zero vertex, infinitesimal
    /// margins dropped.
    pub fn potential_of(&self, v: VarId) -> f64 {
        self.potential[v.index()].weight - self.potential[VarId::ZERO.index()].weight
    }

    /// The active edges, one entry per asserted or implied parallel edge.
    pub fn active_edges(&self) -> Vec<ActiveEdge> {
        let n = self.graph.num_vertices();
        let mut out = Vec::new();
        for u in 0..n as u32 {
            for v in 0..n as u32 {
                for e in self.graph.edges(VarId(u), VarId(v)) {
                    if e.is_active() {
                        out.push(ActiveEdge {
                            from: VarId(u),
                            to: VarId(v),
                            weight: e.bound.weight,
                            strict: e.bound.strict,
                            lit: e.lit,
                        });
                    }
                }
            }
        }
        out
    }

    /// Observable status of a literal's edges.
    ///
    /// An equality counts as implied only when both of its directed edges
    /// are active; a single active half is reported as
    /// [`LitStatus::PartiallyImplied`].
    pub fn literal_status(&self, lit: TheoryLit) -> TheoryResult<LitStatus> {
        let statuses = self.edge_statuses(lit)?;
        let active = statuses
            .iter()
            .filter(|s| **s != EdgeStatus::Unassigned)
            .count();
        Ok(if statuses.iter().any(|s| *s == EdgeStatus::Assigned) {
            LitStatus::Asserted
        } else if active == 0 {
            LitStatus::Unassigned
        } else if active < statuses.len() {
            LitStatus::PartiallyImplied
        } else {
            LitStatus::Implied
        })
    }

    /// Assert `lit`, returning the satisfiability of the asserted
    /// conjunction. Precondition: the engine is satisfiable.
    ///
    /// On contradiction the engine transitions to the unsatisfiable state
    /// holding a negative-cycle witness; a single [`pop`](DlSolver::pop)
    /// restores satisfiability.
    pub fn push(&mut self, lit: TheoryLit) -> TheoryResult<bool> {
        if !self.is_sat() {
            return Err(TheoryError::InvalidState("push in unsat state"));
        }
        let halves = self.literal_edges(lit)?;
        // Re-asserting an already-active edge records nothing. The check
        // is per edge: an equality half flipped to a consequence earlier
        // does not excuse the other half from relaxation, or a conflict
        // hiding behind the dormant half would go undetected.
        let mut dormant = Vec::with_capacity(halves.len());
        for &(a, b, bound) in &halves {
            let edge = self
                .graph
                .edge_for(a, b, lit, bound)
                .ok_or(TheoryError::Inconsistent("literal without materialized edge"))?;
            if !edge.is_active() {
                dormant.push((a, b, bound));
            }
        }
        if dormant.is_empty() {
            return Ok(true);
        }

        self.stats.pushes += 1;
        let mut frame = TrailFrame {
            lit,
            pi: self.potential.clone(),
            flips: Vec::new(),
        };
        for &(a, b, bound) in &dormant {
            match self.relax_potential(a, b, bound) {
                PotentialUpdate::Unchanged => {
                    self.assign_row(a, b, bound, lit, &mut frame);
                }
                PotentialUpdate::Updated(pi) => {
                    self.assign_row(a, b, bound, lit, &mut frame);
                    self.potential = pi;
                }
                PotentialUpdate::NegativeCycle => {
                    // Witness path over the pre-assertion graph, reweighted
                    // by the still-valid potential.
                    let cycle = self.negative_cycle(b, a);
                    self.stats.dijkstra_runs += 1;
                    self.assign_row(a, b, bound, lit, &mut frame);
                    self.trail.push(frame);
                    self.state = EngineState::Unsat {
                        trigger: lit,
                        cycle,
                    };
                    self.stats.conflicts += 1;
                    return Ok(false);
                }
            }
        }
        if self.config.theory_propagation {
            for &(a, b, bound) in &dormant {
                self.theory_propagate(a, b, bound, lit, &mut frame);
            }
        }
        self.trail.push(frame);
        Ok(true)
    }

    /// Undo the most recent assertion, restoring the potential snapshot and
    /// reversing the recorded edge-status flips.
    pub fn pop(&mut self) -> TheoryResult<()> {
        let frame = self.trail.pop().ok_or(TheoryError::EmptyTrail)?;
        self.potential = frame.pi;
        for flip in frame.flips.into_iter().rev() {
            let row = self.graph.edges_mut(flip.from, flip.to);
            match row
                .iter_mut()
                .find(|e| e.bound == flip.bound && e.lit == flip.lit)
            {
                Some(edge) => edge.status = flip.prev,
                None => return Err(TheoryError::Inconsistent("trail flip without matching edge")),
            }
        }
        self.state = EngineState::Sat;
        self.stats.pops += 1;
        Ok(())
    }

    /// Equalities between shared terms entailed by the current assertions,
    /// in canonical `(smaller id, larger id)` form, deduplicated.
    ///
    /// Two shared terms are equal when active edges in both directions
    /// close a zero-weight cycle, i.e. both edges are tight under the
    /// potential (reweighted weight exactly zero, compared as exact
    /// doubles).
    pub fn propagations(&mut self, shared: &[VarId]) -> TheoryResult<Vec<(VarId, VarId)>> {
        if !self.is_sat() {
            return Err(TheoryError::InvalidState("propagations in unsat state"));
        }
        let n = self.graph.num_vertices();
        let mut ids: Vec<VarId> = shared.iter().copied().filter(|v| v.index() < n).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut out = Vec::new();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                if self.graph.has_tight_edge(a, b, &self.potential)
                    && self.graph.has_tight_edge(b, a, &self.potential)
                {
                    out.push((a, b));
                }
            }
        }
        self.stats.equalities += out.len() as u64;
        Ok(out)
    }

    /// Explain how `lit` came to hold: the asserted premises entailing it
    /// and the intermediate consequences unrolled along the way.
    ///
    /// An equality whose two directed edges were implied separately merges
    /// both witnesses, so the premises entail both of its halves. An
    /// equality implied in only one direction is not entailed and cannot
    /// be justified.
    pub fn justify(&self, lit: TheoryLit) -> TheoryResult<Justification> {
        let statuses = self.edge_statuses(lit)?;
        if statuses.iter().any(|s| *s == EdgeStatus::Assigned) {
            return Ok(Justification {
                lit,
                premises: vec![lit],
                deductions: Vec::new(),
                tag: ProvenanceTag::Dl,
            });
        }
        let active = statuses
            .iter()
            .filter(|s| **s != EdgeStatus::Unassigned)
            .count();
        if active == 0 {
            return Err(TheoryError::InvalidState("justify of an unasserted literal"));
        }
        if active < statuses.len() {
            return Err(TheoryError::InvalidState(
                "justify of a partially implied equality",
            ));
        }
        let mut collector = JustifyCollector::default();
        for status in &statuses {
            if let EdgeStatus::Consequence(witness) = status {
                for &q in witness {
                    self.collect_justification(q, &mut collector)?;
                }
            }
        }
        Ok(Justification {
            lit,
            premises: collector.premises,
            deductions: collector.deductions,
            tag: ProvenanceTag::Dl,
        })
    }

    /// The unsat core of the current contradiction: the triggering literal
    /// followed by the asserted literals on the negative cycle, with every
    /// consequence on the cycle unrolled to its premises.
    pub fn unsat_core(&self) -> TheoryResult<Vec<TheoryLit>> {
        Ok(self.unsat_core_with_info()?.conjunction)
    }

    /// [`DlSolver::unsat_core`] together with the triggering literal, the
    /// intermediate deductions, and the theory tag.
    pub fn unsat_core_with_info(&self) -> TheoryResult<UnsatCore> {
        let EngineState::Unsat { trigger, cycle } = &self.state else {
            return Err(TheoryError::InvalidState("unsat core in sat state"));
        };
        let mut collector = JustifyCollector::default();
        for &l in cycle {
            self.collect_justification(l, &mut collector)?;
        }
        let mut conjunction = vec![*trigger];
        conjunction.extend(collector.premises.iter().copied().filter(|p| p != trigger));
        Ok(UnsatCore {
            conjunction,
            trigger: *trigger,
            deductions: collector.deductions,
            tag: ProvenanceTag::Dl,
        })
    }

    /// The directed edges a literal asserts, mirroring the edges
    /// materialized at construction: one for an inequality, two for an
    /// equality (asserted back to back, undone by a single pop).
    fn literal_edges(&self, lit: TheoryLit) -> TheoryResult<Vec<(VarId, VarId, Bound)>> {
        let norm = self
            .norms
            .get(lit.atom.index())
            .ok_or(TheoryError::UnknownAtom(lit.atom.0))?;
        let (u, v, c) = (norm.u, norm.v, norm.c);
        Ok(match (norm.kind, lit.positive) {
            (NormKind::Equal, true) => vec![
                (u, v, Bound::new(c, Strictness::NonStrict)),
                (v, u, Bound::new(-c, Strictness::NonStrict)),
            ],
            (NormKind::Equal, false) => {
                // No negation edge is materialized for equalities; the
                // driver splits negated equalities before they reach DL.
                return Err(TheoryError::Malformed(format!(
                    "negated equality: {}",
                    self.atoms[lit.atom.index()]
                )));
            }
            (NormKind::LessEq, true) => vec![(u, v, Bound::new(c, Strictness::NonStrict))],
            (NormKind::LessEq, false) => match self.domain {
                Domain::Integer => vec![(v, u, Bound::new(-c - 1.0, Strictness::NonStrict))],
                Domain::Real => vec![(v, u, Bound::new(-c, Strictness::Strict))],
            },
            (NormKind::LessStrict, true) => vec![(u, v, Bound::new(c, Strictness::Strict))],
            (NormKind::LessStrict, false) => vec![(v, u, Bound::new(-c, Strictness::NonStrict))],
        })
    }

    /// The statuses of every edge sourced by `lit`, dormant ones included;
    /// an equality contributes one entry per directed edge. Callers must
    /// not conflate a partially active equality with a fully implied one.
    fn edge_statuses(&self, lit: TheoryLit) -> TheoryResult<Vec<EdgeStatus>> {
        let halves = self.literal_edges(lit)?;
        halves
            .into_iter()
            .map(|(a, b, bound)| {
                self.graph
                    .edge_for(a, b, lit, bound)
                    .map(|e| e.status.clone())
                    .ok_or(TheoryError::Inconsistent("literal without materialized edge"))
            })
            .collect()
    }

    fn collect_justification(
        &self,
        lit: TheoryLit,
        collector: &mut JustifyCollector,
    ) -> TheoryResult<()> {
        if collector.done.contains(&lit) {
            return Ok(());
        }
        if !collector.visiting.insert(lit) {
            return Err(TheoryError::Inconsistent("cyclic consequence chain"));
        }
        let statuses = self.edge_statuses(lit)?;
        if statuses.iter().any(|s| *s == EdgeStatus::Assigned) {
            collector.premises.push(lit);
        } else {
            // A cited equality may be active in one direction only; the
            // cited edge is always among the active halves, whose merged
            // witnesses entail it.
            let witnesses: Vec<&Vec<TheoryLit>> = statuses
                .iter()
                .filter_map(|s| match s {
                    EdgeStatus::Consequence(witness) => Some(witness),
                    _ => None,
                })
                .collect();
            if witnesses.is_empty() {
                return Err(TheoryError::Inconsistent(
                    "unassigned literal in consequence chain",
                ));
            }
            collector.deductions.push(lit);
            for witness in witnesses {
                for &q in witness {
                    self.collect_justification(q, collector)?;
                }
            }
        }
        collector.visiting.remove(&lit);
        collector.done.insert(lit);
        Ok(())
    }

    /// Cotton-Maler potential repair for a new edge `u -> v` with `bound`.
    ///
    /// A vertex `s` is queued with the (negative) slack its tightest
    /// violated path gives it, `gamma(s) = pi(s) + c - pi(u)`-style; each
    /// extraction raises `pi(s)` by the violation and relaxes the active
    /// out-edges of `s`. Reaching `u` with a negative key means the edge
    /// closes a negative cycle; a weight-zero cycle through a strict edge
    /// arrives with a negative epsilon count and is a conflict as well.
    fn relax_potential(&self, u: VarId, v: VarId, bound: Bound) -> PotentialUpdate {
        let gamma0 = self.potential[v.index()] + bound.cost() - self.potential[u.index()];
        if gamma0 >= Cost::ZERO {
            return PotentialUpdate::Unchanged;
        }

        let n = self.graph.num_vertices();
        let mut heap = IndexedHeap::new(n);
        let mut done = vec![false; n];
        let mut pi = self.potential.clone();
        heap.insert_or_decrease(v, gamma0);
        while let Some((s, key)) = heap.peek() {
            if key >= Cost::ZERO {
                break;
            }
            heap.remove(s);
            if s == u {
                return PotentialUpdate::NegativeCycle;
            }
            pi[s.index()] = self.potential[s.index()] - key;
            done[s.index()] = true;
            for (t, edge_bound) in self.graph.strongest_out(s) {
                if done[t.index()] {
                    continue;
                }
                let cand = self.potential[t.index()] + edge_bound.cost() - pi[s.index()];
                heap.insert_or_decrease(t, cand);
            }
        }
        PotentialUpdate::Updated(pi)
    }

    /// Literals of the strongest edges along a shortest path from `from`
    /// to `to` over the active graph.
    fn negative_cycle(&self, from: VarId, to: VarId) -> Vec<TheoryLit> {
        let paths = ShortestPaths::run(&self.graph, &self.potential, from, Direction::Forward);
        self.graph.strongest_lits(&paths.vertex_path(to))
    }

    /// Status flips for the row of a newly asserted edge: the literal's own
    /// edge becomes assigned, weaker dormant parallels become its
    /// consequences.
    fn assign_row(&mut self, u: VarId, v: VarId, bound: Bound, lit: TheoryLit, frame: &mut TrailFrame) {
        let mut consequences = 0;
        for edge in self.graph.edges_mut(u, v) {
            if edge.lit == lit {
                frame.flips.push(Flip {
                    from: u,
                    to: v,
                    bound: edge.bound,
                    lit: edge.lit,
                    prev: edge.status.clone(),
                });
                edge.status = EdgeStatus::Assigned;
            } else if edge.status == EdgeStatus::Unassigned && bound.entails(edge.bound) {
                frame.flips.push(Flip {
                    from: u,
                    to: v,
                    bound: edge.bound,
                    lit: edge.lit,
                    prev: EdgeStatus::Unassigned,
                });
                edge.status = EdgeStatus::Consequence(vec![lit]);
                consequences += 1;
            }
        }
        self.stats.consequences += consequences;
    }

    /// Theory propagation for a newly asserted edge `u -> v` with `bound`:
    /// any dormant edge `i -> j` entailed by the shortest paths `i ~> u`
    /// and `v ~> j` around the new edge becomes a consequence of the
    /// asserted literal plus the strongest edges along those paths.
    fn theory_propagate(
        &mut self,
        u: VarId,
        v: VarId,
        bound: Bound,
        lit: TheoryLit,
        frame: &mut TrailFrame,
    ) {
        let forward = ShortestPaths::run(&self.graph, &self.potential, v, Direction::Forward);
        let backward = ShortestPaths::run(&self.graph, &self.potential, u, Direction::Backward);
        self.stats.dijkstra_runs += 2;

        let n = self.graph.num_vertices();
        let mut pending: Vec<(VarId, VarId, TheoryLit, Bound, Vec<TheoryLit>)> = Vec::new();
        for i in 0..n as u32 {
            let i = VarId(i);
            let Some(to_u) = backward.dist(i) else {
                continue;
            };
            for j in 0..n as u32 {
                let j = VarId(j);
                let Some(from_v) = forward.dist(j) else {
                    continue;
                };
                let path_cost = to_u + bound.cost() + from_v;
                for edge in self.graph.edges(i, j) {
                    // Ties do not propagate: a path of exactly the edge's
                    // cost leaves the edge unassigned.
                    if edge.status != EdgeStatus::Unassigned || path_cost >= edge.bound.cost() {
                        continue;
                    }
                    let mut lits = vec![lit];
                    lits.extend(self.graph.strongest_lits(&backward.vertex_path(i)));
                    lits.extend(self.graph.strongest_lits(&forward.vertex_path(j)));
                    let mut seen = HashSet::with_capacity(lits.len());
                    lits.retain(|l| seen.insert(*l));
                    pending.push((i, j, edge.lit, edge.bound, lits));
                }
            }
        }

        for (i, j, edge_lit, edge_bound, lits) in pending {
            let Some(edge) = self
                .graph
                .edges_mut(i, j)
                .iter_mut()
                .find(|e| e.lit == edge_lit && e.bound == edge_bound)
            else {
                continue;
            };
            if edge.status != EdgeStatus::Unassigned {
                continue;
            }
            frame.flips.push(Flip {
                from: i,
                to: j,
                bound: edge.bound,
                lit: edge.lit,
                prev: EdgeStatus::Unassigned,
            });
            edge.status = EdgeStatus::Consequence(lits);
            self.stats.consequences += 1;
        }
    }
}

#[derive(Default)]
struct JustifyCollector {
    premises: Vec<TheoryLit>,
    deductions: Vec<TheoryLit>,
    visiting: HashSet<TheoryLit>,
    done: HashSet<TheoryLit>,
}

impl TheorySolver for DlSolver {
    fn assert_literal(&mut self, lit: TheoryLit) -> TheoryResult<bool> {
        self.push(lit)
    }

    fn backtrack(&mut self) -> TheoryResult<()> {
        self.pop()
    }

    fn is_sat(&self) -> bool {
        DlSolver::is_sat(self)
    }

    fn propagated_equalities(&mut self, shared: &[VarId]) -> TheoryResult<Vec<(VarId, VarId)>> {
        self.propagations(shared)
    }

    fn justify(&self, lit: TheoryLit) -> TheoryResult<Justification> {
        DlSolver::justify(self, lit)
    }

    fn unsat_core(&self) -> TheoryResult<UnsatCore> {
        self.unsat_core_with_info()
    }
}
