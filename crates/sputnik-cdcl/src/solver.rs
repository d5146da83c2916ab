//! Core CDCL solver implementation.

use crate::bcp::WatchedLiterals;
use crate::clause_db::{ClauseDatabase, ClauseRef};
use crate::conflict::{ConflictAnalyzer, ImplicationGraph};
use crate::decision::DecisionEngine;
use sputnik_base::{Lit, Value};
use sputnik_format::{DimacsCnf, ReportStats};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The result of a SAT solve.
#[derive(Debug, Clone)]
pub enum SatResult {
    /// Satisfiable, with one satisfying assignment indexed by `var - 1`.
    Sat(Vec<bool>),
    /// Unsatisfiable.
    Unsat,
    /// No answer (cancelled or resource limit reached).
    Unknown(String),
}

/// Configuration for the CDCL solver.
#[derive(Debug, Clone)]
pub struct CdclConfig {
    /// Give up with `Unknown` after this many conflicts.
    pub conflict_limit: Option<u64>,
    /// Polarity assigned to decision variables.
    pub default_polarity: bool,
}

impl Default for CdclConfig {
    fn default() -> Self {
        Self {
            conflict_limit: None,
            default_polarity: true,
        }
    }
}

/// Solver statistics.
#[derive(Debug, Clone, Default)]
pub struct SolverStats {
    /// Number of decisions made.
    pub decisions: u64,
    /// Number of conflicts encountered.
    pub conflicts: u64,
    /// Number of propagated assignments.
    pub propagations: u64,
    /// Number of learned clauses.
    pub learned_clauses: u64,
}

impl From<&SolverStats> for ReportStats {
    fn from(stats: &SolverStats) -> Self {
        Self {
            decisions: stats.decisions,
            conflicts: stats.conflicts,
            propagations: stats.propagations,
            learned_clauses: stats.learned_clauses,
        }
    }
}

/// The main CDCL solver.
pub struct CdclSolver {
    /// Number of variables.
    num_vars: usize,
    /// Clause database.
    clauses: ClauseDatabase,
    /// Per-literal watch lists.
    watches: WatchedLiterals,
    /// Assignment trail and implication graph.
    graph: ImplicationGraph,
    /// Conflict analyzer.
    analyzer: ConflictAnalyzer,
    /// Decision engine.
    decision: DecisionEngine,
    /// Configuration.
    config: CdclConfig,
    /// Statistics.
    stats: SolverStats,
    /// Cancellation flag, checked between propagation rounds.
    abort: Arc<AtomicBool>,
    /// Set at ingest when the input is trivially unsatisfiable (an empty
    /// clause, or contradicting unit clauses).
    root_conflict: bool,
}

impl CdclSolver {
    /// Creates a solver from a parsed DIMACS formula, installing every
    /// clause and enqueueing unit clauses as level-0 assignments.
    #[must_use]
    pub fn new(problem: &DimacsCnf) -> Self {
        Self::with_config(problem, CdclConfig::default())
    }

    /// Creates a new solver with custom configuration.
    #[must_use]
    pub fn with_config(problem: &DimacsCnf, config: CdclConfig) -> Self {
        let num_vars = problem.num_vars;
        let mut solver = Self {
            num_vars,
            clauses: ClauseDatabase::new(),
            watches: WatchedLiterals::new(num_vars),
            graph: ImplicationGraph::new(num_vars),
            analyzer: ConflictAnalyzer::new(num_vars),
            decision: DecisionEngine::new(num_vars),
            config,
            stats: SolverStats::default(),
            abort: Arc::new(AtomicBool::new(false)),
            root_conflict: false,
        };
        for clause in &problem.clauses {
            solver.add_input_clause(clause);
        }
        solver
    }

    fn add_input_clause(&mut self, raw: &[i64]) {
        if raw.is_empty() {
            self.root_conflict = true;
            return;
        }
        let lits: Vec<Lit> = raw.iter().map(|&l| Lit::from_dimacs(l)).collect();
        let Some(cref) = self.clauses.add_original(&lits) else {
            tracing::trace!(clause = ?raw, "dropping tautology");
            return;
        };
        if self.clauses.get(cref).len() >= 2 {
            self.watches.attach(cref, &self.clauses);
        } else {
            // Unit input clause: forced before search begins.
            let lit = self.clauses.get(cref).lit(0);
            match self.graph.value_of(lit) {
                Value::Free => self.graph.on_propagation(lit, ClauseRef::NULL),
                Value::True => {}
                Value::False => self.root_conflict = true,
            }
        }
    }

    /// Runs the search to completion.
    pub fn solve(&mut self) -> SatResult {
        if self.root_conflict {
            return SatResult::Unsat;
        }

        loop {
            if self.abort.load(Ordering::Relaxed) {
                return SatResult::Unknown("aborted".to_string());
            }

            let before = self.graph.trail_len();
            let conflict = self.watches.propagate(&mut self.clauses, &mut self.graph);
            self.stats.propagations += (self.graph.trail_len() - before) as u64;

            if let Some(conflict) = conflict {
                self.stats.conflicts += 1;

                if self.graph.current_level() == 0 {
                    return SatResult::Unsat;
                }
                if let Some(limit) = self.config.conflict_limit {
                    if self.stats.conflicts >= limit {
                        return SatResult::Unknown(format!("conflict limit {limit} reached"));
                    }
                }

                let (learnt, backjump) =
                    self.analyzer
                        .analyze(conflict, &self.clauses, &self.graph);
                self.install_learned(learnt, backjump);
            } else if let Some(var) = self.decision.pick_variable(&self.graph) {
                self.stats.decisions += 1;
                self.graph
                    .on_decision(Lit::new(var, self.config.default_polarity));
            } else {
                // All variables assigned without conflict.
                return SatResult::Sat(self.graph.model());
            }
        }
    }

    /// Adds the learned clause, rewinds to the backjump level and enqueues
    /// the asserting literal, forced by the new clause.
    fn install_learned(&mut self, learnt: Vec<Lit>, backjump: u32) {
        tracing::debug!(clause = ?learnt, backjump, "learned clause");
        self.stats.learned_clauses += 1;

        let asserting = learnt[0];
        let cref = self.clauses.add_learned(learnt);
        if self.clauses.get(cref).len() >= 2 {
            self.watches.attach(cref, &self.clauses);
        }
        self.graph.drop_above(backjump);
        self.graph.on_propagation(asserting, cref);
    }

    /// Requests cancellation when set; `solve` then returns Unknown at the
    /// next propagation round.
    #[must_use]
    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// Returns solver statistics.
    #[must_use]
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Number of variables in the problem.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of clauses currently stored, learned ones included.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
}
