//! Implication graph and first-UIP conflict analysis.
//!
//! The graph is the assignment trail plus, for each assigned variable, its
//! value, decision level and antecedent clause. Decision variables and
//! level-0 input units carry a null antecedent; every other assignment
//! points at the clause that forced it.

use crate::clause_db::{ClauseDatabase, ClauseRef};
use sputnik_base::{Lit, Value, VarId};

/// The assignment trail and its per-variable annotations.
pub struct ImplicationGraph {
    /// Current value per variable; index 0 unused.
    values: Vec<Value>,
    /// Decision level per variable.
    levels: Vec<u32>,
    /// Antecedent clause per variable.
    reasons: Vec<ClauseRef>,
    /// Assignments in chronological order.
    trail: Vec<Lit>,
    /// Trail length at the start of each decision level.
    level_starts: Vec<usize>,
    /// Trail entries below this index have been propagated; the rest are
    /// the FIFO queue of pending assignments.
    propagated: usize,
}

impl ImplicationGraph {
    /// Creates an empty graph over `num_vars` variables, all Free.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            values: vec![Value::Free; num_vars + 1],
            levels: vec![0; num_vars + 1],
            reasons: vec![ClauseRef::NULL; num_vars + 1],
            trail: Vec::with_capacity(num_vars),
            level_starts: Vec::new(),
            propagated: 0,
        }
    }

    /// Number of variables in the domain.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.values.len() - 1
    }

    /// Current value of a variable.
    #[must_use]
    pub fn value_of_var(&self, var: VarId) -> Value {
        self.values[var as usize]
    }

    /// Value of a literal under the current assignment.
    #[must_use]
    pub fn value_of(&self, lit: Lit) -> Value {
        let val = self.values[lit.var() as usize];
        if lit.is_positive() { val } else { val.negate() }
    }

    /// Decision level at which a variable was assigned.
    #[must_use]
    pub fn level(&self, var: VarId) -> u32 {
        self.levels[var as usize]
    }

    /// Antecedent clause of a variable, NULL for decisions.
    #[must_use]
    pub fn reason(&self, var: VarId) -> ClauseRef {
        self.reasons[var as usize]
    }

    /// The current decision level; 0 is the root.
    #[must_use]
    pub fn current_level(&self) -> u32 {
        self.level_starts.len() as u32
    }

    /// The trail of assignments in chronological order.
    #[must_use]
    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    /// Number of assignments on the trail.
    #[must_use]
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Opens a new decision level and assigns `lit` true with no antecedent.
    pub fn on_decision(&mut self, lit: Lit) {
        self.level_starts.push(self.trail.len());
        self.on_propagation(lit, ClauseRef::NULL);
    }

    /// Records an assignment that makes `lit` true and enqueues it for
    /// propagation. `reason` is the forcing clause, NULL for decisions and
    /// for input unit clauses installed at the root.
    pub fn on_propagation(&mut self, lit: Lit, reason: ClauseRef) {
        debug_assert_eq!(self.value_of(lit), Value::Free);
        let var = lit.var() as usize;
        self.values[var] = Value::from_bool(lit.is_positive());
        self.levels[var] = self.current_level();
        self.reasons[var] = reason;
        self.trail.push(lit);
    }

    /// Next pending assignment in FIFO order, if any.
    pub fn next_pending(&mut self) -> Option<Lit> {
        if self.propagated < self.trail.len() {
            let lit = self.trail[self.propagated];
            self.propagated += 1;
            Some(lit)
        } else {
            None
        }
    }

    /// Abandons pending work; used when a conflict stops propagation.
    pub fn flush_pending(&mut self) {
        self.propagated = self.trail.len();
    }

    /// Removes every assignment above `level`, restoring those variables to
    /// Free, and rewinds the propagation frontier to the trail tip.
    pub fn drop_above(&mut self, level: u32) {
        if level >= self.current_level() {
            return;
        }
        let keep = self.level_starts[level as usize];
        for &lit in &self.trail[keep..] {
            let var = lit.var() as usize;
            self.values[var] = Value::Free;
            self.reasons[var] = ClauseRef::NULL;
        }
        self.trail.truncate(keep);
        self.level_starts.truncate(level as usize);
        self.propagated = keep;
    }

    /// Total assignment as booleans indexed by `var - 1`. Free variables
    /// read as false; at SAT no variable is Free.
    #[must_use]
    pub fn model(&self) -> Vec<bool> {
        self.values[1..]
            .iter()
            .map(|v| v.to_bool().unwrap_or(false))
            .collect()
    }
}

/// First-UIP conflict analyzer.
pub struct ConflictAnalyzer {
    /// Per-variable marker replacing explicit resolution-set operations.
    seen: Vec<bool>,
}

impl ConflictAnalyzer {
    /// Creates a new conflict analyzer for `num_vars` variables.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            seen: vec![false; num_vars + 1],
        }
    }

    /// Derives a learned clause from `conflict` and returns it with the
    /// backjump level.
    ///
    /// The learned clause contains exactly one literal of the current
    /// decision level: the negated first UIP, placed at position 0. When the
    /// clause has more than one literal, a backjump-level literal sits at
    /// position 1, so watched positions 0 and 1 satisfy the installation
    /// contract.
    ///
    /// Precondition (caller-guaranteed): every literal of `conflict` is
    /// False and the current level is above the root.
    pub fn analyze(
        &mut self,
        conflict: ClauseRef,
        db: &ClauseDatabase,
        graph: &ImplicationGraph,
    ) -> (Vec<Lit>, u32) {
        let current = graph.current_level();
        debug_assert!(current > 0);
        debug_assert!(
            db.get(conflict)
                .lits()
                .iter()
                .all(|&l| graph.value_of(l) == Value::False),
            "conflict clause must be falsified"
        );

        // Slot 0 stays reserved for the asserting literal.
        let mut learnt: Vec<Lit> = vec![Lit::NULL];
        let mut open = 0usize;
        let mut reason = conflict;
        let mut resolved_var: VarId = 0;
        let mut idx = graph.trail_len();

        loop {
            for &q in db.get(reason).lits() {
                let var = q.var();
                if var == resolved_var || self.seen[var as usize] {
                    continue;
                }
                debug_assert_eq!(graph.value_of(q), Value::False);
                let lvl = graph.level(var);
                if lvl == 0 {
                    // Root assignments hold unconditionally and never enter
                    // the learned clause.
                    continue;
                }
                self.seen[var as usize] = true;
                if lvl == current {
                    open += 1;
                } else {
                    learnt.push(q);
                }
            }

            // Walk back to the most recent marked assignment; the trail
            // suffix above the last decision point is all current-level.
            loop {
                idx -= 1;
                if self.seen[graph.trail()[idx].var() as usize] {
                    break;
                }
            }
            let pivot = graph.trail()[idx];
            let var = pivot.var();
            self.seen[var as usize] = false;
            open -= 1;
            if open == 0 {
                // `pivot` is the first UIP.
                learnt[0] = !pivot;
                break;
            }
            reason = graph.reason(var);
            debug_assert!(
                !reason.is_null(),
                "an open non-UIP variable at the conflict level must be propagated"
            );
            resolved_var = var;
        }

        for &lit in &learnt[1..] {
            self.seen[lit.var() as usize] = false;
        }

        let backjump = if learnt.len() == 1 {
            0
        } else {
            let mut deepest = 1;
            for i in 2..learnt.len() {
                if graph.level(learnt[i].var()) > graph.level(learnt[deepest].var()) {
                    deepest = i;
                }
            }
            learnt.swap(1, deepest);
            graph.level(learnt[1].var())
        };

        (learnt, backjump)
    }
}
