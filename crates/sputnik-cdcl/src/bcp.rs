//! Boolean Constraint Propagation (BCP) with two watched literals.
//!
//! Every clause of length at least two keeps two watched positions and
//! appears on the watch lists of exactly those two literals. When a literal
//! becomes false, only the clauses watching it are examined: each either
//! keeps its watch (satisfied), moves the watch to another non-false
//! literal, forces its remaining watched literal, or is conflicting.

use crate::clause_db::{ClauseDatabase, ClauseRef};
use crate::conflict::ImplicationGraph;
use sputnik_base::{Lit, Value};

/// A watch list entry.
#[derive(Debug, Clone, Copy)]
pub struct Watch {
    /// The clause being watched.
    pub clause: ClauseRef,
    /// Cache of the clause's other watched literal. If it is already true
    /// the clause is satisfied and the entry is left untouched.
    pub blocker: Lit,
}

/// Per-literal watch lists.
pub struct WatchedLiterals {
    /// Indexed by `Lit::index()`; a clause handle on `watches[l]` means the
    /// clause currently watches literal `l`.
    watches: Vec<Vec<Watch>>,
}

impl WatchedLiterals {
    /// Creates empty watch lists for `num_vars` variables.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        // Two lists per variable; literal codes start at variable 1.
        Self {
            watches: vec![Vec::new(); 2 * (num_vars + 1)],
        }
    }

    /// Registers both watched literals of a clause of length >= 2.
    pub fn attach(&mut self, cref: ClauseRef, db: &ClauseDatabase) {
        let clause = db.get(cref);
        debug_assert!(clause.len() >= 2);
        let w0 = clause.watched_lit(0);
        let w1 = clause.watched_lit(1);
        self.watches[w0.index()].push(Watch {
            clause: cref,
            blocker: w1,
        });
        self.watches[w1.index()].push(Watch {
            clause: cref,
            blocker: w0,
        });
    }

    /// Clauses currently watching `lit`.
    #[must_use]
    pub fn watchers(&self, lit: Lit) -> &[Watch] {
        &self.watches[lit.index()]
    }

    /// Consumes pending assignments until the queue drains or some clause
    /// becomes conflicting; returns the conflicting clause handle, if any.
    ///
    /// On conflict the pending queue is flushed, so the caller sees a
    /// consistent frontier before analysis or backjumping.
    pub fn propagate(
        &mut self,
        db: &mut ClauseDatabase,
        graph: &mut ImplicationGraph,
    ) -> Option<ClauseRef> {
        while let Some(assigned) = graph.next_pending() {
            let false_lit = !assigned;
            if let Some(conflict) = self.propagate_literal(false_lit, db, graph) {
                graph.flush_pending();
                return Some(conflict);
            }
        }
        None
    }

    /// Notifies every clause watching `false_lit` that it has been
    /// falsified. The list is snapshotted and rebuilt in one step, so
    /// moving or appending watches mid-walk cannot alias the iteration.
    fn propagate_literal(
        &mut self,
        false_lit: Lit,
        db: &mut ClauseDatabase,
        graph: &mut ImplicationGraph,
    ) -> Option<ClauseRef> {
        let snapshot = std::mem::take(&mut self.watches[false_lit.index()]);
        let mut kept: Vec<Watch> = Vec::with_capacity(snapshot.len());
        let mut conflict = None;

        let mut entries = snapshot.into_iter();
        while let Some(mut watch) = entries.next() {
            if graph.value_of(watch.blocker) == Value::True {
                kept.push(watch);
                continue;
            }

            let clause = db.get_mut(watch.clause);
            let slot = if clause.watched_lit(0) == false_lit { 0 } else { 1 };
            debug_assert_eq!(clause.watched_lit(slot), false_lit);
            let other = clause.watched_lit(1 - slot);

            if graph.value_of(other) == Value::True {
                watch.blocker = other;
                kept.push(watch);
                continue;
            }

            let (pos0, pos1) = (clause.watched_pos(0), clause.watched_pos(1));
            let replacement = (0..clause.len())
                .find(|&p| p != pos0 && p != pos1 && graph.value_of(clause.lit(p)) != Value::False);

            if let Some(pos) = replacement {
                // Move the watch to the replacement literal's list.
                clause.set_watched_pos(slot, pos);
                let new_lit = clause.lit(pos);
                self.watches[new_lit.index()].push(Watch {
                    clause: watch.clause,
                    blocker: other,
                });
                continue;
            }

            if graph.value_of(other) == Value::Free {
                // Unit under the current assignment: force the other watch.
                graph.on_propagation(other, watch.clause);
                watch.blocker = other;
                kept.push(watch);
            } else {
                // Both watches false: conflicting clause.
                kept.push(watch);
                conflict = Some(watch.clause);
                break;
            }
        }

        // Reinstall survivors plus, on conflict, the unexamined tail.
        kept.extend(entries);
        debug_assert!(self.watches[false_lit.index()].is_empty());
        self.watches[false_lit.index()] = kept;

        conflict
    }
}
