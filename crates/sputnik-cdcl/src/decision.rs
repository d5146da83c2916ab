//! Decision engine for variable selection.

use crate::conflict::ImplicationGraph;
use sputnik_base::{Value, VarId};

/// Picks branching variables.
///
/// The policy is the lowest-indexed Free variable. It is complete and, with
/// the fixed polarity default, makes the whole search deterministic.
pub struct DecisionEngine {
    num_vars: usize,
}

impl DecisionEngine {
    /// Creates a new decision engine.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self { num_vars }
    }

    /// Picks the next variable to branch on.
    ///
    /// Returns None if all variables are assigned.
    #[must_use]
    pub fn pick_variable(&self, graph: &ImplicationGraph) -> Option<VarId> {
        (1..=self.num_vars as VarId).find(|&var| graph.value_of_var(var) == Value::Free)
    }
}
