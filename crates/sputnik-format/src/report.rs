//! Machine-readable records of a solver run.

use serde::{Deserialize, Serialize};

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    Sat,
    Unsat,
    Unknown,
}

/// Search counters embedded in a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Number of decisions made.
    pub decisions: u64,
    /// Number of conflicts encountered.
    pub conflicts: u64,
    /// Number of propagated assignments.
    pub propagations: u64,
    /// Number of learned clauses.
    pub learned_clauses: u64,
}

/// A record of one solver run, for tooling and reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    /// Outcome of the run.
    pub status: SolveStatus,
    /// Satisfying assignment in DIMACS convention, present on SAT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Vec<i64>>,
    /// Why the run ended without an answer, present on Unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Search counters.
    pub stats: ReportStats,
}

impl SolveReport {
    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_round_trip() {
        let report = SolveReport {
            status: SolveStatus::Sat,
            model: Some(vec![1, -2, 3]),
            reason: None,
            stats: ReportStats {
                decisions: 2,
                conflicts: 1,
                propagations: 5,
                learned_clauses: 1,
            },
        };
        let json = report.to_json().unwrap();
        let back = SolveReport::from_json(&json).unwrap();
        assert_eq!(back.status, SolveStatus::Sat);
        assert_eq!(back.model, Some(vec![1, -2, 3]));
        assert_eq!(back.stats, report.stats);
    }
}
