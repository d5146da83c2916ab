//! # sputnik-format
//!
//! File format parsing and serialization for sputnik.
//!
//! Supports:
//! - **DIMACS CNF**: the standard SAT competition input format
//! - **Solve reports**: JSON records of a solver run (status, model, counters)

pub mod dimacs;
pub mod report;

pub use dimacs::DimacsCnf;
pub use report::{ReportStats, SolveReport, SolveStatus};
