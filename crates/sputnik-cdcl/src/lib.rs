//! # sputnik-cdcl
//!
//! Conflict-Driven Clause Learning (CDCL) core algorithm.
//!
//! Implements:
//! - Two-watched-literal Boolean Constraint Propagation (BCP)
//! - Implication graph maintenance on the assignment trail
//! - First-UIP conflict analysis and clause learning
//! - Non-chronological backjumping
//! - First-free decision policy

pub mod bcp;
pub mod clause_db;
pub mod conflict;
pub mod decision;
pub mod solver;

pub use solver::{CdclConfig, CdclSolver, SatResult, SolverStats};
