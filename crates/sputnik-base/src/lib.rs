//! # sputnik-base
//!
//! Core types and utilities for the sputnik SAT solver.
//!
//! This crate provides the foundational building blocks used across all other
//! sputnik crates, including:
//!
//! - **Literal algebra**: variables, literals and three-valued assignments
//! - **Error Types**: unified error handling across the solver

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Lit, Value, VarId};
