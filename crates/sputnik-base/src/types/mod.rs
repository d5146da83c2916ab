//! Core solver types.
//!
//! - [`VarId`]: 1-based variable index (0 is reserved)
//! - [`Lit`]: a variable with a polarity, packed into one word
//! - [`Value`]: three-valued assignment state

mod lit;
mod value;

pub use lit::Lit;
pub use value::Value;

/// Unique identifier for a propositional variable.
///
/// Variables are numbered from 1; index 0 is reserved to mean "no variable".
pub type VarId = u32;
