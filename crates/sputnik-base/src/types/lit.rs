//! Literals: signed references to variables.

use super::VarId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal is a variable together with a polarity, packed as
/// `var << 1 | positive`. Complementary literals differ only in the low bit,
/// and ordering by the packed code orders by variable, then polarity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Lit(u32);

impl Lit {
    /// The distinguished "no literal" value.
    pub const NULL: Lit = Lit(0);

    /// Creates a literal over `var` with the given polarity.
    #[must_use]
    pub fn new(var: VarId, positive: bool) -> Self {
        debug_assert!(var > 0, "variable indices start at 1");
        Lit(var << 1 | u32::from(positive))
    }

    /// Returns the variable this literal refers to.
    #[must_use]
    pub const fn var(self) -> VarId {
        self.0 >> 1
    }

    /// Returns true for the positive literal of the variable.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 & 1 == 1
    }

    /// Returns true for [`Lit::NULL`].
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.var() == 0
    }

    /// Index into per-literal tables such as watch lists.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Converts a nonzero signed DIMACS integer.
    #[must_use]
    pub fn from_dimacs(lit: i64) -> Self {
        debug_assert!(lit != 0, "0 is the DIMACS clause terminator");
        Lit::new(lit.unsigned_abs() as VarId, lit > 0)
    }

    /// Converts to a signed DIMACS integer (positive = true polarity).
    #[must_use]
    pub fn to_dimacs(self) -> i64 {
        let base = i64::from(self.var());
        if self.is_positive() { base } else { -base }
    }
}

impl std::ops::Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        debug_assert!(!self.is_null());
        Lit(self.0 ^ 1)
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Lit(null)")
        } else {
            write!(f, "Lit({})", self.to_dimacs())
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_toggles_polarity_only() {
        let a = Lit::new(7, true);
        let not_a = !a;
        assert_eq!(not_a.var(), 7);
        assert!(!not_a.is_positive());
        assert_eq!(!not_a, a);
    }

    #[test]
    fn test_ordering_is_by_variable_then_polarity() {
        let mut lits = vec![Lit::new(3, true), Lit::new(2, true), Lit::new(3, false)];
        lits.sort();
        assert_eq!(
            lits,
            vec![Lit::new(2, true), Lit::new(3, false), Lit::new(3, true)]
        );
    }

    #[test]
    fn test_dimacs_round_trip() {
        for raw in [1i64, -1, 42, -42] {
            assert_eq!(Lit::from_dimacs(raw).to_dimacs(), raw);
        }
    }

    #[test]
    fn test_null_is_distinguishable() {
        assert!(Lit::NULL.is_null());
        assert!(!Lit::new(1, false).is_null());
    }
}
