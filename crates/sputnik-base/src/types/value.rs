//! Three-valued assignment state.

use serde::{Deserialize, Serialize};

/// The assignment state of a variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Not assigned.
    #[default]
    Free,
    /// Assigned true.
    True,
    /// Assigned false.
    False,
}

impl Value {
    /// The value under which a literal of the given polarity holds.
    #[must_use]
    pub const fn from_bool(b: bool) -> Self {
        if b { Value::True } else { Value::False }
    }

    /// Maps True/False to a boolean; Free has no boolean reading.
    #[must_use]
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            Value::Free => None,
            Value::True => Some(true),
            Value::False => Some(false),
        }
    }

    /// Logical negation; Free stays Free.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Value::Free => Value::Free,
            Value::True => Value::False,
            Value::False => Value::True,
        }
    }
}
