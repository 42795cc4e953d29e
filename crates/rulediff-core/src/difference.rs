//! Ready-made difference record.
//!
//! The engine never looks inside differences; callers normally define their
//! own enum. `GenericDifference` covers the common case where a human-readable
//! message is all that is needed.

use std::fmt;

/// A difference described only by a message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericDifference {
    message: String,
}

impl GenericDifference {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for GenericDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<String> for GenericDifference {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for GenericDifference {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
