//! Delimiter pair configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered pair of marker strings surrounding directive bodies.
///
/// Configured once per engine instance and immutable for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Delimiters {
    /// Create a delimiter pair from the given markers.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

impl fmt::Display for Delimiters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.open, self.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pair() {
        let d = Delimiters::default();
        assert_eq!(d.open, "{{");
        assert_eq!(d.close, "}}");
    }

    #[test]
    fn test_custom_pair() {
        let d = Delimiters::new("<%", "%>");
        assert_eq!(d.open, "<%");
        assert_eq!(d.close, "%>");
    }
}
