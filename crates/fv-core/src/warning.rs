//! Structured, non-fatal advisories.
//!
//! Warnings are attached to a resolved calendar and never thrown: several
//! jurisdictions legitimately deviate from the common holiday count, and a
//! source outage for one tier should not hide the tiers that did arrive.

use serde::{Deserialize, Serialize};

/// What a [`Warning`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The final holiday count differs from the region's target count.
    CountInvariant,
    /// Two same-priority records share a date but not a description.
    ConflictingDescription,
    /// A tier could not be retrieved and is absent from the result.
    MissingTier,
    /// A documented replacement is absent from the source data, so the
    /// original holiday was kept.
    MissingReplacement,
}

impl WarningKind {
    /// Return the snake_case name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::CountInvariant => "count_invariant",
            WarningKind::ConflictingDescription => "conflicting_description",
            WarningKind::MissingTier => "missing_tier",
            WarningKind::MissingReplacement => "missing_replacement",
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A non-fatal advisory: `{kind, detail}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Warning {
    /// Category of the advisory.
    pub kind: WarningKind,
    /// Human-readable detail.
    pub detail: String,
}

impl Warning {
    /// Create a warning.
    pub fn new(kind: WarningKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Shorthand for a [`WarningKind::CountInvariant`] warning.
    pub fn count_invariant(expected: usize, actual: usize) -> Self {
        Self::new(
            WarningKind::CountInvariant,
            format!("expected {expected} holidays, found {actual}"),
        )
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind() {
        let w = Warning::count_invariant(14, 13);
        assert_eq!(w.to_string(), "[count_invariant] expected 14 holidays, found 13");
    }

    #[test]
    fn serializes_kind_and_detail() {
        let w = Warning::new(WarningKind::MissingTier, "local tier unavailable");
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"kind":"missing_tier","detail":"local tier unavailable"}"#);
    }
}
