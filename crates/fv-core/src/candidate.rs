//! Fuzzy-match candidates produced while resolving a municipality name.

use serde::{Deserialize, Serialize};

/// One registry entry considered while resolving a free-text name.
///
/// Exists only for the duration of a single resolution call, or inside an
/// [`Error::AmbiguousMunicipality`](crate::Error::AmbiguousMunicipality)
/// report handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MunicipalityCandidate {
    /// Official name as listed in the registry.
    pub canonical_name: String,
    /// Municipality code.
    pub jurisdiction_code: String,
    /// Region the municipality belongs to.
    pub region_code: String,
    /// Similarity score in `[0, 100]`.
    pub score: f64,
}

impl MunicipalityCandidate {
    /// Create a candidate, clamping `score` into `[0, 100]`.
    pub fn new(
        canonical_name: impl Into<String>,
        jurisdiction_code: impl Into<String>,
        region_code: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            jurisdiction_code: jurisdiction_code.into(),
            region_code: region_code.into(),
            score: score.clamp(0.0, 100.0),
        }
    }
}
