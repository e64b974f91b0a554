//! Fuzzy resolution of free-text municipality names.
//!
//! Matching runs in three stages:
//!
//! 1. **Exact**: the normalized input equals a normalized canonical name or
//!    alias. Scores 100 and returns at once.
//! 2. **Scored**: every entry is scored with normalized Levenshtein
//!    similarity scaled to 0–100, taking the best of its names. An input of
//!    at least [`MatchConfig::containment_min_len`] characters that is a
//!    prefix of a name, or of a hyphenated part of one, scores at least
//!    [`MatchConfig::containment_score`], so `"vitoria"` reaches
//!    `"Vitoria-Gasteiz"`.
//! 3. **Decision** ([`decide`]): candidates at or above the threshold are
//!    ranked; a single one, or a clear winner by at least the
//!    disambiguation gap, is returned. Otherwise the caller gets
//!    [`Error::AmbiguousMunicipality`] with the full ranking.

use fv_core::errors::{Error, Result};
use fv_core::{fail, MunicipalityCandidate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::{is_compound_prefix, normalize_name};
use crate::registry::{IndexedEntry, MunicipalityRegistry, RegistryEntry};

/// Tunable parameters of municipality matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum score (0–100) for a candidate to be considered.
    pub threshold: f64,
    /// Minimum lead of the best candidate over the runner-up.
    pub disambiguation_gap: f64,
    /// Minimum input length, in characters, for containment matching.
    pub containment_min_len: usize,
    /// Score given to a containment match.
    pub containment_score: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 80.0,
            disambiguation_gap: 5.0,
            containment_min_len: 4,
            containment_score: 90.0,
        }
    }
}

impl MatchConfig {
    /// Check that every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(Error::Config(format!("match threshold {} outside [0, 100]", self.threshold)));
        }
        if !(0.0..=100.0).contains(&self.disambiguation_gap) {
            return Err(Error::Config(format!(
                "disambiguation gap {} outside [0, 100]",
                self.disambiguation_gap
            )));
        }
        if !(0.0..=100.0).contains(&self.containment_score) {
            return Err(Error::Config(format!(
                "containment score {} outside [0, 100]",
                self.containment_score
            )));
        }
        Ok(())
    }
}

/// Maps `(region, free-text name)` onto one registry entry.
#[derive(Debug, Clone)]
pub struct MunicipalityResolver {
    registry: MunicipalityRegistry,
    config: MatchConfig,
}

impl MunicipalityResolver {
    /// Create a resolver over `registry`.
    pub fn new(registry: MunicipalityRegistry, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// The registry this resolver matches against.
    pub fn registry(&self) -> &MunicipalityRegistry {
        &self.registry
    }

    /// Matching parameters.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Resolve `raw_name` within `region_code`.
    ///
    /// # Errors
    /// - [`Error::UnknownRegion`] if the region has no table.
    /// - [`Error::UnknownMunicipality`] if nothing reaches the threshold.
    /// - [`Error::AmbiguousMunicipality`] if the top two candidates are
    ///   closer than the disambiguation gap.
    pub fn resolve(&self, region_code: &str, raw_name: &str) -> Result<MunicipalityCandidate> {
        let candidates = self.rank(region_code, raw_name)?;
        let chosen = decide(region_code, raw_name, candidates, &self.config)?;
        debug!(
            region = region_code,
            query = raw_name,
            municipality = %chosen.canonical_name,
            code = %chosen.jurisdiction_code,
            score = chosen.score,
            "resolved municipality"
        );
        Ok(chosen)
    }

    /// Resolve and return the full registry entry.
    pub fn resolve_entry(&self, region_code: &str, raw_name: &str) -> Result<&RegistryEntry> {
        let chosen = self.resolve(region_code, raw_name)?;
        self.registry.entry(region_code, &chosen.jurisdiction_code)
    }

    /// Score `raw_name` against every entry of `region_code` and return the
    /// candidates at or above the threshold, best first.
    ///
    /// When one or more names match exactly, only those are returned.
    pub fn rank(&self, region_code: &str, raw_name: &str) -> Result<Vec<MunicipalityCandidate>> {
        let entries = self.registry.indexed(region_code)?;
        let query = normalize_name(raw_name);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let exact: Vec<_> = entries
            .iter()
            .filter(|e| e.names.iter().any(|n| *n == query))
            .map(|e| candidate(e, region_code, 100.0))
            .collect();
        if !exact.is_empty() {
            return Ok(sorted(exact));
        }

        let candidates = entries
            .iter()
            .map(|e| candidate(e, region_code, self.score(&query, e)))
            .filter(|c| c.score >= self.config.threshold)
            .collect();
        Ok(sorted(candidates))
    }

    fn score(&self, query: &str, entry: &IndexedEntry) -> f64 {
        let contained = query.chars().count() >= self.config.containment_min_len;
        entry
            .names
            .iter()
            .map(|name| {
                let similarity = strsim::normalized_levenshtein(query, name) * 100.0;
                if contained && is_compound_prefix(name, query) {
                    similarity.max(self.config.containment_score)
                } else {
                    similarity
                }
            })
            .fold(0.0, f64::max)
    }
}

/// Apply the disambiguation rule to ranked `candidates`.
///
/// `candidates` must already be filtered to the threshold; they are re-sorted
/// here (score descending, then name) so the outcome does not depend on the
/// order they arrive in.
///
/// ```
/// use fv_core::{Error, MunicipalityCandidate};
/// use fv_registry::{decide, MatchConfig};
///
/// let ranked = vec![
///     MunicipalityCandidate::new("X de A", "1", "R", 91.0),
///     MunicipalityCandidate::new("X de B", "2", "R", 88.0),
/// ];
/// let err = decide("R", "x", ranked, &MatchConfig::default()).unwrap_err();
/// assert!(matches!(err, Error::AmbiguousMunicipality { ref candidates, .. } if candidates.len() == 2));
/// ```
pub fn decide(
    region_code: &str,
    query: &str,
    candidates: Vec<MunicipalityCandidate>,
    config: &MatchConfig,
) -> Result<MunicipalityCandidate> {
    let candidates = sorted(candidates);
    let gap = match candidates.as_slice() {
        [] => {
            return Err(Error::UnknownMunicipality {
                region: region_code.to_string(),
                query: query.to_string(),
            })
        }
        [_] => None,
        [top, runner_up, ..] => Some(top.score - runner_up.score),
    };
    if let Some(gap) = gap {
        if gap < config.disambiguation_gap {
            return Err(Error::AmbiguousMunicipality {
                region: region_code.to_string(),
                query: query.to_string(),
                candidates,
            });
        }
        debug!(region = region_code, query, gap, "picked clear winner among candidates");
    }
    match candidates.into_iter().next() {
        Some(top) => Ok(top),
        None => fail!("candidate list emptied during decision"),
    }
}

fn candidate(entry: &IndexedEntry, region_code: &str, score: f64) -> MunicipalityCandidate {
    MunicipalityCandidate::new(
        entry.entry.canonical_name.as_str(),
        entry.entry.jurisdiction_code.as_str(),
        region_code,
        score,
    )
}

fn sorted(mut candidates: Vec<MunicipalityCandidate>) -> Vec<MunicipalityCandidate> {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.canonical_name.cmp(&b.canonical_name))
            .then_with(|| a.jurisdiction_code.cmp(&b.jurisdiction_code))
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn resolver() -> MunicipalityResolver {
        let registry = MunicipalityRegistry::new()
            .with_region(
                "PV",
                [
                    RegistryEntry::new("Vitoria-Gasteiz", "01059"),
                    RegistryEntry::new("Bilbao", "48020"),
                    RegistryEntry::new("Donostia/San Sebastián", "20069")
                        .with_alias("San Sebastián")
                        .with_alias("Donostia"),
                ],
            )
            .unwrap();
        MunicipalityResolver::new(registry, MatchConfig::default()).unwrap()
    }

    #[test]
    fn exact_and_alias_match() {
        let r = resolver();
        let bilbao = r.resolve("PV", "BILBAO").unwrap();
        assert_eq!(bilbao.jurisdiction_code, "48020");
        assert_abs_diff_eq!(bilbao.score, 100.0);
        assert_eq!(r.resolve("PV", "san sebastian").unwrap().jurisdiction_code, "20069");
    }

    #[test]
    fn containment_reaches_compound_name() {
        let r = resolver();
        let c = r.resolve("PV", "vitoria").unwrap();
        assert_eq!(c.canonical_name, "Vitoria-Gasteiz");
        assert_abs_diff_eq!(c.score, 90.0);
    }

    #[test]
    fn typo_still_scores_above_threshold() {
        let c = resolver().resolve("PV", "Bilbau").unwrap();
        assert_eq!(c.jurisdiction_code, "48020");
        assert!(c.score >= 80.0 && c.score < 100.0);
    }

    #[test]
    fn unknown_and_empty_names() {
        let r = resolver();
        assert!(matches!(r.resolve("PV", "Madrid"), Err(Error::UnknownMunicipality { .. })));
        assert!(matches!(r.resolve("PV", " ,. "), Err(Error::UnknownMunicipality { .. })));
        assert!(matches!(r.resolve("XX", "Bilbao"), Err(Error::UnknownRegion(_))));
    }

    #[test]
    fn short_input_does_not_use_containment() {
        let r = resolver();
        assert!(r.rank("PV", "vit").unwrap().is_empty());
    }

    #[test]
    fn clear_winner_beats_runner_up() {
        let ranked = vec![
            MunicipalityCandidate::new("X de B", "2", "R", 84.0),
            MunicipalityCandidate::new("X de A", "1", "R", 95.0),
        ];
        let chosen = decide("R", "x", ranked, &MatchConfig::default()).unwrap();
        assert_eq!(chosen.canonical_name, "X de A");
    }

    #[test]
    fn close_scores_are_ambiguous() {
        let ranked = vec![
            MunicipalityCandidate::new("X de B", "2", "R", 88.0),
            MunicipalityCandidate::new("X de A", "1", "R", 91.0),
        ];
        match decide("R", "x", ranked, &MatchConfig::default()) {
            Err(Error::AmbiguousMunicipality { candidates, .. }) => {
                let names: Vec<_> = candidates.iter().map(|c| c.canonical_name.as_str()).collect();
                assert_eq!(names, vec!["X de A", "X de B"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn config_is_validated() {
        let bad = MatchConfig {
            threshold: 120.0,
            ..MatchConfig::default()
        };
        assert!(MunicipalityResolver::new(MunicipalityRegistry::new(), bad).is_err());
        let partial: MatchConfig = serde_json::from_str(r#"{"threshold": 85.0}"#).unwrap();
        assert_abs_diff_eq!(partial.disambiguation_gap, 5.0);
    }
}
