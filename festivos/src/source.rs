//! Holiday source collaborators.
//!
//! Retrieval of bulletins lives outside the engine. A [`HolidaySource`]
//! answers `(tier, jurisdiction, year)` with raw records; the
//! [`SourceRegistry`] is the static table that says which source answers
//! for which tier of which region.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use fv_core::errors::{Error, Result};
use fv_core::Tier;
use fv_time::HolidayRecord;

/// Supplies the raw holiday records of one tier.
pub trait HolidaySource: Send + Sync {
    /// Fetch the records of `tier` for `jurisdiction_code` in `year`.
    ///
    /// # Errors
    /// [`Error::SourceUnavailable`] when the source cannot answer.
    fn fetch_raw_holidays(&self, tier: Tier, jurisdiction_code: &str, year: u16) -> Result<Vec<HolidayRecord>>;
}

/// An in-memory source over records already at hand.
///
/// Answers with every record matching the requested tier, jurisdiction,
/// and year, and reports [`Error::SourceUnavailable`] when there are none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource {
    records: Vec<HolidayRecord>,
}

impl StaticSource {
    /// Create a source over `records`.
    pub fn new(records: impl IntoIterator<Item = HolidayRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<HolidayRecord> =
            serde_json::from_str(json).map_err(|e| Error::Config(format!("holiday records: {e}")))?;
        Ok(Self::new(records))
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return `true` if no records are held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HolidaySource for StaticSource {
    fn fetch_raw_holidays(&self, tier: Tier, jurisdiction_code: &str, year: u16) -> Result<Vec<HolidayRecord>> {
        let found: Vec<_> = self
            .records
            .iter()
            .filter(|r| r.tier == tier && r.jurisdiction_code == jurisdiction_code && r.source_year == year)
            .cloned()
            .collect();
        if found.is_empty() {
            return Err(Error::SourceUnavailable {
                tier,
                jurisdiction: jurisdiction_code.to_string(),
                reason: format!("no {tier} records for {year}"),
            });
        }
        Ok(found)
    }
}

/// Static table from `(tier, region)` to the source that answers for it.
///
/// A source registered for a specific region wins over the tier default.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    defaults: BTreeMap<Tier, Arc<dyn HolidaySource>>,
    overrides: BTreeMap<(Tier, String), Arc<dyn HolidaySource>>,
}

impl SourceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the source answering `tier` for every region without an
    /// override.
    pub fn with_default(mut self, tier: Tier, source: Arc<dyn HolidaySource>) -> Self {
        self.defaults.insert(tier, source);
        self
    }

    /// Register the source answering `tier` for `region_code`.
    pub fn with_source(mut self, tier: Tier, region_code: impl Into<String>, source: Arc<dyn HolidaySource>) -> Self {
        self.overrides.insert((tier, region_code.into()), source);
        self
    }

    /// The source answering `tier` for `region_code`, if any.
    pub fn source_for(&self, tier: Tier, region_code: &str) -> Option<&Arc<dyn HolidaySource>> {
        self.overrides
            .get(&(tier, region_code.to_string()))
            .or_else(|| self.defaults.get(&tier))
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("defaults", &self.defaults.keys().collect::<Vec<_>>())
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}
