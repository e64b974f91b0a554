//! Per-region canonical municipality tables.
//!
//! A [`MunicipalityRegistry`] is built once, either from JSON configuration
//! or from a [`CandidateSource`] collaborator, and never mutated afterwards.
//! Normalized forms of every name and alias are computed at construction so
//! that resolution does no repeated folding.

use std::collections::{BTreeMap, BTreeSet};

use fv_core::errors::{Error, Result};
use fv_core::{ensure, fail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::normalize_name;

/// One municipality as listed in the canonical registry of its region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Official name.
    pub canonical_name: String,
    /// Municipality code.
    pub jurisdiction_code: String,
    /// Island or territory code, for regions with an insular tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub island_code: Option<String>,
    /// Alternative names (co-official spellings, historical names).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl RegistryEntry {
    /// Create an entry with no island code and no aliases.
    pub fn new(canonical_name: impl Into<String>, jurisdiction_code: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            jurisdiction_code: jurisdiction_code.into(),
            island_code: None,
            aliases: Vec::new(),
        }
    }

    /// Set the island code.
    pub fn with_island(mut self, island_code: impl Into<String>) -> Self {
        self.island_code = Some(island_code.into());
        self
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

/// Collaborator that supplies the canonical registry of a region.
pub trait CandidateSource {
    /// List every municipality of `region_code`.
    fn list_candidates(&self, region_code: &str) -> Result<Vec<RegistryEntry>>;
}

/// An entry with its normalized names precomputed.
#[derive(Debug, Clone)]
pub(crate) struct IndexedEntry {
    pub(crate) entry: RegistryEntry,
    /// Normalized canonical name first, then normalized aliases.
    pub(crate) names: Vec<String>,
}

impl IndexedEntry {
    fn new(entry: RegistryEntry) -> Self {
        let names = std::iter::once(&entry.canonical_name)
            .chain(&entry.aliases)
            .map(|n| normalize_name(n))
            .filter(|n| !n.is_empty())
            .collect();
        Self { entry, names }
    }
}

/// Immutable canonical municipality tables, keyed by region code.
#[derive(Debug, Clone, Default)]
pub struct MunicipalityRegistry {
    regions: BTreeMap<String, Vec<IndexedEntry>>,
}

impl MunicipalityRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the table of one region.
    ///
    /// # Errors
    /// [`Error::Config`] if the region is already present, an entry has an
    /// empty name or code, or two entries share a jurisdiction code.
    pub fn with_region(
        mut self,
        region_code: impl Into<String>,
        entries: impl IntoIterator<Item = RegistryEntry>,
    ) -> Result<Self> {
        let region_code = region_code.into();
        if self.regions.contains_key(&region_code) {
            return Err(Error::Config(format!("region {region_code:?} registered twice")));
        }
        let mut seen = BTreeSet::new();
        let mut indexed = Vec::new();
        for entry in entries {
            if entry.jurisdiction_code.trim().is_empty() || normalize_name(&entry.canonical_name).is_empty() {
                return Err(Error::Config(format!(
                    "region {region_code:?}: entry {:?} needs a name and a jurisdiction code",
                    entry.canonical_name
                )));
            }
            if !seen.insert(entry.jurisdiction_code.clone()) {
                return Err(Error::Config(format!(
                    "region {region_code:?}: duplicate jurisdiction code {:?}",
                    entry.jurisdiction_code
                )));
            }
            indexed.push(IndexedEntry::new(entry));
        }
        debug!(region = %region_code, entries = indexed.len(), "registered municipality table");
        self.regions.insert(region_code, indexed);
        Ok(self)
    }

    /// Parse a registry from JSON of the form
    /// `{"<region>": [{"canonical_name": ..., "jurisdiction_code": ...}, ...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: BTreeMap<String, Vec<RegistryEntry>> =
            serde_json::from_str(json).map_err(|e| Error::Config(format!("municipality registry: {e}")))?;
        tables
            .into_iter()
            .try_fold(Self::new(), |registry, (region, entries)| registry.with_region(region, entries))
    }

    /// Load the tables of `regions` from a collaborator, once.
    pub fn load<S: CandidateSource + ?Sized>(source: &S, regions: &[&str]) -> Result<Self> {
        ensure!(!regions.is_empty(), "at least one region must be loaded");
        regions.iter().try_fold(Self::new(), |registry, region| {
            let entries = source.list_candidates(region)?;
            registry.with_region(*region, entries)
        })
    }

    /// Return `true` if `region_code` has a table.
    pub fn contains_region(&self, region_code: &str) -> bool {
        self.regions.contains_key(region_code)
    }

    /// Configured region codes, sorted.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Entries of `region_code` in registration order.
    pub fn entries(&self, region_code: &str) -> Result<impl Iterator<Item = &RegistryEntry>> {
        Ok(self.indexed(region_code)?.iter().map(|e| &e.entry))
    }

    /// Look up an entry by jurisdiction code.
    pub fn entry(&self, region_code: &str, jurisdiction_code: &str) -> Result<&RegistryEntry> {
        match self
            .indexed(region_code)?
            .iter()
            .find(|e| e.entry.jurisdiction_code == jurisdiction_code)
        {
            Some(e) => Ok(&e.entry),
            None => fail!("no municipality {jurisdiction_code:?} in region {region_code:?}"),
        }
    }

    pub(crate) fn indexed(&self, region_code: &str) -> Result<&[IndexedEntry]> {
        self.regions
            .get(region_code)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownRegion(region_code.to_string()))
    }
}
