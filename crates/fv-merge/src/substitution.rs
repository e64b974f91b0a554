//! Substitution entries: which holiday replaces one that fell on a rest day.
//!
//! When a holiday lands on a Sunday, the bulletin for that year may move it
//! to another date. The move is recorded here as data, keyed by jurisdiction
//! and year, so the merge never has to know about particular years.

use std::collections::BTreeSet;

use fv_core::errors::{Error, Result};
use fv_time::{Date, RecordKey};
use serde::{Deserialize, Serialize};

/// One documented substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionEntry {
    /// Jurisdiction whose holiday moves.
    pub jurisdiction_code: String,
    /// Year the substitution applies to.
    pub year: u16,
    /// Date of the holiday that is dropped.
    pub original_date: Date,
    /// The record that stands in for it.
    pub replacement: RecordKey,
}

impl SubstitutionEntry {
    fn validate(&self) -> Result<()> {
        if self.original_date.year() != self.year || self.replacement.date.year() != self.year {
            return Err(Error::Config(format!(
                "substitution {} -> {} for {} lies outside {}",
                self.original_date, self.replacement, self.jurisdiction_code, self.year
            )));
        }
        if self.original_date == self.replacement.date {
            return Err(Error::Config(format!(
                "substitution for {} on {} replaces a holiday with itself",
                self.jurisdiction_code, self.original_date
            )));
        }
        Ok(())
    }
}

/// Collaborator supplying substitution entries.
pub trait SubstitutionSource {
    /// Entries for `jurisdiction_code` in `year`.
    fn substitution_entries(&self, jurisdiction_code: &str, year: u16) -> Result<Vec<SubstitutionEntry>>;
}

/// An immutable, validated list of substitution entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: Vec<SubstitutionEntry>,
}

impl SubstitutionTable {
    /// Build a table, rejecting malformed or duplicate entries.
    ///
    /// # Errors
    /// [`Error::Config`] if an entry's dates fall outside its year, an entry
    /// replaces a date with itself, or two entries move the same
    /// `(jurisdiction, date)`.
    pub fn new(entries: Vec<SubstitutionEntry>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            entry.validate()?;
            if !seen.insert((entry.jurisdiction_code.as_str(), entry.original_date)) {
                return Err(Error::Config(format!(
                    "duplicate substitution for {} on {}",
                    entry.jurisdiction_code, entry.original_date
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("substitution table: {e}")))?;
        Self::new(entries)
    }

    /// Every entry, in load order.
    pub fn entries(&self) -> &[SubstitutionEntry] {
        &self.entries
    }

    /// Return `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SubstitutionSource for SubstitutionTable {
    fn substitution_entries(&self, jurisdiction_code: &str, year: u16) -> Result<Vec<SubstitutionEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.jurisdiction_code == jurisdiction_code && e.year == year)
            .cloned()
            .collect())
    }
}
