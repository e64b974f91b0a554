//! Tier-priority merge of holiday records.
//!
//! The merge proceeds in four passes over records that already carry a
//! concrete date:
//!
//! 1. **Validate**: every record must be resolved and belong to the year.
//! 2. **Collide**: records are grouped by date. The highest-priority tier
//!    wins (`local > regional = insular > national`). Among records of equal
//!    priority the first in input order wins; a differing description is
//!    reported as a conflicting-description warning.
//! 3. **Substitute**: a substitutable winner on a rest day is dropped when
//!    the substitution table names a replacement of the same tier *and* that
//!    replacement is present in the input. A documented replacement missing
//!    from the input leaves the original in place with a warning.
//! 4. **Check**: the final count is compared with the target.

use std::collections::BTreeMap;

use fv_core::errors::{Error, Result};
use fv_core::text::fold_words;
use fv_core::{ensure_post, Warning, WarningKind};
use fv_time::{Calendar, Date, HolidayRecord, RecordKey};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::substitution::SubstitutionEntry;

/// A record in the merged output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedRecord {
    /// The surviving record.
    pub record: HolidayRecord,
    /// `true` if this record stands in for a holiday removed by
    /// substitution.
    pub substituted: bool,
}

impl MergedRecord {
    /// Date of the record. Always present after a merge.
    pub fn date(&self) -> Date {
        self.record.date.unwrap_or(Date::NULL)
    }
}

/// Result of [`ConflictResolver::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Surviving records in ascending date order, no two on the same date.
    pub records: Vec<MergedRecord>,
    /// Non-fatal anomalies found along the way.
    pub warnings: Vec<Warning>,
}

/// Merges the records of every tier for one jurisdiction and year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictResolver {
    target_count: Option<usize>,
}

impl ConflictResolver {
    /// A resolver that performs no count check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn when the merged calendar does not hold exactly `count` holidays.
    pub fn with_target_count(mut self, count: usize) -> Self {
        self.target_count = Some(count);
        self
    }

    /// The configured target count, if any.
    pub fn target_count(&self) -> Option<usize> {
        self.target_count
    }

    /// Merge `records` for `year`.
    ///
    /// `records` are expected in tier order (national first); that order
    /// decides which of two equal-priority records survives. `calendar`
    /// designates rest days; `substitutions` lists the documented
    /// substitutions of every jurisdiction present in `records`.
    ///
    /// # Errors
    /// [`Error::InvalidRecord`] for an unresolved record or one outside
    /// `year`; [`Error::Postcondition`] if the output would hold two
    /// records on one date.
    pub fn merge(
        &self,
        year: u16,
        records: &[HolidayRecord],
        calendar: &dyn Calendar,
        substitutions: &[SubstitutionEntry],
    ) -> Result<MergeOutcome> {
        let mut warnings = Vec::new();
        let mut by_date: BTreeMap<Date, &HolidayRecord> = BTreeMap::new();

        for record in records {
            let date = check_record(year, record)?;
            let Some(kept) = by_date.get(&date).copied() else {
                by_date.insert(date, record);
                continue;
            };
            if record.tier.priority() > kept.tier.priority() {
                debug!(%date, kept = %kept.tier, dropped = %record.tier, "replacing lower-priority holiday");
                by_date.insert(date, record);
            } else if record.tier.priority() < kept.tier.priority() {
                debug!(%date, kept = %kept.tier, dropped = %record.tier, "dropping lower-priority holiday");
            } else if fold_words(&record.description, &[]) != fold_words(&kept.description, &[]) {
                let warning = Warning::new(
                    WarningKind::ConflictingDescription,
                    format!(
                        "{date}: kept {} {:?}, dropped {} {:?}",
                        kept.tier, kept.description, record.tier, record.description
                    ),
                );
                warn!(%date, detail = %warning.detail, "conflicting holiday descriptions");
                warnings.push(warning);
            }
        }

        let mut dropped = Vec::new();
        let mut stand_ins = Vec::new();
        for (&date, record) in &by_date {
            if !record.substitutable || !calendar.is_rest_day(date) {
                continue;
            }
            let Some(entry) = substitutions.iter().find(|e| {
                e.jurisdiction_code == record.jurisdiction_code
                    && e.year == year
                    && e.original_date == date
                    && e.replacement.tier == record.tier
            }) else {
                continue;
            };
            if present(records, entry.replacement) {
                info!(
                    %date,
                    replacement = %entry.replacement,
                    jurisdiction = %record.jurisdiction_code,
                    "substituting holiday on rest day"
                );
                dropped.push(date);
                stand_ins.push(entry.replacement);
            } else {
                let warning = Warning::new(
                    WarningKind::MissingReplacement,
                    format!(
                        "{date} {:?} is documented as replaced by {} which no {} source supplied",
                        record.description, entry.replacement, record.tier
                    ),
                );
                warn!(%date, detail = %warning.detail, "substitution replacement missing");
                warnings.push(warning);
            }
        }
        for date in &dropped {
            by_date.remove(date);
        }

        let merged: Vec<MergedRecord> = by_date
            .into_iter()
            .map(|(_, record)| MergedRecord {
                record: record.clone(),
                substituted: record.key().is_some_and(|k| stand_ins.contains(&k)),
            })
            .collect();

        ensure_post!(
            merged.windows(2).all(|w| w[0].date() < w[1].date()),
            "merged holidays of {year} are not strictly date-ordered"
        );

        if let Some(expected) = self.target_count {
            if merged.len() != expected {
                let warning = Warning::count_invariant(expected, merged.len());
                warn!(year, expected, actual = merged.len(), "holiday count mismatch");
                warnings.push(warning);
            }
        }

        Ok(MergeOutcome {
            records: merged,
            warnings,
        })
    }
}

/// Check that `record` is resolved, well-formed, and belongs to `year`.
fn check_record(year: u16, record: &HolidayRecord) -> Result<Date> {
    record.validate()?;
    let date = record.resolved_date()?;
    if record.source_year != year {
        return Err(Error::InvalidRecord(format!(
            "{} holiday {:?} belongs to {}, not {year}",
            record.tier, record.description, record.source_year
        )));
    }
    Ok(date)
}

fn present(records: &[HolidayRecord], key: RecordKey) -> bool {
    records.iter().any(|r| r.key() == Some(key))
}
