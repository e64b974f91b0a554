//! `ResolvedCalendar` — the engine's output for one municipality and year.

use std::collections::BTreeMap;

use fv_core::errors::{Error, Result};
use fv_core::{Tier, Warning};
use fv_merge::MergedRecord;
use fv_time::Date;
use serde::{Deserialize, Serialize};

/// One holiday in a resolved calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedHoliday {
    /// Calendar date.
    pub date: Date,
    /// Holiday name.
    pub description: String,
    /// Tier the holiday comes from.
    pub tier: Tier,
    /// Jurisdiction of the source record.
    pub jurisdiction_code: String,
    /// The textual expression the date was resolved from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_expression: Option<String>,
    /// `true` if this holiday stands in for one moved off a rest day.
    pub substituted: bool,
}

impl TryFrom<MergedRecord> for ResolvedHoliday {
    type Error = Error;

    fn try_from(merged: MergedRecord) -> Result<Self> {
        let record = merged.record;
        Ok(Self {
            date: record.resolved_date()?,
            description: record.description,
            tier: record.tier,
            jurisdiction_code: record.jurisdiction_code,
            date_expression: record.date_expression,
            substituted: merged.substituted,
        })
    }
}

/// The authoritative holiday calendar of a municipality for one year.
///
/// Holidays are in ascending date order and no two share a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCalendar {
    /// Canonical municipality name.
    pub municipality: String,
    /// Municipality code.
    pub jurisdiction_code: String,
    /// Region the municipality belongs to.
    pub region_code: String,
    /// Calendar year.
    pub year: u16,
    /// Holidays, date-ordered.
    pub holidays: Vec<ResolvedHoliday>,
    /// Advisories collected while building the calendar.
    pub warnings: Vec<Warning>,
}

impl ResolvedCalendar {
    /// Number of holidays.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Return `true` if there are no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Return `true` if `date` is a holiday.
    pub fn is_holiday(&self, date: Date) -> bool {
        self.holiday_on(date).is_some()
    }

    /// The holiday on `date`, if any.
    pub fn holiday_on(&self, date: Date) -> Option<&ResolvedHoliday> {
        self.holidays
            .binary_search_by_key(&date, |h| h.date)
            .ok()
            .map(|i| &self.holidays[i])
    }

    /// Number of holidays contributed by each tier.
    pub fn count_by_tier(&self) -> BTreeMap<Tier, usize> {
        let mut counts = BTreeMap::new();
        for holiday in &self.holidays {
            *counts.entry(holiday.tier).or_insert(0) += 1;
        }
        counts
    }

    /// Serialize to pretty-printed JSON with ISO-8601 dates.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Runtime(format!("serializing calendar: {e}")))
    }
}
