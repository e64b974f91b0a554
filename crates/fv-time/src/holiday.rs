//! `HolidayRecord` — one holiday instance as delivered by a source.

use fv_core::errors::{Error, Result};
use fv_core::Tier;
use serde::{Deserialize, Serialize};

use crate::date::Date;

/// One holiday instance for one jurisdiction and year.
///
/// Sources supply either a concrete `date` or a textual `date_expression`
/// (or both). The expression is retained after resolution for traceability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// Concrete date, absent until resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    /// Original textual date expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_expression: Option<String>,
    /// Holiday name.
    pub description: String,
    /// Jurisdictional tier.
    pub tier: Tier,
    /// Nation, region, island, or municipality code the record applies to.
    pub jurisdiction_code: String,
    /// Whether the record may be dropped when it falls on a rest day and the
    /// source designates a replacement.
    #[serde(default)]
    pub substitutable: bool,
    /// Calendar year the record applies to.
    pub source_year: u16,
}

impl HolidayRecord {
    /// Create a record with a concrete date.
    pub fn dated(
        date: Date,
        description: impl Into<String>,
        tier: Tier,
        jurisdiction_code: impl Into<String>,
    ) -> Self {
        Self {
            date: Some(date),
            date_expression: None,
            description: description.into(),
            tier,
            jurisdiction_code: jurisdiction_code.into(),
            substitutable: false,
            source_year: date.year(),
        }
    }

    /// Create a record whose date is still a textual expression.
    pub fn expressed(
        year: u16,
        expression: impl Into<String>,
        description: impl Into<String>,
        tier: Tier,
        jurisdiction_code: impl Into<String>,
    ) -> Self {
        Self {
            date: None,
            date_expression: Some(expression.into()),
            description: description.into(),
            tier,
            jurisdiction_code: jurisdiction_code.into(),
            substitutable: false,
            source_year: year,
        }
    }

    /// Mark the record as substitutable.
    pub fn substitutable(mut self) -> Self {
        self.substitutable = true;
        self
    }

    /// Return the resolved date, or an error if it is still absent.
    pub fn resolved_date(&self) -> Result<Date> {
        self.date.ok_or_else(|| {
            Error::InvalidRecord(format!(
                "{} holiday {:?} of {} has no resolved date",
                self.tier, self.description, self.jurisdiction_code
            ))
        })
    }

    /// The key other records use to point at this one.
    pub fn key(&self) -> Option<RecordKey> {
        self.date.map(|date| RecordKey {
            tier: self.tier,
            date,
        })
    }

    /// Check the record's shape.
    ///
    /// A record must carry a date or a non-empty expression, and a present
    /// date must fall within its `source_year`.
    pub fn validate(&self) -> Result<()> {
        match (self.date, self.date_expression.as_deref()) {
            (None, None) => Err(Error::InvalidRecord(format!(
                "{} holiday {:?} of {} has neither a date nor a date expression",
                self.tier, self.description, self.jurisdiction_code
            ))),
            (None, Some(expr)) if expr.trim().is_empty() => Err(Error::InvalidRecord(format!(
                "{} holiday {:?} of {} has an empty date expression",
                self.tier, self.description, self.jurisdiction_code
            ))),
            (Some(date), _) if date.year() != self.source_year => {
                Err(Error::InvalidRecord(format!(
                    "{} holiday {:?} dated {date} lies outside its source year {}",
                    self.tier, self.description, self.source_year
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Identifies a record by tier and date: the form in which a substitution
/// table names a replacement holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    /// Tier of the referenced record.
    pub tier: Tier,
    /// Date of the referenced record.
    pub date: Date,
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.tier, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn dated_record_is_valid() {
        let r = HolidayRecord::dated(date(2025, 1, 1), "Año Nuevo", Tier::National, "ES");
        assert!(r.validate().is_ok());
        assert_eq!(r.source_year, 2025);
        assert_eq!(r.key().unwrap().to_string(), "national:2025-01-01");
    }

    #[test]
    fn date_outside_source_year_is_rejected() {
        let mut r = HolidayRecord::dated(date(2025, 1, 1), "Año Nuevo", Tier::National, "ES");
        r.source_year = 2026;
        assert!(matches!(r.validate(), Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn record_needs_date_or_expression() {
        let mut r = HolidayRecord::expressed(2026, "  ", "Fiesta", Tier::Local, "31201");
        assert!(r.validate().is_err());
        r.date_expression = None;
        assert!(r.validate().is_err());
        assert!(r.resolved_date().is_err());
    }

    #[test]
    fn deserializes_from_source_json() {
        let json = r#"{
            "date_expression": "Viernes de carnaval",
            "description": "Carnaval",
            "tier": "local",
            "jurisdiction_code": "31201",
            "source_year": 2026
        }"#;
        let r: HolidayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.date, None);
        assert!(!r.substitutable);
        assert_eq!(r.tier, Tier::Local);
    }
}
