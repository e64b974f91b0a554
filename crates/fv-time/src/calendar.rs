//! `Calendar` trait for the working week of a jurisdiction.
//!
//! A holiday flagged as substitutable only moves when it lands on a day
//! that is already non-working. Which weekdays those are is a property of
//! the jurisdiction, so the merge step asks a [`Calendar`].

use std::collections::BTreeSet;

use crate::date::Date;
use crate::weekday::Weekday;

/// The working week of a jurisdiction.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"Sundays only"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a designated non-working day.
    fn is_rest_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is an ordinary working day.
    fn is_working_day(&self, date: Date) -> bool {
        !self.is_rest_day(date)
    }
}

/// Sunday is the only non-working day. The ordinary case.
#[derive(Debug, Clone, Copy, Default)]
pub struct SundaysOnly;

impl Calendar for SundaysOnly {
    fn name(&self) -> &str {
        "Sundays only"
    }

    fn is_rest_day(&self, date: Date) -> bool {
        date.weekday() == Weekday::Sunday
    }
}

/// Saturdays and Sundays are non-working days.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends only"
    }

    fn is_rest_day(&self, date: Date) -> bool {
        date.weekday().is_weekend()
    }
}

/// A calendar whose rest weekdays come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestDays {
    name: String,
    weekdays: BTreeSet<Weekday>,
}

impl RestDays {
    /// Create a calendar resting on the given weekdays.
    pub fn new(name: impl Into<String>, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        Self {
            name: name.into(),
            weekdays: weekdays.into_iter().collect(),
        }
    }

    /// Rest weekdays, Monday first.
    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.weekdays.iter().copied()
    }
}

impl Default for RestDays {
    fn default() -> Self {
        Self::new(SundaysOnly.name(), [Weekday::Sunday])
    }
}

impl Calendar for RestDays {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_rest_day(&self, date: Date) -> bool {
        self.weekdays.contains(&date.weekday())
    }
}
