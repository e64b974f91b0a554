//! # fv-time
//!
//! Dates, weekdays, months, Easter computus, working-week calendars, the
//! `HolidayRecord` data type, and the resolver that turns textual date
//! expressions into concrete dates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Calendar` trait and rest-day implementations.
pub mod calendar;

/// `Date` type.
pub mod date;

/// Easter Sunday and movable feasts.
pub mod easter;

/// Textual date-expression resolution.
pub mod expression;

/// `HolidayRecord` and `RecordKey`.
pub mod holiday;

/// `Month` — month of the year.
pub mod month;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{Calendar, RestDays, SundaysOnly, WeekendsOnly};
pub use date::Date;
pub use easter::{easter_sunday, MovableFeast};
pub use expression::{
    resolve_expression, DateExpressionResolver, ExpressionCategory, ResolvedExpression,
};
pub use holiday::{HolidayRecord, RecordKey};
pub use month::Month;
pub use weekday::Weekday;
