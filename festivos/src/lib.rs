//! # festivos
//!
//! Resolution engine for the annual public-holiday calendar of a
//! municipality.
//!
//! Raw holiday facts arrive from independent sources, one per tier
//! (national, regional, insular, local). The engine resolves a free-text
//! municipality name to one jurisdiction, turns textual date expressions
//! into dates, and merges the tiers into one deduplicated calendar.
//!
//! This crate is a **façade** over the workspace crates and adds the
//! orchestration layer on top. Application code should depend on this
//! crate rather than the individual `fv-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use festivos::time::{resolve_expression, Date};
//!
//! let r = resolve_expression(2026, "Lunes de Pentecostés").unwrap();
//! assert_eq!(r.date, Date::from_ymd(2026, 5, 25).unwrap());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types, tiers, candidates, and warnings.
pub use fv_core as core;

/// Dates, Easter computus, rest-day calendars, and date expressions.
pub use fv_time as time;

/// Municipality registry and fuzzy name resolution.
pub use fv_registry as registry;

/// Tier-priority merge and substitution tables.
pub use fv_merge as merge;

/// The resolved calendar handed back to callers.
pub mod calendar;

/// Engine and region configuration.
pub mod config;

/// End-to-end calendar resolution.
pub mod pipeline;

/// Holiday source collaborators.
pub mod source;

pub use calendar::{ResolvedCalendar, ResolvedHoliday};
pub use config::{EngineConfig, RegionProfile};
pub use pipeline::CalendarResolutionPipeline;
pub use source::{HolidaySource, SourceRegistry, StaticSource};
