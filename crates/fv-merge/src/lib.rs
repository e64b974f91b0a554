//! # fv-merge
//!
//! Merging of multi-tier holiday records into one calendar.
//!
//! [`ConflictResolver`] takes the date-resolved records of every tier for
//! one municipality and year and produces a deduplicated, date-ordered set:
//! higher tiers win date collisions, documented substitutions of holidays
//! falling on rest days are applied, and the final count is checked against
//! the region's target. Anomalies come back as [`Warning`](fv_core::Warning)s.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Tier-priority merge.
pub mod conflict;

/// Data-driven substitution table.
pub mod substitution;

pub use conflict::{ConflictResolver, MergeOutcome, MergedRecord};
pub use substitution::{SubstitutionEntry, SubstitutionSource, SubstitutionTable};
