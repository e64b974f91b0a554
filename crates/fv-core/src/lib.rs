//! # fv-core
//!
//! Core types, warnings, and error definitions for festivos.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace: the error hierarchy and its `ensure!` /
//! `ensure_post!` / `fail!` macros, the jurisdictional [`Tier`] of a holiday,
//! the transient [`MunicipalityCandidate`] produced by name matching, and the
//! structured [`Warning`] advisories attached to a resolved calendar.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Fuzzy-match candidates for a municipality name.
pub mod candidate;

/// Error types and the `ensure!` / `fail!` / `ensure_post!` macros.
pub mod errors;

/// Accent and case folding for free-text comparison.
pub mod text;

/// Jurisdictional tiers and their merge priority.
pub mod tier;

/// Non-fatal advisories attached to engine output.
pub mod warning;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use candidate::MunicipalityCandidate;
pub use errors::{Error, Result};
pub use tier::Tier;
pub use warning::{Warning, WarningKind};
