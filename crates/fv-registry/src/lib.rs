//! # fv-registry
//!
//! Canonical municipality registries and the fuzzy resolver that maps a
//! free-text municipality name onto exactly one registry entry.
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`normalize`] | Name normalization (hyphen-preserving) |
//! | [`registry`] | `RegistryEntry`, `MunicipalityRegistry`, `CandidateSource` |
//! | [`resolver`] | `MatchConfig`, `MunicipalityResolver`, the disambiguation rule |

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Name normalization.
pub mod normalize;

/// Immutable per-region municipality registry.
pub mod registry;

/// Fuzzy municipality resolution.
pub mod resolver;

pub use normalize::normalize_name;
pub use registry::{CandidateSource, MunicipalityRegistry, RegistryEntry};
pub use resolver::{decide, MatchConfig, MunicipalityResolver};
