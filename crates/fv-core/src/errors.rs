//! Error types for festivos.
//!
//! Every failure the engine can surface is a variant of one `thiserror`
//! enum. Resolution-stage failures (municipality names, date expressions)
//! carry enough structure for a front end to re-prompt the caller; the
//! `ensure!`, `ensure_post!` and `fail!` macros cover argument checks and
//! internal invariants.

use thiserror::Error;

use crate::candidate::MunicipalityCandidate;
use crate::tier::Tier;

/// The top-level error type used throughout festivos.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated by the caller.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Internal invariant violated. Indicates a programming error.
    #[error("internal invariant violated: {0}")]
    Postcondition(String),

    /// Date construction or arithmetic error.
    #[error("date error: {0}")]
    Date(String),

    /// A textual date expression matched no known pattern, or used an
    /// unrecognized month, weekday, ordinal, feast, or saint.
    #[error("invalid date expression {expression:?}: {reason}")]
    InvalidDateExpression {
        /// The expression as supplied.
        expression: String,
        /// Why it was rejected.
        reason: String,
    },

    /// More than one municipality matched and the top scores were too close
    /// to pick one without asking the caller.
    #[error(
        "ambiguous municipality {query:?} in region {region}: {}",
        candidate_list(candidates)
    )]
    AmbiguousMunicipality {
        /// Region the lookup ran in.
        region: String,
        /// The name as supplied.
        query: String,
        /// Every candidate at or above the threshold, best first.
        candidates: Vec<MunicipalityCandidate>,
    },

    /// No municipality scored at or above the match threshold.
    #[error("unknown municipality {query:?} in region {region}")]
    UnknownMunicipality {
        /// Region the lookup ran in.
        region: String,
        /// The name as supplied.
        query: String,
    },

    /// The region code is not configured.
    #[error("unknown region {0:?}")]
    UnknownRegion(String),

    /// A source collaborator could not supply a tier.
    #[error("source unavailable for {tier} holidays of {jurisdiction}: {reason}")]
    SourceUnavailable {
        /// Tier that was requested.
        tier: Tier,
        /// Jurisdiction that was requested.
        jurisdiction: String,
        /// Collaborator-supplied reason.
        reason: String,
    },

    /// A holiday record handed to the engine is malformed.
    #[error("invalid holiday record: {0}")]
    InvalidRecord(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

fn candidate_list(candidates: &[MunicipalityCandidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("{} ({:.1})", c.canonical_name, c.score))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Shorthand for [`Error::InvalidDateExpression`].
    pub fn invalid_expression(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidDateExpression {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Return `true` for errors a front end can recover from by asking the
    /// caller for a better input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::AmbiguousMunicipality { .. } | Error::UnknownMunicipality { .. }
        )
    }
}

/// Shorthand `Result` type used throughout festivos.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fv_core::{ensure, errors::Error};
/// fn positive(x: i32) -> fv_core::errors::Result<i32> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(positive(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// Reserved for conditions that can only fail through a bug in the engine.
///
/// # Example
/// ```
/// use fv_core::{ensure_post, errors::Error};
/// fn double(x: i32) -> fv_core::errors::Result<i32> {
///     let result = x * 2;
///     ensure_post!(result % 2 == 0, "result must be even, got {result}");
///     Ok(result)
/// }
/// assert!(double(3).is_ok());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use fv_core::{fail, errors::Error};
/// fn always_err() -> fv_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
