//! Jurisdictional tier of a holiday record.

use serde::{Deserialize, Serialize};

/// The jurisdictional scope a holiday record applies to.
///
/// `Insular` is the island/territory sub-tier used only by regions that
/// subdivide their autonomy that way. It shares merge priority with
/// `Regional`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Nation-wide holiday.
    National,
    /// Holiday of an autonomous region.
    Regional,
    /// Holiday of an island or territory within a region.
    Insular,
    /// Holiday of a single municipality.
    Local,
}

impl Tier {
    /// All tiers, in the order sources are consulted and records merged.
    pub const ALL: [Tier; 4] = [Tier::National, Tier::Regional, Tier::Insular, Tier::Local];

    /// Merge priority: `local > regional = insular > national`.
    pub fn priority(&self) -> u8 {
        match self {
            Tier::National => 1,
            Tier::Regional | Tier::Insular => 2,
            Tier::Local => 3,
        }
    }

    /// Return the lowercase tier name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::National => "national",
            Tier::Regional => "regional",
            Tier::Insular => "insular",
            Tier::Local => "local",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = crate::errors::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "national" | "nacional" => Ok(Tier::National),
            "regional" | "autonomico" => Ok(Tier::Regional),
            "insular" => Ok(Tier::Insular),
            "local" => Ok(Tier::Local),
            other => Err(crate::errors::Error::InvalidRecord(format!(
                "unknown tier {other:?}"
            ))),
        }
    }
}
