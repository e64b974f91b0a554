//! Engine and region configuration.
//!
//! Configuration is plain data, deserialized once from JSON and handed to
//! [`CalendarResolutionPipeline`](crate::CalendarResolutionPipeline). Nothing
//! here is global.

use std::collections::BTreeSet;

use fv_core::errors::{Error, Result};
use fv_registry::MatchConfig;
use fv_time::{RestDays, Weekday};
use serde::{Deserialize, Serialize};

/// Per-region settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    /// Region code (e.g. `"CN"`).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Code of the nation the region belongs to, used for the national tier.
    pub national_code: String,
    /// Whether the region has an insular tier.
    #[serde(default)]
    pub insular: bool,
    /// Holidays expected from the national, regional, and insular tiers.
    #[serde(default = "default_statutory_count")]
    pub statutory_count: usize,
    /// Holidays expected from the local tier.
    #[serde(default = "default_local_count")]
    pub local_count: usize,
    /// Non-working weekdays.
    #[serde(default = "default_rest_days")]
    pub rest_days: Vec<Weekday>,
}

fn default_statutory_count() -> usize {
    12
}

fn default_local_count() -> usize {
    2
}

fn default_rest_days() -> Vec<Weekday> {
    vec![Weekday::Sunday]
}

impl RegionProfile {
    /// A profile with the common counts (12 + 2) and Sunday as rest day.
    pub fn new(code: impl Into<String>, name: impl Into<String>, national_code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            national_code: national_code.into(),
            insular: false,
            statutory_count: default_statutory_count(),
            local_count: default_local_count(),
            rest_days: default_rest_days(),
        }
    }

    /// Enable the insular tier.
    pub fn with_insular_tier(mut self) -> Self {
        self.insular = true;
        self
    }

    /// Override the number of local holidays.
    pub fn with_local_count(mut self, count: usize) -> Self {
        self.local_count = count;
        self
    }

    /// Expected size of a merged calendar.
    pub fn target_count(&self) -> usize {
        self.statutory_count + self.local_count
    }

    /// Rest-day calendar of the region.
    pub fn calendar(&self) -> RestDays {
        RestDays::new(format!("{} rest days", self.name), self.rest_days.iter().copied())
    }
}

/// Everything the engine needs besides its data tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Municipality matching parameters.
    #[serde(default)]
    pub matching: MatchConfig,
    /// Configured regions.
    pub regions: Vec<RegionProfile>,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// ```
    /// use festivos::EngineConfig;
    /// let config = EngineConfig::from_json(
    ///     r#"{"regions": [{"code": "NC", "name": "Navarra", "national_code": "ES"}]}"#,
    /// ).unwrap();
    /// assert_eq!(config.region("NC").unwrap().target_count(), 14);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(format!("engine configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Add a region.
    pub fn with_region(mut self, region: RegionProfile) -> Self {
        self.regions.push(region);
        self
    }

    /// Check region codes are unique and every region has a rest day.
    pub fn validate(&self) -> Result<()> {
        self.matching.validate()?;
        let mut seen = BTreeSet::new();
        for region in &self.regions {
            if region.code.is_empty() || region.national_code.is_empty() {
                return Err(Error::Config(format!("region {:?} needs a code and a national code", region.name)));
            }
            if !seen.insert(region.code.as_str()) {
                return Err(Error::Config(format!("region {:?} configured twice", region.code)));
            }
            if region.rest_days.is_empty() {
                return Err(Error::Config(format!("region {:?} has no rest days", region.code)));
            }
        }
        Ok(())
    }

    /// Look up a region profile.
    pub fn region(&self, code: &str) -> Result<&RegionProfile> {
        self.regions
            .iter()
            .find(|r| r.code == code)
            .ok_or_else(|| Error::UnknownRegion(code.to_string()))
    }
}
