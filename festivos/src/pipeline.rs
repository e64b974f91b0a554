//! `CalendarResolutionPipeline` — from a free-text municipality name to a
//! resolved calendar.
//!
//! Each call to [`build`](CalendarResolutionPipeline::build):
//!
//! 1. resolves the municipality within its region;
//! 2. asks the registered source of every tier for raw records, in tier
//!    order (national, regional, insular, local);
//! 3. resolves the date expression of every record that has no date;
//! 4. merges the tiers with the region's rest days, substitution entries,
//!    and target count.
//!
//! A tier that cannot be fetched becomes a missing-tier warning as long as
//! another tier arrived. The pipeline holds only immutable tables, so one
//! instance can serve concurrent requests.

use std::collections::BTreeSet;
use std::sync::Arc;

use fv_core::errors::{Error, Result};
use fv_core::{Tier, Warning, WarningKind};
use fv_merge::{ConflictResolver, SubstitutionSource, SubstitutionTable};
use fv_registry::{MunicipalityRegistry, MunicipalityResolver, RegistryEntry};
use fv_time::date::check_year;
use fv_time::{DateExpressionResolver, HolidayRecord};
use tracing::{debug, info, warn};

use crate::calendar::{ResolvedCalendar, ResolvedHoliday};
use crate::config::{EngineConfig, RegionProfile};
use crate::source::SourceRegistry;

/// End-to-end holiday calendar resolution.
pub struct CalendarResolutionPipeline {
    config: EngineConfig,
    municipalities: MunicipalityResolver,
    expressions: DateExpressionResolver,
    sources: SourceRegistry,
    substitutions: Arc<dyn SubstitutionSource + Send + Sync>,
}

impl CalendarResolutionPipeline {
    /// Create a pipeline with the built-in saint table and no substitutions.
    ///
    /// # Errors
    /// [`Error::Config`] if the configuration is inconsistent or names a
    /// region the registry has no table for.
    pub fn new(config: EngineConfig, registry: MunicipalityRegistry, sources: SourceRegistry) -> Result<Self> {
        config.validate()?;
        if let Some(region) = config.regions.iter().find(|r| !registry.contains_region(&r.code)) {
            return Err(Error::Config(format!(
                "region {:?} has no municipality table",
                region.code
            )));
        }
        let municipalities = MunicipalityResolver::new(registry, config.matching)?;
        Ok(Self {
            config,
            municipalities,
            expressions: DateExpressionResolver::new(),
            sources,
            substitutions: Arc::new(SubstitutionTable::default()),
        })
    }

    /// Use `substitutions` for rest-day substitutions.
    pub fn with_substitutions(mut self, substitutions: Arc<dyn SubstitutionSource + Send + Sync>) -> Self {
        self.substitutions = substitutions;
        self
    }

    /// Use a custom date-expression resolver (e.g. with extra saints).
    pub fn with_expression_resolver(mut self, expressions: DateExpressionResolver) -> Self {
        self.expressions = expressions;
        self
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the calendar of `raw_municipality_name` in `region_code` for
    /// `year`.
    ///
    /// # Errors
    /// - [`Error::UnknownRegion`], [`Error::UnknownMunicipality`],
    ///   [`Error::AmbiguousMunicipality`] from name resolution.
    /// - [`Error::InvalidDateExpression`] if a record's expression cannot be
    ///   resolved.
    /// - [`Error::SourceUnavailable`] if no tier could be fetched.
    /// - [`Error::InvalidRecord`] if a source hands back a malformed record.
    pub fn build(&self, region_code: &str, raw_municipality_name: &str, year: u16) -> Result<ResolvedCalendar> {
        check_year(year)?;
        let profile = self.config.region(region_code)?;
        let municipality = self.municipalities.resolve_entry(region_code, raw_municipality_name)?;
        info!(
            region = region_code,
            municipality = %municipality.canonical_name,
            code = %municipality.jurisdiction_code,
            year,
            "building holiday calendar"
        );

        let mut warnings = Vec::new();
        let mut records = self.fetch_tiers(profile, municipality, year, &mut warnings)?;
        for record in &mut records {
            self.resolve_date(record)?;
        }

        let jurisdictions: BTreeSet<&str> = records.iter().map(|r| r.jurisdiction_code.as_str()).collect();
        let mut substitutions = Vec::new();
        for code in jurisdictions {
            substitutions.extend(self.substitutions.substitution_entries(code, year)?);
        }

        let outcome = ConflictResolver::new()
            .with_target_count(profile.target_count())
            .merge(year, &records, &profile.calendar(), &substitutions)?;
        warnings.extend(outcome.warnings);
        let holidays = outcome
            .records
            .into_iter()
            .map(ResolvedHoliday::try_from)
            .collect::<Result<Vec<_>>>()?;

        info!(
            region = region_code,
            municipality = %municipality.canonical_name,
            year,
            holidays = holidays.len(),
            warnings = warnings.len(),
            "built holiday calendar"
        );
        Ok(ResolvedCalendar {
            municipality: municipality.canonical_name.clone(),
            jurisdiction_code: municipality.jurisdiction_code.clone(),
            region_code: region_code.to_string(),
            year,
            holidays,
            warnings,
        })
    }

    /// Collect the raw records of every applicable tier, in tier order.
    fn fetch_tiers(
        &self,
        profile: &RegionProfile,
        municipality: &RegistryEntry,
        year: u16,
        warnings: &mut Vec<Warning>,
    ) -> Result<Vec<HolidayRecord>> {
        let mut records = Vec::new();
        let mut fetched = 0usize;
        let mut first_failure = None;

        for tier in Tier::ALL {
            let jurisdiction = match tier {
                Tier::National => profile.national_code.as_str(),
                Tier::Regional => profile.code.as_str(),
                Tier::Insular if !profile.insular => continue,
                Tier::Insular => match municipality.island_code.as_deref() {
                    Some(island) => island,
                    None => {
                        missing_tier(
                            warnings,
                            tier,
                            format!("{} has no island code", municipality.canonical_name),
                        );
                        continue;
                    }
                },
                Tier::Local => municipality.jurisdiction_code.as_str(),
            };
            let Some(source) = self.sources.source_for(tier, &profile.code) else {
                missing_tier(warnings, tier, format!("no source registered for region {}", profile.code));
                continue;
            };
            match source.fetch_raw_holidays(tier, jurisdiction, year) {
                Ok(batch) => {
                    debug!(%tier, jurisdiction, year, records = batch.len(), "fetched tier");
                    for record in &batch {
                        check_provenance(record, tier, year)?;
                    }
                    fetched += 1;
                    records.extend(batch);
                }
                Err(err @ Error::SourceUnavailable { .. }) => {
                    missing_tier(warnings, tier, err.to_string());
                    first_failure.get_or_insert(err);
                }
                Err(other) => return Err(other),
            }
        }

        if fetched == 0 {
            return Err(first_failure.unwrap_or_else(|| {
                Error::Config(format!("no holiday source registered for region {}", profile.code))
            }));
        }
        Ok(records)
    }

    /// Fill in the date of `record` from its expression if it has none.
    fn resolve_date(&self, record: &mut HolidayRecord) -> Result<()> {
        if record.date.is_some() {
            return Ok(());
        }
        record.validate()?;
        let expression = record.date_expression.as_deref().unwrap_or_default();
        let resolved = self.expressions.resolve(record.source_year, expression)?;
        record.date = Some(resolved.date);
        Ok(())
    }
}

impl std::fmt::Debug for CalendarResolutionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarResolutionPipeline")
            .field("config", &self.config)
            .field("sources", &self.sources)
            .finish_non_exhaustive()
    }
}

/// A source must answer with records of the tier and year it was asked for.
fn check_provenance(record: &HolidayRecord, tier: Tier, year: u16) -> Result<()> {
    if record.tier != tier || record.source_year != year {
        return Err(Error::InvalidRecord(format!(
            "asked for {tier} holidays of {year}, got {} {:?} of {}",
            record.tier, record.description, record.source_year
        )));
    }
    record.validate()
}

fn missing_tier(warnings: &mut Vec<Warning>, tier: Tier, reason: String) {
    let warning = Warning::new(WarningKind::MissingTier, format!("{tier}: {reason}"));
    warn!(%tier, detail = %warning.detail, "tier missing from calendar");
    warnings.push(warning);
}
