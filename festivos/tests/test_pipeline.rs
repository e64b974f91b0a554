//! End-to-end tests for `CalendarResolutionPipeline`.

use std::sync::Arc;
use std::thread;

use festivos::core::{Error, Tier, WarningKind};
use festivos::merge::SubstitutionTable;
use festivos::registry::MunicipalityRegistry;
use festivos::time::{Date, HolidayRecord};
use festivos::{CalendarResolutionPipeline, EngineConfig, SourceRegistry, StaticSource};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

const CONFIG: &str = r#"{
    "regions": [
        {"code": "NC", "name": "Navarra", "national_code": "ES"},
        {"code": "CN", "name": "Canarias", "national_code": "ES", "insular": true}
    ]
}"#;

const REGISTRY: &str = r#"{
    "NC": [
        {"canonical_name": "Pamplona/Iruña", "jurisdiction_code": "31201", "aliases": ["Pamplona", "Iruña"]},
        {"canonical_name": "Tudela", "jurisdiction_code": "31232"}
    ],
    "CN": [
        {"canonical_name": "Santa Cruz de Tenerife", "jurisdiction_code": "38038", "island_code": "TF"},
        {"canonical_name": "Santa Cruz de La Palma", "jurisdiction_code": "38037", "island_code": "LP"},
        {"canonical_name": "San Cristóbal de La Laguna", "jurisdiction_code": "38023", "island_code": "TF"}
    ]
}"#;

const SUBSTITUTIONS: &str = r#"[
    {"jurisdiction_code": "ES", "year": 2025, "original_date": "2025-10-12",
     "replacement": {"tier": "national", "date": "2025-10-13"}}
]"#;

fn national() -> StaticSource {
    let n = |y, m, d, desc: &str| HolidayRecord::dated(date(y, m, d), desc, Tier::National, "ES");
    let e = |y, expr: &str| HolidayRecord::expressed(y, expr, expr, Tier::National, "ES");
    StaticSource::new([
        // 2026
        n(2026, 1, 1, "Año Nuevo"),
        n(2026, 1, 6, "Epifanía del Señor"),
        e(2026, "Jueves Santo"),
        e(2026, "Viernes Santo"),
        n(2026, 5, 1, "Fiesta del Trabajo"),
        n(2026, 8, 15, "Asunción de la Virgen"),
        n(2026, 10, 12, "Fiesta Nacional de España"),
        n(2026, 12, 8, "Inmaculada Concepción"),
        n(2026, 12, 25, "Natividad del Señor"),
        // 2025
        n(2025, 1, 1, "Año Nuevo"),
        n(2025, 1, 6, "Epifanía del Señor"),
        e(2025, "Jueves Santo"),
        e(2025, "Viernes Santo"),
        n(2025, 5, 1, "Fiesta del Trabajo"),
        n(2025, 8, 15, "Asunción de la Virgen"),
        n(2025, 10, 12, "Fiesta Nacional de España").substitutable(),
        n(2025, 10, 13, "Lunes siguiente a la Fiesta Nacional de España"),
        n(2025, 11, 1, "Todos los Santos"),
        n(2025, 12, 8, "Inmaculada Concepción"),
        n(2025, 12, 25, "Natividad del Señor"),
    ])
}

fn regional() -> StaticSource {
    StaticSource::new([
        HolidayRecord::dated(date(2026, 1, 1), "Año Nuevo", Tier::Regional, "NC"),
        HolidayRecord::dated(date(2026, 3, 19), "San José", Tier::Regional, "NC"),
        HolidayRecord::expressed(2026, "Lunes de Pascua", "Lunes de Pascua", Tier::Regional, "NC"),
        HolidayRecord::expressed(
            2026,
            "Festividad de San Francisco Javier",
            "San Francisco Javier",
            Tier::Regional,
            "NC",
        ),
        HolidayRecord::dated(date(2025, 5, 30), "Día de Canarias", Tier::Regional, "CN"),
    ])
}

fn insular() -> StaticSource {
    StaticSource::new([HolidayRecord::dated(
        date(2025, 2, 2),
        "Virgen de la Candelaria",
        Tier::Insular,
        "TF",
    )])
}

fn local() -> StaticSource {
    StaticSource::new([
        HolidayRecord::dated(date(2026, 7, 7), "San Fermín", Tier::Local, "31201"),
        HolidayRecord::expressed(2026, "Segundo viernes de septiembre", "Fiestas", Tier::Local, "31201"),
        HolidayRecord::expressed(2025, "Martes de carnaval", "Carnaval", Tier::Local, "38038"),
        HolidayRecord::dated(date(2025, 5, 3), "Fiesta de la Cruz", Tier::Local, "38038"),
        HolidayRecord::expressed(2026, "Sábado de la feria", "Feria", Tier::Local, "31232"),
    ])
}

fn pipeline_with(local_source: StaticSource) -> CalendarResolutionPipeline {
    let config = EngineConfig::from_json(CONFIG).unwrap();
    let registry = MunicipalityRegistry::from_json(REGISTRY).unwrap();
    let sources = SourceRegistry::new()
        .with_default(Tier::National, Arc::new(national()))
        .with_default(Tier::Regional, Arc::new(regional()))
        .with_default(Tier::Insular, Arc::new(insular()))
        .with_default(Tier::Local, Arc::new(local_source));
    CalendarResolutionPipeline::new(config, registry, sources)
        .unwrap()
        .with_substitutions(Arc::new(SubstitutionTable::from_json(SUBSTITUTIONS).unwrap()))
}

fn pipeline() -> CalendarResolutionPipeline {
    pipeline_with(local())
}

#[test]
fn pamplona_2026() {
    let cal = pipeline().build("NC", "pamplona", 2026).unwrap();
    assert_eq!(cal.municipality, "Pamplona/Iruña");
    assert_eq!(cal.jurisdiction_code, "31201");
    assert_eq!(cal.len(), 14);
    assert!(cal.warnings.is_empty(), "{:?}", cal.warnings);

    let new_year = cal.holiday_on(date(2026, 1, 1)).unwrap();
    assert_eq!(new_year.tier, Tier::Regional);
    for (m, d) in [(4, 2), (4, 3), (4, 6), (9, 11), (12, 3), (7, 7)] {
        assert!(cal.is_holiday(date(2026, m, d)), "2026-{m}-{d}");
    }
    let javier = cal.holiday_on(date(2026, 12, 3)).unwrap();
    assert_eq!(javier.date_expression.as_deref(), Some("Festividad de San Francisco Javier"));

    let counts = cal.count_by_tier();
    assert_eq!(counts[&Tier::National], 8);
    assert_eq!(counts[&Tier::Regional], 4);
    assert_eq!(counts[&Tier::Local], 2);
}

#[test]
fn santa_cruz_de_tenerife_2025_with_substitution() {
    let cal = pipeline().build("CN", "Santa Cruz de Tenerife", 2025).unwrap();
    assert!(!cal.is_holiday(date(2025, 10, 12)));
    let monday = cal.holiday_on(date(2025, 10, 13)).unwrap();
    assert!(monday.substituted);
    assert_eq!(monday.tier, Tier::National);
    assert_eq!(cal.holiday_on(date(2025, 2, 2)).unwrap().tier, Tier::Insular);
    assert!(cal.is_holiday(date(2025, 3, 4)));
    assert_eq!(cal.len(), 14);
    assert!(cal.warnings.is_empty(), "{:?}", cal.warnings);
}

#[test]
fn missing_local_tier_is_a_warning() {
    let cal = pipeline_with(StaticSource::default()).build("NC", "Pamplona", 2026).unwrap();
    let kinds: Vec<_> = cal.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(kinds, vec![WarningKind::MissingTier, WarningKind::CountInvariant]);
    assert_eq!(cal.len(), 12);
    assert!(cal.holidays.iter().all(|h| h.tier != Tier::Local));
}

#[test]
fn every_tier_failing_is_an_error() {
    let err = pipeline().build("NC", "Pamplona", 2027).unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable { tier: Tier::National, .. }));
}

#[test]
fn ambiguous_name_never_yields_a_calendar() {
    match pipeline().build("CN", "santa cruz", 2025) {
        Err(Error::AmbiguousMunicipality { candidates, .. }) => assert_eq!(candidates.len(), 2),
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

#[test]
fn unresolvable_expression_halts_request() {
    let err = pipeline().build("NC", "Tudela", 2026).unwrap_err();
    assert!(matches!(err, Error::InvalidDateExpression { ref expression, .. } if expression == "Sábado de la feria"));
}

#[test]
fn unknown_region_and_year() {
    assert!(matches!(pipeline().build("XX", "Pamplona", 2026), Err(Error::UnknownRegion(_))));
    assert!(matches!(pipeline().build("NC", "Pamplona", 2300), Err(Error::Date(_))));
}

#[test]
fn region_without_table_is_rejected() {
    let config = EngineConfig::from_json(CONFIG).unwrap();
    let registry = MunicipalityRegistry::new();
    assert!(matches!(
        CalendarResolutionPipeline::new(config, registry, SourceRegistry::new()),
        Err(Error::Config(_))
    ));
}

#[test]
fn builds_are_identical_across_threads() {
    let pipeline = Arc::new(pipeline());
    let reference = pipeline.build("NC", "Iruña", 2026).unwrap().to_json().unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || pipeline.build("NC", "Iruña", 2026).unwrap().to_json().unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), reference);
    }
}
