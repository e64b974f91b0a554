//! Integration tests for `DateExpressionResolver`.

use fv_core::Error;
use fv_time::{Date, DateExpressionResolver, ExpressionCategory, Month, Weekday};
use proptest::prelude::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

const ORDINALS: [&str; 4] = ["primer", "segundo", "tercer", "cuarto"];
const ANCHOR_ORDINALS: [&str; 3] = ["primer", "segundo", "último"];
const WEEKDAYS: [&str; 7] = ["lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo"];
const MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

// ─── Literal reference scenarios ──────────────────────────────────────────────

#[test]
fn navarra_2026() {
    let r = DateExpressionResolver::new();
    let cases = [
        ("Lunes siguiente al primer domingo de mayo", date(2026, 5, 4)),
        ("Tercer sábado de septiembre", date(2026, 9, 19)),
        ("Segundo viernes de septiembre", date(2026, 9, 11)),
        ("Viernes de carnaval", date(2026, 2, 14)),
        ("Sábado de carnaval", date(2026, 2, 13)),
        ("Martes de carnaval", date(2026, 2, 17)),
        ("Lunes de Pentecostés", date(2026, 5, 25)),
        ("Segundo día de Pentecostés", date(2026, 5, 26)),
        ("Festividad de la Ascensión", date(2026, 5, 14)),
        ("Viernes de la semana siguiente a San Lucas", date(2026, 10, 23)),
        ("Último viernes de septiembre", date(2026, 9, 25)),
        ("Viernes anterior al tercer domingo de septiembre", date(2026, 9, 18)),
    ];
    for (expr, expected) in cases {
        let resolved = r.resolve(2026, expr).unwrap();
        assert_eq!(resolved.date, expected, "{expr}");
        assert!(!resolved.method.is_empty());
    }
}

#[test]
fn holy_week_2025() {
    let r = DateExpressionResolver::new();
    assert_eq!(r.resolve(2025, "Jueves Santo").unwrap().date, date(2025, 4, 17));
    assert_eq!(r.resolve(2025, "Viernes Santo").unwrap().date, date(2025, 4, 18));
    assert_eq!(r.resolve(2025, "Lunes de Pascua").unwrap().date, date(2025, 4, 21));
    assert_eq!(
        r.resolve(2025, "Corpus Christi").unwrap().category,
        ExpressionCategory::MovableFeast
    );
}

#[test]
fn fourth_and_last_coincide_in_four_week_months() {
    // February 2026 has exactly four Fridays (6, 13, 20, 27).
    let r = DateExpressionResolver::new();
    let fourth = r.resolve(2026, "Cuarto viernes de febrero").unwrap().date;
    let last = r.resolve(2026, "Último viernes de febrero").unwrap().date;
    assert_eq!(fourth, date(2026, 2, 27));
    assert_eq!(fourth, last);
}

#[test]
fn unresolvable_expressions_fail() {
    let r = DateExpressionResolver::new();
    assert!(matches!(
        r.resolve(2026, "Sábado de la feria"),
        Err(Error::InvalidDateExpression { .. })
    ));
    assert!(matches!(r.resolve(2200, "1 de enero"), Err(Error::Date(_))));
}

#[test]
fn adjacency_never_leaves_the_year() {
    let r = DateExpressionResolver::new().with_saint("San Silvestre", Month::December, 31);
    // Last Saturday of December 2026 is the 26th; the next Friday is 2027-01-01.
    // First Sunday of January 2026 is the 4th; the previous Monday is 2025-12-29.
    // San Silvestre 2026 is a Thursday; the next Monday is 2027-01-04.
    for expr in [
        "Viernes siguiente al último sábado de diciembre",
        "Lunes anterior al primer domingo de enero",
        "Lunes siguiente a San Silvestre",
    ] {
        match r.resolve(2026, expr) {
            Err(Error::InvalidDateExpression { expression, .. }) => assert_eq!(expression, expr),
            other => panic!("expected an invalid expression for {expr:?}, got {other:?}"),
        }
    }
    assert_eq!(
        r.resolve(2026, "Viernes anterior al último sábado de diciembre").unwrap().date,
        date(2026, 12, 25)
    );
    assert_eq!(
        r.resolve(2026, "Lunes siguiente al primer domingo de enero").unwrap().date,
        date(2026, 1, 5)
    );
}

// ─── Properties ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn ordinal_weekday_matches_request(
        year in 1900u16..=2199,
        ordinal in 0usize..4,
        weekday in 0usize..7,
        month in 0usize..12,
    ) {
        let r = DateExpressionResolver::new();
        let expr = format!("{} {} de {}", ORDINALS[ordinal], WEEKDAYS[weekday], MONTHS[month]);
        let resolved = r.resolve(year, &expr).unwrap();
        prop_assert_eq!(resolved.category, ExpressionCategory::OrdinalWeekday);
        prop_assert_eq!(resolved.date.weekday(), Weekday::ALL[weekday]);
        prop_assert_eq!(resolved.date.month() as usize, month + 1);
        prop_assert_eq!(resolved.date.year(), year);
        let nth = (resolved.date.day_of_month() as usize - 1) / 7;
        prop_assert_eq!(nth, ordinal);
    }

    #[test]
    fn fourth_equals_last_iff_four_occurrences(
        year in 1900u16..=2199,
        weekday in 0usize..7,
        month in 0usize..12,
    ) {
        let r = DateExpressionResolver::new();
        let fourth = r.resolve(year, &format!("cuarto {} de {}", WEEKDAYS[weekday], MONTHS[month])).unwrap();
        let last = r.resolve(year, &format!("último {} de {}", WEEKDAYS[weekday], MONTHS[month])).unwrap();
        let count = Date::weekdays_in_month(Weekday::ALL[weekday], year, month as u8 + 1).unwrap().len();
        prop_assert_eq!(fourth.date == last.date, count == 4);
        prop_assert_eq!(last.date.weekday(), Weekday::ALL[weekday]);
    }

    #[test]
    fn adjacency_is_strictly_beside_anchor(
        year in 1900u16..=2199,
        target in 0usize..7,
        anchor in 0usize..7,
        ordinal in 0usize..3,
        month in 0usize..12,
        after in any::<bool>(),
    ) {
        let r = DateExpressionResolver::new();
        let anchor_expr = format!("{} {} de {}", ANCHOR_ORDINALS[ordinal], WEEKDAYS[anchor], MONTHS[month]);
        let anchor_date = r.resolve(year, &anchor_expr).unwrap().date;
        let relation = if after { "siguiente" } else { "anterior" };
        let expr = format!("{} {relation} al {anchor_expr}", WEEKDAYS[target]);
        let beside = if after {
            anchor_date.next_weekday(Weekday::ALL[target])
        } else {
            anchor_date.previous_weekday(Weekday::ALL[target])
        };
        match beside {
            Ok(expected) if expected.year() == year => {
                let resolved = r.resolve(year, &expr).unwrap();
                prop_assert_eq!(resolved.category, ExpressionCategory::OrdinalAdjacent);
                prop_assert_eq!(resolved.date, expected);
                let gap = if after { resolved.date - anchor_date } else { anchor_date - resolved.date };
                prop_assert!((1..=7).contains(&gap), "gap {} for {}", gap, expr);
            }
            _ => {
                let err = r.resolve(year, &expr).unwrap_err();
                prop_assert!(matches!(err, Error::InvalidDateExpression { .. }), "{:?}", err);
            }
        }
    }

    #[test]
    fn saint_relative_is_one_to_seven_days_after(year in 1900u16..=2199, target in 0usize..7) {
        let r = DateExpressionResolver::new();
        let expr = format!("{} de la semana siguiente a San Lucas", WEEKDAYS[target]);
        let resolved = r.resolve(year, &expr).unwrap();
        let gap = resolved.date - date(year, 10, 18);
        prop_assert!((1..=7).contains(&gap));
        prop_assert_eq!(resolved.date.weekday(), Weekday::ALL[target]);
    }

    #[test]
    fn resolution_is_deterministic(year in 1900u16..=2199) {
        let r = DateExpressionResolver::new();
        for expr in ["Viernes de carnaval", "Corpus Christi", "Último lunes de mayo"] {
            prop_assert_eq!(r.resolve(year, expr).unwrap(), r.resolve(year, expr).unwrap());
        }
    }
}
