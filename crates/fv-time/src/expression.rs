//! Resolution of textual date expressions into concrete dates.
//!
//! Official bulletins state many local holidays relative to something else:
//! "segundo viernes de septiembre", "viernes de carnaval", "viernes de la
//! semana siguiente a San Lucas". [`DateExpressionResolver`] turns such an
//! expression plus a year into a [`Date`], reporting which rule produced it.
//!
//! Expressions are folded first (lowercase, no accents, no punctuation) and
//! then matched token by token. The categories are tried in a fixed order:
//!
//! 1. fixed day of month (`"12 de octubre"`), or a saint's day
//! 2. ordinal weekday of month (`"último lunes de mayo"`)
//! 3. weekday adjacent to an ordinal weekday
//!    (`"lunes siguiente al primer domingo de mayo"`)
//! 4. movable feast, as an offset from Easter Sunday
//! 5. weekday relative to a saint's day
//!
//! A shape that matches but names an unknown month, weekday, or saint is an
//! error rather than a fall-through.

use std::collections::BTreeMap;

use fv_core::errors::{Error, Result};
use fv_core::text::fold_words;
use serde::Serialize;
use tracing::debug;

use crate::date::{check_year, days_in_month, Date};
use crate::easter::{easter_sunday, MovableFeast};
use crate::month::Month;
use crate::weekday::Weekday;

/// The rule that produced a resolved date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionCategory {
    /// A fixed day of a month.
    Fixed,
    /// The n-th (or n-th last) weekday of a month.
    OrdinalWeekday,
    /// The weekday just before or after an ordinal weekday.
    OrdinalAdjacent,
    /// A fixed offset from Easter Sunday.
    MovableFeast,
    /// The weekday just before or after a saint's day.
    SaintRelative,
}

impl std::fmt::Display for ExpressionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExpressionCategory::Fixed => "fixed",
            ExpressionCategory::OrdinalWeekday => "ordinal_weekday",
            ExpressionCategory::OrdinalAdjacent => "ordinal_adjacent",
            ExpressionCategory::MovableFeast => "movable_feast",
            ExpressionCategory::SaintRelative => "saint_relative",
        };
        write!(f, "{name}")
    }
}

/// A resolved expression: the date plus how it was computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedExpression {
    /// The concrete date.
    pub date: Date,
    /// Which rule matched.
    pub category: ExpressionCategory,
    /// Human-readable account of the computation.
    pub method: String,
}

/// Position of a weekday within its month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ordinal {
    /// n-th from the start (1-based).
    Nth(u8),
    /// n-th from the end (1 = last).
    NthLast(u8),
}

impl Ordinal {
    fn from_spanish(word: &str) -> Option<Self> {
        match word {
            "primer" | "primero" | "primera" => Some(Ordinal::Nth(1)),
            "segundo" | "segunda" => Some(Ordinal::Nth(2)),
            "tercer" | "tercero" | "tercera" => Some(Ordinal::Nth(3)),
            "cuarto" | "cuarta" => Some(Ordinal::Nth(4)),
            "quinto" | "quinta" => Some(Ordinal::Nth(5)),
            "ultimo" | "ultima" => Some(Ordinal::NthLast(1)),
            "penultimo" | "penultima" => Some(Ordinal::NthLast(2)),
            _ => None,
        }
    }

    fn select(self, weekday: Weekday, year: u16, month: Month) -> Result<Date> {
        match self {
            Ordinal::Nth(n) => Date::nth_weekday(n, weekday, year, month.number()),
            Ordinal::NthLast(n) => Date::nth_last_weekday(n, weekday, year, month.number()),
        }
    }
}

impl std::fmt::Display for Ordinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ordinal::Nth(n) => write!(f, "#{n}"),
            Ordinal::NthLast(1) => write!(f, "last"),
            Ordinal::NthLast(n) => write!(f, "#{n} from last"),
        }
    }
}

/// Direction of an adjacency modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Before,
    After,
}

impl Direction {
    fn from_spanish(word: &str) -> Option<Self> {
        match word {
            "anterior" => Some(Direction::Before),
            "siguiente" | "posterior" => Some(Direction::After),
            _ => None,
        }
    }

    /// Nearest `weekday` strictly on this side of `anchor`, which must stay
    /// within the anchor's year.
    fn step(self, anchor: Date, weekday: Weekday) -> Result<Date> {
        let date = match self {
            Direction::Before => anchor.previous_weekday(weekday)?,
            Direction::After => anchor.next_weekday(weekday)?,
        };
        if date.year() != anchor.year() {
            return Err(Error::invalid_expression(
                "",
                format!("{weekday} {self} {anchor} falls in {}", date.year()),
            ));
        }
        Ok(date)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Before => write!(f, "before"),
            Direction::After => write!(f, "after"),
        }
    }
}

/// Saints' days the resolver knows out of the box, keyed by folded name.
const SAINTS: &[(&str, Month, u8)] = &[
    ("san sebastian", Month::January, 20),
    ("san vicente", Month::January, 22),
    ("san blas", Month::February, 3),
    ("san jose", Month::March, 19),
    ("san isidro", Month::May, 15),
    ("san antonio", Month::June, 13),
    ("san juan", Month::June, 24),
    ("san pedro", Month::June, 29),
    ("san fermin", Month::July, 7),
    ("santiago", Month::July, 25),
    ("santa ana", Month::July, 26),
    ("san roque", Month::August, 16),
    ("san lucas", Month::October, 18),
    ("san martin", Month::November, 11),
    ("san andres", Month::November, 30),
    ("san francisco javier", Month::December, 3),
    ("santa lucia", Month::December, 13),
];

/// Folded phrases naming a movable feast.
const FEASTS: &[(&str, MovableFeast)] = &[
    ("jueves lardero", MovableFeast::FatThursday),
    ("viernes de carnaval", MovableFeast::CarnivalFriday),
    ("sabado de carnaval", MovableFeast::CarnivalSaturday),
    ("domingo de carnaval", MovableFeast::CarnivalSunday),
    ("lunes de carnaval", MovableFeast::CarnivalMonday),
    ("martes de carnaval", MovableFeast::CarnivalTuesday),
    ("carnaval", MovableFeast::CarnivalTuesday),
    ("miercoles de ceniza", MovableFeast::AshWednesday),
    ("jueves santo", MovableFeast::MaundyThursday),
    ("viernes santo", MovableFeast::GoodFriday),
    ("domingo de pascua", MovableFeast::EasterSunday),
    ("domingo de resurreccion", MovableFeast::EasterSunday),
    ("pascua", MovableFeast::EasterSunday),
    ("lunes de pascua", MovableFeast::EasterMonday),
    ("lunes de pascua florida", MovableFeast::EasterMonday),
    ("ascension", MovableFeast::Ascension),
    ("jueves de la ascension", MovableFeast::Ascension),
    ("pentecostes", MovableFeast::Pentecost),
    ("domingo de pentecostes", MovableFeast::Pentecost),
    ("lunes de pentecostes", MovableFeast::PentecostMonday),
    ("segundo dia de pentecostes", MovableFeast::PentecostSecondDay),
    ("martes de pentecostes", MovableFeast::PentecostSecondDay),
    ("corpus", MovableFeast::CorpusChristi),
    ("corpus christi", MovableFeast::CorpusChristi),
    ("jueves de corpus", MovableFeast::CorpusChristi),
    ("jueves de corpus christi", MovableFeast::CorpusChristi),
];

/// Words that open a saint's name.
const SAINT_PREFIXES: &[&str] = &["san", "santa", "santo", "sant"];

/// Turns `(year, expression)` into a concrete date.
///
/// Stateless apart from its saint table, which is fixed at construction.
#[derive(Debug, Clone)]
pub struct DateExpressionResolver {
    saints: BTreeMap<String, (Month, u8)>,
}

impl Default for DateExpressionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DateExpressionResolver {
    /// Create a resolver with the built-in saint table.
    pub fn new() -> Self {
        Self {
            saints: SAINTS
                .iter()
                .map(|&(name, month, day)| (name.to_string(), (month, day)))
                .collect(),
        }
    }

    /// Add (or override) a saint's day. The name is folded before storing.
    pub fn with_saint(mut self, name: &str, month: Month, day: u8) -> Self {
        self.saints.insert(fold_words(name, &[]), (month, day));
        self
    }

    /// Resolve `expression` for `year`.
    ///
    /// # Errors
    /// [`Error::InvalidDateExpression`] if no pattern matches, or a matched
    /// pattern names an unknown month, weekday, or saint, or the requested
    /// occurrence does not exist in that year.
    pub fn resolve(&self, year: u16, expression: &str) -> Result<ResolvedExpression> {
        check_year(year)?;
        let folded = fold_words(expression, &[]);
        let tokens: Vec<&str> = folded.split(' ').filter(|t| !t.is_empty()).collect();
        if tokens.is_empty() {
            return Err(Error::invalid_expression(expression, "empty expression"));
        }

        let attempts: [fn(&Self, u16, &[&str]) -> Result<Option<ResolvedExpression>>; 5] = [
            Self::fixed,
            Self::ordinal_weekday,
            Self::ordinal_adjacent,
            Self::movable_feast,
            Self::saint_relative,
        ];
        for attempt in attempts {
            let outcome = attempt(self, year, &tokens).map_err(|e| match e {
                Error::InvalidDateExpression { reason, .. } | Error::Date(reason) => {
                    Error::invalid_expression(expression, reason)
                }
                other => other,
            })?;
            if let Some(resolved) = outcome {
                debug!(
                    year,
                    expression,
                    date = %resolved.date,
                    category = %resolved.category,
                    method = %resolved.method,
                    "resolved date expression"
                );
                return Ok(resolved);
            }
        }
        Err(Error::invalid_expression(expression, "no recognized pattern"))
    }

    // ── Categories ───────────────────────────────────────────────────────────

    /// `D de <month>`, `D <month>`, or a bare saint's day.
    fn fixed(&self, year: u16, tokens: &[&str]) -> Result<Option<ResolvedExpression>> {
        let (day, month) = match tokens {
            [day, "de", month] | [day, month] if day.chars().all(|c| c.is_ascii_digit()) => {
                (*day, *month)
            }
            _ => {
                let name = strip_filler(tokens).join(" ");
                return match self.saints.get(&name) {
                    Some(&(month, day)) => Ok(Some(ResolvedExpression {
                        date: Date::new(year, month, day)?,
                        category: ExpressionCategory::Fixed,
                        method: format!("saint's day of {name}: {day} {month}"),
                    })),
                    None => Ok(None),
                };
            }
        };
        let month = Month::from_spanish(month).ok_or_else(|| unknown("month", month))?;
        let day: u8 = day
            .parse()
            .ok()
            .filter(|d| (1..=days_in_month(year, month.number())).contains(d))
            .ok_or_else(|| Error::invalid_expression("", format!("{month} has no day {day} in {year}")))?;
        Ok(Some(ResolvedExpression {
            date: Date::new(year, month, day)?,
            category: ExpressionCategory::Fixed,
            method: format!("fixed: {day} {month}"),
        }))
    }

    /// `<ordinal> <weekday> de <month>`.
    fn ordinal_weekday(&self, year: u16, tokens: &[&str]) -> Result<Option<ResolvedExpression>> {
        let [ordinal, weekday, "de", month] = tokens else {
            return Ok(None);
        };
        let Some(ordinal) = Ordinal::from_spanish(ordinal) else {
            return Ok(None);
        };
        let Some((weekday, month)) = weekday_and_month(weekday, month)? else {
            return Ok(None);
        };
        Ok(Some(ResolvedExpression {
            date: ordinal.select(weekday, year, month)?,
            category: ExpressionCategory::OrdinalWeekday,
            method: format!("ordinal: {ordinal} {weekday} of {month}"),
        }))
    }

    /// `<weekday> (anterior|siguiente) al <ordinal> <weekday> de <month>`.
    fn ordinal_adjacent(&self, year: u16, tokens: &[&str]) -> Result<Option<ResolvedExpression>> {
        let [target, direction, "al" | "a", ordinal, anchor_weekday, "de", month] = tokens else {
            return Ok(None);
        };
        let (Some(direction), Some(ordinal)) =
            (Direction::from_spanish(direction), Ordinal::from_spanish(ordinal))
        else {
            return Ok(None);
        };
        let target = Weekday::from_spanish(target).ok_or_else(|| unknown("weekday", target))?;
        let (anchor_weekday, month) = weekday_and_month(anchor_weekday, month)?
            .ok_or_else(|| unknown("weekday", anchor_weekday))?;
        let anchor = ordinal.select(anchor_weekday, year, month)?;
        Ok(Some(ResolvedExpression {
            date: direction.step(anchor, target)?,
            category: ExpressionCategory::OrdinalAdjacent,
            method: format!(
                "adjacent: {target} {direction} {ordinal} {anchor_weekday} of {month} ({anchor})"
            ),
        }))
    }

    /// A named feast at a fixed offset from Easter Sunday.
    fn movable_feast(&self, year: u16, tokens: &[&str]) -> Result<Option<ResolvedExpression>> {
        let phrase = strip_filler(tokens).join(" ");
        let Some(&(_, feast)) = FEASTS.iter().find(|(name, _)| *name == phrase) else {
            return Ok(None);
        };
        let easter = easter_sunday(year)?;
        Ok(Some(ResolvedExpression {
            date: easter.add_days(feast.offset())?,
            category: ExpressionCategory::MovableFeast,
            method: format!("movable feast: {feast} = easter ({easter}) {:+} days", feast.offset()),
        }))
    }

    /// `<weekday> de la semana siguiente a <saint>` and its variants.
    fn saint_relative(&self, year: u16, tokens: &[&str]) -> Result<Option<ResolvedExpression>> {
        let (weekday, direction, saint) = match tokens {
            [weekday, "de", "la", "semana", direction, "a" | "al", saint @ ..]
            | [weekday, "de", "la", direction, "a" | "al", saint @ ..]
            | [weekday, direction, "a" | "al", saint @ ..]
                if !saint.is_empty() =>
            {
                match Direction::from_spanish(direction) {
                    Some(d) => (*weekday, d, saint),
                    None => return Ok(None),
                }
            }
            _ => return Ok(None),
        };
        let name = saint.join(" ");
        let Some(&(month, day)) = self.saints.get(&name) else {
            if SAINT_PREFIXES.contains(&saint[0]) {
                return Err(unknown("saint", &name));
            }
            return Ok(None);
        };
        let weekday = Weekday::from_spanish(weekday).ok_or_else(|| unknown("weekday", weekday))?;
        let feast = Date::new(year, month, day)?;
        Ok(Some(ResolvedExpression {
            date: direction.step(feast, weekday)?,
            category: ExpressionCategory::SaintRelative,
            method: format!("saint relative: {weekday} {direction} {name} ({feast})"),
        }))
    }
}

/// Resolve with the built-in saint table.
///
/// ```
/// use fv_time::{resolve_expression, Date};
/// let r = resolve_expression(2026, "Segundo viernes de septiembre").unwrap();
/// assert_eq!(r.date, Date::from_ymd(2026, 9, 11).unwrap());
/// ```
pub fn resolve_expression(year: u16, expression: &str) -> Result<ResolvedExpression> {
    DateExpressionResolver::new().resolve(year, expression)
}

/// Parse a weekday/month pair. `Ok(None)` when neither word is recognized,
/// an error when exactly one is.
fn weekday_and_month(weekday: &str, month: &str) -> Result<Option<(Weekday, Month)>> {
    match (Weekday::from_spanish(weekday), Month::from_spanish(month)) {
        (Some(w), Some(m)) => Ok(Some((w, m))),
        (None, None) => Ok(None),
        (None, Some(_)) => Err(unknown("weekday", weekday)),
        (Some(_), None) => Err(unknown("month", month)),
    }
}

/// Drop a leading "festividad de la", "fiesta de", "día de", "la".
fn strip_filler<'a>(mut tokens: &'a [&'a str]) -> &'a [&'a str] {
    loop {
        tokens = match tokens {
            ["festividad" | "fiesta" | "dia", "de", rest @ ..] if !rest.is_empty() => rest,
            ["la" | "el", rest @ ..] if !rest.is_empty() => rest,
            _ => return tokens,
        };
    }
}

fn unknown(what: &str, token: &str) -> Error {
    Error::invalid_expression("", format!("unrecognized {what} {token:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn resolve(year: u16, expr: &str) -> ResolvedExpression {
        DateExpressionResolver::new().resolve(year, expr).unwrap()
    }

    #[test]
    fn reference_dates_2026() {
        assert_eq!(resolve(2026, "Segundo viernes de septiembre").date, date(2026, 9, 11));
        assert_eq!(resolve(2026, "Viernes de carnaval").date, date(2026, 2, 14));
        assert_eq!(resolve(2026, "Lunes de Pentecostés").date, date(2026, 5, 25));
        assert_eq!(
            resolve(2026, "Viernes de la semana siguiente a San Lucas").date,
            date(2026, 10, 23)
        );
    }

    #[test]
    fn categories_are_reported() {
        assert_eq!(resolve(2026, "12 de octubre").category, ExpressionCategory::Fixed);
        assert_eq!(
            resolve(2026, "Último lunes de mayo").category,
            ExpressionCategory::OrdinalWeekday
        );
        assert_eq!(
            resolve(2026, "Lunes siguiente al primer domingo de mayo").category,
            ExpressionCategory::OrdinalAdjacent
        );
        assert_eq!(resolve(2026, "Corpus Christi").category, ExpressionCategory::MovableFeast);
        assert_eq!(
            resolve(2026, "Lunes posterior a Santa Lucía").category,
            ExpressionCategory::SaintRelative
        );
    }

    #[test]
    fn fixed_dates() {
        assert_eq!(resolve(2025, "1 de enero").date, date(2025, 1, 1));
        assert_eq!(resolve(2025, "25 diciembre").date, date(2025, 12, 25));
        assert_eq!(resolve(2026, "Festividad de San José").date, date(2026, 3, 19));
        assert!(DateExpressionResolver::new().resolve(2026, "30 de febrero").is_err());
        assert!(DateExpressionResolver::new().resolve(2024, "29 de febrero").is_ok());
    }

    #[test]
    fn adjacency_never_returns_anchor() {
        // First Sunday of May 2026 is May 3.
        assert_eq!(resolve(2026, "Lunes siguiente al primer domingo de mayo").date, date(2026, 5, 4));
        assert_eq!(resolve(2026, "Domingo siguiente al primer domingo de mayo").date, date(2026, 5, 10));
        assert_eq!(resolve(2026, "Domingo anterior al primer domingo de mayo").date, date(2026, 4, 26));
        // Third Sunday of September 2026 is September 20.
        assert_eq!(
            resolve(2026, "Viernes anterior al tercer domingo de septiembre").date,
            date(2026, 9, 18)
        );
    }

    #[test]
    fn saint_relative_is_strict() {
        // San Lucas 2026 is itself a Sunday.
        assert_eq!(
            resolve(2026, "Domingo de la semana siguiente a San Lucas").date,
            date(2026, 10, 25)
        );
        assert_eq!(resolve(2026, "Viernes anterior a San Lucas").date, date(2026, 10, 16));
    }

    #[test]
    fn fifth_weekday_may_not_exist() {
        let r = DateExpressionResolver::new();
        assert_eq!(r.resolve(2026, "Quinto jueves de octubre").unwrap().date, date(2026, 10, 29));
        let err = r.resolve(2026, "Quinto lunes de febrero").unwrap_err();
        assert!(matches!(err, Error::InvalidDateExpression { .. }));
    }

    #[test]
    fn unknown_tokens_are_errors() {
        let r = DateExpressionResolver::new();
        for expr in [
            "Segundo viernes de septiembrr",
            "Segundo viernez de septiembre",
            "Viernes de la semana siguiente a San Nadie",
            "Lunez siguiente al primer domingo de mayo",
            "3 de brumario",
            "cuando toque",
            "",
        ] {
            let err = r.resolve(2026, expr).unwrap_err();
            match err {
                Error::InvalidDateExpression { expression, .. } => assert_eq!(expression, expr),
                other => panic!("unexpected error for {expr:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn custom_saints() {
        let r = DateExpressionResolver::new().with_saint("San Prudencio", Month::April, 28);
        // April 28, 2026 is a Tuesday.
        assert_eq!(r.resolve(2026, "Lunes siguiente a San Prudencio").unwrap().date, date(2026, 5, 4));
    }
}
