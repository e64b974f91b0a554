//! Easter Sunday computus and the movable feasts anchored on it.

use fv_core::errors::Result;

use crate::date::{check_year, Date};

/// Compute Easter Sunday in the Gregorian calendar.
///
/// Uses Oudin's algorithm (1940), valid for every year the [`Date`] type
/// supports (1900–2199).
///
/// ```
/// use fv_time::{easter_sunday, Date};
/// assert_eq!(easter_sunday(2026).unwrap(), Date::from_ymd(2026, 4, 5).unwrap());
/// ```
pub fn easter_sunday(year: u16) -> Result<Date> {
    check_year(year)?;
    let y = year as i32;
    let g = y % 19;
    let c = y / 100;
    let h = (c - c / 4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
    let i = h - (h / 28) * (1 - (h / 28) * (29 / (h + 1)) * ((21 - g) / 11));
    let j = (y + y / 4 + i + 2 - c + c / 4) % 7;
    let p = i - j;
    let day = 1 + (p + 27 + (p + 6) / 40) % 31;
    let month = 3 + (p + 26) / 30;
    Date::from_ymd(year, month as u8, day as u8)
}

/// A feast whose date is a fixed number of days away from Easter Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovableFeast {
    /// Jueves lardero (Easter − 52).
    FatThursday,
    /// Sábado de carnaval (Easter − 51).
    CarnivalSaturday,
    /// Viernes de carnaval (Easter − 50).
    CarnivalFriday,
    /// Domingo de carnaval (Easter − 49).
    CarnivalSunday,
    /// Lunes de carnaval (Easter − 48).
    CarnivalMonday,
    /// Martes de carnaval (Easter − 47).
    CarnivalTuesday,
    /// Miércoles de ceniza (Easter − 46).
    AshWednesday,
    /// Jueves Santo (Easter − 3).
    MaundyThursday,
    /// Viernes Santo (Easter − 2).
    GoodFriday,
    /// Domingo de Pascua.
    EasterSunday,
    /// Lunes de Pascua (Easter + 1).
    EasterMonday,
    /// Ascensión (Easter + 39).
    Ascension,
    /// Domingo de Pentecostés (Easter + 49).
    Pentecost,
    /// Lunes de Pentecostés (Easter + 50).
    PentecostMonday,
    /// Segundo día de Pentecostés (Easter + 51).
    PentecostSecondDay,
    /// Corpus Christi (Easter + 60).
    CorpusChristi,
}

impl MovableFeast {
    /// Signed day offset from Easter Sunday.
    ///
    /// The carnival Friday and Saturday offsets follow regional usage,
    /// counted back from Ash Wednesday.
    pub fn offset(&self) -> i32 {
        match self {
            MovableFeast::FatThursday => -52,
            MovableFeast::CarnivalSaturday => -51,
            MovableFeast::CarnivalFriday => -50,
            MovableFeast::CarnivalSunday => -49,
            MovableFeast::CarnivalMonday => -48,
            MovableFeast::CarnivalTuesday => -47,
            MovableFeast::AshWednesday => -46,
            MovableFeast::MaundyThursday => -3,
            MovableFeast::GoodFriday => -2,
            MovableFeast::EasterSunday => 0,
            MovableFeast::EasterMonday => 1,
            MovableFeast::Ascension => 39,
            MovableFeast::Pentecost => 49,
            MovableFeast::PentecostMonday => 50,
            MovableFeast::PentecostSecondDay => 51,
            MovableFeast::CorpusChristi => 60,
        }
    }

    /// Resolve the feast for `year`.
    pub fn date(&self, year: u16) -> Result<Date> {
        easter_sunday(year)?.add_days(self.offset())
    }
}

impl std::fmt::Display for MovableFeast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MovableFeast::FatThursday => "jueves lardero",
            MovableFeast::CarnivalSaturday => "sabado de carnaval",
            MovableFeast::CarnivalFriday => "viernes de carnaval",
            MovableFeast::CarnivalSunday => "domingo de carnaval",
            MovableFeast::CarnivalMonday => "lunes de carnaval",
            MovableFeast::CarnivalTuesday => "martes de carnaval",
            MovableFeast::AshWednesday => "miercoles de ceniza",
            MovableFeast::MaundyThursday => "jueves santo",
            MovableFeast::GoodFriday => "viernes santo",
            MovableFeast::EasterSunday => "domingo de pascua",
            MovableFeast::EasterMonday => "lunes de pascua",
            MovableFeast::Ascension => "ascension",
            MovableFeast::Pentecost => "pentecostes",
            MovableFeast::PentecostMonday => "lunes de pentecostes",
            MovableFeast::PentecostSecondDay => "segundo dia de pentecostes",
            MovableFeast::CorpusChristi => "corpus christi",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekday::Weekday;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn known_easter_sundays() {
        let known = [
            (1900, 4, 15),
            (1913, 3, 23),
            (1943, 4, 25),
            (1954, 4, 18),
            (2000, 4, 23),
            (2008, 3, 23),
            (2011, 4, 24),
            (2019, 4, 21),
            (2024, 3, 31),
            (2025, 4, 20),
            (2026, 4, 5),
            (2027, 3, 28),
            (2038, 4, 25),
            (2100, 3, 28),
            (2160, 3, 23),
            (2199, 4, 14),
        ];
        for (y, m, d) in known {
            assert_eq!(easter_sunday(y).unwrap(), date(y, m, d), "Easter {y}");
        }
    }

    #[test]
    fn out_of_range_year() {
        assert!(easter_sunday(1899).is_err());
        assert!(easter_sunday(2200).is_err());
    }

    #[test]
    fn feasts_2026() {
        assert_eq!(MovableFeast::CarnivalSaturday.date(2026).unwrap(), date(2026, 2, 13));
        assert_eq!(MovableFeast::CarnivalFriday.date(2026).unwrap(), date(2026, 2, 14));
        assert_eq!(MovableFeast::CarnivalTuesday.date(2026).unwrap(), date(2026, 2, 17));
        assert_eq!(MovableFeast::AshWednesday.date(2026).unwrap(), date(2026, 2, 18));
        assert_eq!(MovableFeast::GoodFriday.date(2026).unwrap(), date(2026, 4, 3));
        assert_eq!(MovableFeast::Ascension.date(2026).unwrap(), date(2026, 5, 14));
        assert_eq!(MovableFeast::PentecostMonday.date(2026).unwrap(), date(2026, 5, 25));
        assert_eq!(MovableFeast::PentecostSecondDay.date(2026).unwrap(), date(2026, 5, 26));
        assert_eq!(MovableFeast::CorpusChristi.date(2026).unwrap(), date(2026, 6, 4));
    }

    #[test]
    fn liturgical_weekdays() {
        for year in [2024, 2025, 2026, 2027] {
            assert_eq!(MovableFeast::AshWednesday.date(year).unwrap().weekday(), Weekday::Wednesday);
            assert_eq!(MovableFeast::Ascension.date(year).unwrap().weekday(), Weekday::Thursday);
            assert_eq!(MovableFeast::PentecostMonday.date(year).unwrap().weekday(), Weekday::Monday);
            assert_eq!(MovableFeast::CorpusChristi.date(year).unwrap().weekday(), Weekday::Thursday);
        }
    }
}
