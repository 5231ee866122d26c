// Proleptic Gregorian calendar arithmetic on epoch-relative day numbers
// Day 0 is 1970-01-01. Out-of-range fields carry into the next larger unit the
// way the host date primitive does: month 13 is January of the next year, day 0
// is the last day of the previous month, hour 24 is midnight of the next day.

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

const DAYS_PER_ERA: i64 = 146_097;
const EPOCH_SHIFT: i64 = 719_468; // days from 0000-03-01 to 1970-01-01

/// Day number of a calendar date relative to 1970-01-01.
/// `month` must already be normalized to 1..=12; `day` may be any value.
pub fn days_from_civil(year: i64, month: u32, day: i64) -> i64 {
    let adjusted_year = year - if month <= 2 { 1 } else { 0 };
    let era = adjusted_year.div_euclid(400);
    let yoe = adjusted_year - era * 400;
    let month = i64::from(month);
    let doy = (153 * (month + if month > 2 { -3 } else { 9 }) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - EPOCH_SHIFT
}

/// Calendar date of a day number relative to 1970-01-01.
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + EPOCH_SHIFT;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096).div_euclid(365);
    let mut year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2).div_euclid(153);
    let day = (doy - (153 * mp + 2).div_euclid(5) + 1) as u32;
    let month = (mp + if mp < 10 { 3 } else { -9 }) as u32;
    if month <= 2 {
        year += 1;
    }
    (year, month, day)
}

/// Fold an unbounded month number into the year: (1970, 13) -> (1971, 1).
pub fn normalize_month(year: i64, month: i64) -> (i64, u32) {
    let zero_based = month - 1;
    let year = year + zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) + 1;
    (year, month as u32)
}

/// Weekday of a day number, Monday = 0.
pub fn weekday(days: i64) -> i64 {
    // 1970-01-01 was a Thursday
    (days + 3).rem_euclid(7)
}

/// 1-based ordinal of a day number within its year.
pub fn day_of_year(days: i64) -> i64 {
    let (year, _, _) = civil_from_days(days);
    days - days_from_civil(year, 1, 1) + 1
}

// RUST CONCEPT: Broken-down wall-clock reading
// Fields are unbounded so that un-normalized input (month 0, second 61) can be
// represented before it is folded into a single seconds count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilDateTime {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
}

impl CivilDateTime {
    pub fn new(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Self {
        CivilDateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Seconds since 1970-01-01T00:00:00 of this reading, with all carries applied.
    pub fn to_epoch_seconds(&self) -> i64 {
        let (year, month) = normalize_month(self.year, self.month);
        let days = days_from_civil(year, month, self.day);
        days * SECONDS_PER_DAY
            + self.hour * SECONDS_PER_HOUR
            + self.minute * SECONDS_PER_MINUTE
            + self.second
    }

    /// The normalized reading for a seconds count since 1970-01-01T00:00:00.
    pub fn from_epoch_seconds(seconds: i64) -> Self {
        let days = seconds.div_euclid(SECONDS_PER_DAY);
        let within_day = seconds.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        CivilDateTime {
            year,
            month: i64::from(month),
            day: i64::from(day),
            hour: within_day / SECONDS_PER_HOUR,
            minute: within_day % SECONDS_PER_HOUR / SECONDS_PER_MINUTE,
            second: within_day % SECONDS_PER_MINUTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_epoch_and_known_dates() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1900, 1, 1), -25_567);
        assert_eq!(days_from_civil(2016, 1, 1), 16_801);
        // Host primitive ceiling: 100,000,000 days after the epoch
        assert_eq!(days_from_civil(275_760, 9, 13), 100_000_000);
        assert_eq!(days_from_civil(-271_821, 4, 20), -100_000_000);
    }

    #[test]
    fn test_civil_from_days() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
        assert_eq!(civil_from_days(100_000_000), (275_760, 9, 13));
        assert_eq!(civil_from_days(days_from_civil(2000, 2, 29)), (2000, 2, 29));
    }

    #[test]
    fn test_month_normalization() {
        assert_eq!(normalize_month(1970, 1), (1970, 1));
        assert_eq!(normalize_month(1970, 13), (1971, 1));
        assert_eq!(normalize_month(1970, 0), (1969, 12));
        assert_eq!(normalize_month(1970, -11), (1969, 1));
        assert_eq!(normalize_month(1970, 25), (1972, 1));
    }

    #[test]
    fn test_day_carry() {
        // Day 0 is the last day of the previous month
        let zero = CivilDateTime::new(1900, 3, 0, 0, 0, 0).to_epoch_seconds();
        let last_feb = CivilDateTime::new(1900, 2, 28, 0, 0, 0).to_epoch_seconds();
        assert_eq!(zero, last_feb);

        // February length: 1900 and 2100 are not leap years, 2000 and 2016 are
        for (year, february) in [(1900, 28), (2000, 29), (2100, 28), (2016, 29)] {
            assert_eq!(days_from_civil(year, 3, 1) - days_from_civil(year, 2, 1), february);
        }
    }

    #[test]
    fn test_time_of_day_carry() {
        let carried = CivilDateTime::new(1970, 1, 1, 24, 0, 61).to_epoch_seconds();
        assert_eq!(carried, SECONDS_PER_DAY + 61);
    }

    #[test]
    fn test_weekday_and_day_of_year() {
        // 1970-01-01 was a Thursday
        assert_eq!(weekday(0), 3);
        // 2016-01-01 was a Friday
        assert_eq!(weekday(days_from_civil(2016, 1, 1)), 4);
        assert_eq!(day_of_year(days_from_civil(2016, 12, 31)), 366);
        assert_eq!(day_of_year(days_from_civil(1970, 2, 1)), 32);
    }

    proptest! {
        #[test]
        fn prop_days_round_trip(days in -200_000_000i64..200_000_000i64) {
            let (year, month, day) = civil_from_days(days);
            prop_assert_eq!(days_from_civil(year, month, i64::from(day)), days);
        }

        #[test]
        fn prop_seconds_round_trip(seconds in -10_000_000_000_000i64..10_000_000_000_000i64) {
            let reading = CivilDateTime::from_epoch_seconds(seconds);
            prop_assert!((1..=12).contains(&reading.month));
            prop_assert!((0..24).contains(&reading.hour));
            prop_assert_eq!(reading.to_epoch_seconds(), seconds);
        }
    }
}
