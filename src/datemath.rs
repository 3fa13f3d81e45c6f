use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// ISO-8601 week number of `date`, in 1..=53.
///
/// Shifts the date to the Thursday of its Monday-start week, then counts
/// whole weeks from the first Thursday of that Thursday's year.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    let thursday = week_thursday(date);
    let jan_first = NaiveDate::from_ymd_opt(thursday.year(), 1, 1)
        .unwrap_or(thursday);
    let first_thursday = first_thursday_on_or_after(jan_first);
    let weeks = (thursday - first_thursday).num_days() / 7;
    (1 + weeks) as u32
}

/// ISO-8601 week-based year of `date`: the calendar year containing the
/// Thursday of `date`'s week. Differs from `date.year()` around January 1.
pub fn iso_week_year(date: NaiveDate) -> i32 {
    week_thursday(date).year()
}

fn week_thursday(date: NaiveDate) -> NaiveDate {
    let day_offset = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(day_offset) + Duration::days(3)
}

fn first_thursday_on_or_after(date: NaiveDate) -> NaiveDate {
    let mut cursor = date;
    while cursor.weekday() != Weekday::Thu {
        cursor += Duration::days(1);
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monday_jan_first_starts_week_one() {
        // 2024-01-01 is a Monday.
        assert_eq!(iso_week_number(date(2024, 1, 1)), 1);
        assert_eq!(iso_week_year(date(2024, 1, 1)), 2024);
    }

    #[test]
    fn sunday_jan_first_belongs_to_prior_iso_year() {
        // 2023-01-01 is a Sunday, so it closes out 2022's last ISO week.
        assert_eq!(iso_week_number(date(2023, 1, 1)), 52);
        assert_eq!(iso_week_year(date(2023, 1, 1)), 2022);
    }

    #[test]
    fn long_iso_year_reaches_week_53() {
        // 2020 is a 53-week ISO year; 2021-01-01 (a Friday) is still in it.
        assert_eq!(iso_week_number(date(2021, 1, 1)), 53);
        assert_eq!(iso_week_year(date(2021, 1, 1)), 2020);
    }

    #[test]
    fn mid_year_week_matches_chrono() {
        for d in [date(2024, 3, 7), date(2024, 7, 1), date(2025, 12, 31)] {
            let iso = d.iso_week();
            assert_eq!(iso_week_number(d), iso.week());
            assert_eq!(iso_week_year(d), iso.year());
        }
    }
}
