//! Week-range date math for the week picker.
//!
//! Pure, stateless date computations. The first day of the week is
//! configurable (Monday-first and Sunday-first conventions both normalize
//! through [`chrono::Weekday::days_since`]); range membership is inclusive
//! of both boundaries at date granularity.

use chrono::Datelike;
use chrono::Days;
use chrono::NaiveDate;
use chrono::Weekday;

/// The first day of the week containing `date`.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset = date.weekday().days_since(first_day);
    date - Days::new(u64::from(offset))
}

/// The last day of the week containing `date`: six days after the start.
pub fn week_end(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    week_start(date, first_day) + Days::new(6)
}

/// Whether `date` falls in the same week as `pivot`.
pub fn in_week_range(date: NaiveDate, pivot: NaiveDate, first_day: Weekday) -> bool {
    let start = week_start(pivot, first_day);
    let end = start + Days::new(6);
    start <= date && date <= end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-01-10 is a Wednesday.

    #[test]
    fn test_week_start_monday_first() {
        assert_eq!(week_start(date(2024, 1, 10), Weekday::Mon), date(2024, 1, 8));
    }

    #[test]
    fn test_week_end_monday_first() {
        assert_eq!(week_end(date(2024, 1, 10), Weekday::Mon), date(2024, 1, 14));
    }

    #[test]
    fn test_week_start_sunday_first() {
        assert_eq!(week_start(date(2024, 1, 10), Weekday::Sun), date(2024, 1, 7));
    }

    #[test]
    fn test_week_end_sunday_first() {
        assert_eq!(week_end(date(2024, 1, 10), Weekday::Sun), date(2024, 1, 13));
    }

    #[test]
    fn test_start_of_week_is_its_own_start() {
        let monday = date(2024, 1, 8);
        assert_eq!(week_start(monday, Weekday::Mon), monday);
        assert_eq!(week_end(monday, Weekday::Mon), date(2024, 1, 14));
    }

    #[test]
    fn test_sunday_belongs_to_previous_week_when_monday_first() {
        // 2024-01-14 is a Sunday: last day of the Monday-first week of the 8th.
        assert_eq!(week_start(date(2024, 1, 14), Weekday::Mon), date(2024, 1, 8));
        // Same Sunday starts a new Sunday-first week.
        assert_eq!(week_start(date(2024, 1, 14), Weekday::Sun), date(2024, 1, 14));
    }

    #[test]
    fn test_in_week_range_inclusive_boundaries() {
        let pivot = date(2024, 1, 10);
        assert!(in_week_range(date(2024, 1, 8), pivot, Weekday::Mon));
        assert!(in_week_range(date(2024, 1, 14), pivot, Weekday::Mon));
        assert!(!in_week_range(date(2024, 1, 7), pivot, Weekday::Mon));
        assert!(!in_week_range(date(2024, 1, 15), pivot, Weekday::Mon));
    }

    #[test]
    fn test_in_week_range_sunday_first() {
        let pivot = date(2024, 1, 10);
        assert!(in_week_range(date(2024, 1, 7), pivot, Weekday::Sun));
        assert!(in_week_range(date(2024, 1, 13), pivot, Weekday::Sun));
        assert!(!in_week_range(date(2024, 1, 14), pivot, Weekday::Sun));
    }

    #[test]
    fn test_week_range_across_month_boundary() {
        // 2024-02-01 is a Thursday; its Monday-first week starts in January.
        assert_eq!(week_start(date(2024, 2, 1), Weekday::Mon), date(2024, 1, 29));
        assert_eq!(week_end(date(2024, 2, 1), Weekday::Mon), date(2024, 2, 4));
    }

    #[test]
    fn test_every_first_day_convention_is_self_consistent() {
        let pivot = date(2024, 1, 10);
        for first_day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            let start = week_start(pivot, first_day);
            let end = week_end(pivot, first_day);
            assert_eq!(start.weekday(), first_day);
            assert_eq!(end - start, chrono::Duration::days(6));
            assert!(in_week_range(pivot, pivot, first_day));
        }
    }
}
