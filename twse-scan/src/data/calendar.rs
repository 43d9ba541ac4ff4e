//! Scan-date helpers

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Asia::Taipei;

/// Latest plausible trading date on or before `today`: weekends roll back to Friday.
///
/// Exchange holidays are not known here; a holiday yields a short report and
/// the scan reports no data.
pub fn latest_weekday(today: NaiveDate) -> NaiveDate {
    match today.weekday() {
        Weekday::Sat => today - Duration::days(1),
        Weekday::Sun => today - Duration::days(2),
        _ => today,
    }
}

/// Default scan date: today in Taipei, rolled back off the weekend
pub fn default_scan_date() -> NaiveDate {
    let today = Utc::now().with_timezone(&Taipei).date_naive();
    latest_weekday(today)
}

/// Date in the `YYYYMMDD` form the exchange report expects
pub fn report_date_param(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_rolls_back_to_friday() {
        let friday = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        assert_eq!(latest_weekday(friday), friday);
        assert_eq!(latest_weekday(saturday), friday);
        assert_eq!(latest_weekday(sunday), friday);
        assert_eq!(latest_weekday(monday), monday);
    }

    #[test]
    fn test_report_date_param() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(report_date_param(date), "20240105");
    }
}
