use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};

/// Midnight that opens the calendar day of `now`, in `now`'s time zone.
///
/// When midnight does not exist locally (DST gap) the UTC reading of the
/// same wall-clock time is used instead.
pub fn local_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let naive = now.date_naive().and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// `[midnight, midnight + 24h)` around `now`.
pub fn day_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> (DateTime<Tz>, DateTime<Tz>) {
    let start = local_midnight(now);
    let end = start.clone() + Duration::hours(24);
    (start, end)
}

/// Long form used by the stats view, e.g. `Monday, January 2, 2006`.
pub fn date_display(date: &NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn midnight_follows_the_time_zone_of_now() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2025, 3, 10, 0, 30, 0).unwrap();
        let (start, end) = day_bounds(&now);
        assert_eq!(start, tz.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(end, tz.with_ymd_and_hms(2025, 3, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn long_date_display() {
        let d = NaiveDate::from_ymd_opt(2006, 1, 2).unwrap();
        assert_eq!(date_display(&d), "Monday, January 2, 2006");
    }
}
