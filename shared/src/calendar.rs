//! Calendar-date bucketing
//!
//! Records are bucketed by a `local_date` computed once, when the record is
//! written, from its timestamp and the writer's UTC offset. Readers never
//! re-derive the date, so a record stays on the same day no matter which
//! timezone the timeline is later viewed from.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Largest offset accepted from clients (UTC-18:00 ..= UTC+18:00)
pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Build a fixed offset from minutes east of UTC
///
/// Returns `None` when the offset is outside ±18 hours.
pub fn utc_offset(minutes: i32) -> Option<FixedOffset> {
    if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}

/// Calendar date of `recorded_at` as seen by a writer at `offset`
pub fn local_date(recorded_at: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    recorded_at.with_timezone(&offset).date_naive()
}

/// Resolve the date a record should be stored under
///
/// An explicit client-supplied date wins; otherwise the date is derived from
/// the timestamp and offset.
pub fn resolve_local_date(
    explicit: Option<NaiveDate>,
    recorded_at: DateTime<Utc>,
    offset: FixedOffset,
) -> NaiveDate {
    explicit.unwrap_or_else(|| local_date(recorded_at, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offset_bounds() {
        assert!(utc_offset(0).is_some());
        assert!(utc_offset(-MAX_UTC_OFFSET_MINUTES).is_some());
        assert!(utc_offset(MAX_UTC_OFFSET_MINUTES + 1).is_none());
    }

    #[test]
    fn test_late_evening_west_of_utc_stays_on_previous_day() {
        // 02:30 UTC on the 2nd is 21:30 on the 1st in UTC-5
        let ts = Utc.with_ymd_and_hms(2024, 3, 2, 2, 30, 0).unwrap();
        let offset = utc_offset(-300).unwrap();
        assert_eq!(local_date(ts, offset), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_explicit_date_wins() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();
        let explicit = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let offset = utc_offset(0).unwrap();
        assert_eq!(resolve_local_date(Some(explicit), ts, offset), explicit);
        assert_eq!(
            resolve_local_date(None, ts, offset),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }
}
