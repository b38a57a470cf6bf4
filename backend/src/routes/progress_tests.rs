//! Property-based tests for calendar-date resolution and range checks

#[cfg(test)]
mod tests {
    use crate::repositories::DateRange;
    use crate::services::progress::check_range;
    use crate::services::resolve_when;
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
    use fitness_tracker_shared::RecordedWhen;
    use proptest::prelude::*;

    fn timestamp(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The stored date is never more than one day away from the UTC date
        #[test]
        fn prop_local_date_within_a_day_of_utc(
            secs in 0i64..4_000_000_000,
            offset in -1080i32..=1080,
        ) {
            let at = timestamp(secs);
            let when = RecordedWhen {
                recorded_at: Some(at),
                local_date: None,
                utc_offset_minutes: Some(offset),
            };
            let (recorded_at, date) = resolve_when(&when, 0, Utc::now()).unwrap();

            prop_assert_eq!(recorded_at, at);
            let drift = (date - at.date_naive()).num_days().abs();
            prop_assert!(drift <= 1, "date {} drifted {} days from {}", date, drift, at);
        }

        /// An explicit date is stored as sent, whatever the offset
        #[test]
        fn prop_explicit_date_is_kept(
            secs in 0i64..4_000_000_000,
            offset in -1080i32..=1080,
            day in 0i64..20_000,
        ) {
            let explicit = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + Duration::days(day);
            let when = RecordedWhen {
                recorded_at: Some(timestamp(secs)),
                local_date: Some(explicit),
                utc_offset_minutes: Some(offset),
            };
            let (_, date) = resolve_when(&when, 0, Utc::now()).unwrap();

            prop_assert_eq!(date, explicit);
        }

        /// Offsets beyond ±18h are always rejected
        #[test]
        fn prop_out_of_range_offsets_rejected(offset in 1081i32..100_000, negative in any::<bool>()) {
            let when = RecordedWhen {
                utc_offset_minutes: Some(if negative { -offset } else { offset }),
                ..Default::default()
            };
            prop_assert!(resolve_when(&when, 0, Utc::now()).is_err());
        }

        /// A range is accepted exactly when from <= to
        #[test]
        fn prop_check_range_accepts_ordered_bounds(a in 0i64..10_000, b in 0i64..10_000) {
            let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
            let (from, to) = (base + Duration::days(a), base + Duration::days(b));
            let result = check_range(DateRange::new(Some(from), Some(to)));

            prop_assert_eq!(result.is_ok(), from <= to);
        }
    }
}
