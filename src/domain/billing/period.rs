//! Billing period calculation.
//!
//! A paid event opens a 30-day period. Grace and next-charge instants are
//! pinned to wall-clock times in the billing civil zone (UTC+09:00), using
//! fixed-offset arithmetic so the host locale never leaks in.

use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Offset of the billing civil zone from UTC, in seconds.
pub const CIVIL_UTC_OFFSET_SECS: i32 = 9 * 3600;

/// Length of one subscription period, in calendar days.
pub const PERIOD_DAYS: u64 = 30;

/// Civil hour at which the next charge is attempted.
pub const SCHEDULE_HOUR: u32 = 10;

/// The billing civil zone as a chrono offset.
pub fn civil_zone() -> FixedOffset {
    FixedOffset::east_opt(CIVIL_UTC_OFFSET_SECS).expect("+09:00 is a valid offset")
}

/// Calendar date of an instant in the billing civil zone.
pub fn civil_date(ts: &Timestamp) -> NaiveDate {
    ts.as_datetime().with_timezone(&civil_zone()).date_naive()
}

/// The instant at which the civil clock reads `time` on `date`.
fn civil_instant(date: NaiveDate, time: NaiveTime) -> Timestamp {
    let civil = date.and_time(time);
    let utc = civil - Duration::seconds(i64::from(CIVIL_UTC_OFFSET_SECS));
    Timestamp::from_datetime(Utc.from_utc_datetime(&utc))
}

/// Period boundaries derived from a paid event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// Period start (the paid event instant).
    pub start_at: Timestamp,
    /// `start_at` + 30 calendar days.
    pub end_at: Timestamp,
    /// 23:59:59.999 civil time on the civil date of `end_at` + 1 day.
    pub end_grace_at: Timestamp,
    /// 10:mm civil time on the civil date of `end_at` + 1 day.
    pub next_schedule_at: Timestamp,
}

impl BillingPeriod {
    /// Computes the period with a uniformly random schedule minute.
    pub fn starting_at(base: Timestamp) -> Self {
        Self::with_rng(base, &mut rand::thread_rng())
    }

    /// Computes the period drawing the schedule minute from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(base: Timestamp, rng: &mut R) -> Self {
        let minute = rng.gen_range(0..60);
        Self::build(base, minute)
    }

    /// Computes the period with an explicit schedule minute (0..=59).
    pub fn with_minute(base: Timestamp, minute: u32) -> Result<Self, ValidationError> {
        if minute > 59 {
            return Err(ValidationError::out_of_range("minute", 0, 59, i64::from(minute)));
        }
        Ok(Self::build(base, minute))
    }

    fn build(base: Timestamp, minute: u32) -> Self {
        let end_at = base.add_days(PERIOD_DAYS);
        let follow_up_day = civil_date(&end_at.add_days(1));

        let grace_time =
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("23:59:59.999 is a valid time");
        let schedule_time =
            NaiveTime::from_hms_opt(SCHEDULE_HOUR, minute, 0).expect("minute is below 60");

        Self {
            start_at: base,
            end_at,
            end_grace_at: civil_instant(follow_up_day, grace_time),
            next_schedule_at: civil_instant(follow_up_day, schedule_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Timelike};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn end_at_is_thirty_days_later() {
        let period = BillingPeriod::with_minute(at("2024-01-15T03:20:00Z"), 0).unwrap();
        assert_eq!(period.end_at, at("2024-02-14T03:20:00Z"));
        assert_eq!(period.start_at, at("2024-01-15T03:20:00Z"));
    }

    #[test]
    fn grace_is_civil_end_of_day() {
        // end_at = 2024-02-14T03:20Z, +1d = 2024-02-15T03:20Z = 12:20 civil on the 15th
        let period = BillingPeriod::with_minute(at("2024-01-15T03:20:00Z"), 0).unwrap();
        assert_eq!(period.end_grace_at.to_iso_string(), "2024-02-15T14:59:59.999Z");
    }

    #[test]
    fn schedule_is_civil_ten_o_clock() {
        let period = BillingPeriod::with_minute(at("2024-01-15T03:20:00Z"), 37).unwrap();
        assert_eq!(period.next_schedule_at.to_iso_string(), "2024-02-15T01:37:00.000Z");
    }

    /// Grace and next-charge times follow the +09:00 calendar date, not the
    /// UTC date. Whenever `end_at` falls at or after 15:00 UTC the two dates
    /// differ, and pinning to the UTC date would land one day earlier
    /// (2024-02-15 here).
    #[test]
    fn late_utc_evening_rolls_civil_date_forward() {
        // end_at + 1d = 2024-02-15T20:00Z which is already 05:00 on the 16th civil
        let period = BillingPeriod::with_minute(at("2024-01-15T20:00:00Z"), 5).unwrap();
        assert_eq!(period.end_grace_at.to_iso_string(), "2024-02-16T14:59:59.999Z");
        assert_eq!(period.next_schedule_at.to_iso_string(), "2024-02-16T01:05:00.000Z");
    }

    #[test]
    fn fifteen_hundred_utc_is_the_civil_date_boundary() {
        let before = BillingPeriod::with_minute(at("2024-01-15T14:59:59Z"), 0).unwrap();
        let after = BillingPeriod::with_minute(at("2024-01-15T15:00:00Z"), 0).unwrap();
        assert_eq!(before.end_grace_at.to_iso_string(), "2024-02-15T14:59:59.999Z");
        assert_eq!(after.end_grace_at.to_iso_string(), "2024-02-16T14:59:59.999Z");
    }

    #[test]
    fn minute_out_of_range_is_rejected() {
        let err = BillingPeriod::with_minute(Timestamp::now(), 60).unwrap_err();
        assert_eq!(err.field(), "minute");
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let base = at("2024-06-01T00:00:00Z");
        let a = BillingPeriod::with_rng(base, &mut StdRng::seed_from_u64(7));
        let b = BillingPeriod::with_rng(base, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn period_invariants_hold(
            secs in 0i64..4_102_444_800i64,
            seed in any::<u64>(),
        ) {
            let base = Timestamp::from_unix_millis(secs * 1000).unwrap();
            let period = BillingPeriod::with_rng(base, &mut StdRng::seed_from_u64(seed));
            let zone = civil_zone();

            prop_assert_eq!(period.end_at, base.add_days(30));
            prop_assert_eq!(period.end_at.duration_since(&base), Duration::days(30));

            let follow_up = civil_date(&period.end_at.add_days(1));

            let grace = period.end_grace_at.as_datetime().with_timezone(&zone);
            prop_assert_eq!(grace.date_naive(), follow_up);
            prop_assert_eq!((grace.hour(), grace.minute(), grace.second()), (23, 59, 59));
            prop_assert_eq!(grace.nanosecond(), 999_000_000);

            let next = period.next_schedule_at.as_datetime().with_timezone(&zone);
            prop_assert_eq!(next.date_naive(), follow_up);
            prop_assert_eq!(next.hour(), 10);
            prop_assert!(next.minute() <= 59);
            prop_assert_eq!(next.second(), 0);
            prop_assert_eq!(next.nanosecond(), 0);
        }
    }
}
