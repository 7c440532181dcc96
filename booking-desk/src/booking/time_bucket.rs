//! Appointment time buckets

use chrono::NaiveDateTime;

/// Where an appointment sits relative to `now`
///
/// For a fixed `now` every appointment lands in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeBucket {
    Upcoming,
    InProgress,
    Past,
}

impl TimeBucket {
    /// `Past` if it ended before `now`, `InProgress` if `start <= now < end`,
    /// otherwise `Upcoming`
    pub fn classify(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> Self {
        if end < now {
            Self::Past
        } else if start <= now && now < end {
            Self::InProgress
        } else {
            Self::Upcoming
        }
    }

    /// Section heading used by the appointment list
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming Appointments",
            Self::InProgress => "In-progress Appointments",
            Self::Past => "Past Appointments",
        }
    }

    /// Display order
    pub const ALL: [TimeBucket; 3] = [Self::Upcoming, Self::InProgress, Self::Past];
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_classify_around_noon() {
        let now = at(12, 0);
        assert_eq!(TimeBucket::classify(at(11, 0), at(13, 0), now), TimeBucket::InProgress);
        assert_eq!(TimeBucket::classify(at(9, 0), at(10, 0), now), TimeBucket::Past);
        assert_eq!(TimeBucket::classify(at(14, 0), at(15, 0), now), TimeBucket::Upcoming);
    }

    #[test]
    fn test_start_boundary_is_in_progress() {
        assert_eq!(TimeBucket::classify(at(12, 0), at(13, 0), at(12, 0)), TimeBucket::InProgress);
    }

    #[test]
    fn test_exactly_one_bucket_per_minute() {
        let (start, end) = (at(10, 0), at(11, 0));
        for minute in 0..(24 * 60) {
            let now = at(minute / 60, minute % 60);
            let bucket = TimeBucket::classify(start, end, now);
            let hits = TimeBucket::ALL.iter().filter(|b| **b == bucket).count();
            assert_eq!(hits, 1);
            if now < start {
                assert_eq!(bucket, TimeBucket::Upcoming);
            } else if now > end {
                assert_eq!(bucket, TimeBucket::Past);
            }
        }
    }
}
