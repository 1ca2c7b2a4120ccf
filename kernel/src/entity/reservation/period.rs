use error_stack::Report;
use time::{Duration, OffsetDateTime};
use vodca::References;

use crate::KernelError;

const NANOS_PER_DAY: i128 = 86_400 * 1_000_000_000;

/// Half-open rental interval `[start, end)`. Construction guarantees `end > start`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, References)]
pub struct ReservationPeriod {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl ReservationPeriod {
    pub fn new(
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> error_stack::Result<Self, KernelError> {
        if end <= start {
            return Err(Report::new(KernelError::InvalidInterval)
                .attach_printable(format!("start: {start}, end: {end}")));
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &ReservationPeriod) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, instant: &OffsetDateTime) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    pub fn started_days(&self) -> i64 {
        let nanos = self.duration().whole_nanoseconds();
        ((nanos + NANOS_PER_DAY - 1) / NANOS_PER_DAY) as i64
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::Duration;

    use crate::entity::ReservationPeriod;
    use crate::KernelError;

    #[test]
    fn end_must_follow_start() {
        let at = datetime!(2024-05-01 10:00 UTC);
        let report = ReservationPeriod::new(at, at).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidInterval));
    }

    #[test]
    fn half_open_intervals_touching_do_not_overlap() {
        let morning =
            ReservationPeriod::new(datetime!(2024-05-01 08:00 UTC), datetime!(2024-05-01 12:00 UTC))
                .unwrap();
        let afternoon =
            ReservationPeriod::new(datetime!(2024-05-01 12:00 UTC), datetime!(2024-05-01 18:00 UTC))
                .unwrap();
        let lunch =
            ReservationPeriod::new(datetime!(2024-05-01 11:00 UTC), datetime!(2024-05-01 13:00 UTC))
                .unwrap();

        assert!(!morning.overlaps(&afternoon));
        assert!(!afternoon.overlaps(&morning));
        assert!(morning.overlaps(&lunch));
        assert!(lunch.overlaps(&afternoon));
    }

    #[test]
    fn partial_days_round_up() {
        let start = datetime!(2024-05-01 08:00 UTC);
        let one_day = ReservationPeriod::new(start, datetime!(2024-05-02 08:00 UTC)).unwrap();
        let day_and_hour = ReservationPeriod::new(start, datetime!(2024-05-02 09:00 UTC)).unwrap();
        let three_hours = ReservationPeriod::new(start, datetime!(2024-05-01 11:00 UTC)).unwrap();

        assert_eq!(one_day.started_days(), 1);
        assert_eq!(day_and_hour.started_days(), 2);
        assert_eq!(three_hours.started_days(), 1);
    }

    #[test]
    fn sub_millisecond_overrun_starts_a_new_day() {
        let start = datetime!(2024-05-01 08:00 UTC);
        let period =
            ReservationPeriod::new(start, start + Duration::days(1) + Duration::microseconds(1))
                .unwrap();
        assert_eq!(period.started_days(), 2);
    }
}
