use std::time::Duration as StdDuration;

use destructure::Mutation;
use time::{Duration, OffsetDateTime};
use vodca::References;

use crate::entity::{Reservation, ReservationStatus};

#[derive(Debug, Clone, References, Mutation)]
pub struct ReturnAlertConfig {
    scan_interval: StdDuration,
    lookahead: Duration,
}

impl ReturnAlertConfig {
    pub fn new(scan_interval: StdDuration, lookahead: Duration) -> Self {
        Self {
            scan_interval,
            lookahead,
        }
    }
}

impl Default for ReturnAlertConfig {
    fn default() -> Self {
        Self {
            scan_interval: StdDuration::from_secs(60),
            lookahead: Duration::minutes(60),
        }
    }
}

/// An active reservation is due soon once its end falls at or before `now + lookahead`.
/// Overdue reservations that were never flagged still qualify.
pub fn is_return_due_soon(
    reservation: &Reservation,
    now: &OffsetDateTime,
    lookahead: &Duration,
) -> bool {
    reservation.status() == &ReservationStatus::Active
        && *reservation.period().end() <= *now + *lookahead
}
