use crate::entity::{Reservation, ReservationId, ReservationPeriod};

pub fn find_conflict<'a>(
    reservations: impl IntoIterator<Item = &'a Reservation>,
    period: &ReservationPeriod,
    excluding: Option<&ReservationId>,
) -> Option<&'a Reservation> {
    reservations.into_iter().find(|reservation| {
        excluding.map_or(true, |id| reservation.id() != id)
            && reservation.status().is_occupying()
            && reservation.period().overlaps(period)
    })
}

pub fn is_available<'a>(
    reservations: impl IntoIterator<Item = &'a Reservation>,
    period: &ReservationPeriod,
    excluding: Option<&ReservationId>,
) -> bool {
    find_conflict(reservations, period, excluding).is_none()
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use crate::entity::{
        CustomerId, Money, Reservation, ReservationId, ReservationPeriod, VehicleId,
    };
    use crate::policy::{find_conflict, is_available};

    fn period(start: OffsetDateTime, end: OffsetDateTime) -> ReservationPeriod {
        ReservationPeriod::new(start, end).unwrap()
    }

    fn scheduled(vehicle_id: &VehicleId, period: ReservationPeriod) -> Reservation {
        Reservation::schedule(
            ReservationId::new(Uuid::new_v4()),
            vehicle_id.clone(),
            CustomerId::new(Uuid::new_v4()),
            period,
            Money::new(1200),
            None,
            datetime!(2024-04-01 00:00 UTC),
        )
    }

    #[test]
    fn overlapping_booking_conflicts() {
        let vehicle_id = VehicleId::new(Uuid::new_v4());
        let existing = vec![scheduled(
            &vehicle_id,
            period(datetime!(2024-05-01 08:00 UTC), datetime!(2024-05-02 08:00 UTC)),
        )];
        let requested = period(datetime!(2024-05-01 20:00 UTC), datetime!(2024-05-03 08:00 UTC));
        let adjacent = period(datetime!(2024-05-02 08:00 UTC), datetime!(2024-05-03 08:00 UTC));

        assert_eq!(
            find_conflict(&existing, &requested, None).map(Reservation::id),
            Some(existing[0].id())
        );
        assert!(is_available(&existing, &adjacent, None));
    }

    #[test]
    fn own_booking_is_ignored_when_excluded() {
        let vehicle_id = VehicleId::new(Uuid::new_v4());
        let booked = period(datetime!(2024-05-01 08:00 UTC), datetime!(2024-05-02 08:00 UTC));
        let existing = vec![scheduled(&vehicle_id, booked)];

        assert!(!is_available(&existing, &booked, None));
        assert!(is_available(&existing, &booked, Some(existing[0].id())));
    }

    #[test]
    fn cancelled_and_pending_bookings_do_not_occupy() {
        let vehicle_id = VehicleId::new(Uuid::new_v4());
        let booked = period(datetime!(2024-05-01 08:00 UTC), datetime!(2024-05-02 08:00 UTC));
        let mut cancelled = scheduled(&vehicle_id, booked);
        cancelled.cancel().unwrap();
        let pending = Reservation::pending(
            ReservationId::new(Uuid::new_v4()),
            vehicle_id.clone(),
            booked,
            Money::new(1200),
            crate::entity::PortalToken::new("token", datetime!(2024-05-01 00:00 UTC)),
            None,
            datetime!(2024-04-01 00:00 UTC),
        );

        assert!(is_available(&[cancelled, pending], &booked, None));
    }
}
