mod id;
mod notes;
mod period;
mod portal_token;
mod status;

pub use self::{id::*, notes::*, period::*, portal_token::*, status::*};
use crate::entity::{CreatedAt, CustomerId, Mileage, Money, VehicleId};
use crate::policy::MileageBill;
use crate::KernelError;
use destructure::{Destructure, Mutation};
use error_stack::Report;
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Reservation {
    id: ReservationId,
    vehicle_id: VehicleId,
    customer_id: Option<CustomerId>,
    period: ReservationPeriod,
    status: ReservationStatus,
    total_price: Money,
    start_mileage: Option<Mileage>,
    end_mileage: Option<Mileage>,
    portal_token: Option<PortalToken>,
    notes: Option<ReservationNotes>,
    created_at: CreatedAt<Reservation>,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ReservationId,
        vehicle_id: VehicleId,
        customer_id: Option<CustomerId>,
        period: ReservationPeriod,
        status: ReservationStatus,
        total_price: Money,
        start_mileage: Option<Mileage>,
        end_mileage: Option<Mileage>,
        portal_token: Option<PortalToken>,
        notes: Option<ReservationNotes>,
        created_at: CreatedAt<Reservation>,
    ) -> Self {
        Self {
            id,
            vehicle_id,
            customer_id,
            period,
            status,
            total_price,
            start_mileage,
            end_mileage,
            portal_token,
            notes,
            created_at,
        }
    }

    pub fn schedule(
        id: ReservationId,
        vehicle_id: VehicleId,
        customer_id: CustomerId,
        period: ReservationPeriod,
        total_price: Money,
        notes: Option<ReservationNotes>,
        now: OffsetDateTime,
    ) -> Self {
        Self::new(
            id,
            vehicle_id,
            Some(customer_id),
            period,
            ReservationStatus::Scheduled,
            total_price,
            None,
            None,
            None,
            notes,
            CreatedAt::new(now),
        )
    }

    pub fn pending(
        id: ReservationId,
        vehicle_id: VehicleId,
        period: ReservationPeriod,
        total_price: Money,
        portal_token: PortalToken,
        notes: Option<ReservationNotes>,
        now: OffsetDateTime,
    ) -> Self {
        Self::new(
            id,
            vehicle_id,
            None,
            period,
            ReservationStatus::PendingCustomer,
            total_price,
            None,
            None,
            Some(portal_token),
            notes,
            CreatedAt::new(now),
        )
    }

    pub fn bind_customer(
        &mut self,
        customer_id: CustomerId,
        presented_token: &str,
        now: &OffsetDateTime,
    ) -> error_stack::Result<(), KernelError> {
        let next = self.status.transition(ReservationStatus::Scheduled)?;
        if self.customer_id.is_some() {
            return Err(Report::new(KernelError::InvalidTransition)
                .attach_printable("Reservation already has a customer"));
        }
        match &self.portal_token {
            Some(token) if token.accepts(presented_token, now) => {}
            _ => return Err(Report::new(KernelError::InvalidToken)),
        }
        self.substitute(|reservation| {
            *reservation.customer_id = Some(customer_id);
            *reservation.status = next;
        });
        Ok(())
    }

    pub fn hand_over(
        &mut self,
        start_mileage: Option<Mileage>,
    ) -> error_stack::Result<(), KernelError> {
        let next = self.status.transition(ReservationStatus::Active)?;
        if self.customer_id.is_none() {
            return Err(Report::new(KernelError::InvalidTransition)
                .attach_printable("Reservation has no customer"));
        }
        let start_mileage = start_mileage.ok_or_else(|| {
            Report::new(KernelError::InvalidMileage).attach_printable("Start mileage is required")
        })?;
        self.substitute(|reservation| {
            *reservation.start_mileage = Some(start_mileage);
            *reservation.status = next;
        });
        Ok(())
    }

    pub fn complete(
        &mut self,
        end_mileage: Option<Mileage>,
    ) -> error_stack::Result<MileageBill, KernelError> {
        let next = self.status.transition(ReservationStatus::Completed)?;
        let end_mileage = end_mileage.ok_or_else(|| {
            Report::new(KernelError::InvalidMileage).attach_printable("End mileage is required")
        })?;
        let start_mileage = self.start_mileage.ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable("Active reservation without start mileage")
        })?;
        let bill = MileageBill::calculate(&self.period, &start_mileage, &end_mileage)?;
        self.substitute(|reservation| {
            *reservation.end_mileage = Some(end_mileage);
            *reservation.status = next;
        });
        Ok(bill)
    }

    pub fn cancel(&mut self) -> error_stack::Result<(), KernelError> {
        let next = self.status.transition(ReservationStatus::Cancelled)?;
        self.substitute(|reservation| *reservation.status = next);
        Ok(())
    }

    pub fn reschedule(
        &mut self,
        period: ReservationPeriod,
        total_price: Money,
    ) -> error_stack::Result<(), KernelError> {
        if !matches!(
            self.status,
            ReservationStatus::PendingCustomer | ReservationStatus::Scheduled
        ) {
            return Err(Report::new(KernelError::InvalidTransition)
                .attach_printable(format!("Cannot reschedule a {} reservation", self.status)));
        }
        self.substitute(|reservation| {
            *reservation.period = period;
            *reservation.total_price = total_price;
        });
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::Duration;
    use uuid::Uuid;

    use crate::entity::{
        CustomerId, Mileage, Money, PortalToken, Reservation, ReservationId, ReservationPeriod,
        ReservationStatus, VehicleId,
    };
    use crate::KernelError;

    fn two_day_period() -> ReservationPeriod {
        ReservationPeriod::new(datetime!(2024-05-01 08:00 UTC), datetime!(2024-05-03 08:00 UTC))
            .unwrap()
    }

    fn scheduled() -> Reservation {
        Reservation::schedule(
            ReservationId::new(Uuid::new_v4()),
            VehicleId::new(Uuid::new_v4()),
            CustomerId::new(Uuid::new_v4()),
            two_day_period(),
            Money::new(2400),
            None,
            datetime!(2024-04-01 00:00 UTC),
        )
    }

    #[test]
    fn full_lifecycle() {
        let mut reservation = scheduled();
        reservation.hand_over(Some(Mileage::new(1000))).unwrap();
        assert_eq!(reservation.status(), &ReservationStatus::Active);
        assert_eq!(reservation.start_mileage(), &Some(Mileage::new(1000)));

        let bill = reservation.complete(Some(Mileage::new(1800))).unwrap();
        assert_eq!(reservation.status(), &ReservationStatus::Completed);
        assert_eq!(reservation.end_mileage(), &Some(Mileage::new(1800)));
        assert_eq!(bill.overage_fee(), &Money::new(600));
        assert_eq!(reservation.total_price(), &Money::new(2400));
    }

    #[test]
    fn completed_reservation_cannot_go_back() {
        let mut reservation = scheduled();
        reservation.hand_over(Some(Mileage::new(1000))).unwrap();
        reservation.complete(Some(Mileage::new(1100))).unwrap();
        let before = reservation.clone();

        for mileage in [None, Some(Mileage::new(0)), Some(Mileage::new(5000))] {
            let report = reservation.hand_over(mileage).unwrap_err();
            assert!(matches!(report.current_context(), KernelError::InvalidTransition));
        }
        let report = reservation.cancel().unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidTransition));
        assert_eq!(reservation, before);
    }

    #[test]
    fn handover_requires_mileage() {
        let mut reservation = scheduled();
        let report = reservation.hand_over(None).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidMileage));
        assert_eq!(reservation.status(), &ReservationStatus::Scheduled);
    }

    #[test]
    fn return_below_start_mileage_leaves_reservation_active() {
        let mut reservation = scheduled();
        reservation.hand_over(Some(Mileage::new(1000))).unwrap();
        let report = reservation.complete(Some(Mileage::new(900))).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidMileage));
        assert_eq!(reservation.status(), &ReservationStatus::Active);
        assert_eq!(reservation.end_mileage(), &None);
    }

    #[test]
    fn pending_reservation_binds_with_valid_token() {
        let now = datetime!(2024-04-01 00:00 UTC);
        let token = PortalToken::generate(now, Duration::hours(72));
        let value = token.value().clone();
        let mut reservation = Reservation::pending(
            ReservationId::new(Uuid::new_v4()),
            VehicleId::new(Uuid::new_v4()),
            two_day_period(),
            Money::new(2400),
            token,
            None,
            now,
        );
        let customer_id = CustomerId::new(Uuid::new_v4());

        let report = reservation
            .bind_customer(customer_id.clone(), "wrong", &now)
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidToken));

        let report = reservation.hand_over(Some(Mileage::new(1))).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidTransition));

        reservation
            .bind_customer(customer_id.clone(), &value, &now)
            .unwrap();
        assert_eq!(reservation.status(), &ReservationStatus::Scheduled);
        assert_eq!(reservation.customer_id(), &Some(customer_id.clone()));

        let report = reservation
            .bind_customer(customer_id, &value, &now)
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidTransition));
    }

    #[test]
    fn active_reservation_cannot_be_rescheduled() {
        let mut reservation = scheduled();
        reservation.hand_over(Some(Mileage::new(1000))).unwrap();
        let report = reservation
            .reschedule(two_day_period(), Money::new(1))
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidTransition));
    }
}
