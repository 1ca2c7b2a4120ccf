use error_stack::Report;

use kernel::interface::query::ReservationQuery;
use kernel::interface::update::ReservationModifier;
use kernel::prelude::entity::{Reservation, ReservationId, ReservationStatus, VehicleId};
use kernel::prelude::policy::find_conflict;
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryReservationRepository;

fn sorted<'a>(reservations: impl Iterator<Item = &'a Reservation>) -> Vec<Reservation> {
    let mut reservations = reservations.cloned().collect::<Vec<_>>();
    reservations.sort_by_key(|reservation| *reservation.period().start());
    reservations
}

fn ensure_no_overlap(
    con: &InMemoryTransaction,
    reservation: &Reservation,
) -> error_stack::Result<(), KernelError> {
    if !reservation.status().is_occupying() {
        return Ok(());
    }
    let same_vehicle = con
        .working
        .reservations
        .values()
        .filter(|other| other.vehicle_id() == reservation.vehicle_id());
    if let Some(conflict) = find_conflict(same_vehicle, reservation.period(), Some(reservation.id()))
    {
        return Err(Report::new(KernelError::Conflict).attach_printable(format!(
            "Reservation {} overlaps {}",
            reservation.id().as_ref(),
            conflict.id().as_ref()
        )));
    }
    Ok(())
}

#[async_trait::async_trait]
impl ReservationQuery for InMemoryReservationRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        Ok(con.working.reservations.get(id).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        self.find_by_id(con, id).await
    }

    async fn find_by_portal_token(
        &self,
        con: &mut InMemoryTransaction,
        token: &str,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        Ok(con
            .working
            .reservations
            .values()
            .find(|reservation| {
                reservation
                    .portal_token()
                    .as_ref()
                    .is_some_and(|portal_token| portal_token.value() == token)
            })
            .cloned())
    }

    async fn find_by_portal_token_for_update(
        &self,
        con: &mut InMemoryTransaction,
        token: &str,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        self.find_by_portal_token(con, token).await
    }

    async fn find_by_vehicle_id(
        &self,
        con: &mut InMemoryTransaction,
        vehicle_id: &VehicleId,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        Ok(sorted(
            con.working
                .reservations
                .values()
                .filter(|reservation| reservation.vehicle_id() == vehicle_id),
        ))
    }

    async fn find_by_status(
        &self,
        con: &mut InMemoryTransaction,
        status: &ReservationStatus,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        Ok(sorted(
            con.working
                .reservations
                .values()
                .filter(|reservation| reservation.status() == status),
        ))
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        Ok(sorted(con.working.reservations.values()))
    }
}

#[async_trait::async_trait]
impl ReservationModifier for InMemoryReservationRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError> {
        if con.working.reservations.contains_key(reservation.id()) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Reservation {} already exists",
                reservation.id().as_ref()
            )));
        }
        ensure_no_overlap(con, reservation)?;
        con.working
            .reservations
            .insert(reservation.id().clone(), reservation.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError> {
        if !con.working.reservations.contains_key(reservation.id()) {
            return Err(Report::new(KernelError::NotFound).attach_printable(format!(
                "Reservation {} not found",
                reservation.id().as_ref()
            )));
        }
        ensure_no_overlap(con, reservation)?;
        con.working
            .reservations
            .insert(reservation.id().clone(), reservation.clone());
        Ok(())
    }
}
