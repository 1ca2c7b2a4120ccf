mod alert;
mod contract;
mod customer;
mod ledger;
mod notification;
mod portal;
mod rental;
mod report;
mod reservation;
mod vehicle;

pub use self::{
    alert::*, contract::*, customer::*, ledger::*, notification::*, portal::*, rental::*,
    report::*, reservation::*, vehicle::*,
};

use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::event::ReservationEvent;
use kernel::interface::query::{
    DependOnReservationQuery, DependOnVehicleQuery, ReservationQuery, VehicleQuery,
};
use kernel::interface::update::{DependOnNotificationModifier, NotificationModifier};
use kernel::prelude::entity::{
    Notification, Reservation, ReservationId, ReservationPeriod, Vehicle, VehicleId,
};
use kernel::prelude::policy::find_conflict;
use kernel::KernelError;

pub(crate) type Connection<T> =
    <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction;

pub(crate) async fn find_vehicle<T: DependOnVehicleQuery + ?Sized>(
    module: &T,
    con: &mut Connection<T>,
    id: &VehicleId,
) -> error_stack::Result<Vehicle, KernelError> {
    module
        .vehicle_query()
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Vehicle {} not found", id.as_ref()))
        })
}

pub(crate) async fn lock_vehicle<T: DependOnVehicleQuery + ?Sized>(
    module: &T,
    con: &mut Connection<T>,
    id: &VehicleId,
) -> error_stack::Result<Vehicle, KernelError> {
    module
        .vehicle_query()
        .find_by_id_for_update(con, id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Vehicle {} not found", id.as_ref()))
        })
}

pub(crate) async fn find_reservation<T: DependOnReservationQuery + ?Sized>(
    module: &T,
    con: &mut Connection<T>,
    id: &ReservationId,
) -> error_stack::Result<Reservation, KernelError> {
    module
        .reservation_query()
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Reservation {} not found", id.as_ref()))
        })
}

/// Locks the vehicle, then the reservation, and returns both as they stand under the locks.
pub(crate) async fn lock_reservation<T: DependOnVehicleQuery + DependOnReservationQuery + ?Sized>(
    module: &T,
    con: &mut Connection<T>,
    id: &ReservationId,
) -> error_stack::Result<(Vehicle, Reservation), KernelError> {
    let vehicle_id = find_reservation(module, con, id).await?.vehicle_id().clone();
    let vehicle = lock_vehicle(module, con, &vehicle_id).await?;
    let reservation = module
        .reservation_query()
        .find_by_id_for_update(con, id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Reservation {} not found", id.as_ref()))
        })?;
    Ok((vehicle, reservation))
}

pub(crate) async fn ensure_available<T: DependOnReservationQuery + ?Sized>(
    module: &T,
    con: &mut Connection<T>,
    vehicle_id: &VehicleId,
    period: &ReservationPeriod,
    excluding: Option<&ReservationId>,
) -> error_stack::Result<(), KernelError> {
    let reservations = module
        .reservation_query()
        .find_by_vehicle_id(con, vehicle_id)
        .await?;
    if let Some(conflict) = find_conflict(&reservations, period, excluding) {
        return Err(Report::new(KernelError::Conflict).attach_printable(format!(
            "Vehicle {} is booked by reservation {} from {} to {}",
            vehicle_id.as_ref(),
            conflict.id().as_ref(),
            conflict.period().start(),
            conflict.period().end()
        )));
    }
    Ok(())
}

pub(crate) async fn raise<T: DependOnNotificationModifier + ?Sized>(
    module: &T,
    con: &mut Connection<T>,
    event: ReservationEvent,
    now: OffsetDateTime,
) -> error_stack::Result<(), KernelError> {
    tracing::debug!(event = event.name(), reservation_id = ?event.reservation_id(), "raise");
    let notification = Notification::raise(event, now);
    module
        .notification_modifier()
        .create(con, &notification)
        .await
}
