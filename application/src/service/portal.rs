use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::event::ReservationEvent;
use kernel::interface::generator::DependOnContractGenerator;
use kernel::interface::query::{DependOnReservationQuery, DependOnVehicleQuery, ReservationQuery};
use kernel::interface::update::{
    CustomerModifier, DependOnContractModifier, DependOnCustomerModifier,
    DependOnNotificationModifier, DependOnReservationModifier, ReservationModifier,
};
use kernel::prelude::entity::{
    Customer, CustomerContact, CustomerId, CustomerName, DriverLicense, PortalToken, Reservation,
    ReservationStatus,
};
use kernel::KernelError;

use crate::service::{
    ensure_available, find_vehicle, issue_contract, lock_vehicle, raise, Connection,
};
use crate::transfer::{LookupPortalDto, PortalReservationDto, ReservationDto, SubmitPortalDto};

fn open_portal(
    reservation: Option<Reservation>,
    now: &OffsetDateTime,
) -> error_stack::Result<(Reservation, PortalToken), KernelError> {
    let reservation = reservation.ok_or_else(|| Report::new(KernelError::InvalidToken))?;
    if reservation.status() != &ReservationStatus::PendingCustomer {
        return Err(Report::new(KernelError::AlreadyCompleted).attach_printable(format!(
            "Reservation {} is {}",
            reservation.id().as_ref(),
            reservation.status()
        )));
    }
    let portal_token = reservation
        .portal_token()
        .clone()
        .ok_or_else(|| Report::new(KernelError::InvalidToken))?;
    if portal_token.is_expired(now) {
        return Err(Report::new(KernelError::InvalidToken).attach_printable("Portal link expired"));
    }
    Ok((reservation, portal_token))
}

async fn find_portal<T: DependOnReservationQuery + ?Sized>(
    module: &T,
    con: &mut Connection<T>,
    token: &str,
) -> error_stack::Result<Reservation, KernelError> {
    module
        .reservation_query()
        .find_by_portal_token(con, token)
        .await?
        .ok_or_else(|| Report::new(KernelError::InvalidToken))
}

#[async_trait::async_trait]
pub trait PortalService:
    'static
    + Sync
    + Send
    + DependOnReservationQuery
    + DependOnVehicleQuery
    + DependOnCustomerModifier
    + DependOnReservationModifier
    + DependOnContractGenerator
    + DependOnContractModifier
    + DependOnNotificationModifier
{
    async fn lookup_portal(
        &self,
        dto: LookupPortalDto,
    ) -> error_stack::Result<PortalReservationDto, KernelError> {
        let now = OffsetDateTime::now_utc();
        let mut connection = self.database_connection().transact().await?;

        let reservation = self
            .reservation_query()
            .find_by_portal_token(&mut connection, &dto.token)
            .await?;
        let (reservation, token) = open_portal(reservation, &now)?;
        let vehicle = find_vehicle(self, &mut connection, reservation.vehicle_id()).await?;
        Ok(PortalReservationDto {
            reservation_id: reservation.id().clone().into(),
            vehicle_name: vehicle.name().as_ref().clone(),
            license_plate: vehicle.license_plate().as_ref().clone(),
            start: *reservation.period().start(),
            end: *reservation.period().end(),
            total_price: (*reservation.total_price()).into(),
            expires_at: *token.expires_at(),
        })
    }

    #[tracing::instrument(skip_all)]
    async fn submit_portal(
        &self,
        dto: SubmitPortalDto,
    ) -> error_stack::Result<ReservationDto, KernelError> {
        let now = OffsetDateTime::now_utc();
        let mut connection = self.database_connection().transact().await?;

        let vehicle_id = find_portal(self, &mut connection, &dto.token)
            .await?
            .vehicle_id()
            .clone();
        let vehicle = lock_vehicle(self, &mut connection, &vehicle_id).await?;
        let locked = self
            .reservation_query()
            .find_by_portal_token_for_update(&mut connection, &dto.token)
            .await?;
        let (mut reservation, _) = open_portal(locked, &now)?;
        ensure_available(
            self,
            &mut connection,
            vehicle.id(),
            reservation.period(),
            Some(reservation.id()),
        )
        .await?;

        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new(dto.first_name, dto.last_name),
            CustomerContact::new(dto.email, dto.phone, dto.address),
            DriverLicense::new(dto.license_number, dto.license_image_url),
        );
        reservation.bind_customer(customer.id().clone(), &dto.token, &now)?;

        self.customer_modifier()
            .create(&mut connection, &customer)
            .await?;
        self.reservation_modifier()
            .update(&mut connection, &reservation)
            .await?;
        issue_contract(self, &mut connection, &reservation, &customer, &vehicle, now).await?;
        let event = ReservationEvent::CustomerBound {
            reservation_id: reservation.id().clone(),
            customer_id: customer.id().clone(),
        };
        raise(self, &mut connection, event, now).await?;
        connection.commit().await?;

        tracing::info!(reservation_id = ?reservation.id(), "customer bound through portal");
        Ok(ReservationDto::assemble(
            reservation,
            Some(vehicle.name().as_ref().clone()),
            Some(customer.name().full_name()),
        ))
    }
}

impl<T> PortalService for T where
    T: DependOnReservationQuery
        + DependOnVehicleQuery
        + DependOnCustomerModifier
        + DependOnReservationModifier
        + DependOnContractGenerator
        + DependOnContractModifier
        + DependOnNotificationModifier
{
}
