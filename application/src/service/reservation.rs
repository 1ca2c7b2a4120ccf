use std::collections::HashMap;

use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::event::ReservationEvent;
use kernel::interface::generator::DependOnContractGenerator;
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnReservationQuery, DependOnVehicleQuery,
    ReservationQuery, VehicleQuery,
};
use kernel::interface::update::{
    DependOnContractModifier, DependOnNotificationModifier, DependOnReservationModifier,
    ReservationModifier,
};
use kernel::prelude::entity::{
    CustomerId, PortalToken, Reservation, ReservationId, ReservationNotes, ReservationPeriod,
    VehicleId,
};
use kernel::prelude::policy::quote;
use kernel::KernelError;

use crate::service::{
    ensure_available, find_customer, issue_contract, lock_reservation, lock_vehicle, raise,
    Connection,
};
use crate::transfer::{
    CancelReservationDto, CreatePendingReservationDto, CreateReservationDto, GetReservationDto,
    GetReservationsDto, PendingReservationDto, RescheduleReservationDto, ReservationDto,
};

pub(crate) async fn describe<T>(
    module: &T,
    con: &mut Connection<T>,
    reservation: Reservation,
) -> error_stack::Result<ReservationDto, KernelError>
where
    T: DependOnVehicleQuery + DependOnCustomerQuery + ?Sized,
{
    let vehicle_name = module
        .vehicle_query()
        .find_by_id(con, reservation.vehicle_id())
        .await?
        .map(|vehicle| vehicle.name().as_ref().clone());
    let customer_name = match reservation.customer_id() {
        Some(customer_id) => module
            .customer_query()
            .find_by_id(con, customer_id)
            .await?
            .map(|customer| customer.name().full_name()),
        None => None,
    };
    Ok(ReservationDto::assemble(
        reservation,
        vehicle_name,
        customer_name,
    ))
}

pub(crate) async fn describe_all<T>(
    module: &T,
    con: &mut Connection<T>,
    reservations: Vec<Reservation>,
) -> error_stack::Result<Vec<ReservationDto>, KernelError>
where
    T: DependOnVehicleQuery + DependOnCustomerQuery + ?Sized,
{
    let vehicles = module
        .vehicle_query()
        .find_all(con)
        .await?
        .into_iter()
        .map(|vehicle| (vehicle.id().clone(), vehicle.name().as_ref().clone()))
        .collect::<HashMap<VehicleId, String>>();
    let customers = module
        .customer_query()
        .find_all(con)
        .await?
        .into_iter()
        .map(|customer| (customer.id().clone(), customer.name().full_name()))
        .collect::<HashMap<CustomerId, String>>();
    Ok(reservations
        .into_iter()
        .map(|reservation| {
            let vehicle_name = vehicles.get(reservation.vehicle_id()).cloned();
            let customer_name = reservation
                .customer_id()
                .as_ref()
                .and_then(|id| customers.get(id))
                .cloned();
            ReservationDto::assemble(reservation, vehicle_name, customer_name)
        })
        .collect())
}

fn created_event(reservation: &Reservation) -> ReservationEvent {
    ReservationEvent::Created {
        reservation_id: reservation.id().clone(),
        vehicle_id: reservation.vehicle_id().clone(),
        customer_id: reservation.customer_id().clone(),
        start: *reservation.period().start(),
        end: *reservation.period().end(),
        total_price: *reservation.total_price(),
    }
}

#[async_trait::async_trait]
pub trait GetReservationService:
    'static + Sync + Send + DependOnReservationQuery + DependOnVehicleQuery + DependOnCustomerQuery
{
    async fn get_reservation(
        &self,
        dto: GetReservationDto,
    ) -> error_stack::Result<Option<ReservationDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let reservation = self
            .reservation_query()
            .find_by_id(&mut connection, &ReservationId::new(dto.id))
            .await?;
        match reservation {
            Some(reservation) => Ok(Some(describe(self, &mut connection, reservation).await?)),
            None => Ok(None),
        }
    }

    async fn get_reservations(
        &self,
        dto: GetReservationsDto,
    ) -> error_stack::Result<Vec<ReservationDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let mut reservations = match (dto.vehicle_id, dto.status) {
            (Some(vehicle_id), _) => {
                self.reservation_query()
                    .find_by_vehicle_id(&mut connection, &VehicleId::new(vehicle_id))
                    .await?
            }
            (None, Some(status)) => {
                self.reservation_query()
                    .find_by_status(&mut connection, &status)
                    .await?
            }
            (None, None) => self.reservation_query().find_all(&mut connection).await?,
        };
        if let Some(status) = dto.status {
            reservations.retain(|reservation| reservation.status() == &status);
        }
        describe_all(self, &mut connection, reservations).await
    }
}

impl<T> GetReservationService for T where
    T: DependOnReservationQuery + DependOnVehicleQuery + DependOnCustomerQuery
{
}

#[async_trait::async_trait]
pub trait CreateReservationService:
    'static
    + Sync
    + Send
    + DependOnVehicleQuery
    + DependOnCustomerQuery
    + DependOnReservationQuery
    + DependOnReservationModifier
    + DependOnContractGenerator
    + DependOnContractModifier
    + DependOnNotificationModifier
{
    #[tracing::instrument(skip_all, fields(vehicle_id = %dto.vehicle_id, customer_id = %dto.customer_id))]
    async fn create_reservation(
        &self,
        dto: CreateReservationDto,
    ) -> error_stack::Result<ReservationDto, KernelError> {
        let period = ReservationPeriod::new(dto.start, dto.end)?;
        let now = OffsetDateTime::now_utc();
        let mut connection = self.database_connection().transact().await?;

        let vehicle_id = VehicleId::new(dto.vehicle_id);
        let vehicle = lock_vehicle(self, &mut connection, &vehicle_id).await?;
        let customer = find_customer(self, &mut connection, &CustomerId::new(dto.customer_id)).await?;
        ensure_available(self, &mut connection, &vehicle_id, &period, None).await?;

        let quote = quote(vehicle.rate_card(), &period)?;
        let reservation = Reservation::schedule(
            ReservationId::new(Uuid::new_v4()),
            vehicle_id,
            customer.id().clone(),
            period,
            *quote.price(),
            dto.notes.map(ReservationNotes::new),
            now,
        );
        self.reservation_modifier()
            .create(&mut connection, &reservation)
            .await?;
        issue_contract(self, &mut connection, &reservation, &customer, &vehicle, now).await?;
        raise(self, &mut connection, created_event(&reservation), now).await?;
        connection.commit().await?;

        tracing::info!(reservation_id = ?reservation.id(), tier = ?quote.tier(), "reservation scheduled");
        Ok(ReservationDto::assemble(
            reservation,
            Some(vehicle.name().as_ref().clone()),
            Some(customer.name().full_name()),
        ))
    }

    #[tracing::instrument(skip_all, fields(vehicle_id = %dto.vehicle_id))]
    async fn create_pending_reservation(
        &self,
        dto: CreatePendingReservationDto,
    ) -> error_stack::Result<PendingReservationDto, KernelError> {
        let period = ReservationPeriod::new(dto.start, dto.end)?;
        let now = OffsetDateTime::now_utc();
        let mut connection = self.database_connection().transact().await?;

        let vehicle_id = VehicleId::new(dto.vehicle_id);
        let vehicle = lock_vehicle(self, &mut connection, &vehicle_id).await?;
        ensure_available(self, &mut connection, &vehicle_id, &period, None).await?;

        let quote = quote(vehicle.rate_card(), &period)?;
        let token = PortalToken::generate(now, dto.token_ttl);
        let reservation = Reservation::pending(
            ReservationId::new(Uuid::new_v4()),
            vehicle_id,
            period,
            *quote.price(),
            token.clone(),
            dto.notes.map(ReservationNotes::new),
            now,
        );
        self.reservation_modifier()
            .create(&mut connection, &reservation)
            .await?;
        raise(self, &mut connection, created_event(&reservation), now).await?;
        connection.commit().await?;

        tracing::info!(reservation_id = ?reservation.id(), "reservation waiting for customer");
        Ok(PendingReservationDto {
            reservation: ReservationDto::assemble(
                reservation,
                Some(vehicle.name().as_ref().clone()),
                None,
            ),
            portal_token: token.value().clone(),
            portal_token_expires_at: *token.expires_at(),
        })
    }
}

impl<T> CreateReservationService for T where
    T: DependOnVehicleQuery
        + DependOnCustomerQuery
        + DependOnReservationQuery
        + DependOnReservationModifier
        + DependOnContractGenerator
        + DependOnContractModifier
        + DependOnNotificationModifier
{
}

#[async_trait::async_trait]
pub trait UpdateReservationService:
    'static
    + Sync
    + Send
    + DependOnVehicleQuery
    + DependOnCustomerQuery
    + DependOnReservationQuery
    + DependOnReservationModifier
    + DependOnNotificationModifier
{
    #[tracing::instrument(skip_all, fields(reservation_id = %dto.id))]
    async fn reschedule_reservation(
        &self,
        dto: RescheduleReservationDto,
    ) -> error_stack::Result<ReservationDto, KernelError> {
        let period = ReservationPeriod::new(dto.start, dto.end)?;
        let now = OffsetDateTime::now_utc();
        let mut connection = self.database_connection().transact().await?;

        let id = ReservationId::new(dto.id);
        let (vehicle, mut reservation) = lock_reservation(self, &mut connection, &id).await?;
        let quote = quote(vehicle.rate_card(), &period)?;
        reservation.reschedule(period, *quote.price())?;
        ensure_available(
            self,
            &mut connection,
            vehicle.id(),
            reservation.period(),
            Some(&id),
        )
        .await?;

        self.reservation_modifier()
            .update(&mut connection, &reservation)
            .await?;
        let event = ReservationEvent::Rescheduled {
            reservation_id: id,
            start: *reservation.period().start(),
            end: *reservation.period().end(),
            total_price: *reservation.total_price(),
        };
        raise(self, &mut connection, event, now).await?;
        let dto = describe(self, &mut connection, reservation).await?;
        connection.commit().await?;

        Ok(dto)
    }

    #[tracing::instrument(skip_all, fields(reservation_id = %dto.id))]
    async fn cancel_reservation(
        &self,
        dto: CancelReservationDto,
    ) -> error_stack::Result<ReservationDto, KernelError> {
        let now = OffsetDateTime::now_utc();
        let mut connection = self.database_connection().transact().await?;

        let id = ReservationId::new(dto.id);
        let (_, mut reservation) = lock_reservation(self, &mut connection, &id).await?;
        reservation.cancel()?;
        self.reservation_modifier()
            .update(&mut connection, &reservation)
            .await?;
        raise(
            self,
            &mut connection,
            ReservationEvent::Cancelled { reservation_id: id },
            now,
        )
        .await?;
        let dto = describe(self, &mut connection, reservation).await?;
        connection.commit().await?;

        Ok(dto)
    }
}

impl<T> UpdateReservationService for T where
    T: DependOnVehicleQuery
        + DependOnCustomerQuery
        + DependOnReservationQuery
        + DependOnReservationModifier
        + DependOnNotificationModifier
{
}
