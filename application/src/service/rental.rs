use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::event::ReservationEvent;
use kernel::interface::query::{DependOnCustomerQuery, DependOnReservationQuery, DependOnVehicleQuery};
use kernel::interface::update::{
    DependOnLedgerModifier, DependOnNotificationModifier, DependOnReservationModifier,
    DependOnVehicleModifier, LedgerModifier, ReservationModifier, VehicleModifier,
};
use kernel::prelude::entity::{
    FinancialTransaction, FinancialTransactionId, Mileage, ReservationId, TransactionDescription,
};
use kernel::KernelError;

use crate::service::{find_customer, lock_reservation, raise};
use crate::transfer::{HandoverDto, ReservationDto, ReturnDto, ReturnReceiptDto};

#[async_trait::async_trait]
pub trait HandoverService:
    'static
    + Sync
    + Send
    + DependOnReservationQuery
    + DependOnVehicleQuery
    + DependOnReservationModifier
    + DependOnVehicleModifier
    + DependOnNotificationModifier
{
    #[tracing::instrument(skip_all, fields(reservation_id = %dto.reservation_id))]
    async fn hand_over(&self, dto: HandoverDto) -> error_stack::Result<ReservationDto, KernelError> {
        let now = OffsetDateTime::now_utc();
        let mut connection = self.database_connection().transact().await?;

        let id = ReservationId::new(dto.reservation_id);
        let (mut vehicle, mut reservation) = lock_reservation(self, &mut connection, &id).await?;

        reservation.hand_over(dto.start_mileage.map(Mileage::new))?;
        let start_mileage = reservation.start_mileage().ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable("Handover did not record mileage")
        })?;
        vehicle.hand_over(start_mileage)?;

        self.reservation_modifier()
            .update(&mut connection, &reservation)
            .await?;
        self.vehicle_modifier()
            .update(&mut connection, &vehicle)
            .await?;
        let event = ReservationEvent::HandedOver {
            reservation_id: id,
            vehicle_id: vehicle.id().clone(),
            start_mileage,
        };
        raise(self, &mut connection, event, now).await?;
        connection.commit().await?;

        Ok(ReservationDto::assemble(
            reservation,
            Some(vehicle.name().as_ref().clone()),
            None,
        ))
    }
}

impl<T> HandoverService for T where
    T: DependOnReservationQuery
        + DependOnVehicleQuery
        + DependOnReservationModifier
        + DependOnVehicleModifier
        + DependOnNotificationModifier
{
}

#[async_trait::async_trait]
pub trait ReturnService:
    'static
    + Sync
    + Send
    + DependOnReservationQuery
    + DependOnVehicleQuery
    + DependOnCustomerQuery
    + DependOnReservationModifier
    + DependOnVehicleModifier
    + DependOnLedgerModifier
    + DependOnNotificationModifier
{
    /// Closes the rental and books one income entry for the stamped price plus the mileage overage.
    #[tracing::instrument(skip_all, fields(reservation_id = %dto.reservation_id))]
    async fn return_vehicle(
        &self,
        dto: ReturnDto,
    ) -> error_stack::Result<ReturnReceiptDto, KernelError> {
        let now = OffsetDateTime::now_utc();
        let mut connection = self.database_connection().transact().await?;

        let id = ReservationId::new(dto.reservation_id);
        let (mut vehicle, mut reservation) = lock_reservation(self, &mut connection, &id).await?;

        let end_mileage = dto.end_mileage.map(Mileage::new);
        let bill = reservation.complete(end_mileage)?;
        let end_mileage = reservation.end_mileage().ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable("Return did not record mileage")
        })?;
        vehicle.take_back(end_mileage)?;

        let customer_name = match reservation.customer_id() {
            Some(customer_id) => find_customer(self, &mut connection, customer_id)
                .await?
                .name()
                .full_name(),
            None => {
                return Err(Report::new(KernelError::Internal)
                    .attach_printable("Active reservation without customer"))
            }
        };
        let amount = reservation.total_price().checked_add(*bill.overage_fee())?;
        let income = FinancialTransaction::income(
            FinancialTransactionId::new(Uuid::new_v4()),
            amount,
            now,
            TransactionDescription::new(format!(
                "Rental {} - {}",
                vehicle.name().as_ref(),
                customer_name
            )),
            Some(id.clone()),
        )?;

        self.reservation_modifier()
            .update(&mut connection, &reservation)
            .await?;
        self.vehicle_modifier()
            .update(&mut connection, &vehicle)
            .await?;
        self.ledger_modifier()
            .create(&mut connection, &income)
            .await?;
        let event = ReservationEvent::Returned {
            reservation_id: id.clone(),
            vehicle_id: vehicle.id().clone(),
            end_mileage,
            bill,
            amount,
        };
        raise(self, &mut connection, event, now).await?;
        connection.commit().await?;

        tracing::info!(amount = ?amount, overage = ?bill.overage_mileage(), "vehicle returned");
        Ok(ReturnReceiptDto::new(
            id.into(),
            income.id().clone().into(),
            (*reservation.total_price()).into(),
            &bill,
        ))
    }
}

impl<T> ReturnService for T where
    T: DependOnReservationQuery
        + DependOnVehicleQuery
        + DependOnCustomerQuery
        + DependOnReservationModifier
        + DependOnVehicleModifier
        + DependOnLedgerModifier
        + DependOnNotificationModifier
{
}
