use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::event::ReservationEvent;
use kernel::interface::query::{
    DependOnNotificationQuery, DependOnReservationQuery, NotificationQuery, ReservationQuery,
};
use kernel::interface::update::DependOnNotificationModifier;
use kernel::prelude::entity::ReservationStatus;
use kernel::prelude::policy::is_return_due_soon;
use kernel::KernelError;

use crate::service::raise;
use crate::transfer::ScanReturnAlertsDto;

#[async_trait::async_trait]
pub trait ReturnAlertService:
    'static
    + Sync
    + Send
    + DependOnReservationQuery
    + DependOnNotificationQuery
    + DependOnNotificationModifier
{
    #[tracing::instrument(skip_all, fields(now = %dto.now))]
    async fn scan_return_alerts(
        &self,
        dto: ScanReturnAlertsDto,
    ) -> error_stack::Result<Vec<Uuid>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let active = self
            .reservation_query()
            .find_by_status(&mut connection, &ReservationStatus::Active)
            .await?;
        let mut flagged = Vec::new();
        for reservation in active
            .iter()
            .filter(|reservation| is_return_due_soon(reservation, &dto.now, &dto.lookahead))
        {
            let already_flagged = self
                .notification_query()
                .find_by_reservation_id(&mut connection, reservation.id())
                .await?
                .iter()
                .any(|notification| notification.event().is_return_due_soon());
            if already_flagged {
                continue;
            }
            let event = ReservationEvent::ReturnDueSoon {
                reservation_id: reservation.id().clone(),
                vehicle_id: reservation.vehicle_id().clone(),
                end: *reservation.period().end(),
            };
            raise(self, &mut connection, event, dto.now).await?;
            flagged.push(reservation.id().clone().into());
        }
        connection.commit().await?;

        if !flagged.is_empty() {
            tracing::info!(count = flagged.len(), "return alerts raised");
        }
        Ok(flagged)
    }
}

impl<T> ReturnAlertService for T where
    T: DependOnReservationQuery + DependOnNotificationQuery + DependOnNotificationModifier
{
}
