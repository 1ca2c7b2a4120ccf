use time::OffsetDateTime;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Notification, NotificationId, ReservationId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait NotificationQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &NotificationId,
    ) -> error_stack::Result<Option<Notification>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        unread_only: bool,
        since: Option<&OffsetDateTime>,
    ) -> error_stack::Result<Vec<Notification>, KernelError>;
    async fn find_by_reservation_id(
        &self,
        con: &mut Self::Transaction,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<Notification>, KernelError>;
}

pub trait DependOnNotificationQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type NotificationQuery: NotificationQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn notification_query(&self) -> &Self::NotificationQuery;
}
