use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Notification, NotificationId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait NotificationModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        notification: &Notification,
    ) -> error_stack::Result<(), KernelError>;
    async fn mark_read(
        &self,
        con: &mut Self::Transaction,
        id: &NotificationId,
    ) -> error_stack::Result<(), KernelError>;
    /// Returns how many notifications changed state.
    async fn mark_all_read(&self, con: &mut Self::Transaction)
        -> error_stack::Result<u64, KernelError>;
}

pub trait DependOnNotificationModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type NotificationModifier: NotificationModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn notification_modifier(&self) -> &Self::NotificationModifier;
}
