use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnNotificationQuery, NotificationQuery};
use kernel::interface::update::{DependOnNotificationModifier, NotificationModifier};
use kernel::prelude::entity::NotificationId;
use kernel::KernelError;

use crate::transfer::{GetNotificationsDto, MarkNotificationReadDto, NotificationDto};

#[async_trait::async_trait]
pub trait GetNotificationService: 'static + Sync + Send + DependOnNotificationQuery {
    async fn get_notifications(
        &self,
        dto: GetNotificationsDto,
    ) -> error_stack::Result<Vec<NotificationDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let notifications = self
            .notification_query()
            .find_all(&mut connection, dto.unread_only, dto.since.as_ref())
            .await?;
        Ok(notifications
            .into_iter()
            .map(NotificationDto::from)
            .collect())
    }
}

impl<T> GetNotificationService for T where T: DependOnNotificationQuery {}

#[async_trait::async_trait]
pub trait ReadNotificationService:
    'static + Sync + Send + DependOnNotificationQuery + DependOnNotificationModifier
{
    async fn mark_notification_read(
        &self,
        dto: MarkNotificationReadDto,
    ) -> error_stack::Result<NotificationDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = NotificationId::new(dto.id);
        let mut notification = self
            .notification_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Notification {} not found", dto.id))
            })?;
        if !notification.is_read() {
            self.notification_modifier()
                .mark_read(&mut connection, &id)
                .await?;
            notification.mark_read();
        }
        connection.commit().await?;

        Ok(NotificationDto::from(notification))
    }

    async fn mark_all_notifications_read(&self) -> error_stack::Result<u64, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let changed = self
            .notification_modifier()
            .mark_all_read(&mut connection)
            .await?;
        connection.commit().await?;

        tracing::debug!(changed, "notifications marked read");
        Ok(changed)
    }
}

impl<T> ReadNotificationService for T where
    T: DependOnNotificationQuery + DependOnNotificationModifier
{
}
