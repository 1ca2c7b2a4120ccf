use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::query::NotificationQuery;
use kernel::interface::update::NotificationModifier;
use kernel::prelude::entity::{Notification, NotificationId, ReservationId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryNotificationRepository;

#[async_trait::async_trait]
impl NotificationQuery for InMemoryNotificationRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &NotificationId,
    ) -> error_stack::Result<Option<Notification>, KernelError> {
        Ok(con
            .working
            .notifications
            .iter()
            .find(|notification| notification.id() == id)
            .cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        unread_only: bool,
        since: Option<&OffsetDateTime>,
    ) -> error_stack::Result<Vec<Notification>, KernelError> {
        Ok(con
            .working
            .notifications
            .iter()
            .rev()
            .filter(|notification| !unread_only || !notification.is_read())
            .filter(|notification| {
                since.map_or(true, |since| notification.created_at().as_ref() > since)
            })
            .cloned()
            .collect())
    }

    async fn find_by_reservation_id(
        &self,
        con: &mut InMemoryTransaction,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<Notification>, KernelError> {
        Ok(con
            .working
            .notifications
            .iter()
            .filter(|notification| notification.event().reservation_id() == reservation_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl NotificationModifier for InMemoryNotificationRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        notification: &Notification,
    ) -> error_stack::Result<(), KernelError> {
        con.working.notifications.push(notification.clone());
        Ok(())
    }

    async fn mark_read(
        &self,
        con: &mut InMemoryTransaction,
        id: &NotificationId,
    ) -> error_stack::Result<(), KernelError> {
        let notification = con
            .working
            .notifications
            .iter_mut()
            .find(|notification| notification.id() == id)
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Notification {} not found", id.as_ref()))
            })?;
        notification.mark_read();
        Ok(())
    }

    async fn mark_all_read(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<u64, KernelError> {
        let mut changed = 0;
        for notification in con
            .working
            .notifications
            .iter_mut()
            .filter(|notification| !notification.is_read())
        {
            notification.mark_read();
            changed += 1;
        }
        Ok(changed)
    }
}
