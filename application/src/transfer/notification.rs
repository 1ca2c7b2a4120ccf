use kernel::interface::event::ReservationEvent;
use kernel::prelude::entity::{DestructNotification, Notification};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NotificationDto {
    pub id: Uuid,
    pub event: ReservationEvent,
    pub created_at: OffsetDateTime,
    pub is_read: bool,
}

impl From<Notification> for NotificationDto {
    fn from(value: Notification) -> Self {
        let DestructNotification {
            id,
            event,
            created_at,
            is_read,
        } = value.into_destruct();
        Self {
            id: id.into(),
            event,
            created_at: created_at.into(),
            is_read,
        }
    }
}

#[derive(Default)]
pub struct GetNotificationsDto {
    pub unread_only: bool,
    pub since: Option<OffsetDateTime>,
}

pub struct MarkNotificationReadDto {
    pub id: Uuid,
}

pub struct ScanReturnAlertsDto {
    pub now: OffsetDateTime,
    pub lookahead: time::Duration,
}
