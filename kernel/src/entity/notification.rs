mod id;

pub use self::id::*;
use crate::entity::CreatedAt;
use crate::event::ReservationEvent;
use destructure::{Destructure, Mutation};
use time::OffsetDateTime;
use uuid::Uuid;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Notification {
    id: NotificationId,
    event: ReservationEvent,
    created_at: CreatedAt<Notification>,
    is_read: bool,
}

impl Notification {
    pub fn new(
        id: NotificationId,
        event: ReservationEvent,
        created_at: CreatedAt<Notification>,
        is_read: bool,
    ) -> Self {
        Self {
            id,
            event,
            created_at,
            is_read,
        }
    }

    pub fn raise(event: ReservationEvent, now: OffsetDateTime) -> Self {
        Self::new(
            NotificationId::new(Uuid::new_v4()),
            event,
            CreatedAt::new(now),
            false,
        )
    }

    pub fn mark_read(&mut self) {
        self.substitute(|notification| *notification.is_read = true);
    }
}
