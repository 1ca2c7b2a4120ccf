use application::transfer::{GetNotificationsDto, MarkNotificationReadDto};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct GetNotificationsRequest {
    #[serde(default)]
    unread_only: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    since: Option<OffsetDateTime>,
}

#[derive(Debug)]
pub struct MarkReadRequest {
    id: Uuid,
}

impl MarkReadRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct NotificationTransformer;

impl Intake<GetNotificationsRequest> for NotificationTransformer {
    type To = GetNotificationsDto;
    fn emit(&self, input: GetNotificationsRequest) -> Self::To {
        GetNotificationsDto {
            unread_only: input.unread_only,
            since: input.since,
        }
    }
}

impl Intake<MarkReadRequest> for NotificationTransformer {
    type To = MarkNotificationReadDto;
    fn emit(&self, input: MarkReadRequest) -> Self::To {
        MarkNotificationReadDto { id: input.id }
    }
}
