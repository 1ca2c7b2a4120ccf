use application::transfer::NotificationDto;
use axum::Json;
use kernel::interface::event::ReservationEvent;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    id: Uuid,
    event: ReservationEvent,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    is_read: bool,
}

impl From<NotificationDto> for NotificationResponse {
    fn from(value: NotificationDto) -> Self {
        Self {
            id: value.id,
            event: value.event,
            created_at: value.created_at,
            is_read: value.is_read,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkedReadResponse {
    changed: u64,
}

pub struct NotificationPresenter;

impl Exhaust<NotificationDto> for NotificationPresenter {
    type To = Json<NotificationResponse>;
    fn emit(&self, output: NotificationDto) -> Self::To {
        Json(NotificationResponse::from(output))
    }
}

impl Exhaust<Vec<NotificationDto>> for NotificationPresenter {
    type To = Json<Vec<NotificationResponse>>;
    fn emit(&self, output: Vec<NotificationDto>) -> Self::To {
        Json(output.into_iter().map(NotificationResponse::from).collect())
    }
}

impl Exhaust<u64> for NotificationPresenter {
    type To = Json<MarkedReadResponse>;
    fn emit(&self, output: u64) -> Self::To {
        Json(MarkedReadResponse { changed: output })
    }
}
