use application::transfer::{PortalReservationDto, ReservationDto};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Exhaust;
use crate::response::ReservationResponse;

#[derive(Debug, Serialize)]
pub struct PortalReservationResponse {
    reservation_id: Uuid,
    vehicle_name: String,
    license_plate: String,
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
    total_price: i64,
    #[serde(with = "time::serde::rfc3339")]
    expires_at: OffsetDateTime,
}

pub struct PortalPresenter;

impl Exhaust<PortalReservationDto> for PortalPresenter {
    type To = Json<PortalReservationResponse>;
    fn emit(&self, output: PortalReservationDto) -> Self::To {
        Json(PortalReservationResponse {
            reservation_id: output.reservation_id,
            vehicle_name: output.vehicle_name,
            license_plate: output.license_plate,
            start: output.start,
            end: output.end,
            total_price: output.total_price,
            expires_at: output.expires_at,
        })
    }
}

impl Exhaust<ReservationDto> for PortalPresenter {
    type To = ReservationResponse;
    fn emit(&self, output: ReservationDto) -> Self::To {
        ReservationResponse::from(output)
    }
}
