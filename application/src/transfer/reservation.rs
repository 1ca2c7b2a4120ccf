use kernel::prelude::entity::{DestructReservation, Reservation, ReservationStatus};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ReservationDto {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_name: Option<String>,
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    pub status: ReservationStatus,
    pub total_price: i64,
    pub start_mileage: Option<i64>,
    pub end_mileage: Option<i64>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

impl ReservationDto {
    pub(crate) fn assemble(
        reservation: Reservation,
        vehicle_name: Option<String>,
        customer_name: Option<String>,
    ) -> Self {
        let DestructReservation {
            id,
            vehicle_id,
            customer_id,
            period,
            status,
            total_price,
            start_mileage,
            end_mileage,
            portal_token: _,
            notes,
            created_at,
        } = reservation.into_destruct();
        Self {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            vehicle_name,
            customer_id: customer_id.map(Into::into),
            customer_name,
            start: *period.start(),
            end: *period.end(),
            status,
            total_price: total_price.into(),
            start_mileage: start_mileage.map(Into::into),
            end_mileage: end_mileage.map(Into::into),
            notes: notes.map(Into::into),
            created_at: created_at.into(),
        }
    }
}

pub struct GetReservationDto {
    pub id: Uuid,
}

#[derive(Default)]
pub struct GetReservationsDto {
    pub vehicle_id: Option<Uuid>,
    pub status: Option<ReservationStatus>,
}

pub struct CreateReservationDto {
    pub vehicle_id: Uuid,
    pub customer_id: Uuid,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    pub notes: Option<String>,
}

pub struct CreatePendingReservationDto {
    pub vehicle_id: Uuid,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    pub notes: Option<String>,
    pub token_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct PendingReservationDto {
    pub reservation: ReservationDto,
    pub portal_token: String,
    pub portal_token_expires_at: OffsetDateTime,
}

pub struct RescheduleReservationDto {
    pub id: Uuid,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

pub struct CancelReservationDto {
    pub id: Uuid,
}
