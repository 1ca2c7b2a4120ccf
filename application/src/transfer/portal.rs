use time::OffsetDateTime;
use uuid::Uuid;

pub struct LookupPortalDto {
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct PortalReservationDto {
    pub reservation_id: Uuid,
    pub vehicle_name: String,
    pub license_plate: String,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    pub total_price: i64,
    pub expires_at: OffsetDateTime,
}

pub struct SubmitPortalDto {
    pub token: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub license_number: String,
    pub license_image_url: Option<String>,
}
