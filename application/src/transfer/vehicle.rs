use kernel::prelude::entity::{DestructRateCard, DestructVehicle, Vehicle, VehicleStatus};
use kernel::prelude::policy::{PricingTier, Quote};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct VehicleDto {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub status: VehicleStatus,
    pub rate_4h: i64,
    pub rate_12h: i64,
    pub daily_rate: i64,
    pub current_mileage: i64,
}

impl From<Vehicle> for VehicleDto {
    fn from(value: Vehicle) -> Self {
        let DestructVehicle {
            id,
            name,
            license_plate,
            status,
            rate_card,
            current_mileage,
        } = value.into_destruct();
        let DestructRateCard {
            rate_4h,
            rate_12h,
            daily_rate,
        } = rate_card.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            license_plate: license_plate.into(),
            status,
            rate_4h: rate_4h.into(),
            rate_12h: rate_12h.into(),
            daily_rate: daily_rate.into(),
            current_mileage: current_mileage.into(),
        }
    }
}

pub struct GetVehicleDto {
    pub id: Uuid,
}

pub struct CreateVehicleDto {
    pub name: String,
    pub license_plate: String,
    pub rate_4h: i64,
    pub rate_12h: i64,
    pub daily_rate: i64,
    pub current_mileage: i64,
}

pub struct UpdateVehicleDto {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub rate_4h: i64,
    pub rate_12h: i64,
    pub daily_rate: i64,
}

pub struct SetMaintenanceDto {
    pub id: Uuid,
    pub maintenance: bool,
}

pub struct CheckAvailabilityDto {
    pub vehicle_id: Uuid,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    pub excluding_reservation_id: Option<Uuid>,
}

pub struct CreateQuoteDto {
    pub vehicle_id: Uuid,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct QuoteDto {
    pub tier: PricingTier,
    pub price: i64,
}

impl From<Quote> for QuoteDto {
    fn from(value: Quote) -> Self {
        Self {
            tier: *value.tier(),
            price: (*value.price()).into(),
        }
    }
}
