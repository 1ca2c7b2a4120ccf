use application::transfer::{
    CheckAvailabilityDto, CreateQuoteDto, CreateVehicleDto, GetVehicleDto, SetMaintenanceDto,
    UpdateVehicleDto,
};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    name: String,
    license_plate: String,
    #[serde(default)]
    rate_4h: i64,
    #[serde(default)]
    rate_12h: i64,
    daily_rate: i64,
    #[serde(default)]
    current_mileage: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVehicleRequest {
    name: String,
    license_plate: String,
    #[serde(default)]
    rate_4h: i64,
    #[serde(default)]
    rate_12h: i64,
    daily_rate: i64,
}

#[derive(Debug, Deserialize)]
pub struct MaintenanceRequest {
    maintenance: bool,
}

#[derive(Debug)]
pub struct GetVehicleRequest {
    id: Uuid,
}

impl GetVehicleRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
    excluding_reservation_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    vehicle_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
}

pub struct VehicleTransformer;

impl Intake<CreateVehicleRequest> for VehicleTransformer {
    type To = CreateVehicleDto;
    fn emit(&self, input: CreateVehicleRequest) -> Self::To {
        CreateVehicleDto {
            name: input.name,
            license_plate: input.license_plate,
            rate_4h: input.rate_4h,
            rate_12h: input.rate_12h,
            daily_rate: input.daily_rate,
            current_mileage: input.current_mileage,
        }
    }
}

impl Intake<(Uuid, UpdateVehicleRequest)> for VehicleTransformer {
    type To = UpdateVehicleDto;
    fn emit(&self, input: (Uuid, UpdateVehicleRequest)) -> Self::To {
        let (id, input) = input;
        UpdateVehicleDto {
            id,
            name: input.name,
            license_plate: input.license_plate,
            rate_4h: input.rate_4h,
            rate_12h: input.rate_12h,
            daily_rate: input.daily_rate,
        }
    }
}

impl Intake<(Uuid, MaintenanceRequest)> for VehicleTransformer {
    type To = SetMaintenanceDto;
    fn emit(&self, input: (Uuid, MaintenanceRequest)) -> Self::To {
        let (id, input) = input;
        SetMaintenanceDto {
            id,
            maintenance: input.maintenance,
        }
    }
}

impl Intake<GetVehicleRequest> for VehicleTransformer {
    type To = GetVehicleDto;
    fn emit(&self, input: GetVehicleRequest) -> Self::To {
        GetVehicleDto { id: input.id }
    }
}

impl Intake<(Uuid, AvailabilityRequest)> for VehicleTransformer {
    type To = CheckAvailabilityDto;
    fn emit(&self, input: (Uuid, AvailabilityRequest)) -> Self::To {
        let (vehicle_id, input) = input;
        CheckAvailabilityDto {
            vehicle_id,
            start: input.start,
            end: input.end,
            excluding_reservation_id: input.excluding_reservation_id,
        }
    }
}

impl Intake<QuoteRequest> for VehicleTransformer {
    type To = CreateQuoteDto;
    fn emit(&self, input: QuoteRequest) -> Self::To {
        CreateQuoteDto {
            vehicle_id: input.vehicle_id,
            start: input.start,
            end: input.end,
        }
    }
}
