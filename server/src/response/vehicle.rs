use application::transfer::{QuoteDto, VehicleDto};
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::VehicleStatus;
use kernel::prelude::policy::PricingTier;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    id: Uuid,
    name: String,
    license_plate: String,
    status: VehicleStatus,
    rate_4h: i64,
    rate_12h: i64,
    daily_rate: i64,
    current_mileage: i64,
}

impl From<VehicleDto> for VehicleResponse {
    fn from(value: VehicleDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            license_plate: value.license_plate,
            status: value.status,
            rate_4h: value.rate_4h,
            rate_12h: value.rate_12h,
            daily_rate: value.daily_rate,
            current_mileage: value.current_mileage,
        }
    }
}

impl IntoResponse for VehicleResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    available: bool,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    tier: PricingTier,
    price: i64,
}

pub struct VehiclePresenter;

impl Exhaust<VehicleDto> for VehiclePresenter {
    type To = VehicleResponse;
    fn emit(&self, output: VehicleDto) -> Self::To {
        VehicleResponse::from(output)
    }
}

impl Exhaust<Option<VehicleDto>> for VehiclePresenter {
    type To = Option<VehicleResponse>;
    fn emit(&self, output: Option<VehicleDto>) -> Self::To {
        output.map(VehicleResponse::from)
    }
}

impl Exhaust<Vec<VehicleDto>> for VehiclePresenter {
    type To = Json<Vec<VehicleResponse>>;
    fn emit(&self, output: Vec<VehicleDto>) -> Self::To {
        Json(output.into_iter().map(VehicleResponse::from).collect())
    }
}

impl Exhaust<bool> for VehiclePresenter {
    type To = Json<AvailabilityResponse>;
    fn emit(&self, output: bool) -> Self::To {
        Json(AvailabilityResponse { available: output })
    }
}

impl Exhaust<QuoteDto> for VehiclePresenter {
    type To = Json<QuoteResponse>;
    fn emit(&self, output: QuoteDto) -> Self::To {
        Json(QuoteResponse {
            tier: output.tier,
            price: output.price,
        })
    }
}
