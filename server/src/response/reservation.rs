use application::transfer::{
    ContractDto, PendingReservationDto, ReservationDto, ReturnReceiptDto,
};
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::ReservationStatus;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    id: Uuid,
    vehicle_id: Uuid,
    vehicle_name: Option<String>,
    customer_id: Option<Uuid>,
    customer_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
    status: ReservationStatus,
    total_price: i64,
    start_mileage: Option<i64>,
    end_mileage: Option<i64>,
    notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<ReservationDto> for ReservationResponse {
    fn from(value: ReservationDto) -> Self {
        Self {
            id: value.id,
            vehicle_id: value.vehicle_id,
            vehicle_name: value.vehicle_name,
            customer_id: value.customer_id,
            customer_name: value.customer_name,
            start: value.start,
            end: value.end,
            status: value.status,
            total_price: value.total_price,
            start_mileage: value.start_mileage,
            end_mileage: value.end_mileage,
            notes: value.notes,
            created_at: value.created_at,
        }
    }
}

impl IntoResponse for ReservationResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct PendingReservationResponse {
    reservation: ReservationResponse,
    portal_token: String,
    #[serde(with = "time::serde::rfc3339")]
    portal_token_expires_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct ReturnReceiptResponse {
    reservation_id: Uuid,
    income_id: Uuid,
    total_price: i64,
    rental_days: i64,
    allowed_mileage: i64,
    driven_mileage: i64,
    overage_mileage: i64,
    overage_fee: i64,
    amount: i64,
}

#[derive(Debug, Serialize)]
pub struct ContractResponse {
    id: Uuid,
    reservation_id: Uuid,
    customer_id: Uuid,
    vehicle_id: Uuid,
    text: String,
    #[serde(with = "time::serde::rfc3339")]
    generated_at: OffsetDateTime,
}

impl From<ContractDto> for ContractResponse {
    fn from(value: ContractDto) -> Self {
        Self {
            id: value.id,
            reservation_id: value.reservation_id,
            customer_id: value.customer_id,
            vehicle_id: value.vehicle_id,
            text: value.text,
            generated_at: value.generated_at,
        }
    }
}

impl IntoResponse for ContractResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

pub struct ReservationPresenter;

impl Exhaust<ReservationDto> for ReservationPresenter {
    type To = ReservationResponse;
    fn emit(&self, output: ReservationDto) -> Self::To {
        ReservationResponse::from(output)
    }
}

impl Exhaust<Option<ReservationDto>> for ReservationPresenter {
    type To = Option<ReservationResponse>;
    fn emit(&self, output: Option<ReservationDto>) -> Self::To {
        output.map(ReservationResponse::from)
    }
}

impl Exhaust<Vec<ReservationDto>> for ReservationPresenter {
    type To = Json<Vec<ReservationResponse>>;
    fn emit(&self, output: Vec<ReservationDto>) -> Self::To {
        Json(output.into_iter().map(ReservationResponse::from).collect())
    }
}

impl Exhaust<PendingReservationDto> for ReservationPresenter {
    type To = Json<PendingReservationResponse>;
    fn emit(&self, output: PendingReservationDto) -> Self::To {
        Json(PendingReservationResponse {
            reservation: ReservationResponse::from(output.reservation),
            portal_token: output.portal_token,
            portal_token_expires_at: output.portal_token_expires_at,
        })
    }
}

impl Exhaust<ReturnReceiptDto> for ReservationPresenter {
    type To = Json<ReturnReceiptResponse>;
    fn emit(&self, output: ReturnReceiptDto) -> Self::To {
        Json(ReturnReceiptResponse {
            reservation_id: output.reservation_id,
            income_id: output.income_id,
            total_price: output.total_price,
            rental_days: output.rental_days,
            allowed_mileage: output.allowed_mileage,
            driven_mileage: output.driven_mileage,
            overage_mileage: output.overage_mileage,
            overage_fee: output.overage_fee,
            amount: output.amount,
        })
    }
}

pub struct ContractPresenter;

impl Exhaust<ContractDto> for ContractPresenter {
    type To = ContractResponse;
    fn emit(&self, output: ContractDto) -> Self::To {
        ContractResponse::from(output)
    }
}

impl Exhaust<Option<ContractDto>> for ContractPresenter {
    type To = Option<ContractResponse>;
    fn emit(&self, output: Option<ContractDto>) -> Self::To {
        output.map(ContractResponse::from)
    }
}

impl Exhaust<Vec<ContractDto>> for ContractPresenter {
    type To = Json<Vec<ContractResponse>>;
    fn emit(&self, output: Vec<ContractDto>) -> Self::To {
        Json(output.into_iter().map(ContractResponse::from).collect())
    }
}
