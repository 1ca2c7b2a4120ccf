use application::transfer::CustomerDto;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    license_number: String,
    license_image_url: Option<String>,
}

impl From<CustomerDto> for CustomerResponse {
    fn from(value: CustomerDto) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            address: value.address,
            license_number: value.license_number,
            license_image_url: value.license_image_url,
        }
    }
}

impl IntoResponse for CustomerResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

pub struct CustomerPresenter;

impl Exhaust<CustomerDto> for CustomerPresenter {
    type To = CustomerResponse;
    fn emit(&self, output: CustomerDto) -> Self::To {
        CustomerResponse::from(output)
    }
}

impl Exhaust<Option<CustomerDto>> for CustomerPresenter {
    type To = Option<CustomerResponse>;
    fn emit(&self, output: Option<CustomerDto>) -> Self::To {
        output.map(CustomerResponse::from)
    }
}

impl Exhaust<Vec<CustomerDto>> for CustomerPresenter {
    type To = Json<Vec<CustomerResponse>>;
    fn emit(&self, output: Vec<CustomerDto>) -> Self::To {
        Json(output.into_iter().map(CustomerResponse::from).collect())
    }
}
