use application::transfer::{CreateCustomerDto, GetCustomerDto, UpdateCustomerContactDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    license_number: String,
    license_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContactRequest {
    email: String,
    phone: String,
    address: String,
}

#[derive(Debug)]
pub struct GetCustomerRequest {
    id: Uuid,
}

impl GetCustomerRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct CustomerTransformer;

impl Intake<CreateCustomerRequest> for CustomerTransformer {
    type To = CreateCustomerDto;
    fn emit(&self, input: CreateCustomerRequest) -> Self::To {
        CreateCustomerDto {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            license_number: input.license_number,
            license_image_url: input.license_image_url,
        }
    }
}

impl Intake<(Uuid, UpdateContactRequest)> for CustomerTransformer {
    type To = UpdateCustomerContactDto;
    fn emit(&self, input: (Uuid, UpdateContactRequest)) -> Self::To {
        let (id, input) = input;
        UpdateCustomerContactDto {
            id,
            email: input.email,
            phone: input.phone,
            address: input.address,
        }
    }
}

impl Intake<GetCustomerRequest> for CustomerTransformer {
    type To = GetCustomerDto;
    fn emit(&self, input: GetCustomerRequest) -> Self::To {
        GetCustomerDto { id: input.id }
    }
}
