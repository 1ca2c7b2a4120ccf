use application::transfer::{LookupPortalDto, SubmitPortalDto};
use serde::Deserialize;

use crate::controller::Intake;

#[derive(Debug)]
pub struct LookupPortalRequest {
    token: String,
}

impl LookupPortalRequest {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitPortalRequest {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    license_number: String,
    license_image_url: Option<String>,
}

pub struct PortalTransformer;

impl Intake<LookupPortalRequest> for PortalTransformer {
    type To = LookupPortalDto;
    fn emit(&self, input: LookupPortalRequest) -> Self::To {
        LookupPortalDto { token: input.token }
    }
}

impl Intake<(String, SubmitPortalRequest)> for PortalTransformer {
    type To = SubmitPortalDto;
    fn emit(&self, input: (String, SubmitPortalRequest)) -> Self::To {
        let (token, input) = input;
        SubmitPortalDto {
            token,
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
