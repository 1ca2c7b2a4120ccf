use kernel::prelude::entity::{
    Customer, DestructCustomer, DestructCustomerContact, DestructCustomerName,
    DestructDriverLicense,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CustomerDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub license_number: String,
    pub license_image_url: Option<String>,
}

impl From<Customer> for CustomerDto {
    fn from(value: Customer) -> Self {
        let DestructCustomer {
            id,
            name,
            contact,
            driver_license,
        } = value.into_destruct();
        let DestructCustomerName {
            first_name,
            last_name,
        } = name.into_destruct();
        let DestructCustomerContact {
            email,
            phone,
            address,
        } = contact.into_destruct();
        let DestructDriverLicense { number, image_url } = driver_license.into_destruct();
        Self {
            id: id.into(),
            first_name,
            last_name,
            email,
            phone,
            address,
            license_number: number,
            license_image_url: image_url,
        }
    }
}

pub struct GetCustomerDto {
    pub id: Uuid,
}

pub struct CreateCustomerDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub license_number: String,
    pub license_image_url: Option<String>,
}

pub struct UpdateCustomerContactDto {
    pub id: Uuid,
    pub email: String,
    pub phone: String,
    pub address: String,
}
