mod contact;
mod id;
mod license;
mod name;

pub use self::{contact::*, id::*, license::*, name::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Customer {
    id: CustomerId,
    name: CustomerName,
    contact: CustomerContact,
    driver_license: DriverLicense,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: CustomerName,
        contact: CustomerContact,
        driver_license: DriverLicense,
    ) -> Self {
        Self {
            id,
            name,
            contact,
            driver_license,
        }
    }

    pub fn update_contact(&mut self, contact: CustomerContact) {
        self.substitute(|customer| *customer.contact = contact);
    }
}
