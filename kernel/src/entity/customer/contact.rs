use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct CustomerContact {
    email: String,
    phone: String,
    address: String,
}

impl CustomerContact {
    pub fn new(
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}
