use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct DriverLicense {
    number: String,
    image_url: Option<String>,
}

impl DriverLicense {
    pub fn new(number: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            number: number.into(),
            image_url,
        }
    }
}
