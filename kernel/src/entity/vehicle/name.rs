use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct VehicleName(String);

impl VehicleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LicensePlate(String);

impl LicensePlate {
    pub fn new(plate: impl Into<String>) -> Self {
        Self(plate.into())
    }
}
