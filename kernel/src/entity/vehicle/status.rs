use std::fmt::{Display, Formatter};

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Rented,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

impl Display for VehicleStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for VehicleStatus {
    type Error = Report<KernelError>;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "available" => Ok(Self::Available),
            "rented" => Ok(Self::Rented),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown vehicle status: {value}"))),
        }
    }
}
