mod alert;
mod availability;
mod mileage;
mod pricing;

pub use self::{alert::*, availability::*, mileage::*, pricing::*};
