mod mileage;
mod money;
mod time;

pub use self::{mileage::*, money::*, time::*};
