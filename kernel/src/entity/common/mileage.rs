use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct Mileage(i64);

impl Mileage {
    pub fn new(km: impl Into<i64>) -> Self {
        Self(km.into())
    }

    pub fn distance_to(&self, end: &Mileage) -> i64 {
        end.0.saturating_sub(self.0)
    }
}
