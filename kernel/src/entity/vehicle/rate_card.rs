use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::Money;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct RateCard {
    rate_4h: Money,
    rate_12h: Money,
    daily_rate: Money,
}

impl RateCard {
    pub fn new(rate_4h: Money, rate_12h: Money, daily_rate: Money) -> Self {
        Self {
            rate_4h,
            rate_12h,
            daily_rate,
        }
    }
}
