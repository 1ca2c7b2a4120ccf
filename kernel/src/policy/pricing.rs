use serde::{Deserialize, Serialize};
use time::Duration;
use vodca::References;

use crate::entity::{Money, RateCard, ReservationPeriod};
use crate::KernelError;

const SHORT_TIER_LIMIT: Duration = Duration::hours(4);
const HALF_DAY_TIER_LIMIT: Duration = Duration::hours(12);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingTier {
    FourHours,
    TwelveHours,
    Daily { days: i64 },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, References)]
pub struct Quote {
    tier: PricingTier,
    price: Money,
}

/// Selects exactly one tier in fixed priority order. A non-positive rate skips its tier.
pub fn quote(
    rate_card: &RateCard,
    period: &ReservationPeriod,
) -> error_stack::Result<Quote, KernelError> {
    let duration = period.duration();
    if duration <= SHORT_TIER_LIMIT && rate_card.rate_4h().is_positive() {
        return Ok(Quote {
            tier: PricingTier::FourHours,
            price: *rate_card.rate_4h(),
        });
    }
    if duration <= HALF_DAY_TIER_LIMIT && rate_card.rate_12h().is_positive() {
        return Ok(Quote {
            tier: PricingTier::TwelveHours,
            price: *rate_card.rate_12h(),
        });
    }
    let days = period.started_days();
    Ok(Quote {
        tier: PricingTier::Daily { days },
        price: rate_card.daily_rate().checked_mul(days)?,
    })
}
