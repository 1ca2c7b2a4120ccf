use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::{Mileage, Money, ReservationPeriod};
use crate::KernelError;

pub const FREE_KM_PER_DAY: i64 = 300;
pub const OVERAGE_RATE_PER_KM: Money = Money::from_i64(3);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct MileageBill {
    rental_days: i64,
    allowed_mileage: i64,
    driven_mileage: i64,
    overage_mileage: i64,
    overage_fee: Money,
}

impl MileageBill {
    pub fn calculate(
        period: &ReservationPeriod,
        start_mileage: &Mileage,
        end_mileage: &Mileage,
    ) -> error_stack::Result<Self, KernelError> {
        let driven_mileage = start_mileage.distance_to(end_mileage);
        if driven_mileage < 0 {
            return Err(Report::new(KernelError::InvalidMileage).attach_printable(format!(
                "end mileage {} is below start mileage {}",
                end_mileage.as_ref(),
                start_mileage.as_ref()
            )));
        }
        let rental_days = period.started_days().max(1);
        let allowed_mileage = rental_days.saturating_mul(FREE_KM_PER_DAY);
        let overage_mileage = (driven_mileage - allowed_mileage).max(0);
        Ok(Self {
            rental_days,
            allowed_mileage,
            driven_mileage,
            overage_mileage,
            overage_fee: OVERAGE_RATE_PER_KM.checked_mul(overage_mileage)?,
        })
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use crate::entity::{Mileage, Money, ReservationPeriod};
    use crate::policy::MileageBill;
    use crate::KernelError;

    fn two_days() -> ReservationPeriod {
        ReservationPeriod::new(datetime!(2024-05-01 08:00 UTC), datetime!(2024-05-03 08:00 UTC))
            .unwrap()
    }

    #[test]
    fn within_allowance_costs_nothing() {
        let bill =
            MileageBill::calculate(&two_days(), &Mileage::new(1000), &Mileage::new(1500)).unwrap();
        assert_eq!(bill.allowed_mileage(), &600);
        assert_eq!(bill.driven_mileage(), &500);
        assert_eq!(bill.overage_fee(), &Money::ZERO);
    }

    #[test]
    fn overage_is_charged_per_km() {
        let bill =
            MileageBill::calculate(&two_days(), &Mileage::new(1000), &Mileage::new(1800)).unwrap();
        assert_eq!(bill.driven_mileage(), &800);
        assert_eq!(bill.overage_mileage(), &200);
        assert_eq!(bill.overage_fee(), &Money::new(600));
    }

    #[test]
    fn short_rental_still_gets_one_day_allowance() {
        let period =
            ReservationPeriod::new(datetime!(2024-05-01 08:00 UTC), datetime!(2024-05-01 10:00 UTC))
                .unwrap();
        let bill = MileageBill::calculate(&period, &Mileage::new(0), &Mileage::new(350)).unwrap();
        assert_eq!(bill.rental_days(), &1);
        assert_eq!(bill.overage_fee(), &Money::new(150));
    }

    #[test]
    fn odometer_going_backwards_is_rejected() {
        let report = MileageBill::calculate(&two_days(), &Mileage::new(1000), &Mileage::new(999))
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidMileage));
    }

    #[test]
    fn overage_fee_out_of_range_is_rejected() {
        let report = MileageBill::calculate(&two_days(), &Mileage::new(0), &Mileage::new(i64::MAX))
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidAmount));
    }
}
