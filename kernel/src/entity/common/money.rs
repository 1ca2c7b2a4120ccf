use std::iter::Sum;
use std::ops::{Add, Sub};

use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    Fromln,
    AsRefln,
)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn new(amount: impl Into<i64>) -> Self {
        Self(amount.into())
    }

    pub const fn from_i64(amount: i64) -> Self {
        Self(amount)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Money) -> error_stack::Result<Money, KernelError> {
        self.0.checked_add(rhs.0).map(Money).ok_or_else(|| {
            Report::new(KernelError::InvalidAmount)
                .attach_printable(format!("{} + {} is out of range", self.0, rhs.0))
        })
    }

    pub fn checked_mul(self, rhs: i64) -> error_stack::Result<Money, KernelError> {
        self.0.checked_mul(rhs).map(Money).ok_or_else(|| {
            Report::new(KernelError::InvalidAmount)
                .attach_printable(format!("{} * {} is out of range", self.0, rhs))
        })
    }
}

// Totals saturate instead of wrapping.

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod test {
    use crate::entity::Money;
    use crate::KernelError;

    #[test]
    fn overflowing_arithmetic_is_rejected() {
        let huge = Money::new(i64::MAX / 2);
        let report = huge.checked_mul(3).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidAmount));
        let report = huge.checked_add(huge).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidAmount));
        assert_eq!(Money::new(400).checked_mul(3).unwrap(), Money::new(1200));
    }

    #[test]
    fn totals_saturate() {
        let total = [Money::new(i64::MAX), Money::new(1)].into_iter().sum::<Money>();
        assert_eq!(total, Money::new(i64::MAX));
    }
}
