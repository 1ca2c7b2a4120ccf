mod description;
mod id;
mod kind;

pub use self::{description::*, id::*, kind::*};
use crate::entity::{Money, ReservationId};
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct FinancialTransaction {
    id: FinancialTransactionId,
    kind: TransactionKind,
    amount: Money,
    date: OffsetDateTime,
    description: TransactionDescription,
    reservation_id: Option<ReservationId>,
    category: Option<ExpenseCategory>,
}

impl FinancialTransaction {
    pub fn new(
        id: FinancialTransactionId,
        kind: TransactionKind,
        amount: Money,
        date: OffsetDateTime,
        description: TransactionDescription,
        reservation_id: Option<ReservationId>,
        category: Option<ExpenseCategory>,
    ) -> Self {
        Self {
            id,
            kind,
            amount,
            date,
            description,
            reservation_id,
            category,
        }
    }

    pub fn income(
        id: FinancialTransactionId,
        amount: Money,
        date: OffsetDateTime,
        description: TransactionDescription,
        reservation_id: Option<ReservationId>,
    ) -> error_stack::Result<Self, KernelError> {
        ensure_non_negative(&amount)?;
        Ok(Self::new(
            id,
            TransactionKind::Income,
            amount,
            date,
            description,
            reservation_id,
            None,
        ))
    }

    pub fn expense(
        id: FinancialTransactionId,
        amount: Money,
        date: OffsetDateTime,
        description: TransactionDescription,
        category: ExpenseCategory,
    ) -> error_stack::Result<Self, KernelError> {
        ensure_non_negative(&amount)?;
        Ok(Self::new(
            id,
            TransactionKind::Expense,
            amount,
            date,
            description,
            None,
            Some(category),
        ))
    }

    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => Money::ZERO - self.amount,
        }
    }
}

fn ensure_non_negative(amount: &Money) -> error_stack::Result<(), KernelError> {
    if amount.is_negative() {
        return Err(Report::new(KernelError::InvalidAmount)
            .attach_printable(format!("Amount must not be negative: {}", amount.as_ref())));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::entity::{
        ExpenseCategory, FinancialTransaction, FinancialTransactionId, Money,
        TransactionDescription,
    };
    use crate::KernelError;

    #[test]
    fn negative_amount_is_rejected() {
        let report = FinancialTransaction::expense(
            FinancialTransactionId::new(Uuid::new_v4()),
            Money::new(-5),
            datetime!(2024-05-01 00:00 UTC),
            TransactionDescription::new("fuel"),
            ExpenseCategory::Fuel,
        )
        .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidAmount));
    }

    #[test]
    fn expense_is_signed_negative() {
        let expense = FinancialTransaction::expense(
            FinancialTransactionId::new(Uuid::new_v4()),
            Money::new(120),
            datetime!(2024-05-01 00:00 UTC),
            TransactionDescription::new("oil change"),
            ExpenseCategory::Service,
        )
        .unwrap();
        assert_eq!(expense.signed_amount(), Money::new(-120));
        assert_eq!(expense.reservation_id(), &None);
    }

    #[test]
    fn zero_income_is_allowed() {
        let income = FinancialTransaction::income(
            FinancialTransactionId::new(Uuid::new_v4()),
            Money::ZERO,
            datetime!(2024-05-01 00:00 UTC),
            TransactionDescription::new("free rental"),
            None,
        );
        assert!(income.is_ok());
    }
}
