use kernel::prelude::entity::{
    DestructFinancialTransaction, ExpenseCategory, FinancialTransaction, TransactionKind,
};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct FinancialTransactionDto {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: i64,
    pub date: OffsetDateTime,
    pub description: String,
    pub reservation_id: Option<Uuid>,
    pub category: Option<ExpenseCategory>,
}

impl From<FinancialTransaction> for FinancialTransactionDto {
    fn from(value: FinancialTransaction) -> Self {
        let DestructFinancialTransaction {
            id,
            kind,
            amount,
            date,
            description,
            reservation_id,
            category,
        } = value.into_destruct();
        Self {
            id: id.into(),
            kind,
            amount: amount.into(),
            date,
            description: description.into(),
            reservation_id: reservation_id.map(Into::into),
            category,
        }
    }
}

pub struct RecordExpenseDto {
    pub amount: i64,
    pub date: Option<OffsetDateTime>,
    pub description: String,
    pub category: ExpenseCategory,
}

pub struct RecordIncomeDto {
    pub amount: i64,
    pub date: Option<OffsetDateTime>,
    pub description: String,
    pub reservation_id: Option<Uuid>,
}

#[derive(Default)]
pub struct GetLedgerDto {
    pub kind: Option<TransactionKind>,
    pub reservation_id: Option<Uuid>,
    pub from: Option<OffsetDateTime>,
    pub until: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LedgerSummaryDto {
    pub total_income: i64,
    pub total_expense: i64,
    pub balance: i64,
}
