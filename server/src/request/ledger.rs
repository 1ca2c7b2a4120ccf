use application::transfer::{GetLedgerDto, RecordExpenseDto, RecordIncomeDto};
use kernel::prelude::entity::{ExpenseCategory, TransactionKind};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct GetLedgerRequest {
    kind: Option<TransactionKind>,
    reservation_id: Option<Uuid>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    from: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    until: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct RecordExpenseRequest {
    amount: i64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    date: Option<OffsetDateTime>,
    description: String,
    category: ExpenseCategory,
}

#[derive(Debug, Deserialize)]
pub struct RecordIncomeRequest {
    amount: i64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    date: Option<OffsetDateTime>,
    description: String,
    reservation_id: Option<Uuid>,
}

pub struct LedgerTransformer;

impl Intake<GetLedgerRequest> for LedgerTransformer {
    type To = GetLedgerDto;
    fn emit(&self, input: GetLedgerRequest) -> Self::To {
        GetLedgerDto {
            kind: input.kind,
            reservation_id: input.reservation_id,
            from: input.from,
            until: input.until,
        }
    }
}

impl Intake<RecordExpenseRequest> for LedgerTransformer {
    type To = RecordExpenseDto;
    fn emit(&self, input: RecordExpenseRequest) -> Self::To {
        RecordExpenseDto {
            amount: input.amount,
            date: input.date,
            description: input.description,
            category: input.category,
        }
    }
}

impl Intake<RecordIncomeRequest> for LedgerTransformer {
    type To = RecordIncomeDto;
    fn emit(&self, input: RecordIncomeRequest) -> Self::To {
        RecordIncomeDto {
            amount: input.amount,
            date: input.date,
            description: input.description,
            reservation_id: input.reservation_id,
        }
    }
}
