use application::transfer::{FinancialTransactionDto, LedgerSummaryDto};
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::{ExpenseCategory, TransactionKind};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct FinancialTransactionResponse {
    id: Uuid,
    kind: TransactionKind,
    amount: i64,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    description: String,
    reservation_id: Option<Uuid>,
    category: Option<ExpenseCategory>,
}

impl From<FinancialTransactionDto> for FinancialTransactionResponse {
    fn from(value: FinancialTransactionDto) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            amount: value.amount,
            date: value.date,
            description: value.description,
            reservation_id: value.reservation_id,
            category: value.category,
        }
    }
}

impl IntoResponse for FinancialTransactionResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct LedgerSummaryResponse {
    total_income: i64,
    total_expense: i64,
    balance: i64,
}

impl From<LedgerSummaryDto> for LedgerSummaryResponse {
    fn from(value: LedgerSummaryDto) -> Self {
        Self {
            total_income: value.total_income,
            total_expense: value.total_expense,
            balance: value.balance,
        }
    }
}

pub struct LedgerPresenter;

impl Exhaust<FinancialTransactionDto> for LedgerPresenter {
    type To = FinancialTransactionResponse;
    fn emit(&self, output: FinancialTransactionDto) -> Self::To {
        FinancialTransactionResponse::from(output)
    }
}

impl Exhaust<Vec<FinancialTransactionDto>> for LedgerPresenter {
    type To = Json<Vec<FinancialTransactionResponse>>;
    fn emit(&self, output: Vec<FinancialTransactionDto>) -> Self::To {
        Json(
            output
                .into_iter()
                .map(FinancialTransactionResponse::from)
                .collect(),
        )
    }
}

impl Exhaust<LedgerSummaryDto> for LedgerPresenter {
    type To = Json<LedgerSummaryResponse>;
    fn emit(&self, output: LedgerSummaryDto) -> Self::To {
        Json(LedgerSummaryResponse::from(output))
    }
}
