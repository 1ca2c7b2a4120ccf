use application::service::{GetLedgerService, RecordLedgerService};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{GetLedgerRequest, LedgerTransformer, RecordExpenseRequest, RecordIncomeRequest};
use crate::response::LedgerPresenter;

pub trait LedgerRouter {
    fn route_ledger(self) -> Self;
}

impl LedgerRouter for Router<AppModule> {
    fn route_ledger(self) -> Self {
        self.route(
            "/ledger",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetLedgerRequest>| async move {
                    Controller::new(LedgerTransformer, LedgerPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.get_ledger(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/ledger/summary",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetLedgerRequest>| async move {
                    Controller::new(LedgerTransformer, LedgerPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.get_ledger_summary(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/ledger/expenses",
            post(
                |State(module): State<AppModule>, Json(req): Json<RecordExpenseRequest>| async move {
                    Controller::new(LedgerTransformer, LedgerPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.record_expense(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| (StatusCode::CREATED, res))
                },
            ),
        )
        .route(
            "/ledger/incomes",
            post(
                |State(module): State<AppModule>, Json(req): Json<RecordIncomeRequest>| async move {
                    Controller::new(LedgerTransformer, LedgerPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.record_income(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| (StatusCode::CREATED, res))
                },
            ),
        )
    }
}
