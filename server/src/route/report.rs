use application::service::ReportService;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{DashboardRequest, ReportTransformer, TopCustomersRequest, UtilizationRequest};
use crate::response::ReportPresenter;

pub trait ReportRouter {
    fn route_report(self) -> Self;
}

impl ReportRouter for Router<AppModule> {
    fn route_report(self) -> Self {
        self.route(
            "/reports/utilization",
            get(
                |State(module): State<AppModule>, Query(req): Query<UtilizationRequest>| async move {
                    Controller::new(ReportTransformer, ReportPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.vehicle_utilization(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reports/top-customers",
            get(
                |State(module): State<AppModule>, Query(req): Query<TopCustomersRequest>| async move {
                    Controller::new(ReportTransformer, ReportPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.top_customers(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reports/expenses",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), ReportPresenter)
                    .bypass(|| module.expense_breakdown())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/reports/dashboard",
            get(|State(module): State<AppModule>| async move {
                Controller::new(ReportTransformer, ReportPresenter)
                    .intake(DashboardRequest)
                    .handle(|dto| async move { module.dashboard(dto).await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
