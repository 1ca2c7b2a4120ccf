use application::transfer::{
    CustomerSpendingDto, DashboardDto, ExpenseBreakdownDto, VehicleUtilizationDto,
};
use axum::Json;
use kernel::prelude::entity::ExpenseCategory;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;
use crate::response::{LedgerSummaryResponse, ReservationResponse};

#[derive(Debug, Serialize)]
pub struct VehicleUtilizationResponse {
    vehicle_id: Uuid,
    vehicle_name: String,
    rented_days: i64,
}

#[derive(Debug, Serialize)]
pub struct CustomerSpendingResponse {
    customer_id: Uuid,
    customer_name: String,
    total: i64,
}

#[derive(Debug, Serialize)]
pub struct ExpenseBreakdownResponse {
    category: ExpenseCategory,
    total: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    available_vehicles: usize,
    rented_vehicles: usize,
    maintenance_vehicles: usize,
    active_reservations: usize,
    departures_today: Vec<ReservationResponse>,
    ledger: LedgerSummaryResponse,
}

pub struct ReportPresenter;

impl Exhaust<Vec<VehicleUtilizationDto>> for ReportPresenter {
    type To = Json<Vec<VehicleUtilizationResponse>>;
    fn emit(&self, output: Vec<VehicleUtilizationDto>) -> Self::To {
        Json(
            output
                .into_iter()
                .map(|entry| VehicleUtilizationResponse {
                    vehicle_id: entry.vehicle_id,
                    vehicle_name: entry.vehicle_name,
                    rented_days: entry.rented_days,
                })
                .collect(),
        )
    }
}

impl Exhaust<Vec<CustomerSpendingDto>> for ReportPresenter {
    type To = Json<Vec<CustomerSpendingResponse>>;
    fn emit(&self, output: Vec<CustomerSpendingDto>) -> Self::To {
        Json(
            output
                .into_iter()
                .map(|entry| CustomerSpendingResponse {
                    customer_id: entry.customer_id,
                    customer_name: entry.customer_name,
                    total: entry.total,
                })
                .collect(),
        )
    }
}

impl Exhaust<Vec<ExpenseBreakdownDto>> for ReportPresenter {
    type To = Json<Vec<ExpenseBreakdownResponse>>;
    fn emit(&self, output: Vec<ExpenseBreakdownDto>) -> Self::To {
        Json(
            output
                .into_iter()
                .map(|entry| ExpenseBreakdownResponse {
                    category: entry.category,
                    total: entry.total,
                })
                .collect(),
        )
    }
}

impl Exhaust<DashboardDto> for ReportPresenter {
    type To = Json<DashboardResponse>;
    fn emit(&self, output: DashboardDto) -> Self::To {
        Json(DashboardResponse {
            available_vehicles: output.available_vehicles,
            rented_vehicles: output.rented_vehicles,
            maintenance_vehicles: output.maintenance_vehicles,
            active_reservations: output.active_reservations,
            departures_today: output
                .departures_today
                .into_iter()
                .map(ReservationResponse::from)
                .collect(),
            ledger: output.ledger.into(),
        })
    }
}
