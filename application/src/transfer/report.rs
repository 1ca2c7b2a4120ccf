use kernel::prelude::entity::ExpenseCategory;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::transfer::{LedgerSummaryDto, ReservationDto};

pub struct UtilizationReportDto {
    pub now: OffsetDateTime,
    pub window_days: i64,
}

#[derive(Debug, Clone)]
pub struct VehicleUtilizationDto {
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub rented_days: i64,
}

pub struct TopCustomersReportDto {
    pub limit: usize,
}

#[derive(Debug, Clone)]
pub struct CustomerSpendingDto {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub total: i64,
}

#[derive(Debug, Clone)]
pub struct ExpenseBreakdownDto {
    pub category: ExpenseCategory,
    pub total: i64,
}

pub struct DashboardReportDto {
    pub now: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct DashboardDto {
    pub available_vehicles: usize,
    pub rented_vehicles: usize,
    pub maintenance_vehicles: usize,
    pub active_reservations: usize,
    pub departures_today: Vec<ReservationDto>,
    pub ledger: LedgerSummaryDto,
}
