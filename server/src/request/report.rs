use application::transfer::{DashboardReportDto, TopCustomersReportDto, UtilizationReportDto};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::controller::Intake;

const UTILIZATION_WINDOW_DAYS: i64 = 30;
const TOP_CUSTOMERS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct UtilizationRequest {
    window_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TopCustomersRequest {
    limit: Option<usize>,
}

#[derive(Debug, Default)]
pub struct DashboardRequest;

pub struct ReportTransformer;

impl Intake<UtilizationRequest> for ReportTransformer {
    type To = UtilizationReportDto;
    fn emit(&self, input: UtilizationRequest) -> Self::To {
        UtilizationReportDto {
            now: OffsetDateTime::now_utc(),
            window_days: input.window_days.unwrap_or(UTILIZATION_WINDOW_DAYS),
        }
    }
}

impl Intake<TopCustomersRequest> for ReportTransformer {
    type To = TopCustomersReportDto;
    fn emit(&self, input: TopCustomersRequest) -> Self::To {
        TopCustomersReportDto {
            limit: input.limit.unwrap_or(TOP_CUSTOMERS),
        }
    }
}

impl Intake<DashboardRequest> for ReportTransformer {
    type To = DashboardReportDto;
    fn emit(&self, _: DashboardRequest) -> Self::To {
        DashboardReportDto {
            now: OffsetDateTime::now_utc(),
        }
    }
}
