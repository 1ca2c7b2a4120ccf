use std::collections::HashMap;

use error_stack::Report;
use time::{Duration, Time};

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnLedgerQuery, DependOnReservationQuery,
    DependOnVehicleQuery, LedgerFilter, LedgerQuery, ReservationQuery, VehicleQuery,
};
use kernel::prelude::entity::{
    ExpenseCategory, Money, ReservationStatus, TransactionKind, VehicleStatus,
};
use kernel::KernelError;

use crate::service::{describe_all, summarize};
use crate::transfer::{
    CustomerSpendingDto, DashboardDto, DashboardReportDto, ExpenseBreakdownDto,
    TopCustomersReportDto, UtilizationReportDto, VehicleUtilizationDto,
};

pub const MAX_UTILIZATION_WINDOW_DAYS: i64 = 366;

#[async_trait::async_trait]
pub trait ReportService:
    'static
    + Sync
    + Send
    + DependOnVehicleQuery
    + DependOnCustomerQuery
    + DependOnReservationQuery
    + DependOnLedgerQuery
{
    async fn vehicle_utilization(
        &self,
        dto: UtilizationReportDto,
    ) -> error_stack::Result<Vec<VehicleUtilizationDto>, KernelError> {
        if !(1..=MAX_UTILIZATION_WINDOW_DAYS).contains(&dto.window_days) {
            return Err(Report::new(KernelError::InvalidInterval).attach_printable(format!(
                "Window of {} days is outside 1..={MAX_UTILIZATION_WINDOW_DAYS}",
                dto.window_days
            )));
        }
        let mut connection = self.database_connection().transact().await?;

        let vehicles = self.vehicle_query().find_all(&mut connection).await?;
        let reservations = self.reservation_query().find_all(&mut connection).await?;
        let samples = (0..dto.window_days)
            .map(|day| dto.now - Duration::days(day))
            .collect::<Vec<_>>();

        Ok(vehicles
            .into_iter()
            .map(|vehicle| {
                let rentals = reservations
                    .iter()
                    .filter(|reservation| reservation.vehicle_id() == vehicle.id())
                    .filter(|reservation| {
                        matches!(
                            reservation.status(),
                            ReservationStatus::Active | ReservationStatus::Completed
                        )
                    })
                    .collect::<Vec<_>>();
                let rented_days = samples
                    .iter()
                    .filter(|instant| {
                        rentals
                            .iter()
                            .any(|reservation| reservation.period().contains(*instant))
                    })
                    .count() as i64;
                VehicleUtilizationDto {
                    vehicle_id: vehicle.id().clone().into(),
                    vehicle_name: vehicle.name().as_ref().clone(),
                    rented_days,
                }
            })
            .collect())
    }

    async fn top_customers(
        &self,
        dto: TopCustomersReportDto,
    ) -> error_stack::Result<Vec<CustomerSpendingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let filter = LedgerFilter::new(Some(TransactionKind::Income), None, None, None);
        let income = self.ledger_query().find_all(&mut connection, &filter).await?;
        let owners = self
            .reservation_query()
            .find_all(&mut connection)
            .await?
            .into_iter()
            .filter_map(|reservation| {
                let customer_id = reservation.customer_id().clone()?;
                Some((reservation.id().clone(), customer_id))
            })
            .collect::<HashMap<_, _>>();

        let mut totals = HashMap::new();
        for transaction in &income {
            let Some(customer_id) = transaction
                .reservation_id()
                .as_ref()
                .and_then(|id| owners.get(id))
            else {
                continue;
            };
            let total = totals.entry(customer_id.clone()).or_insert(Money::ZERO);
            *total = *total + *transaction.amount();
        }

        let customers = self.customer_query().find_all(&mut connection).await?;
        let mut ranking = customers
            .into_iter()
            .filter_map(|customer| {
                let total = totals.get(customer.id())?;
                Some(CustomerSpendingDto {
                    customer_id: customer.id().clone().into(),
                    customer_name: customer.name().full_name(),
                    total: (*total).into(),
                })
            })
            .collect::<Vec<_>>();
        ranking.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.customer_name.cmp(&b.customer_name))
        });
        ranking.truncate(dto.limit);
        Ok(ranking)
    }

    async fn expense_breakdown(
        &self,
    ) -> error_stack::Result<Vec<ExpenseBreakdownDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let filter = LedgerFilter::new(Some(TransactionKind::Expense), None, None, None);
        let expenses = self.ledger_query().find_all(&mut connection, &filter).await?;
        Ok(ExpenseCategory::ALL
            .iter()
            .filter_map(|category| {
                let entries = expenses
                    .iter()
                    .filter(|expense| expense.category().as_ref() == Some(category))
                    .collect::<Vec<_>>();
                if entries.is_empty() {
                    return None;
                }
                let total = entries.iter().map(|expense| *expense.amount()).sum::<Money>();
                Some(ExpenseBreakdownDto {
                    category: *category,
                    total: total.into(),
                })
            })
            .collect())
    }

    async fn dashboard(
        &self,
        dto: DashboardReportDto,
    ) -> error_stack::Result<DashboardDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let vehicles = self.vehicle_query().find_all(&mut connection).await?;
        let count = |status: VehicleStatus| {
            vehicles
                .iter()
                .filter(|vehicle| vehicle.status() == &status)
                .count()
        };
        let available_vehicles = count(VehicleStatus::Available);
        let rented_vehicles = count(VehicleStatus::Rented);
        let maintenance_vehicles = count(VehicleStatus::Maintenance);

        let reservations = self.reservation_query().find_all(&mut connection).await?;
        let active_reservations = reservations
            .iter()
            .filter(|reservation| reservation.status() == &ReservationStatus::Active)
            .count();
        let day_start = dto.now.replace_time(Time::MIDNIGHT);
        let day_end = day_start + Duration::days(1);
        let departures = reservations
            .into_iter()
            .filter(|reservation| reservation.status() == &ReservationStatus::Scheduled)
            .filter(|reservation| {
                let start = *reservation.period().start();
                day_start <= start && start < day_end
            })
            .collect::<Vec<_>>();
        let departures_today = describe_all(self, &mut connection, departures).await?;

        let ledger = self
            .ledger_query()
            .find_all(&mut connection, &LedgerFilter::default())
            .await?;

        Ok(DashboardDto {
            available_vehicles,
            rented_vehicles,
            maintenance_vehicles,
            active_reservations,
            departures_today,
            ledger: summarize(&ledger),
        })
    }
}

impl<T> ReportService for T where
    T: DependOnVehicleQuery + DependOnCustomerQuery + DependOnReservationQuery + DependOnLedgerQuery
{
}
