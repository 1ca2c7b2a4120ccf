use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnLedgerQuery, DependOnReservationQuery, DependOnVehicleQuery, LedgerFilter, LedgerQuery,
};
use kernel::interface::update::{DependOnLedgerModifier, LedgerModifier};
use kernel::prelude::entity::{
    FinancialTransaction, FinancialTransactionId, Money, ReservationId, ReservationStatus,
    TransactionDescription, TransactionKind,
};
use kernel::KernelError;

use crate::service::lock_reservation;
use crate::transfer::{
    FinancialTransactionDto, GetLedgerDto, LedgerSummaryDto, RecordExpenseDto, RecordIncomeDto,
};

pub(crate) fn summarize<'a>(
    transactions: impl IntoIterator<Item = &'a FinancialTransaction>,
) -> LedgerSummaryDto {
    let (income, expense) = transactions.into_iter().fold(
        (Money::ZERO, Money::ZERO),
        |(income, expense), transaction| match transaction.kind() {
            TransactionKind::Income => (income + *transaction.amount(), expense),
            TransactionKind::Expense => (income, expense + *transaction.amount()),
        },
    );
    LedgerSummaryDto {
        total_income: income.into(),
        total_expense: expense.into(),
        balance: (income - expense).into(),
    }
}

fn filter(dto: GetLedgerDto) -> LedgerFilter {
    LedgerFilter::new(
        dto.kind,
        dto.reservation_id.map(ReservationId::new),
        dto.from,
        dto.until,
    )
}

#[async_trait::async_trait]
pub trait GetLedgerService: 'static + Sync + Send + DependOnLedgerQuery {
    async fn get_ledger(
        &self,
        dto: GetLedgerDto,
    ) -> error_stack::Result<Vec<FinancialTransactionDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let transactions = self
            .ledger_query()
            .find_all(&mut connection, &filter(dto))
            .await?;
        Ok(transactions
            .into_iter()
            .map(FinancialTransactionDto::from)
            .collect())
    }

    async fn get_ledger_summary(
        &self,
        dto: GetLedgerDto,
    ) -> error_stack::Result<LedgerSummaryDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let transactions = self
            .ledger_query()
            .find_all(&mut connection, &filter(dto))
            .await?;
        Ok(summarize(&transactions))
    }
}

impl<T> GetLedgerService for T where T: DependOnLedgerQuery {}

#[async_trait::async_trait]
pub trait RecordLedgerService:
    'static
    + Sync
    + Send
    + DependOnVehicleQuery
    + DependOnReservationQuery
    + DependOnLedgerQuery
    + DependOnLedgerModifier
{
    #[tracing::instrument(skip_all, fields(category = %dto.category, amount = dto.amount))]
    async fn record_expense(
        &self,
        dto: RecordExpenseDto,
    ) -> error_stack::Result<FinancialTransactionDto, KernelError> {
        let expense = FinancialTransaction::expense(
            FinancialTransactionId::new(Uuid::new_v4()),
            Money::new(dto.amount),
            dto.date.unwrap_or_else(OffsetDateTime::now_utc),
            TransactionDescription::new(dto.description),
            dto.category,
        )?;
        let mut connection = self.database_connection().transact().await?;

        self.ledger_modifier()
            .create(&mut connection, &expense)
            .await?;
        connection.commit().await?;

        Ok(FinancialTransactionDto::from(expense))
    }

    /// Manual income such as a damage fee. A rental's own income is booked by its return,
    /// so a reservation may only be referenced when it is completed and has none yet.
    #[tracing::instrument(skip_all, fields(amount = dto.amount))]
    async fn record_income(
        &self,
        dto: RecordIncomeDto,
    ) -> error_stack::Result<FinancialTransactionDto, KernelError> {
        if dto.amount < 0 {
            return Err(Report::new(KernelError::InvalidAmount)
                .attach_printable("Income amount must not be negative"));
        }
        let mut connection = self.database_connection().transact().await?;

        let reservation_id = match dto.reservation_id {
            Some(id) => {
                let id = ReservationId::new(id);
                let (_, reservation) = lock_reservation(self, &mut connection, &id).await?;
                if reservation.status() != &ReservationStatus::Completed {
                    return Err(Report::new(KernelError::InvalidTransition).attach_printable(
                        format!("Reservation {} is {}", id.as_ref(), reservation.status()),
                    ));
                }
                let booked = self
                    .ledger_query()
                    .find_all(
                        &mut connection,
                        &LedgerFilter::new(Some(TransactionKind::Income), Some(id.clone()), None, None),
                    )
                    .await?;
                if !booked.is_empty() {
                    return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                        "Reservation {} already has an income entry",
                        id.as_ref()
                    )));
                }
                Some(id)
            }
            None => None,
        };
        let income = FinancialTransaction::income(
            FinancialTransactionId::new(Uuid::new_v4()),
            Money::new(dto.amount),
            dto.date.unwrap_or_else(OffsetDateTime::now_utc),
            TransactionDescription::new(dto.description),
            reservation_id,
        )?;
        self.ledger_modifier()
            .create(&mut connection, &income)
            .await?;
        connection.commit().await?;

        Ok(FinancialTransactionDto::from(income))
    }
}

impl<T> RecordLedgerService for T where
    T: DependOnVehicleQuery + DependOnReservationQuery + DependOnLedgerQuery + DependOnLedgerModifier
{
}
