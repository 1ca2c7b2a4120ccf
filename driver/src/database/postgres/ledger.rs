use sqlx::{PgConnection, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{LedgerFilter, LedgerQuery};
use kernel::interface::update::LedgerModifier;
use kernel::prelude::entity::{
    ExpenseCategory, FinancialTransaction, FinancialTransactionId, Money, ReservationId,
    TransactionDescription, TransactionKind,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresLedgerRepository;

#[async_trait::async_trait]
impl LedgerQuery for PostgresLedgerRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        filter: &LedgerFilter,
    ) -> error_stack::Result<Vec<FinancialTransaction>, KernelError> {
        PgLedgerInternal::find_all(con, filter).await
    }

    async fn find_by_reservation_id(
        &self,
        con: &mut PostgresTransaction,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<FinancialTransaction>, KernelError> {
        let filter = LedgerFilter::new(None, Some(reservation_id.clone()), None, None);
        PgLedgerInternal::find_all(con, &filter).await
    }
}

#[async_trait::async_trait]
impl LedgerModifier for PostgresLedgerRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        transaction: &FinancialTransaction,
    ) -> error_stack::Result<(), KernelError> {
        PgLedgerInternal::create(con, transaction).await
    }
}

#[derive(sqlx::FromRow)]
struct FinancialRow {
    id: Uuid,
    kind: String,
    amount: i64,
    date: OffsetDateTime,
    description: String,
    reservation_id: Option<Uuid>,
    category: Option<String>,
}

impl TryFrom<FinancialRow> for FinancialTransaction {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: FinancialRow) -> Result<Self, Self::Error> {
        let category = value
            .category
            .as_deref()
            .map(ExpenseCategory::try_from)
            .transpose()?;
        Ok(FinancialTransaction::new(
            FinancialTransactionId::new(value.id),
            TransactionKind::try_from(value.kind.as_str())?,
            Money::new(value.amount),
            value.date,
            TransactionDescription::new(value.description),
            value.reservation_id.map(ReservationId::new),
            category,
        ))
    }
}

pub(in crate::database) struct PgLedgerInternal;

impl PgLedgerInternal {
    async fn find_all(
        con: &mut PgConnection,
        filter: &LedgerFilter,
    ) -> error_stack::Result<Vec<FinancialTransaction>, KernelError> {
        // language=postgresql
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT id, kind, amount, date, description, reservation_id, category
            FROM financials
            WHERE TRUE
            "#,
        );
        if let Some(kind) = filter.kind() {
            builder.push(" AND kind = ").push_bind(kind.as_str());
        }
        if let Some(reservation_id) = filter.reservation_id() {
            builder
                .push(" AND reservation_id = ")
                .push_bind(*reservation_id.as_ref());
        }
        if let Some(from) = filter.from() {
            builder.push(" AND date >= ").push_bind(*from);
        }
        if let Some(until) = filter.until() {
            builder.push(" AND date < ").push_bind(*until);
        }
        builder.push(" ORDER BY date, id");

        let rows = builder
            .build_query_as::<FinancialRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        rows.into_iter().map(FinancialTransaction::try_from).collect()
    }

    async fn create(
        con: &mut PgConnection,
        transaction: &FinancialTransaction,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO financials (id, kind, amount, date, description, reservation_id, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(transaction.id().as_ref())
        .bind(transaction.kind().as_str())
        .bind(transaction.amount().as_ref())
        .bind(transaction.date())
        .bind(transaction.description().as_ref())
        .bind(transaction.reservation_id().as_ref().map(|id| *id.as_ref()))
        .bind(transaction.category().map(|category| category.as_str()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{LedgerFilter, LedgerQuery};
    use kernel::interface::update::LedgerModifier;
    use kernel::prelude::entity::{
        ExpenseCategory, FinancialTransaction, FinancialTransactionId, Money,
        TransactionDescription, TransactionKind,
    };
    use kernel::KernelError;

    use crate::database::postgres::ledger::PostgresLedgerRepository;
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let expense = FinancialTransaction::expense(
            FinancialTransactionId::new(Uuid::new_v4()),
            Money::new(80),
            datetime!(1999-01-01 12:00 UTC),
            TransactionDescription::new("wash"),
            ExpenseCategory::Service,
        )?;
        PostgresLedgerRepository.create(&mut con, &expense).await?;

        let filter = LedgerFilter::new(
            Some(TransactionKind::Expense),
            None,
            Some(datetime!(1999-01-01 00:00 UTC)),
            Some(datetime!(1999-01-02 00:00 UTC)),
        );
        let found = PostgresLedgerRepository.find_all(&mut con, &filter).await?;
        assert_eq!(found, vec![expense]);

        con.roll_back().await?;
        Ok(())
    }
}
