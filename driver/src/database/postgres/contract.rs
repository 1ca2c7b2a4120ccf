use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::ContractQuery;
use kernel::interface::update::ContractModifier;
use kernel::prelude::entity::{
    Contract, ContractId, ContractText, CreatedAt, CustomerId, ReservationId, VehicleId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresContractRepository;

#[async_trait::async_trait]
impl ContractQuery for PostgresContractRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &ContractId,
    ) -> error_stack::Result<Option<Contract>, KernelError> {
        PgContractInternal::find_by_id(con, id).await
    }

    async fn find_by_reservation_id(
        &self,
        con: &mut PostgresTransaction,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<Contract>, KernelError> {
        PgContractInternal::find_by_reservation_id(con, reservation_id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Contract>, KernelError> {
        PgContractInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl ContractModifier for PostgresContractRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        contract: &Contract,
    ) -> error_stack::Result<(), KernelError> {
        PgContractInternal::create(con, contract).await
    }
}

#[derive(sqlx::FromRow)]
struct ContractRow {
    id: Uuid,
    reservation_id: Uuid,
    customer_id: Uuid,
    vehicle_id: Uuid,
    contract_text: String,
    generated_at: OffsetDateTime,
}

impl From<ContractRow> for Contract {
    fn from(value: ContractRow) -> Self {
        Contract::new(
            ContractId::new(value.id),
            ReservationId::new(value.reservation_id),
            CustomerId::new(value.customer_id),
            VehicleId::new(value.vehicle_id),
            ContractText::new(value.contract_text),
            CreatedAt::new(value.generated_at),
        )
    }
}

pub(in crate::database) struct PgContractInternal;

impl PgContractInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &ContractId,
    ) -> error_stack::Result<Option<Contract>, KernelError> {
        let row = sqlx::query_as::<_, ContractRow>(
            // language=postgresql
            r#"
            SELECT id, reservation_id, customer_id, vehicle_id, contract_text, generated_at
            FROM contracts
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Contract::from))
    }

    async fn find_by_reservation_id(
        con: &mut PgConnection,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<Contract>, KernelError> {
        let rows = sqlx::query_as::<_, ContractRow>(
            // language=postgresql
            r#"
            SELECT id, reservation_id, customer_id, vehicle_id, contract_text, generated_at
            FROM contracts
            WHERE reservation_id = $1
            ORDER BY generated_at
            "#,
        )
        .bind(reservation_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Contract::from).collect())
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Contract>, KernelError> {
        let rows = sqlx::query_as::<_, ContractRow>(
            // language=postgresql
            r#"
            SELECT id, reservation_id, customer_id, vehicle_id, contract_text, generated_at
            FROM contracts
            ORDER BY generated_at DESC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Contract::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        contract: &Contract,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO contracts (id, reservation_id, customer_id, vehicle_id, contract_text, generated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(contract.id().as_ref())
        .bind(contract.reservation_id().as_ref())
        .bind(contract.customer_id().as_ref())
        .bind(contract.vehicle_id().as_ref())
        .bind(contract.text().as_ref())
        .bind(contract.generated_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
