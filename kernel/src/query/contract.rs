use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Contract, ContractId, ReservationId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ContractQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &ContractId,
    ) -> error_stack::Result<Option<Contract>, KernelError>;
    async fn find_by_reservation_id(
        &self,
        con: &mut Self::Transaction,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<Contract>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Contract>, KernelError>;
}

pub trait DependOnContractQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ContractQuery: ContractQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn contract_query(&self) -> &Self::ContractQuery;
}
