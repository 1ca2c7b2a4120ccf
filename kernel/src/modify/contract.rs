use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Contract;
use crate::KernelError;

#[async_trait::async_trait]
pub trait ContractModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        contract: &Contract,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnContractModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type ContractModifier: ContractModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn contract_modifier(&self) -> &Self::ContractModifier;
}
