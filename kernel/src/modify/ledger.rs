use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::FinancialTransaction;
use crate::KernelError;

#[async_trait::async_trait]
pub trait LedgerModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        transaction: &FinancialTransaction,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnLedgerModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type LedgerModifier: LedgerModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn ledger_modifier(&self) -> &Self::LedgerModifier;
}
