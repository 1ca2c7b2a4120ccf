use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Customer;
use crate::KernelError;

#[async_trait::async_trait]
pub trait CustomerModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnCustomerModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CustomerModifier: CustomerModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn customer_modifier(&self) -> &Self::CustomerModifier;
}
