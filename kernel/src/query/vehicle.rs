use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Vehicle, VehicleId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait VehicleQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &VehicleId,
    ) -> error_stack::Result<Option<Vehicle>, KernelError>;
    /// Same as `find_by_id` but holds the vehicle for the rest of the transaction.
    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &VehicleId,
    ) -> error_stack::Result<Option<Vehicle>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Vehicle>, KernelError>;
}

pub trait DependOnVehicleQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type VehicleQuery: VehicleQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn vehicle_query(&self) -> &Self::VehicleQuery;
}
