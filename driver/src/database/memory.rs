use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{
    Contract, ContractId, Customer, CustomerId, FinancialTransaction, Notification, Reservation,
    ReservationId, Vehicle, VehicleId,
};
use kernel::KernelError;

pub use self::{
    contract::*, customer::*, ledger::*, notification::*, reservation::*, vehicle::*,
};

mod contract;
mod customer;
mod ledger;
mod notification;
mod reservation;
mod vehicle;

#[derive(Debug, Clone, Default)]
struct InMemoryStore {
    vehicles: HashMap<VehicleId, Vehicle>,
    customers: HashMap<CustomerId, Customer>,
    reservations: HashMap<ReservationId, Reservation>,
    ledger: Vec<FinancialTransaction>,
    contracts: HashMap<ContractId, Contract>,
    notifications: Vec<Notification>,
}

/// Process-local store. One transaction runs at a time; it works on a copy of the
/// store that replaces the shared state only on commit.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<InMemoryStore>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = self.store.clone().lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryTransaction { guard, working })
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<InMemoryStore>,
    working: InMemoryStore,
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let InMemoryTransaction { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::VehicleQuery;
    use kernel::interface::update::VehicleModifier;
    use kernel::prelude::entity::{
        LicensePlate, Mileage, Money, RateCard, Vehicle, VehicleId, VehicleName, VehicleStatus,
    };
    use kernel::KernelError;

    use crate::database::{InMemoryDatabase, InMemoryVehicleRepository};

    fn vehicle() -> Vehicle {
        Vehicle::new(
            VehicleId::new(Uuid::new_v4()),
            VehicleName::new("Transit"),
            LicensePlate::new("1AB 2345"),
            VehicleStatus::Available,
            RateCard::new(Money::new(500), Money::new(900), Money::new(1200)),
            Mileage::new(0),
        )
    }

    #[tokio::test]
    async fn writes_are_published_on_commit() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let vehicle = vehicle();

        let mut con = db.transact().await?;
        InMemoryVehicleRepository.create(&mut con, &vehicle).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let found = InMemoryVehicleRepository
            .find_by_id(&mut con, vehicle.id())
            .await?;
        assert_eq!(found, Some(vehicle));
        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_discards_writes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let vehicle = vehicle();

        let mut con = db.transact().await?;
        InMemoryVehicleRepository.create(&mut con, &vehicle).await?;
        drop(con);

        let mut con = db.transact().await?;
        InMemoryVehicleRepository.create(&mut con, &vehicle()).await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        let found = InMemoryVehicleRepository.find_all(&mut con).await?;
        assert!(found.is_empty());
        Ok(())
    }
}
