use error_stack::Report;

use kernel::interface::query::VehicleQuery;
use kernel::interface::update::VehicleModifier;
use kernel::prelude::entity::{Vehicle, VehicleId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryVehicleRepository;

#[async_trait::async_trait]
impl VehicleQuery for InMemoryVehicleRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &VehicleId,
    ) -> error_stack::Result<Option<Vehicle>, KernelError> {
        Ok(con.working.vehicles.get(id).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &VehicleId,
    ) -> error_stack::Result<Option<Vehicle>, KernelError> {
        // The whole store is already held by the transaction.
        self.find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Vehicle>, KernelError> {
        let mut vehicles = con.working.vehicles.values().cloned().collect::<Vec<_>>();
        vehicles.sort_by(|a, b| {
            (a.name(), a.license_plate()).cmp(&(b.name(), b.license_plate()))
        });
        Ok(vehicles)
    }
}

#[async_trait::async_trait]
impl VehicleModifier for InMemoryVehicleRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        vehicle: &Vehicle,
    ) -> error_stack::Result<(), KernelError> {
        let vehicles = &mut con.working.vehicles;
        if vehicles.contains_key(vehicle.id())
            || vehicles
                .values()
                .any(|other| other.license_plate() == vehicle.license_plate())
        {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("Vehicle {} already exists", vehicle.id().as_ref())));
        }
        vehicles.insert(vehicle.id().clone(), vehicle.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        vehicle: &Vehicle,
    ) -> error_stack::Result<(), KernelError> {
        match con.working.vehicles.get_mut(vehicle.id()) {
            Some(stored) => {
                *stored = vehicle.clone();
                Ok(())
            }
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Vehicle {} not found", vehicle.id().as_ref()))),
        }
    }
}
