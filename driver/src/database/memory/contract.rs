use kernel::interface::query::ContractQuery;
use kernel::interface::update::ContractModifier;
use kernel::prelude::entity::{Contract, ContractId, ReservationId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryContractRepository;

#[async_trait::async_trait]
impl ContractQuery for InMemoryContractRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &ContractId,
    ) -> error_stack::Result<Option<Contract>, KernelError> {
        Ok(con.working.contracts.get(id).cloned())
    }

    async fn find_by_reservation_id(
        &self,
        con: &mut InMemoryTransaction,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<Contract>, KernelError> {
        let mut contracts = con
            .working
            .contracts
            .values()
            .filter(|contract| contract.reservation_id() == reservation_id)
            .cloned()
            .collect::<Vec<_>>();
        contracts.sort_by_key(|contract| *contract.generated_at().as_ref());
        Ok(contracts)
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Contract>, KernelError> {
        let mut contracts = con.working.contracts.values().cloned().collect::<Vec<_>>();
        contracts.sort_by_key(|contract| std::cmp::Reverse(*contract.generated_at().as_ref()));
        Ok(contracts)
    }
}

#[async_trait::async_trait]
impl ContractModifier for InMemoryContractRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        contract: &Contract,
    ) -> error_stack::Result<(), KernelError> {
        con.working
            .contracts
            .insert(contract.id().clone(), contract.clone());
        Ok(())
    }
}
