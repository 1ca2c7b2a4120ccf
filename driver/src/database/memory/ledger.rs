use kernel::interface::query::{LedgerFilter, LedgerQuery};
use kernel::interface::update::LedgerModifier;
use kernel::prelude::entity::{FinancialTransaction, ReservationId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryLedgerRepository;

#[async_trait::async_trait]
impl LedgerQuery for InMemoryLedgerRepository {
    type Transaction = InMemoryTransaction;

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        filter: &LedgerFilter,
    ) -> error_stack::Result<Vec<FinancialTransaction>, KernelError> {
        let mut entries = con
            .working
            .ledger
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect::<Vec<_>>();
        entries.sort_by_key(|entry| *entry.date());
        Ok(entries)
    }

    async fn find_by_reservation_id(
        &self,
        con: &mut InMemoryTransaction,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<FinancialTransaction>, KernelError> {
        let filter = LedgerFilter::new(None, Some(reservation_id.clone()), None, None);
        self.find_all(con, &filter).await
    }
}

#[async_trait::async_trait]
impl LedgerModifier for InMemoryLedgerRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        transaction: &FinancialTransaction,
    ) -> error_stack::Result<(), KernelError> {
        con.working.ledger.push(transaction.clone());
        Ok(())
    }
}
