use time::OffsetDateTime;
use vodca::References;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{FinancialTransaction, ReservationId, TransactionKind};
use crate::KernelError;

/// Ledger listing filter. `from` is inclusive and `until` exclusive.
#[derive(Debug, Clone, Default, References)]
pub struct LedgerFilter {
    kind: Option<TransactionKind>,
    reservation_id: Option<ReservationId>,
    from: Option<OffsetDateTime>,
    until: Option<OffsetDateTime>,
}

impl LedgerFilter {
    pub fn new(
        kind: Option<TransactionKind>,
        reservation_id: Option<ReservationId>,
        from: Option<OffsetDateTime>,
        until: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            kind,
            reservation_id,
            from,
            until,
        }
    }

    pub fn matches(&self, transaction: &FinancialTransaction) -> bool {
        self.kind.map_or(true, |kind| transaction.kind() == &kind)
            && self
                .reservation_id
                .as_ref()
                .map_or(true, |id| transaction.reservation_id().as_ref() == Some(id))
            && self.from.map_or(true, |from| *transaction.date() >= from)
            && self.until.map_or(true, |until| *transaction.date() < until)
    }
}

#[async_trait::async_trait]
pub trait LedgerQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        filter: &LedgerFilter,
    ) -> error_stack::Result<Vec<FinancialTransaction>, KernelError>;
    async fn find_by_reservation_id(
        &self,
        con: &mut Self::Transaction,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<FinancialTransaction>, KernelError>;
}

pub trait DependOnLedgerQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type LedgerQuery: LedgerQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn ledger_query(&self) -> &Self::LedgerQuery;
}
