use vodca::References;

use crate::entity::{ContractText, Customer, Money, ReservationPeriod, Vehicle};
use crate::KernelError;

#[derive(Debug, Clone, References)]
pub struct ContractDraft {
    customer: Customer,
    vehicle: Vehicle,
    period: ReservationPeriod,
    total_price: Money,
}

impl ContractDraft {
    pub fn new(
        customer: Customer,
        vehicle: Vehicle,
        period: ReservationPeriod,
        total_price: Money,
    ) -> Self {
        Self {
            customer,
            vehicle,
            period,
            total_price,
        }
    }
}

#[async_trait::async_trait]
pub trait ContractGenerator: 'static + Sync + Send {
    async fn generate(&self, draft: &ContractDraft)
        -> error_stack::Result<ContractText, KernelError>;
}

pub trait DependOnContractGenerator: 'static + Sync + Send {
    type ContractGenerator: ContractGenerator;
    fn contract_generator(&self) -> &Self::ContractGenerator;
}
