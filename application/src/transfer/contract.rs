use kernel::prelude::entity::{Contract, DestructContract};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ContractDto {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub text: String,
    pub generated_at: OffsetDateTime,
}

impl From<Contract> for ContractDto {
    fn from(value: Contract) -> Self {
        let DestructContract {
            id,
            reservation_id,
            customer_id,
            vehicle_id,
            text,
            generated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            reservation_id: reservation_id.into(),
            customer_id: customer_id.into(),
            vehicle_id: vehicle_id.into(),
            text: text.into(),
            generated_at: generated_at.into(),
        }
    }
}

pub struct GetContractDto {
    pub id: Uuid,
}

#[derive(Default)]
pub struct GetContractsDto {
    pub reservation_id: Option<Uuid>,
}

pub struct GenerateContractDto {
    pub reservation_id: Uuid,
}
