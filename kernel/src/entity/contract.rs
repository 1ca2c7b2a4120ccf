mod id;
mod text;

pub use self::{id::*, text::*};
use crate::entity::{CreatedAt, CustomerId, ReservationId, VehicleId};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Contract {
    id: ContractId,
    reservation_id: ReservationId,
    customer_id: CustomerId,
    vehicle_id: VehicleId,
    text: ContractText,
    generated_at: CreatedAt<Contract>,
}

impl Contract {
    pub fn new(
        id: ContractId,
        reservation_id: ReservationId,
        customer_id: CustomerId,
        vehicle_id: VehicleId,
        text: ContractText,
        generated_at: CreatedAt<Contract>,
    ) -> Self {
        Self {
            id,
            reservation_id,
            customer_id,
            vehicle_id,
            text,
            generated_at,
        }
    }
}
