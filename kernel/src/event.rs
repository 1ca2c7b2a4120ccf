use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entity::{CustomerId, Mileage, Money, ReservationId, VehicleId};
use crate::policy::MileageBill;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReservationEvent {
    Created {
        reservation_id: ReservationId,
        vehicle_id: VehicleId,
        customer_id: Option<CustomerId>,
        #[serde(with = "time::serde::rfc3339")]
        start: OffsetDateTime,
        #[serde(with = "time::serde::rfc3339")]
        end: OffsetDateTime,
        total_price: Money,
    },
    CustomerBound {
        reservation_id: ReservationId,
        customer_id: CustomerId,
    },
    Rescheduled {
        reservation_id: ReservationId,
        #[serde(with = "time::serde::rfc3339")]
        start: OffsetDateTime,
        #[serde(with = "time::serde::rfc3339")]
        end: OffsetDateTime,
        total_price: Money,
    },
    HandedOver {
        reservation_id: ReservationId,
        vehicle_id: VehicleId,
        start_mileage: Mileage,
    },
    Returned {
        reservation_id: ReservationId,
        vehicle_id: VehicleId,
        end_mileage: Mileage,
        bill: MileageBill,
        amount: Money,
    },
    Cancelled {
        reservation_id: ReservationId,
    },
    ReturnDueSoon {
        reservation_id: ReservationId,
        vehicle_id: VehicleId,
        #[serde(with = "time::serde::rfc3339")]
        end: OffsetDateTime,
    },
}

impl ReservationEvent {
    pub fn reservation_id(&self) -> &ReservationId {
        match self {
            ReservationEvent::Created { reservation_id, .. }
            | ReservationEvent::CustomerBound { reservation_id, .. }
            | ReservationEvent::Rescheduled { reservation_id, .. }
            | ReservationEvent::HandedOver { reservation_id, .. }
            | ReservationEvent::Returned { reservation_id, .. }
            | ReservationEvent::Cancelled { reservation_id }
            | ReservationEvent::ReturnDueSoon { reservation_id, .. } => reservation_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReservationEvent::Created { .. } => "created",
            ReservationEvent::CustomerBound { .. } => "customer_bound",
            ReservationEvent::Rescheduled { .. } => "rescheduled",
            ReservationEvent::HandedOver { .. } => "handed_over",
            ReservationEvent::Returned { .. } => "returned",
            ReservationEvent::Cancelled { .. } => "cancelled",
            ReservationEvent::ReturnDueSoon { .. } => "return_due_soon",
        }
    }

    pub fn is_return_due_soon(&self) -> bool {
        matches!(self, ReservationEvent::ReturnDueSoon { .. })
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::entity::{ReservationId, VehicleId};
    use crate::event::ReservationEvent;

    #[test]
    fn tagged_by_snake_case_name() {
        let event = ReservationEvent::ReturnDueSoon {
            reservation_id: ReservationId::new(Uuid::nil()),
            vehicle_id: VehicleId::new(Uuid::nil()),
            end: datetime!(2024-05-01 10:00 UTC),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.name());
        assert_eq!(json["end"], "2024-05-01T10:00:00Z");

        let back: ReservationEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
