use kernel::prelude::policy::MileageBill;
use uuid::Uuid;

pub struct HandoverDto {
    pub reservation_id: Uuid,
    pub start_mileage: Option<i64>,
}

pub struct ReturnDto {
    pub reservation_id: Uuid,
    pub end_mileage: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ReturnReceiptDto {
    pub reservation_id: Uuid,
    pub income_id: Uuid,
    pub total_price: i64,
    pub rental_days: i64,
    pub allowed_mileage: i64,
    pub driven_mileage: i64,
    pub overage_mileage: i64,
    pub overage_fee: i64,
    pub amount: i64,
}

impl ReturnReceiptDto {
    pub(crate) fn new(
        reservation_id: Uuid,
        income_id: Uuid,
        total_price: i64,
        bill: &MileageBill,
    ) -> Self {
        let overage_fee: i64 = (*bill.overage_fee()).into();
        Self {
            reservation_id,
            income_id,
            total_price,
            rental_days: *bill.rental_days(),
            allowed_mileage: *bill.allowed_mileage(),
            driven_mileage: *bill.driven_mileage(),
            overage_mileage: *bill.overage_mileage(),
            overage_fee,
            amount: total_price + overage_fee,
        }
    }
}
