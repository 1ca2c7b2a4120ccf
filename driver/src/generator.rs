use time::format_description::well_known::Rfc3339;

use kernel::interface::generator::{ContractDraft, ContractGenerator};
use kernel::prelude::entity::ContractText;
use kernel::prelude::policy::{FREE_KM_PER_DAY, OVERAGE_RATE_PER_KM};
use kernel::KernelError;

use error_stack::ResultExt;

#[derive(Debug, Clone, Default)]
pub struct TemplateContractGenerator;

#[async_trait::async_trait]
impl ContractGenerator for TemplateContractGenerator {
    async fn generate(
        &self,
        draft: &ContractDraft,
    ) -> error_stack::Result<ContractText, KernelError> {
        let customer = draft.customer();
        let vehicle = draft.vehicle();
        let start = draft
            .period()
            .start()
            .format(&Rfc3339)
            .change_context_lazy(|| KernelError::Internal)?;
        let end = draft
            .period()
            .end()
            .format(&Rfc3339)
            .change_context_lazy(|| KernelError::Internal)?;

        let text = format!(
            "VEHICLE RENTAL AGREEMENT\n\
             \n\
             Lessee: {name}\n\
             Address: {address}\n\
             E-mail: {email}, phone: {phone}\n\
             Driver license: {license}\n\
             \n\
             Vehicle: {vehicle} ({plate})\n\
             Odometer at signing: {mileage} km\n\
             \n\
             Rental period: {start} to {end}\n\
             Agreed price: {price}\n\
             \n\
             The rental includes {free_km} km per started day. Every additional kilometre is \
             charged at {rate} per km on return.\n\
             The vehicle is returned in the condition it was handed over in.\n",
            name = customer.name().full_name(),
            address = customer.contact().address(),
            email = customer.contact().email(),
            phone = customer.contact().phone(),
            license = customer.driver_license().number(),
            vehicle = vehicle.name().as_ref(),
            plate = vehicle.license_plate().as_ref(),
            mileage = vehicle.current_mileage().as_ref(),
            start = start,
            end = end,
            price = draft.total_price().as_ref(),
            free_km = FREE_KM_PER_DAY,
            rate = OVERAGE_RATE_PER_KM.as_ref(),
        );
        Ok(ContractText::new(text))
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use kernel::interface::generator::{ContractDraft, ContractGenerator};
    use kernel::prelude::entity::{
        Customer, CustomerContact, CustomerId, CustomerName, DriverLicense, LicensePlate,
        Mileage, Money, RateCard, ReservationPeriod, Vehicle, VehicleId, VehicleName,
        VehicleStatus,
    };
    use kernel::KernelError;

    use crate::generator::TemplateContractGenerator;

    #[tokio::test]
    async fn contract_names_both_parties() -> error_stack::Result<(), KernelError> {
        let draft = ContractDraft::new(
            Customer::new(
                CustomerId::new(Uuid::new_v4()),
                CustomerName::new("Jana", "Novak"),
                CustomerContact::new("jana@example.com", "+420 777", "Main 1"),
                DriverLicense::new("EL123456", None),
            ),
            Vehicle::new(
                VehicleId::new(Uuid::new_v4()),
                VehicleName::new("Ducato"),
                LicensePlate::new("5A1 2345"),
                VehicleStatus::Available,
                RateCard::new(Money::new(500), Money::new(900), Money::new(1200)),
                Mileage::new(42000),
            ),
            ReservationPeriod::new(datetime!(2024-05-01 08:00 UTC), datetime!(2024-05-03 08:00 UTC))?,
            Money::new(2400),
        );
        let text = TemplateContractGenerator.generate(&draft).await?;
        let text: &String = text.as_ref();
        assert!(text.contains("Jana Novak"));
        assert!(text.contains("Ducato (5A1 2345)"));
        assert!(text.contains("2024-05-01T08:00:00Z"));
        assert!(text.contains("300 km per started day"));
        Ok(())
    }
}
