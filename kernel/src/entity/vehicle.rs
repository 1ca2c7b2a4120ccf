mod id;
mod name;
mod rate_card;
mod status;

pub use self::{id::*, name::*, rate_card::*, status::*};
use crate::entity::Mileage;
use crate::KernelError;
use destructure::{Destructure, Mutation};
use error_stack::Report;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Vehicle {
    id: VehicleId,
    name: VehicleName,
    license_plate: LicensePlate,
    status: VehicleStatus,
    rate_card: RateCard,
    current_mileage: Mileage,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        name: VehicleName,
        license_plate: LicensePlate,
        status: VehicleStatus,
        rate_card: RateCard,
        current_mileage: Mileage,
    ) -> Self {
        Self {
            id,
            name,
            license_plate,
            status,
            rate_card,
            current_mileage,
        }
    }

    pub fn hand_over(&mut self, start_mileage: Mileage) -> error_stack::Result<(), KernelError> {
        if self.status != VehicleStatus::Available {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Vehicle {} is {} and cannot be handed over",
                self.id.as_ref(),
                self.status
            )));
        }
        if start_mileage < self.current_mileage {
            return Err(Report::new(KernelError::InvalidMileage).attach_printable(format!(
                "Odometer cannot go backwards: {} < {}",
                start_mileage.as_ref(),
                self.current_mileage.as_ref()
            )));
        }
        self.substitute(|vehicle| {
            *vehicle.status = VehicleStatus::Rented;
            *vehicle.current_mileage = start_mileage;
        });
        Ok(())
    }

    pub fn take_back(&mut self, end_mileage: Mileage) -> error_stack::Result<(), KernelError> {
        if self.status != VehicleStatus::Rented {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Vehicle {} is {} and cannot be returned",
                self.id.as_ref(),
                self.status
            )));
        }
        if end_mileage < self.current_mileage {
            return Err(Report::new(KernelError::InvalidMileage).attach_printable(format!(
                "Odometer cannot go backwards: {} < {}",
                end_mileage.as_ref(),
                self.current_mileage.as_ref()
            )));
        }
        self.substitute(|vehicle| {
            *vehicle.status = VehicleStatus::Available;
            *vehicle.current_mileage = end_mileage;
        });
        Ok(())
    }

    pub fn revise(&mut self, name: VehicleName, license_plate: LicensePlate, rate_card: RateCard) {
        self.substitute(|vehicle| {
            *vehicle.name = name;
            *vehicle.license_plate = license_plate;
            *vehicle.rate_card = rate_card;
        });
    }

    pub fn send_to_maintenance(&mut self) -> error_stack::Result<(), KernelError> {
        if self.status != VehicleStatus::Available {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("Vehicle {} is {}", self.id.as_ref(), self.status)));
        }
        self.substitute(|vehicle| *vehicle.status = VehicleStatus::Maintenance);
        Ok(())
    }

    pub fn release_from_maintenance(&mut self) -> error_stack::Result<(), KernelError> {
        if self.status != VehicleStatus::Maintenance {
            return Err(Report::new(KernelError::InvalidTransition).attach_printable(format!(
                "Vehicle {} is not in maintenance",
                self.id.as_ref()
            )));
        }
        self.substitute(|vehicle| *vehicle.status = VehicleStatus::Available);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{
        LicensePlate, Mileage, Money, RateCard, Vehicle, VehicleId, VehicleName, VehicleStatus,
    };
    use crate::KernelError;

    fn vehicle(status: VehicleStatus) -> Vehicle {
        Vehicle::new(
            VehicleId::new(Uuid::new_v4()),
            VehicleName::new("Transit"),
            LicensePlate::new("1AB 2345"),
            status,
            RateCard::new(Money::new(500), Money::new(900), Money::new(1200)),
            Mileage::new(1000),
        )
    }

    #[test]
    fn hand_over_then_take_back() {
        let mut vehicle = vehicle(VehicleStatus::Available);
        vehicle.hand_over(Mileage::new(1000)).unwrap();
        assert_eq!(vehicle.status(), &VehicleStatus::Rented);

        vehicle.take_back(Mileage::new(1450)).unwrap();
        assert_eq!(vehicle.status(), &VehicleStatus::Available);
        assert_eq!(vehicle.current_mileage(), &Mileage::new(1450));
    }

    #[test]
    fn odometer_never_goes_backwards() {
        let mut vehicle = vehicle(VehicleStatus::Available);
        let report = vehicle.hand_over(Mileage::new(999)).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidMileage));
        assert_eq!(vehicle.current_mileage(), &Mileage::new(1000));
    }

    #[test]
    fn maintenance_blocks_handover() {
        let mut vehicle = vehicle(VehicleStatus::Available);
        vehicle.send_to_maintenance().unwrap();
        let report = vehicle.hand_over(Mileage::new(1000)).unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Conflict));

        vehicle.release_from_maintenance().unwrap();
        assert_eq!(vehicle.status(), &VehicleStatus::Available);
    }
}
