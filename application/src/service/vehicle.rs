use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnReservationQuery, DependOnVehicleQuery, ReservationQuery, VehicleQuery,
};
use kernel::interface::update::{DependOnVehicleModifier, VehicleModifier};
use kernel::prelude::entity::{
    LicensePlate, Mileage, Money, RateCard, ReservationId, ReservationPeriod, Vehicle, VehicleId,
    VehicleName, VehicleStatus,
};
use kernel::prelude::policy::{is_available, quote};
use kernel::KernelError;

use crate::service::{find_vehicle, lock_vehicle};
use crate::transfer::{
    CheckAvailabilityDto, CreateQuoteDto, CreateVehicleDto, GetVehicleDto, QuoteDto,
    SetMaintenanceDto, UpdateVehicleDto, VehicleDto,
};

fn rate_card(
    rate_4h: i64,
    rate_12h: i64,
    daily_rate: i64,
) -> error_stack::Result<RateCard, KernelError> {
    let rates = [rate_4h, rate_12h, daily_rate];
    if rates.iter().any(|rate| *rate < 0) {
        return Err(Report::new(KernelError::InvalidAmount)
            .attach_printable(format!("Rates must not be negative: {rates:?}")));
    }
    Ok(RateCard::new(
        Money::new(rate_4h),
        Money::new(rate_12h),
        Money::new(daily_rate),
    ))
}

#[async_trait::async_trait]
pub trait GetVehicleService: 'static + Sync + Send + DependOnVehicleQuery {
    async fn get_vehicle(
        &self,
        dto: GetVehicleDto,
    ) -> error_stack::Result<Option<VehicleDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = VehicleId::new(dto.id);
        let vehicle = self.vehicle_query().find_by_id(&mut connection, &id).await?;
        Ok(vehicle.map(VehicleDto::from))
    }

    async fn get_all_vehicles(&self) -> error_stack::Result<Vec<VehicleDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let vehicles = self.vehicle_query().find_all(&mut connection).await?;
        Ok(vehicles.into_iter().map(VehicleDto::from).collect())
    }
}

impl<T> GetVehicleService for T where T: DependOnVehicleQuery {}

#[async_trait::async_trait]
pub trait CreateVehicleService: 'static + Sync + Send + DependOnVehicleModifier {
    #[tracing::instrument(skip_all, fields(license_plate = %dto.license_plate))]
    async fn create_vehicle(
        &self,
        dto: CreateVehicleDto,
    ) -> error_stack::Result<VehicleDto, KernelError> {
        if dto.current_mileage < 0 {
            return Err(Report::new(KernelError::InvalidMileage)
                .attach_printable("Odometer reading must not be negative"));
        }
        let rate_card = rate_card(dto.rate_4h, dto.rate_12h, dto.daily_rate)?;
        let mut connection = self.database_connection().transact().await?;

        let vehicle = Vehicle::new(
            VehicleId::new(Uuid::new_v4()),
            VehicleName::new(dto.name),
            LicensePlate::new(dto.license_plate),
            VehicleStatus::Available,
            rate_card,
            Mileage::new(dto.current_mileage),
        );
        self.vehicle_modifier()
            .create(&mut connection, &vehicle)
            .await?;
        connection.commit().await?;

        tracing::info!(vehicle_id = ?vehicle.id(), "vehicle registered");
        Ok(VehicleDto::from(vehicle))
    }
}

impl<T> CreateVehicleService for T where T: DependOnVehicleModifier {}

#[async_trait::async_trait]
pub trait UpdateVehicleService:
    'static + Sync + Send + DependOnVehicleQuery + DependOnVehicleModifier
{
    async fn update_vehicle(
        &self,
        dto: UpdateVehicleDto,
    ) -> error_stack::Result<VehicleDto, KernelError> {
        let rate_card = rate_card(dto.rate_4h, dto.rate_12h, dto.daily_rate)?;
        let mut connection = self.database_connection().transact().await?;

        let mut vehicle = lock_vehicle(self, &mut connection, &VehicleId::new(dto.id)).await?;
        vehicle.revise(
            VehicleName::new(dto.name),
            LicensePlate::new(dto.license_plate),
            rate_card,
        );
        self.vehicle_modifier()
            .update(&mut connection, &vehicle)
            .await?;
        connection.commit().await?;

        Ok(VehicleDto::from(vehicle))
    }

    #[tracing::instrument(skip_all, fields(vehicle_id = %dto.id, maintenance = dto.maintenance))]
    async fn set_maintenance(
        &self,
        dto: SetMaintenanceDto,
    ) -> error_stack::Result<VehicleDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let mut vehicle = lock_vehicle(self, &mut connection, &VehicleId::new(dto.id)).await?;
        if dto.maintenance {
            vehicle.send_to_maintenance()?;
        } else {
            vehicle.release_from_maintenance()?;
        }
        self.vehicle_modifier()
            .update(&mut connection, &vehicle)
            .await?;
        connection.commit().await?;

        Ok(VehicleDto::from(vehicle))
    }
}

impl<T> UpdateVehicleService for T where T: DependOnVehicleQuery + DependOnVehicleModifier {}

#[async_trait::async_trait]
pub trait AvailabilityService:
    'static + Sync + Send + DependOnVehicleQuery + DependOnReservationQuery
{
    async fn check_availability(
        &self,
        dto: CheckAvailabilityDto,
    ) -> error_stack::Result<bool, KernelError> {
        let period = ReservationPeriod::new(dto.start, dto.end)?;
        let mut connection = self.database_connection().transact().await?;

        let vehicle_id = VehicleId::new(dto.vehicle_id);
        find_vehicle(self, &mut connection, &vehicle_id).await?;
        let reservations = self
            .reservation_query()
            .find_by_vehicle_id(&mut connection, &vehicle_id)
            .await?;
        let excluding = dto.excluding_reservation_id.map(ReservationId::new);
        Ok(is_available(&reservations, &period, excluding.as_ref()))
    }

    async fn quote(&self, dto: CreateQuoteDto) -> error_stack::Result<QuoteDto, KernelError> {
        let period = ReservationPeriod::new(dto.start, dto.end)?;
        let mut connection = self.database_connection().transact().await?;

        let vehicle = find_vehicle(self, &mut connection, &VehicleId::new(dto.vehicle_id)).await?;
        Ok(QuoteDto::from(quote(vehicle.rate_card(), &period)?))
    }
}

impl<T> AvailabilityService for T where T: DependOnVehicleQuery + DependOnReservationQuery {}
