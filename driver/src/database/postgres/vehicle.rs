use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::VehicleQuery;
use kernel::interface::update::VehicleModifier;
use kernel::prelude::entity::{
    LicensePlate, Mileage, Money, RateCard, Vehicle, VehicleId, VehicleName, VehicleStatus,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresVehicleRepository;

#[async_trait::async_trait]
impl VehicleQuery for PostgresVehicleRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &VehicleId,
    ) -> error_stack::Result<Option<Vehicle>, KernelError> {
        PgVehicleInternal::find_by_id(con, id, false).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &VehicleId,
    ) -> error_stack::Result<Option<Vehicle>, KernelError> {
        PgVehicleInternal::find_by_id(con, id, true).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Vehicle>, KernelError> {
        PgVehicleInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl VehicleModifier for PostgresVehicleRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        vehicle: &Vehicle,
    ) -> error_stack::Result<(), KernelError> {
        PgVehicleInternal::create(con, vehicle).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        vehicle: &Vehicle,
    ) -> error_stack::Result<(), KernelError> {
        PgVehicleInternal::update(con, vehicle).await
    }
}

#[derive(sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    name: String,
    license_plate: String,
    status: String,
    rate_4h: i64,
    rate_12h: i64,
    daily_rate: i64,
    current_mileage: i64,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: VehicleRow) -> Result<Self, Self::Error> {
        Ok(Vehicle::new(
            VehicleId::new(value.id),
            VehicleName::new(value.name),
            LicensePlate::new(value.license_plate),
            VehicleStatus::try_from(value.status.as_str())?,
            RateCard::new(
                Money::new(value.rate_4h),
                Money::new(value.rate_12h),
                Money::new(value.daily_rate),
            ),
            Mileage::new(value.current_mileage),
        ))
    }
}

pub(in crate::database) struct PgVehicleInternal;

impl PgVehicleInternal {
    #[tracing::instrument(skip(con), level = "debug")]
    async fn find_by_id(
        con: &mut PgConnection,
        id: &VehicleId,
        for_update: bool,
    ) -> error_stack::Result<Option<Vehicle>, KernelError> {
        // language=postgresql
        let query = if for_update {
            r#"
            SELECT id, name, license_plate, status, rate_4h, rate_12h, daily_rate, current_mileage
            FROM vehicles
            WHERE id = $1
            FOR UPDATE
            "#
        } else {
            r#"
            SELECT id, name, license_plate, status, rate_4h, rate_12h, daily_rate, current_mileage
            FROM vehicles
            WHERE id = $1
            "#
        };
        let row = sqlx::query_as::<_, VehicleRow>(query)
            .bind(id.as_ref())
            .fetch_optional(con)
            .await
            .convert_error()?;
        row.map(Vehicle::try_from).transpose()
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Vehicle>, KernelError> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            // language=postgresql
            r#"
            SELECT id, name, license_plate, status, rate_4h, rate_12h, daily_rate, current_mileage
            FROM vehicles
            ORDER BY name, license_plate
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn create(con: &mut PgConnection, vehicle: &Vehicle) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO vehicles (id, name, license_plate, status, rate_4h, rate_12h, daily_rate, current_mileage)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(vehicle.id().as_ref())
        .bind(vehicle.name().as_ref())
        .bind(vehicle.license_plate().as_ref())
        .bind(vehicle.status().as_str())
        .bind(vehicle.rate_card().rate_4h().as_ref())
        .bind(vehicle.rate_card().rate_12h().as_ref())
        .bind(vehicle.rate_card().daily_rate().as_ref())
        .bind(vehicle.current_mileage().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, vehicle: &Vehicle) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE vehicles
            SET name = $2, license_plate = $3, status = $4, rate_4h = $5, rate_12h = $6, daily_rate = $7, current_mileage = $8
            WHERE id = $1
            "#,
        )
        .bind(vehicle.id().as_ref())
        .bind(vehicle.name().as_ref())
        .bind(vehicle.license_plate().as_ref())
        .bind(vehicle.status().as_str())
        .bind(vehicle.rate_card().rate_4h().as_ref())
        .bind(vehicle.rate_card().rate_12h().as_ref())
        .bind(vehicle.rate_card().daily_rate().as_ref())
        .bind(vehicle.current_mileage().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
