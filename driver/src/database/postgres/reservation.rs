use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::ReservationQuery;
use kernel::interface::update::ReservationModifier;
use kernel::prelude::entity::{
    CreatedAt, CustomerId, Mileage, Money, PortalToken, Reservation, ReservationId,
    ReservationNotes, ReservationPeriod, ReservationStatus, VehicleId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresReservationRepository;

#[async_trait::async_trait]
impl ReservationQuery for PostgresReservationRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        PgReservationInternal::find_by_id(con, id).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        PgReservationInternal::find_by_id_for_update(con, id).await
    }

    async fn find_by_portal_token(
        &self,
        con: &mut PostgresTransaction,
        token: &str,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        PgReservationInternal::find_by_portal_token(con, token).await
    }

    async fn find_by_portal_token_for_update(
        &self,
        con: &mut PostgresTransaction,
        token: &str,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        PgReservationInternal::find_by_portal_token_for_update(con, token).await
    }

    async fn find_by_vehicle_id(
        &self,
        con: &mut PostgresTransaction,
        vehicle_id: &VehicleId,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        PgReservationInternal::find_by_vehicle_id(con, vehicle_id).await
    }

    async fn find_by_status(
        &self,
        con: &mut PostgresTransaction,
        status: &ReservationStatus,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        PgReservationInternal::find_by_status(con, status).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        PgReservationInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl ReservationModifier for PostgresReservationRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError> {
        PgReservationInternal::create(con, reservation).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError> {
        PgReservationInternal::update(con, reservation).await
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    vehicle_id: Uuid,
    customer_id: Option<Uuid>,
    start_at: OffsetDateTime,
    end_at: OffsetDateTime,
    status: String,
    total_price: i64,
    start_mileage: Option<i64>,
    end_mileage: Option<i64>,
    portal_token: Option<String>,
    portal_token_expires_at: Option<OffsetDateTime>,
    notes: Option<String>,
    created_at: OffsetDateTime,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let portal_token = match (value.portal_token, value.portal_token_expires_at) {
            (Some(token), Some(expires_at)) => Some(PortalToken::new(token, expires_at)),
            _ => None,
        };
        Ok(Reservation::new(
            ReservationId::new(value.id),
            VehicleId::new(value.vehicle_id),
            value.customer_id.map(CustomerId::new),
            ReservationPeriod::new(value.start_at, value.end_at)?,
            ReservationStatus::try_from(value.status.as_str())?,
            Money::new(value.total_price),
            value.start_mileage.map(Mileage::new),
            value.end_mileage.map(Mileage::new),
            portal_token,
            value.notes.map(ReservationNotes::new),
            CreatedAt::new(value.created_at),
        ))
    }
}

fn into_reservations(
    rows: Vec<ReservationRow>,
) -> error_stack::Result<Vec<Reservation>, KernelError> {
    rows.into_iter().map(Reservation::try_from).collect()
}

pub(in crate::database) struct PgReservationInternal;

impl PgReservationInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        let row = sqlx::query_as::<_, ReservationRow>(
            // language=postgresql
            r#"
            SELECT id, vehicle_id, customer_id, start_at, end_at, status, total_price, start_mileage,
                   end_mileage, portal_token, portal_token_expires_at, notes, created_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Reservation::try_from).transpose()
    }

    async fn find_by_id_for_update(
        con: &mut PgConnection,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        let row = sqlx::query_as::<_, ReservationRow>(
            // language=postgresql
            r#"
            SELECT id, vehicle_id, customer_id, start_at, end_at, status, total_price, start_mileage,
                   end_mileage, portal_token, portal_token_expires_at, notes, created_at
            FROM reservations
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Reservation::try_from).transpose()
    }

    async fn find_by_portal_token(
        con: &mut PgConnection,
        token: &str,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        let row = sqlx::query_as::<_, ReservationRow>(
            // language=postgresql
            r#"
            SELECT id, vehicle_id, customer_id, start_at, end_at, status, total_price, start_mileage,
                   end_mileage, portal_token, portal_token_expires_at, notes, created_at
            FROM reservations
            WHERE portal_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Reservation::try_from).transpose()
    }

    async fn find_by_portal_token_for_update(
        con: &mut PgConnection,
        token: &str,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        let row = sqlx::query_as::<_, ReservationRow>(
            // language=postgresql
            r#"
            SELECT id, vehicle_id, customer_id, start_at, end_at, status, total_price, start_mileage,
                   end_mileage, portal_token, portal_token_expires_at, notes, created_at
            FROM reservations
            WHERE portal_token = $1
            FOR UPDATE
            "#,
        )
        .bind(token)
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Reservation::try_from).transpose()
    }

    async fn find_by_vehicle_id(
        con: &mut PgConnection,
        vehicle_id: &VehicleId,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        let rows = sqlx::query_as::<_, ReservationRow>(
            // language=postgresql
            r#"
            SELECT id, vehicle_id, customer_id, start_at, end_at, status, total_price, start_mileage,
                   end_mileage, portal_token, portal_token_expires_at, notes, created_at
            FROM reservations
            WHERE vehicle_id = $1
            ORDER BY start_at
            "#,
        )
        .bind(vehicle_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_reservations(rows)
    }

    async fn find_by_status(
        con: &mut PgConnection,
        status: &ReservationStatus,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        let rows = sqlx::query_as::<_, ReservationRow>(
            // language=postgresql
            r#"
            SELECT id, vehicle_id, customer_id, start_at, end_at, status, total_price, start_mileage,
                   end_mileage, portal_token, portal_token_expires_at, notes, created_at
            FROM reservations
            WHERE status = $1
            ORDER BY start_at
            "#,
        )
        .bind(status.as_str())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_reservations(rows)
    }

    async fn find_all(
        con: &mut PgConnection,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        let rows = sqlx::query_as::<_, ReservationRow>(
            // language=postgresql
            r#"
            SELECT id, vehicle_id, customer_id, start_at, end_at, status, total_price, start_mileage,
                   end_mileage, portal_token, portal_token_expires_at, notes, created_at
            FROM reservations
            ORDER BY start_at
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        into_reservations(rows)
    }

    async fn create(
        con: &mut PgConnection,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO reservations (id, vehicle_id, customer_id, start_at, end_at, status, total_price,
                                      start_mileage, end_mileage, portal_token, portal_token_expires_at,
                                      notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(reservation.id().as_ref())
        .bind(reservation.vehicle_id().as_ref())
        .bind(reservation.customer_id().as_ref().map(|id| *id.as_ref()))
        .bind(reservation.period().start())
        .bind(reservation.period().end())
        .bind(reservation.status().as_str())
        .bind(reservation.total_price().as_ref())
        .bind(reservation.start_mileage().map(|mileage| *mileage.as_ref()))
        .bind(reservation.end_mileage().map(|mileage| *mileage.as_ref()))
        .bind(reservation.portal_token().as_ref().map(PortalToken::value))
        .bind(reservation.portal_token().as_ref().map(PortalToken::expires_at))
        .bind(reservation.notes().as_ref().map(|notes| notes.as_ref()))
        .bind(reservation.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE reservations
            SET customer_id = $2, start_at = $3, end_at = $4, status = $5, total_price = $6,
                start_mileage = $7, end_mileage = $8, notes = $9
            WHERE id = $1
            "#,
        )
        .bind(reservation.id().as_ref())
        .bind(reservation.customer_id().as_ref().map(|id| *id.as_ref()))
        .bind(reservation.period().start())
        .bind(reservation.period().end())
        .bind(reservation.status().as_str())
        .bind(reservation.total_price().as_ref())
        .bind(reservation.start_mileage().map(|mileage| *mileage.as_ref()))
        .bind(reservation.end_mileage().map(|mileage| *mileage.as_ref()))
        .bind(reservation.notes().as_ref().map(|notes| notes.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::ReservationQuery;
    use kernel::interface::update::{ReservationModifier, VehicleModifier};
    use kernel::prelude::entity::{
        LicensePlate, Mileage, Money, PortalToken, RateCard, Reservation, ReservationId,
        ReservationPeriod, ReservationStatus, Vehicle, VehicleId, VehicleName, VehicleStatus,
    };
    use kernel::KernelError;

    use crate::database::postgres::reservation::PostgresReservationRepository;
    use crate::database::postgres::vehicle::PostgresVehicleRepository;
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let vehicle_id = VehicleId::new(Uuid::new_v4());
        let vehicle = Vehicle::new(
            vehicle_id.clone(),
            VehicleName::new("Transit"),
            LicensePlate::new(format!("R-{}", vehicle_id.as_ref())),
            VehicleStatus::Available,
            RateCard::new(Money::new(500), Money::new(900), Money::new(1200)),
            Mileage::new(0),
        );
        PostgresVehicleRepository.create(&mut con, &vehicle).await?;

        let now = datetime!(2024-05-01 00:00 UTC);
        let token = PortalToken::new(Uuid::new_v4().simple().to_string(), now + time::Duration::days(3));
        let id = ReservationId::new(Uuid::new_v4());
        let reservation = Reservation::pending(
            id.clone(),
            vehicle_id.clone(),
            ReservationPeriod::new(datetime!(2024-05-02 08:00 UTC), datetime!(2024-05-03 08:00 UTC))?,
            Money::new(1200),
            token.clone(),
            None,
            now,
        );
        PostgresReservationRepository
            .create(&mut con, &reservation)
            .await?;

        let found = PostgresReservationRepository
            .find_by_portal_token(&mut con, token.value())
            .await?;
        assert_eq!(found, Some(reservation.clone()));

        let mut reservation = reservation;
        reservation.cancel()?;
        PostgresReservationRepository
            .update(&mut con, &reservation)
            .await?;

        let found = PostgresReservationRepository
            .find_by_vehicle_id(&mut con, &vehicle_id)
            .await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status(), &ReservationStatus::Cancelled);

        con.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn locked_reservation_waits_for_holder() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;

        let mut setup = db.transact().await?;
        let vehicle_id = VehicleId::new(Uuid::new_v4());
        let vehicle = Vehicle::new(
            vehicle_id.clone(),
            VehicleName::new("Sprinter"),
            LicensePlate::new(format!("L-{}", vehicle_id.as_ref())),
            VehicleStatus::Available,
            RateCard::new(Money::new(500), Money::new(900), Money::new(1200)),
            Mileage::new(0),
        );
        PostgresVehicleRepository.create(&mut setup, &vehicle).await?;
        let now = datetime!(2024-06-01 00:00 UTC);
        let id = ReservationId::new(Uuid::new_v4());
        let reservation = Reservation::pending(
            id.clone(),
            vehicle_id,
            ReservationPeriod::new(datetime!(2024-06-02 08:00 UTC), datetime!(2024-06-03 08:00 UTC))?,
            Money::new(1200),
            PortalToken::new(Uuid::new_v4().simple().to_string(), now + time::Duration::days(3)),
            None,
            now,
        );
        PostgresReservationRepository
            .create(&mut setup, &reservation)
            .await?;
        setup.commit().await?;

        let mut holder = db.transact().await?;
        let mut held = PostgresReservationRepository
            .find_by_id_for_update(&mut holder, &id)
            .await?
            .unwrap();

        let waiter = tokio::spawn({
            let db = db.clone();
            let id = id.clone();
            async move {
                let mut con = db.transact().await?;
                let seen = PostgresReservationRepository
                    .find_by_id_for_update(&mut con, &id)
                    .await?;
                con.roll_back().await?;
                Ok::<_, error_stack::Report<KernelError>>(seen)
            }
        });
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        assert!(!waiter.is_finished());

        held.cancel()?;
        PostgresReservationRepository
            .update(&mut holder, &held)
            .await?;
        holder.commit().await?;

        let seen = waiter.await.unwrap()?.unwrap();
        assert_eq!(seen.status(), &ReservationStatus::Cancelled);
        Ok(())
    }
}
