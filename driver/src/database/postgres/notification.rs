use sqlx::types::Json;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::event::ReservationEvent;
use kernel::interface::query::NotificationQuery;
use kernel::interface::update::NotificationModifier;
use kernel::prelude::entity::{CreatedAt, Notification, NotificationId, ReservationId};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresNotificationRepository;

#[async_trait::async_trait]
impl NotificationQuery for PostgresNotificationRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &NotificationId,
    ) -> error_stack::Result<Option<Notification>, KernelError> {
        PgNotificationInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        unread_only: bool,
        since: Option<&OffsetDateTime>,
    ) -> error_stack::Result<Vec<Notification>, KernelError> {
        PgNotificationInternal::find_all(con, unread_only, since).await
    }

    async fn find_by_reservation_id(
        &self,
        con: &mut PostgresTransaction,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<Notification>, KernelError> {
        PgNotificationInternal::find_by_reservation_id(con, reservation_id).await
    }
}

#[async_trait::async_trait]
impl NotificationModifier for PostgresNotificationRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        notification: &Notification,
    ) -> error_stack::Result<(), KernelError> {
        PgNotificationInternal::create(con, notification).await
    }

    async fn mark_read(
        &self,
        con: &mut PostgresTransaction,
        id: &NotificationId,
    ) -> error_stack::Result<(), KernelError> {
        PgNotificationInternal::mark_read(con, id).await
    }

    async fn mark_all_read(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<u64, KernelError> {
        PgNotificationInternal::mark_all_read(con).await
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    event: Json<ReservationEvent>,
    created_at: OffsetDateTime,
    is_read: bool,
}

impl From<NotificationRow> for Notification {
    fn from(value: NotificationRow) -> Self {
        Notification::new(
            NotificationId::new(value.id),
            value.event.0,
            CreatedAt::new(value.created_at),
            value.is_read,
        )
    }
}

pub(in crate::database) struct PgNotificationInternal;

impl PgNotificationInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &NotificationId,
    ) -> error_stack::Result<Option<Notification>, KernelError> {
        let row = sqlx::query_as::<_, NotificationRow>(
            // language=postgresql
            r#"
            SELECT id, event, created_at, is_read
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Notification::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        unread_only: bool,
        since: Option<&OffsetDateTime>,
    ) -> error_stack::Result<Vec<Notification>, KernelError> {
        // language=postgresql
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT id, event, created_at, is_read
            FROM notifications
            WHERE TRUE
            "#,
        );
        if unread_only {
            builder.push(" AND NOT is_read");
        }
        if let Some(since) = since {
            builder.push(" AND created_at > ").push_bind(*since);
        }
        builder.push(" ORDER BY created_at DESC");

        let rows = builder
            .build_query_as::<NotificationRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn find_by_reservation_id(
        con: &mut PgConnection,
        reservation_id: &ReservationId,
    ) -> error_stack::Result<Vec<Notification>, KernelError> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            // language=postgresql
            r#"
            SELECT id, event, created_at, is_read
            FROM notifications
            WHERE reservation_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(reservation_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        notification: &Notification,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO notifications (id, reservation_id, event, created_at, is_read)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(notification.id().as_ref())
        .bind(notification.event().reservation_id().as_ref())
        .bind(Json(notification.event()))
        .bind(notification.created_at().as_ref())
        .bind(notification.is_read())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn mark_read(
        con: &mut PgConnection,
        id: &NotificationId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(error_stack::Report::new(KernelError::NotFound)
                .attach_printable(format!("Notification {} not found", id.as_ref())));
        }
        Ok(())
    }

    async fn mark_all_read(con: &mut PgConnection) -> error_stack::Result<u64, KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE NOT is_read
            "#,
        )
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected())
    }
}
