use std::ops::{Deref, DerefMut};

use error_stack::Report;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{
    contract::*, customer::*, ledger::*, notification::*, reservation::*, vehicle::*,
};

mod contract;
mod customer;
mod ledger;
mod notification;
mod reservation;
mod vehicle;

static POSTGRES_URL: &str = "POSTGRES_URL";

/// SQLSTATE raised by an exclusion constraint, i.e. an overlapping booking slipped past the lock.
const EXCLUSION_VIOLATION: &str = "23P01";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|error| Report::from(error).change_context(KernelError::Internal))?;
        tracing::info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: 'static + Sync + Send> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(database)
                    if database.code().as_deref() == Some(EXCLUSION_VIOLATION) =>
                {
                    KernelError::Conflict
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}
