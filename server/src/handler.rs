use std::ops::Deref;
use std::sync::Arc;

use driver::database::{
    PostgresContractRepository, PostgresCustomerRepository, PostgresDatabase,
    PostgresLedgerRepository, PostgresNotificationRepository, PostgresReservationRepository,
    PostgresTransaction, PostgresVehicleRepository,
};
use driver::generator::TemplateContractGenerator;
use kernel::interface::database::DatabaseConnection;
use kernel::interface::generator::DependOnContractGenerator;
use kernel::interface::query::{
    DependOnContractQuery, DependOnCustomerQuery, DependOnLedgerQuery, DependOnNotificationQuery,
    DependOnReservationQuery, DependOnVehicleQuery,
};
use kernel::interface::update::{
    DependOnContractModifier, DependOnCustomerModifier, DependOnLedgerModifier,
    DependOnNotificationModifier, DependOnReservationModifier, DependOnVehicleModifier,
};
use kernel::KernelError;
use vodca::References;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new(config: AppConfig) -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init(config).await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    generator: TemplateContractGenerator,
    config: AppConfig,
}

impl Handler {
    pub async fn init(config: AppConfig) -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        pgpool.migrate().await?;

        Ok(Self {
            pgpool,
            generator: TemplateContractGenerator,
            config,
        })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for Handler {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        self.pgpool.transact().await
    }
}

impl DependOnVehicleQuery for Handler {
    type VehicleQuery = PostgresVehicleRepository;
    fn vehicle_query(&self) -> &Self::VehicleQuery {
        &PostgresVehicleRepository
    }
}

impl DependOnVehicleModifier for Handler {
    type VehicleModifier = PostgresVehicleRepository;
    fn vehicle_modifier(&self) -> &Self::VehicleModifier {
        &PostgresVehicleRepository
    }
}

impl DependOnCustomerQuery for Handler {
    type CustomerQuery = PostgresCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &PostgresCustomerRepository
    }
}

impl DependOnCustomerModifier for Handler {
    type CustomerModifier = PostgresCustomerRepository;
    fn customer_modifier(&self) -> &Self::CustomerModifier {
        &PostgresCustomerRepository
    }
}

impl DependOnReservationQuery for Handler {
    type ReservationQuery = PostgresReservationRepository;
    fn reservation_query(&self) -> &Self::ReservationQuery {
        &PostgresReservationRepository
    }
}

impl DependOnReservationModifier for Handler {
    type ReservationModifier = PostgresReservationRepository;
    fn reservation_modifier(&self) -> &Self::ReservationModifier {
        &PostgresReservationRepository
    }
}

impl DependOnLedgerQuery for Handler {
    type LedgerQuery = PostgresLedgerRepository;
    fn ledger_query(&self) -> &Self::LedgerQuery {
        &PostgresLedgerRepository
    }
}

impl DependOnLedgerModifier for Handler {
    type LedgerModifier = PostgresLedgerRepository;
    fn ledger_modifier(&self) -> &Self::LedgerModifier {
        &PostgresLedgerRepository
    }
}

impl DependOnContractQuery for Handler {
    type ContractQuery = PostgresContractRepository;
    fn contract_query(&self) -> &Self::ContractQuery {
        &PostgresContractRepository
    }
}

impl DependOnContractModifier for Handler {
    type ContractModifier = PostgresContractRepository;
    fn contract_modifier(&self) -> &Self::ContractModifier {
        &PostgresContractRepository
    }
}

impl DependOnNotificationQuery for Handler {
    type NotificationQuery = PostgresNotificationRepository;
    fn notification_query(&self) -> &Self::NotificationQuery {
        &PostgresNotificationRepository
    }
}

impl DependOnNotificationModifier for Handler {
    type NotificationModifier = PostgresNotificationRepository;
    fn notification_modifier(&self) -> &Self::NotificationModifier {
        &PostgresNotificationRepository
    }
}

impl DependOnContractGenerator for Handler {
    type ContractGenerator = TemplateContractGenerator;
    fn contract_generator(&self) -> &Self::ContractGenerator {
        &self.generator
    }
}
