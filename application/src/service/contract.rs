use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::generator::{ContractDraft, ContractGenerator, DependOnContractGenerator};
use kernel::interface::query::{
    ContractQuery, CustomerQuery, DependOnContractQuery, DependOnCustomerQuery,
    DependOnReservationQuery, DependOnVehicleQuery,
};
use kernel::interface::update::{ContractModifier, DependOnContractModifier};
use kernel::prelude::entity::{
    Contract, ContractId, CreatedAt, Customer, CustomerId, Reservation, ReservationId, Vehicle,
};
use kernel::KernelError;

use crate::service::{find_reservation, find_vehicle, Connection};
use crate::transfer::{ContractDto, GenerateContractDto, GetContractDto, GetContractsDto};

pub(crate) async fn issue_contract<T>(
    module: &T,
    con: &mut Connection<T>,
    reservation: &Reservation,
    customer: &Customer,
    vehicle: &Vehicle,
    now: OffsetDateTime,
) -> error_stack::Result<Contract, KernelError>
where
    T: DependOnContractGenerator + DependOnContractModifier + ?Sized,
{
    let draft = ContractDraft::new(
        customer.clone(),
        vehicle.clone(),
        *reservation.period(),
        *reservation.total_price(),
    );
    let text = module.contract_generator().generate(&draft).await?;
    let contract = Contract::new(
        ContractId::new(Uuid::new_v4()),
        reservation.id().clone(),
        customer.id().clone(),
        vehicle.id().clone(),
        text,
        CreatedAt::new(now),
    );
    module.contract_modifier().create(con, &contract).await?;
    Ok(contract)
}

pub(crate) async fn find_customer<T: DependOnCustomerQuery + ?Sized>(
    module: &T,
    con: &mut Connection<T>,
    id: &CustomerId,
) -> error_stack::Result<Customer, KernelError> {
    module
        .customer_query()
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Customer {} not found", id.as_ref()))
        })
}

#[async_trait::async_trait]
pub trait GetContractService: 'static + Sync + Send + DependOnContractQuery {
    async fn get_contract(
        &self,
        dto: GetContractDto,
    ) -> error_stack::Result<Option<ContractDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let contract = self
            .contract_query()
            .find_by_id(&mut connection, &ContractId::new(dto.id))
            .await?;
        Ok(contract.map(ContractDto::from))
    }

    async fn get_contracts(
        &self,
        dto: GetContractsDto,
    ) -> error_stack::Result<Vec<ContractDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let contracts = match dto.reservation_id {
            Some(reservation_id) => {
                self.contract_query()
                    .find_by_reservation_id(&mut connection, &ReservationId::new(reservation_id))
                    .await?
            }
            None => self.contract_query().find_all(&mut connection).await?,
        };
        Ok(contracts.into_iter().map(ContractDto::from).collect())
    }
}

impl<T> GetContractService for T where T: DependOnContractQuery {}

#[async_trait::async_trait]
pub trait GenerateContractService:
    'static
    + Sync
    + Send
    + DependOnReservationQuery
    + DependOnVehicleQuery
    + DependOnCustomerQuery
    + DependOnContractGenerator
    + DependOnContractModifier
{
    #[tracing::instrument(skip_all, fields(reservation_id = %dto.reservation_id))]
    async fn generate_contract(
        &self,
        dto: GenerateContractDto,
    ) -> error_stack::Result<ContractDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let reservation = find_reservation(
            self,
            &mut connection,
            &ReservationId::new(dto.reservation_id),
        )
        .await?;
        let customer_id = reservation.customer_id().clone().ok_or_else(|| {
            Report::new(KernelError::InvalidTransition)
                .attach_printable("Reservation is still waiting for its customer")
        })?;
        let customer = find_customer(self, &mut connection, &customer_id).await?;
        let vehicle = find_vehicle(self, &mut connection, reservation.vehicle_id()).await?;

        let contract = issue_contract(
            self,
            &mut connection,
            &reservation,
            &customer,
            &vehicle,
            OffsetDateTime::now_utc(),
        )
        .await?;
        connection.commit().await?;

        Ok(ContractDto::from(contract))
    }
}

impl<T> GenerateContractService for T where
    T: DependOnReservationQuery
        + DependOnVehicleQuery
        + DependOnCustomerQuery
        + DependOnContractGenerator
        + DependOnContractModifier
{
}
