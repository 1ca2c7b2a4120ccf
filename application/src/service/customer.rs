use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{
    Customer, CustomerContact, CustomerId, CustomerName, DriverLicense,
};
use kernel::KernelError;

use crate::transfer::{
    CreateCustomerDto, CustomerDto, GetCustomerDto, UpdateCustomerContactDto,
};

#[async_trait::async_trait]
pub trait GetCustomerService: 'static + Sync + Send + DependOnCustomerQuery {
    async fn get_customer(
        &self,
        dto: GetCustomerDto,
    ) -> error_stack::Result<Option<CustomerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = CustomerId::new(dto.id);
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &id)
            .await?;
        Ok(customer.map(CustomerDto::from))
    }

    async fn get_all_customers(&self) -> error_stack::Result<Vec<CustomerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let customers = self.customer_query().find_all(&mut connection).await?;
        Ok(customers.into_iter().map(CustomerDto::from).collect())
    }
}

impl<T> GetCustomerService for T where T: DependOnCustomerQuery {}

#[async_trait::async_trait]
pub trait CreateCustomerService: 'static + Sync + Send + DependOnCustomerModifier {
    async fn create_customer(
        &self,
        dto: CreateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new(dto.first_name, dto.last_name),
            CustomerContact::new(dto.email, dto.phone, dto.address),
            DriverLicense::new(dto.license_number, dto.license_image_url),
        );
        self.customer_modifier()
            .create(&mut connection, &customer)
            .await?;
        connection.commit().await?;

        Ok(CustomerDto::from(customer))
    }
}

impl<T> CreateCustomerService for T where T: DependOnCustomerModifier {}

#[async_trait::async_trait]
pub trait UpdateCustomerService:
    'static + Sync + Send + DependOnCustomerQuery + DependOnCustomerModifier
{
    async fn update_customer_contact(
        &self,
        dto: UpdateCustomerContactDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = CustomerId::new(dto.id);
        let mut customer = self
            .customer_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Customer {} not found", dto.id))
            })?;
        customer.update_contact(CustomerContact::new(dto.email, dto.phone, dto.address));
        self.customer_modifier()
            .update(&mut connection, &customer)
            .await?;
        connection.commit().await?;

        Ok(CustomerDto::from(customer))
    }
}

impl<T> UpdateCustomerService for T where T: DependOnCustomerQuery + DependOnCustomerModifier {}
