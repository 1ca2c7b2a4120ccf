use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::CustomerQuery;
use kernel::interface::update::CustomerModifier;
use kernel::prelude::entity::{
    Customer, CustomerContact, CustomerId, CustomerName, DriverLicense,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for PostgresCustomerRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        PgCustomerInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        PgCustomerInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl CustomerModifier for PostgresCustomerRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::create(con, customer).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::update(con, customer).await
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    license_number: String,
    license_image_url: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(value: CustomerRow) -> Self {
        Customer::new(
            CustomerId::new(value.id),
            CustomerName::new(value.first_name, value.last_name),
            CustomerContact::new(value.email, value.phone, value.address),
            DriverLicense::new(value.license_number, value.license_image_url),
        )
    }
}

pub(in crate::database) struct PgCustomerInternal;

impl PgCustomerInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, last_name, email, phone, address, license_number, license_image_url
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Customer::from))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Customer>, KernelError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, last_name, email, phone, address, license_number, license_image_url
            FROM customers
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO customers (id, first_name, last_name, email, phone, address, license_number, license_image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(customer.id().as_ref())
        .bind(customer.name().first_name())
        .bind(customer.name().last_name())
        .bind(customer.contact().email())
        .bind(customer.contact().phone())
        .bind(customer.contact().address())
        .bind(customer.driver_license().number())
        .bind(customer.driver_license().image_url())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE customers
            SET email = $2, phone = $3, address = $4, license_image_url = $5
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_ref())
        .bind(customer.contact().email())
        .bind(customer.contact().phone())
        .bind(customer.contact().address())
        .bind(customer.driver_license().image_url())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::CustomerQuery;
    use kernel::interface::update::CustomerModifier;
    use kernel::prelude::entity::{
        Customer, CustomerContact, CustomerId, CustomerName, DriverLicense,
    };
    use kernel::KernelError;

    use crate::database::postgres::customer::PostgresCustomerRepository;
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;
        let id = CustomerId::new(uuid::Uuid::new_v4());

        let customer = Customer::new(
            id.clone(),
            CustomerName::new("Ada", "Lovelace"),
            CustomerContact::new("ada@example.com", "+44 1234", "12 St James's Square"),
            DriverLicense::new("DL-0001", None),
        );
        PostgresCustomerRepository.create(&mut con, &customer).await?;

        let mut customer = customer;
        customer.update_contact(CustomerContact::new(
            "ada@example.org",
            "+44 5678",
            "12 St James's Square",
        ));
        PostgresCustomerRepository.update(&mut con, &customer).await?;

        let found = PostgresCustomerRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(customer));

        con.roll_back().await?;
        Ok(())
    }
}
