use error_stack::Report;

use kernel::interface::query::CustomerQuery;
use kernel::interface::update::CustomerModifier;
use kernel::prelude::entity::{Customer, CustomerId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for InMemoryCustomerRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        Ok(con.working.customers.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        let mut customers = con.working.customers.values().cloned().collect::<Vec<_>>();
        customers.sort_by(|a, b| {
            (a.name().last_name(), a.name().first_name())
                .cmp(&(b.name().last_name(), b.name().first_name()))
        });
        Ok(customers)
    }
}

#[async_trait::async_trait]
impl CustomerModifier for InMemoryCustomerRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        if con.working.customers.contains_key(customer.id()) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Customer {} already exists",
                customer.id().as_ref()
            )));
        }
        con.working
            .customers
            .insert(customer.id().clone(), customer.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        match con.working.customers.get_mut(customer.id()) {
            Some(stored) => {
                *stored = customer.clone();
                Ok(())
            }
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Customer {} not found", customer.id().as_ref()))),
        }
    }
}
