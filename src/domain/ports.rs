use thiserror::Error;

use super::customer::{Customer, NewCustomer};
use super::errors::DomainError;
use super::order::{NewOrder, Order};
use super::paging::{CustomerSort, OrderSort, Page, PageRequest};
use super::product::Product;

pub trait CustomerRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;
    fn find_all(&self) -> Result<Vec<Customer>, DomainError>;
    fn find_page(&self, request: &PageRequest<CustomerSort>) -> Result<Page<Customer>, DomainError>;
    /// Writes the customer, its phones and its addresses atomically.
    fn insert(&self, customer: NewCustomer) -> Result<Customer, DomainError>;
    /// Persists name and email only.
    fn update(&self, customer: &Customer) -> Result<(), DomainError>;
    /// Fails with `IntegrityConflict` while orders still reference the customer.
    fn delete_by_id(&self, id: i32) -> Result<(), DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Writes the order, then its payment, then its items, atomically.
    fn insert(&self, order: NewOrder) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError>;
    fn find_page_by_customer(
        &self,
        customer_id: i32,
        request: &PageRequest<OrderSort>,
    ) -> Result<Page<Order>, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError>;
}

#[derive(Debug, Error)]
#[error("Notification failed: {0}")]
pub struct NotificationError(pub String);

pub trait OrderNotifier: Send + Sync + 'static {
    fn send_order_confirmation(
        &self,
        order: &Order,
        customer: &Customer,
    ) -> Result<(), NotificationError>;
}
