#![allow(dead_code)]

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use backoffice::application::boleto::BoletoService;
use backoffice::application::customer_service::CustomerService;
use backoffice::application::order_service::OrderService;
use backoffice::application::product_service::ProductService;
use backoffice::domain::customer::{Address, Customer, CustomerType, NewCustomer};
use backoffice::domain::errors::DomainError;
use backoffice::domain::order::{NewOrder, Order};
use backoffice::domain::paging::{CustomerSort, OrderSort, Page, PageRequest};
use backoffice::domain::ports::{
    CustomerRepository, NotificationError, OrderNotifier, OrderRepository, ProductRepository,
};
use backoffice::domain::product::Product;
use backoffice::infrastructure::memory::InMemoryStore;
use bigdecimal::BigDecimal;

pub const MARIA: i32 = 7;
pub const ANA: i32 = 8;
pub const PRINTER: i32 = 10;
pub const MOUSE: i32 = 11;

pub fn decimal(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).expect("valid decimal")
}

pub fn customer(id: i32, name: &str) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        tax_id: "36378912377".to_string(),
        customer_type: CustomerType::Individual,
        password_hash: "hash".to_string(),
        phones: BTreeSet::from(["27363323".to_string()]),
        addresses: vec![Address {
            id: id * 10,
            street: "Rua Flores".to_string(),
            number: "300".to_string(),
            complement: None,
            district: "Jardim".to_string(),
            postal_code: "38220834".to_string(),
            city_id: 1,
        }],
    }
}

/// Customers 7 (Maria) and 8 (Ana); products 10 (50.0) and 11 (20.0).
pub fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.put_customer(customer(MARIA, "Maria")).unwrap();
    store.put_customer(customer(ANA, "Ana")).unwrap();
    store
        .put_product(Product {
            id: PRINTER,
            name: "Printer".to_string(),
            price: decimal("50.0"),
        })
        .unwrap();
    store
        .put_product(Product {
            id: MOUSE,
            name: "Mouse".to_string(),
            price: decimal("20.0"),
        })
        .unwrap();
    store
}

/// Remembers which orders were confirmed.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<(i32, String)>>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(i32, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl OrderNotifier for RecordingNotifier {
    fn send_order_confirmation(
        &self,
        order: &Order,
        customer: &Customer,
    ) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .unwrap()
            .push((order.id, customer.email.clone()));
        Ok(())
    }
}

pub struct FailingNotifier;

impl OrderNotifier for FailingNotifier {
    fn send_order_confirmation(&self, _: &Order, _: &Customer) -> Result<(), NotificationError> {
        Err(NotificationError("smtp unreachable".to_string()))
    }
}

pub type MemoryOrderService<N> = OrderService<InMemoryStore, InMemoryStore, InMemoryStore, N>;

pub fn order_service<N: OrderNotifier>(store: &InMemoryStore, notifier: N) -> MemoryOrderService<N> {
    OrderService::new(
        store.clone(),
        CustomerService::new(store.clone()),
        ProductService::new(store.clone()),
        BoletoService::default(),
        notifier,
    )
}

/// A store that fails the test if any of its methods is called.
#[derive(Clone, Copy)]
pub struct UntouchableStore;

impl CustomerRepository for UntouchableStore {
    fn find_by_id(&self, _: i32) -> Result<Option<Customer>, DomainError> {
        panic!("store touched: find_by_id")
    }
    fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        panic!("store touched: find_all")
    }
    fn find_page(&self, _: &PageRequest<CustomerSort>) -> Result<Page<Customer>, DomainError> {
        panic!("store touched: find_page")
    }
    fn insert(&self, _: NewCustomer) -> Result<Customer, DomainError> {
        panic!("store touched: insert")
    }
    fn update(&self, _: &Customer) -> Result<(), DomainError> {
        panic!("store touched: update")
    }
    fn delete_by_id(&self, _: i32) -> Result<(), DomainError> {
        panic!("store touched: delete_by_id")
    }
}

impl OrderRepository for UntouchableStore {
    fn insert(&self, _: NewOrder) -> Result<Order, DomainError> {
        panic!("store touched: insert")
    }
    fn find_by_id(&self, _: i32) -> Result<Option<Order>, DomainError> {
        panic!("store touched: find_by_id")
    }
    fn find_page_by_customer(
        &self,
        _: i32,
        _: &PageRequest<OrderSort>,
    ) -> Result<Page<Order>, DomainError> {
        panic!("store touched: find_page_by_customer")
    }
}

impl ProductRepository for UntouchableStore {
    fn find_by_id(&self, _: i32) -> Result<Option<Product>, DomainError> {
        panic!("store touched: find_by_id")
    }
}
