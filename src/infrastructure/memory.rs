use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::customer::{Address, Customer, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, Payment};
use crate::domain::paging::{CustomerSort, OrderSort, Page, PageRequest, SortDirection};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::product::Product;

#[derive(Default)]
struct Tables {
    customers: BTreeMap<i32, Customer>,
    products: BTreeMap<i32, Product>,
    orders: BTreeMap<i32, Order>,
    last_customer_id: i32,
    last_address_id: i32,
    last_order_id: i32,
}

/// Process-local store implementing every repository port.
///
/// All tables sit behind one lock, so a multi-table write is applied whole
/// or not at all. Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DomainError> {
        self.tables.read().map_err(|_| {
            log::error!("In-memory store lock poisoned (read)");
            DomainError::Storage
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DomainError> {
        self.tables.write().map_err(|_| {
            log::error!("In-memory store lock poisoned (write)");
            DomainError::Storage
        })
    }

    /// Adds or replaces a catalog product.
    pub fn put_product(&self, product: Product) -> Result<(), DomainError> {
        self.write()?.products.insert(product.id, product);
        Ok(())
    }

    /// Stores a customer under its own id, bypassing id generation.
    pub fn put_customer(&self, customer: Customer) -> Result<(), DomainError> {
        let mut tables = self.write()?;
        tables.last_customer_id = tables.last_customer_id.max(customer.id);
        let highest_address = customer.addresses.iter().map(|a| a.id).max().unwrap_or(0);
        tables.last_address_id = tables.last_address_id.max(highest_address);
        tables.customers.insert(customer.id, customer);
        Ok(())
    }
}

fn page_of<T: Clone, S>(sorted: Vec<&T>, request: &PageRequest<S>) -> Page<T> {
    let total = sorted.len() as i64;
    let items = sorted
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.size as usize)
        .cloned()
        .collect();
    Page::new(items, total, request)
}

impl CustomerRepository for InMemoryStore {
    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        Ok(self.read()?.customers.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        Ok(self.read()?.customers.values().cloned().collect())
    }

    fn find_page(&self, request: &PageRequest<CustomerSort>) -> Result<Page<Customer>, DomainError> {
        let tables = self.read()?;
        let mut sorted: Vec<&Customer> = tables.customers.values().collect();
        // Ties on name break by ascending id in either direction.
        sorted.sort_by(|a, b| {
            let ordering = match request.order_by {
                CustomerSort::Id => a.id.cmp(&b.id),
                CustomerSort::Name => a.name.cmp(&b.name),
                CustomerSort::Email => a.email.cmp(&b.email),
            };
            let ordering = match request.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then(a.id.cmp(&b.id))
        });
        Ok(page_of(sorted, request))
    }

    fn insert(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        let mut tables = self.write()?;
        tables.last_customer_id += 1;
        let id = tables.last_customer_id;

        let mut addresses = Vec::with_capacity(customer.addresses.len());
        for address in customer.addresses {
            tables.last_address_id += 1;
            addresses.push(Address {
                id: tables.last_address_id,
                street: address.street,
                number: address.number,
                complement: address.complement,
                district: address.district,
                postal_code: address.postal_code,
                city_id: address.city_id,
            });
        }

        let stored = Customer {
            id,
            name: customer.name,
            email: customer.email,
            tax_id: customer.tax_id,
            customer_type: customer.customer_type,
            password_hash: customer.password_hash,
            phones: customer.phones,
            addresses,
        };
        tables.customers.insert(id, stored.clone());
        Ok(stored)
    }

    fn update(&self, customer: &Customer) -> Result<(), DomainError> {
        let mut tables = self.write()?;
        if let Some(stored) = tables.customers.get_mut(&customer.id) {
            stored.name = customer.name.clone();
            stored.email = customer.email.clone();
        }
        Ok(())
    }

    fn delete_by_id(&self, id: i32) -> Result<(), DomainError> {
        let mut tables = self.write()?;
        if tables.orders.values().any(|o| o.customer_id == id) {
            return Err(DomainError::IntegrityConflict);
        }
        tables.customers.remove(&id);
        Ok(())
    }
}

impl OrderRepository for InMemoryStore {
    fn insert(&self, order: NewOrder) -> Result<Order, DomainError> {
        let mut tables = self.write()?;
        if !tables.customers.contains_key(&order.customer_id) {
            log::error!("Order references missing customer {}", order.customer_id);
            return Err(DomainError::Storage);
        }
        if let Some(item) = order
            .items
            .iter()
            .find(|item| !tables.products.contains_key(&item.product_id))
        {
            log::error!("Order item references missing product {}", item.product_id);
            return Err(DomainError::Storage);
        }

        tables.last_order_id += 1;
        let id = tables.last_order_id;
        let stored = Order {
            id,
            placed_at: order.placed_at,
            customer_id: order.customer_id,
            payment: Payment {
                order_id: id,
                state: order.payment.state,
                method: order.payment.method,
            },
            items: order.items,
        };
        tables.orders.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    fn find_page_by_customer(
        &self,
        customer_id: i32,
        request: &PageRequest<OrderSort>,
    ) -> Result<Page<Order>, DomainError> {
        let tables = self.read()?;
        let mut sorted: Vec<&Order> = tables
            .orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .collect();
        sorted.sort_by(|a, b| {
            let ordering = match request.order_by {
                OrderSort::Id => a.id.cmp(&b.id),
                OrderSort::PlacedAt => a.placed_at.cmp(&b.placed_at).then(a.id.cmp(&b.id)),
            };
            match request.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        Ok(page_of(sorted, request))
    }
}

impl ProductRepository for InMemoryStore {
    fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        Ok(self.read()?.products.get(&id).cloned())
    }
}
