use std::collections::{BTreeSet, HashMap};

use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::customer::{Address, Customer, CustomerType, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::paging::{CustomerSort, Page, PageRequest, SortDirection};
use crate::domain::ports::CustomerRepository;
use crate::schema::{addresses, customer_phones, customers};

use super::is_foreign_key_violation;
use super::models::{AddressRow, CustomerRow, NewAddressRow, NewCustomerRow, PhoneRow};

pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_customer(
    row: CustomerRow,
    phones: BTreeSet<String>,
    addresses: Vec<Address>,
) -> Result<Customer, DomainError> {
    let customer_type = CustomerType::from_code(row.customer_type).map_err(|_| {
        log::error!(
            "Customer {} has unknown type code {}",
            row.id,
            row.customer_type
        );
        DomainError::Storage
    })?;
    Ok(Customer {
        id: row.id,
        name: row.name,
        email: row.email,
        tax_id: row.tax_id,
        customer_type,
        password_hash: row.password_hash,
        phones,
        addresses,
    })
}

/// Loads phones and addresses for `rows`, keeping the rows' order.
fn hydrate(conn: &mut PgConnection, rows: Vec<CustomerRow>) -> Result<Vec<Customer>, DomainError> {
    let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

    let phone_rows: Vec<PhoneRow> = customer_phones::table
        .filter(customer_phones::customer_id.eq_any(&ids))
        .select(PhoneRow::as_select())
        .load(conn)?;
    let mut phones: HashMap<i32, BTreeSet<String>> = HashMap::new();
    for row in phone_rows {
        phones.entry(row.customer_id).or_default().insert(row.phone);
    }

    let address_rows: Vec<AddressRow> = addresses::table
        .filter(addresses::customer_id.eq_any(&ids))
        .order(addresses::id.asc())
        .select(AddressRow::as_select())
        .load(conn)?;
    let mut addresses_by_customer: HashMap<i32, Vec<Address>> = HashMap::new();
    for row in address_rows {
        addresses_by_customer
            .entry(row.customer_id)
            .or_default()
            .push(row.into());
    }

    rows.into_iter()
        .map(|row| {
            let id = row.id;
            to_customer(
                row,
                phones.remove(&id).unwrap_or_default(),
                addresses_by_customer.remove(&id).unwrap_or_default(),
            )
        })
        .collect()
}

impl CustomerRepository for DieselCustomerRepository {
    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(hydrate(&mut conn, vec![row])?.pop())
    }

    fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<CustomerRow> = customers::table
            .order(customers::id.asc())
            .select(CustomerRow::as_select())
            .load(&mut conn)?;

        hydrate(&mut conn, rows)
    }

    fn find_page(&self, request: &PageRequest<CustomerSort>) -> Result<Page<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = customers::table.count().get_result(conn)?;

            let query = customers::table.select(CustomerRow::as_select()).into_boxed();
            let query = match (request.order_by, request.direction) {
                (CustomerSort::Id, SortDirection::Asc) => query.order(customers::id.asc()),
                (CustomerSort::Id, SortDirection::Desc) => query.order(customers::id.desc()),
                (CustomerSort::Name, SortDirection::Asc) => {
                    query.order((customers::name.asc(), customers::id.asc()))
                }
                (CustomerSort::Name, SortDirection::Desc) => {
                    query.order((customers::name.desc(), customers::id.asc()))
                }
                (CustomerSort::Email, SortDirection::Asc) => query.order(customers::email.asc()),
                (CustomerSort::Email, SortDirection::Desc) => query.order(customers::email.desc()),
            };

            let rows: Vec<CustomerRow> = query
                .limit(request.size)
                .offset(request.offset())
                .load(conn)?;

            Ok(Page::new(hydrate(conn, rows)?, total, request))
        })
    }

    fn insert(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the customer
            let row: CustomerRow = diesel::insert_into(customers::table)
                .values(&NewCustomerRow {
                    name: customer.name,
                    email: customer.email,
                    tax_id: customer.tax_id,
                    customer_type: customer.customer_type.code(),
                    password_hash: customer.password_hash,
                })
                .returning(CustomerRow::as_returning())
                .get_result(conn)?;

            // 2. Insert phones
            let phone_rows: Vec<PhoneRow> = customer
                .phones
                .iter()
                .map(|phone| PhoneRow {
                    customer_id: row.id,
                    phone: phone.clone(),
                })
                .collect();
            if !phone_rows.is_empty() {
                diesel::insert_into(customer_phones::table)
                    .values(&phone_rows)
                    .execute(conn)?;
            }

            // 3. Insert addresses
            let new_addresses: Vec<NewAddressRow> = customer
                .addresses
                .into_iter()
                .map(|address| NewAddressRow::new(row.id, address))
                .collect();
            let address_rows: Vec<AddressRow> = if new_addresses.is_empty() {
                Vec::new()
            } else {
                diesel::insert_into(addresses::table)
                    .values(&new_addresses)
                    .returning(AddressRow::as_returning())
                    .get_results(conn)?
            };

            to_customer(
                row,
                customer.phones,
                address_rows.into_iter().map(Address::from).collect(),
            )
        })
    }

    fn update(&self, customer: &Customer) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::update(customers::table.find(customer.id))
            .set((
                customers::name.eq(&customer.name),
                customers::email.eq(&customer.email),
            ))
            .execute(&mut conn)?;
        Ok(())
    }

    fn delete_by_id(&self, id: i32) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        // Phones and addresses cascade; orders do not.
        diesel::delete(customers::table.find(id))
            .execute(&mut conn)
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    log::info!("Customer {} still has orders, refusing delete", id);
                    DomainError::IntegrityConflict
                } else {
                    e.into()
                }
            })?;
        Ok(())
    }
}
