use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::customer::{Address, NewAddress};
use crate::domain::errors::DomainError;
use crate::domain::order::{LineItem, NewPayment, Payment, PaymentMethod};
use crate::domain::product::Product;
use crate::schema::{addresses, customer_phones, customers, order_items, orders, payments, products};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub customer_type: i32,
    pub password_hash: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub customer_type: i32,
    pub password_hash: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = customer_phones)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PhoneRow {
    pub customer_id: i32,
    pub phone: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AddressRow {
    pub id: i32,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub postal_code: String,
    pub customer_id: i32,
    pub city_id: i32,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Address {
            id: row.id,
            street: row.street,
            number: row.number,
            complement: row.complement,
            district: row.district,
            postal_code: row.postal_code,
            city_id: row.city_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = addresses)]
pub struct NewAddressRow {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub postal_code: String,
    pub customer_id: i32,
    pub city_id: i32,
}

impl NewAddressRow {
    pub fn new(customer_id: i32, address: NewAddress) -> Self {
        Self {
            street: address.street,
            number: address.number,
            complement: address.complement,
            district: address.district,
            postal_code: address.postal_code,
            customer_id,
            city_id: address.city_id,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub placed_at: DateTime<Utc>,
    pub customer_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub placed_at: DateTime<Utc>,
    pub customer_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentRow {
    pub order_id: i32,
    pub state: String,
    pub method: String,
    pub installments: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub paid_on: Option<NaiveDate>,
}

impl PaymentRow {
    pub fn new(order_id: i32, payment: &NewPayment) -> Self {
        let (installments, due_date, paid_on) = match &payment.method {
            PaymentMethod::Card { installments } => (Some(*installments), None, None),
            PaymentMethod::Billed { due_date, paid_on } => (None, *due_date, *paid_on),
        };
        Self {
            order_id,
            state: payment.state.as_str().to_string(),
            method: payment.method.kind().to_string(),
            installments,
            due_date,
            paid_on,
        }
    }
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let method = match row.method.as_str() {
            PaymentMethod::CARD => PaymentMethod::Card {
                installments: row.installments.unwrap_or(1),
            },
            PaymentMethod::BILLED => PaymentMethod::Billed {
                due_date: row.due_date,
                paid_on: row.paid_on,
            },
            other => {
                log::error!("Payment of order {} has unknown method '{}'", row.order_id, other);
                return Err(DomainError::Storage);
            }
        };
        let state = row.state.parse().map_err(|_| {
            log::error!("Payment of order {} has unknown state '{}'", row.order_id, row.state);
            DomainError::Storage
        })?;
        Ok(Payment {
            order_id: row.order_id,
            state,
            method,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub order_id: i32,
    pub product_id: i32,
    pub discount: BigDecimal,
    pub quantity: i32,
    pub price: BigDecimal,
}

impl OrderItemRow {
    pub fn new(order_id: i32, item: &LineItem) -> Self {
        Self {
            order_id,
            product_id: item.product_id,
            discount: item.discount.clone(),
            quantity: item.quantity,
            price: item.price.clone(),
        }
    }

    pub fn into_line_item(self, product_name: String) -> LineItem {
        LineItem {
            product_id: self.product_id,
            product_name,
            quantity: self.quantity,
            price: self.price,
            discount: self.discount,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub price: BigDecimal,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
        }
    }
}
