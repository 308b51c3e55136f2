use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Individual,
    Business,
}

impl CustomerType {
    /// Stable numeric code used in registration payloads and storage.
    pub fn code(self) -> i32 {
        match self {
            CustomerType::Individual => 1,
            CustomerType::Business => 2,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            1 => Ok(CustomerType::Individual),
            2 => Ok(CustomerType::Business),
            other => Err(DomainError::InvalidInput(format!(
                "unknown customer type code {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i32,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub postal_code: String,
    pub city_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub customer_type: CustomerType,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phones: BTreeSet<String>,
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewAddress {
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub district: String,
    pub postal_code: String,
    pub city_id: i32,
}

/// A customer as handed to `insert`. Any `id` present is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDraft {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub customer_type: CustomerType,
    pub password_hash: String,
    pub phones: BTreeSet<String>,
    pub addresses: Vec<NewAddress>,
}

/// A customer ready to be written; the store assigns every id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub customer_type: CustomerType,
    pub password_hash: String,
    pub phones: BTreeSet<String>,
    pub addresses: Vec<NewAddress>,
}

impl From<CustomerDraft> for NewCustomer {
    fn from(draft: CustomerDraft) -> Self {
        NewCustomer {
            name: draft.name,
            email: draft.email,
            tax_id: draft.tax_id,
            customer_type: draft.customer_type,
            password_hash: draft.password_hash,
            phones: draft.phones,
            addresses: draft.addresses,
        }
    }
}

/// The only fields `update` copies onto a stored customer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerUpdate {
    pub name: String,
    pub email: String,
}

/// Registration payload, one address and up to three phones.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomerRequest {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub customer_type: i32,
    pub password: String,
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub district: String,
    pub postal_code: String,
    pub phone1: String,
    #[serde(default)]
    pub phone2: Option<String>,
    #[serde(default)]
    pub phone3: Option<String>,
    pub city_id: i32,
}
