use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Catalog entry. Orders copy `price` at placement time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: BigDecimal,
}
