use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentState {
    Pending,
    Paid,
    Cancelled,
}

impl PaymentState {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentState::Pending => "PENDING",
            PaymentState::Paid => "PAID",
            PaymentState::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for PaymentState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentState::Pending),
            "PAID" => Ok(PaymentState::Paid),
            "CANCELLED" => Ok(PaymentState::Cancelled),
            other => Err(DomainError::InvalidInput(format!(
                "unknown payment state '{}'",
                other
            ))),
        }
    }
}

/// How an order is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    Card {
        installments: i32,
    },
    /// Bank payment slip (boleto).
    Billed {
        #[serde(default)]
        due_date: Option<NaiveDate>,
        #[serde(default)]
        paid_on: Option<NaiveDate>,
    },
}

impl PaymentMethod {
    pub const CARD: &'static str = "card";
    pub const BILLED: &'static str = "billed";

    pub fn kind(&self) -> &'static str {
        match self {
            PaymentMethod::Card { .. } => Self::CARD,
            PaymentMethod::Billed { .. } => Self::BILLED,
        }
    }

    /// Billed payments get their due date computed at placement time.
    pub fn needs_due_date(&self) -> bool {
        matches!(self, PaymentMethod::Billed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub order_id: i32,
    pub state: PaymentState,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub state: PaymentState,
    pub method: PaymentMethod,
}

/// One product line of an order. Its identity is the (order, product) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub discount: BigDecimal,
}

impl LineItem {
    pub fn subtotal(&self) -> BigDecimal {
        (&self.price - &self.discount) * BigDecimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: i32,
    pub placed_at: DateTime<Utc>,
    pub customer_id: i32,
    pub payment: Payment,
    pub items: Vec<LineItem>,
}

impl Order {
    pub fn total(&self) -> BigDecimal {
        self.items
            .iter()
            .fold(BigDecimal::from(0), |acc, item| acc + item.subtotal())
    }
}

/// An order as a caller submits it. Identity, placement time, payment state,
/// line prices and discounts are all overwritten during placement.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub placed_at: Option<DateTime<Utc>>,
    pub customer_id: i32,
    pub payment: PaymentDraft,
    pub items: Vec<LineItemDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDraft {
    #[serde(default)]
    pub state: Option<PaymentState>,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItemDraft {
    pub product_id: i32,
    pub quantity: i32,
    #[serde(default)]
    pub price: Option<BigDecimal>,
    #[serde(default)]
    pub discount: Option<BigDecimal>,
}

/// A fully priced order ready to be written in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub placed_at: DateTime<Utc>,
    pub customer_id: i32,
    pub payment: NewPayment,
    pub items: Vec<LineItem>,
}
