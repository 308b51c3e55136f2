use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" | "ASCENDING" => Ok(SortDirection::Asc),
            "DESC" | "DESCENDING" => Ok(SortDirection::Desc),
            other => Err(DomainError::InvalidInput(format!(
                "sort direction must be ASC or DESC, got '{}'",
                other
            ))),
        }
    }
}

/// Sortable customer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerSort {
    Id,
    Name,
    Email,
}

impl FromStr for CustomerSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(CustomerSort::Id),
            "name" | "nome" => Ok(CustomerSort::Name),
            "email" => Ok(CustomerSort::Email),
            other => Err(DomainError::InvalidInput(format!(
                "customers cannot be sorted by '{}'",
                other
            ))),
        }
    }
}

/// Sortable order fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSort {
    Id,
    PlacedAt,
}

impl FromStr for OrderSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(OrderSort::Id),
            "placed_at" | "placedAt" | "instant" | "instante" => Ok(OrderSort::PlacedAt),
            other => Err(DomainError::InvalidInput(format!(
                "orders cannot be sorted by '{}'",
                other
            ))),
        }
    }
}

/// Raw paging parameters as they arrive from a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
    /// Page number, 0-based.
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
    pub order_by: String,
    pub direction: String,
}

fn default_page_size() -> i64 {
    24
}

impl PageParams {
    pub fn new(page: i64, size: i64, order_by: &str, direction: &str) -> Self {
        Self {
            page,
            size,
            order_by: order_by.to_string(),
            direction: direction.to_string(),
        }
    }
}

/// Validated paging request; `S` is the entity's sortable field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<S> {
    pub page: i64,
    pub size: i64,
    pub order_by: S,
    pub direction: SortDirection,
}

impl<S: FromStr<Err = DomainError>> PageRequest<S> {
    /// Fails `InvalidInput` on an unknown field or direction, or when the
    /// page lies beyond any representable row offset.
    pub fn parse(params: &PageParams) -> Result<Self, DomainError> {
        let page = params.page.max(0);
        let size = params.size.clamp(1, MAX_PAGE_SIZE);
        if page.checked_mul(size).is_none() {
            return Err(DomainError::InvalidInput(format!(
                "page {} is out of range",
                page
            )));
        }

        Ok(Self {
            page,
            size,
            order_by: params.order_by.parse()?,
            direction: params.direction.parse()?,
        })
    }
}

impl<S> PageRequest<S> {
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}

impl<T> Page<T> {
    pub fn new<S>(items: Vec<T>, total: i64, request: &PageRequest<S>) -> Self {
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
        }
    }

    pub fn total_pages(&self) -> i64 {
        (self.total + self.size - 1) / self.size
    }
}
