use chrono::{DateTime, Days, Utc};

use crate::domain::errors::DomainError;
use crate::domain::order::PaymentMethod;

pub const DEFAULT_DUE_IN_DAYS: u64 = 7;

/// Fills in the due date of billing-slip payments.
#[derive(Debug, Clone, Copy)]
pub struct BoletoService {
    due_in_days: u64,
}

impl Default for BoletoService {
    fn default() -> Self {
        Self::new(DEFAULT_DUE_IN_DAYS)
    }
}

impl BoletoService {
    pub fn new(due_in_days: u64) -> Self {
        Self { due_in_days }
    }

    /// Sets the due date to `due_in_days` after `reference`, replacing
    /// whatever the caller sent, and clears the payment date. Card payments
    /// are left untouched.
    pub fn fill_billed_payment(
        &self,
        method: &mut PaymentMethod,
        reference: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if let PaymentMethod::Billed { due_date, paid_on } = method {
            let due = reference
                .date_naive()
                .checked_add_days(Days::new(self.due_in_days))
                .ok_or_else(|| DomainError::InvalidInput("due date out of range".to_string()))?;
            *due_date = Some(due);
            *paid_on = None;
        }
        Ok(())
    }
}
