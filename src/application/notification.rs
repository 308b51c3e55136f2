use std::fmt;

use crate::domain::customer::Customer;
use crate::domain::order::{Order, PaymentMethod};
use crate::domain::ports::{NotificationError, OrderNotifier};

/// Plain-text order confirmation.
pub fn render_confirmation(order: &Order, customer: &Customer) -> String {
    Confirmation { order, customer }.to_string()
}

struct Confirmation<'a> {
    order: &'a Order,
    customer: &'a Customer,
}

impl fmt::Display for Confirmation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.order;
        writeln!(f, "Order number: {}", order.id)?;
        writeln!(f, "Placed at: {}", order.placed_at.format("%d/%m/%Y %H:%M:%S"))?;
        writeln!(f, "Customer: {}", self.customer.name)?;
        writeln!(f, "Payment state: {}", order.payment.state.as_str())?;
        match &order.payment.method {
            PaymentMethod::Card { installments } => {
                writeln!(f, "Card payment in {} installment(s)", installments)?;
            }
            PaymentMethod::Billed { due_date, .. } => match due_date {
                Some(due) => writeln!(f, "Payment slip due on {}", due.format("%d/%m/%Y"))?,
                None => writeln!(f, "Payment slip due on -")?,
            },
        }
        writeln!(f, "Items:")?;
        for item in &order.items {
            writeln!(
                f,
                "  {}, qty: {}, unit price: {}, subtotal: {}",
                item.product_name,
                item.quantity,
                item.price.with_scale(2),
                item.subtotal().with_scale(2)
            )?;
        }
        write!(f, "Total: {}", order.total().with_scale(2))
    }
}

/// Writes confirmations to the log instead of delivering mail.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl OrderNotifier for LogNotifier {
    fn send_order_confirmation(
        &self,
        order: &Order,
        customer: &Customer,
    ) -> Result<(), NotificationError> {
        log::info!(
            "Order confirmation for {}:\n{}",
            customer.email,
            render_confirmation(order, customer)
        );
        Ok(())
    }
}
