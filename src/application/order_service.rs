use std::collections::HashSet;

use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::domain::caller::Caller;
use crate::domain::errors::DomainError;
use crate::domain::order::{LineItem, LineItemDraft, NewOrder, NewPayment, Order, OrderDraft, PaymentState};
use crate::domain::paging::{OrderSort, Page, PageParams, PageRequest};
use crate::domain::ports::{CustomerRepository, OrderNotifier, OrderRepository, ProductRepository};

use super::boleto::BoletoService;
use super::customer_service::CustomerService;
use super::product_service::ProductService;

pub struct OrderService<O, C, P, N> {
    orders: O,
    customers: CustomerService<C>,
    products: ProductService<P>,
    boleto: BoletoService,
    notifier: N,
}

impl<O, C, P, N> OrderService<O, C, P, N>
where
    O: OrderRepository,
    C: CustomerRepository,
    P: ProductRepository,
    N: OrderNotifier,
{
    pub fn new(
        orders: O,
        customers: CustomerService<C>,
        products: ProductService<P>,
        boleto: BoletoService,
        notifier: N,
    ) -> Self {
        Self {
            orders,
            customers,
            products,
            boleto,
            notifier,
        }
    }

    pub fn find(&self, id: i32) -> Result<Order, DomainError> {
        self.orders
            .find_by_id(id)?
            .ok_or(DomainError::not_found("Order", id))
    }

    /// Places an order.
    ///
    /// The caller-supplied id, placement time, payment state, due date, line
    /// prices and discounts are all ignored: the order is stamped with the
    /// current time, the payment starts `Pending`, billed payments get a due
    /// date relative to the placement time and every line is repriced from
    /// the catalog with a zero discount. Order, payment and lines are written
    /// in one transaction. The confirmation is sent afterwards and its failure
    /// does not undo the placement.
    pub fn insert(&self, caller: Option<&Caller>, draft: OrderDraft) -> Result<Order, DomainError> {
        let OrderDraft {
            customer_id,
            payment,
            items,
            ..
        } = draft;
        let placed_at = Utc::now();

        let customer = self.customers.find(caller, customer_id)?;

        let mut payment = NewPayment {
            state: PaymentState::Pending,
            method: payment.method,
        };
        if payment.method.needs_due_date() {
            self.boleto.fill_billed_payment(&mut payment.method, placed_at)?;
        }

        let items = self.price_items(items)?;

        let order = self.orders.insert(NewOrder {
            placed_at,
            customer_id: customer.id,
            payment,
            items,
        })?;
        log::info!(
            "Placed order {} for customer {} ({} item(s), total {})",
            order.id,
            customer.id,
            order.items.len(),
            order.total()
        );

        if let Err(e) = self.notifier.send_order_confirmation(&order, &customer) {
            log::warn!("Order {} placed but confirmation not sent: {}", order.id, e);
        }

        Ok(order)
    }

    /// Lists the caller's own orders.
    pub fn find_page(
        &self,
        caller: Option<&Caller>,
        params: &PageParams,
    ) -> Result<Page<Order>, DomainError> {
        let caller = caller.ok_or(DomainError::Unauthorized)?;
        let request = PageRequest::<OrderSort>::parse(params)?;
        let customer = self.customers.find(Some(caller), caller.customer_id)?;
        self.orders.find_page_by_customer(customer.id, &request)
    }

    fn price_items(&self, drafts: Vec<LineItemDraft>) -> Result<Vec<LineItem>, DomainError> {
        let mut seen = HashSet::with_capacity(drafts.len());
        drafts
            .into_iter()
            .map(|draft| {
                if draft.quantity <= 0 {
                    return Err(DomainError::InvalidInput(format!(
                        "quantity for product {} must be positive",
                        draft.product_id
                    )));
                }
                if !seen.insert(draft.product_id) {
                    return Err(DomainError::InvalidInput(format!(
                        "product {} appears more than once",
                        draft.product_id
                    )));
                }
                let product = self.products.find(draft.product_id)?;
                Ok(LineItem {
                    product_id: product.id,
                    product_name: product.name,
                    quantity: draft.quantity,
                    price: product.price,
                    discount: BigDecimal::from(0),
                })
            })
            .collect()
    }
}
