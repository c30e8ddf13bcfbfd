//! Order drafts and submission.

use std::cmp::Reverse;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{CartItem, CartStore};
use crate::error::CheckoutError;
use crate::flow::CheckoutFlow;

/// Order totals. All amounts in XAF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: u64,
    pub shipping: u64,
    pub total: u64,
}

impl OrderSummary {
    #[must_use]
    pub fn new(subtotal: u64, shipping: u64) -> Self {
        Self {
            subtotal,
            shipping,
            total: subtotal.saturating_add(shipping),
        }
    }
}

/// Mobile money operator used to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    MtnMobileMoney,
    OrangeMoney,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::MtnMobileMoney => f.write_str("MTN Mobile Money"),
            PaymentMethod::OrangeMoney => f.write_str("Orange Money"),
        }
    }
}

/// How the shopper pays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    /// Mobile money number to charge.
    pub number: String,
}

/// Contact details for a shopper checking out without an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInfo {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

impl GuestInfo {
    fn missing_field(&self) -> Option<&'static str> {
        [
            ("full name", &self.full_name),
            ("email", &self.email),
            ("phone number", &self.phone_number),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Who is placing the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Customer {
    Registered { user_id: String },
    Guest(GuestInfo),
}

/// A cart line frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl OrderLine {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: item.product.unit_price,
        }
    }
}

/// Everything needed to place an order, before the backend assigns an id.
///
/// Exactly one of `user_id` and `guest` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub lines: Vec<OrderLine>,
    pub summary: OrderSummary,
    /// Address of the confirmed shipping quote.
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub payment_number: String,
    pub user_id: Option<String>,
    pub guest: Option<GuestInfo>,
}

/// An order accepted by an [`OrderSubmitter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedOrder {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub draft: OrderDraft,
}

/// Backend that accepts orders.
pub trait OrderSubmitter: Send + Sync {
    fn submit(&self, draft: OrderDraft) -> BoxFuture<'_, Result<SubmittedOrder, CheckoutError>>;
}

/// Keeps submitted orders in memory.
#[derive(Debug, Default)]
pub struct InMemoryOrderSubmitter {
    orders: Mutex<Vec<SubmittedOrder>>,
}

impl InMemoryOrderSubmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All accepted orders, in submission order.
    #[must_use]
    pub fn orders(&self) -> Vec<SubmittedOrder> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Orders placed by `user_id`, newest first.
    #[must_use]
    pub fn orders_for_user(&self, user_id: &str) -> Vec<SubmittedOrder> {
        let mut orders: Vec<SubmittedOrder> = self
            .orders()
            .into_iter()
            .filter(|o| o.draft.user_id.as_deref() == Some(user_id))
            .collect();
        orders.sort_by_key(|o| Reverse(o.created_at));
        orders
    }
}

impl OrderSubmitter for InMemoryOrderSubmitter {
    fn submit(&self, draft: OrderDraft) -> BoxFuture<'_, Result<SubmittedOrder, CheckoutError>> {
        Box::pin(async move {
            let order = SubmittedOrder {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                draft,
            };
            self.orders
                .lock()
                .map_err(|_| CheckoutError::Submit("order store poisoned".to_string()))?
                .push(order.clone());
            Ok(order)
        })
    }
}

/// Validates the cart, shipping and payment, submits the order and empties
/// the cart.
///
/// # Errors
///
/// Returns a [`CheckoutError`] if the cart is empty, shipping is not
/// confirmed, the payment number is blank, guest details are incomplete, or
/// the submitter fails. The cart is left untouched on any error.
pub async fn checkout(
    cart: &CartStore,
    flow: &CheckoutFlow,
    payment: PaymentDetails,
    customer: Customer,
    submitter: &dyn OrderSubmitter,
) -> Result<SubmittedOrder, CheckoutError> {
    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let quote = flow
        .confirmed_quote()
        .ok_or(CheckoutError::ShippingNotConfirmed)?;
    let payment_number = payment.number.trim();
    if payment_number.is_empty() {
        return Err(CheckoutError::MissingPaymentNumber);
    }

    let (user_id, guest) = match customer {
        Customer::Registered { user_id } => (Some(user_id), None),
        Customer::Guest(info) => {
            if let Some(field) = info.missing_field() {
                return Err(CheckoutError::IncompleteGuestInfo(field));
            }
            (None, Some(info))
        }
    };

    let draft = OrderDraft {
        lines: snapshot.items.iter().map(OrderLine::from).collect(),
        summary: OrderSummary::new(snapshot.subtotal(), quote.fee),
        shipping_address: quote.address.clone(),
        payment_method: payment.method,
        payment_number: payment_number.to_string(),
        user_id,
        guest,
    };

    let order = submitter.submit(draft).await?;
    cart.clear();

    tracing::info!(
        order_id = %order.id,
        total = order.draft.summary.total,
        payment = %order.draft.payment_method,
        "order submitted"
    );
    Ok(order)
}
