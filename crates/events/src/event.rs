//! The closed application event union.
//!
//! Every event has a named payload struct; the payload shape is the sole
//! contract between producer and consumer. There is no shared global state
//! beyond what flows through these payloads.

use serde::{Deserialize, Serialize};

use lavka_core::{OrderId, Product, ProductId};

/// Payload: a product card was clicked (inbound from the view layer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSelectedPayload {
    pub product_id: ProductId,
}

/// Payload: a validated product should be shown in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOpenedPayload {
    pub product: Product,
    /// Whether the product is already in the cart (drives the buy button).
    pub in_cart: bool,
}

/// Payload: add a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAddPayload {
    pub product: Product,
}

/// Payload: remove a product from the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRemovePayload {
    pub product_id: ProductId,
}

/// Payload: the cart contents changed; views re-render from this snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartChangedPayload {
    pub items: Vec<Product>,
    pub total: u64,
    pub count: usize,
}

/// Payload: start checkout with a snapshot of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOpenPayload {
    pub items: Vec<Product>,
    pub total: u64,
}

/// Payload: the payment step was submitted (inbound).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSubmitPayload {
    pub payment: String,
    pub address: String,
}

/// Payload: the contacts step was submitted (inbound).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsSubmitPayload {
    pub email: String,
    pub phone: String,
}

/// Payload: payment-step fields failed validation; per-field flags for
/// inline rendering. Never an error: the flow simply does not advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRejectedPayload {
    pub payment_missing: bool,
    pub address_invalid: bool,
    pub is_valid: bool,
}

/// Payload: contacts-step fields failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsRejectedPayload {
    pub email_invalid: bool,
    pub phone_invalid: bool,
    pub is_valid: bool,
}

/// Payload: the order backend rejected the submission. The draft is kept so
/// the user can retry without re-entering data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitFailedPayload {
    pub message: String,
}

/// Payload: the order was accepted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSuccessPayload {
    pub order_id: OrderId,
    pub total: u64,
}

/// Application event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppEvent {
    ProductSelected(ProductSelectedPayload),
    ProductOpened(ProductOpenedPayload),
    CartAdd(CartAddPayload),
    CartRemove(CartRemovePayload),
    CartChanged(CartChangedPayload),
    OrderOpen(OrderOpenPayload),
    OrderOpenPayment,
    OrderOpenContacts,
    PaymentSubmit(PaymentSubmitPayload),
    ContactsSubmit(ContactsSubmitPayload),
    PaymentRejected(PaymentRejectedPayload),
    ContactsRejected(ContactsRejectedPayload),
    SubmitFailed(SubmitFailedPayload),
    OrderSuccess(OrderSuccessPayload),
    OrderReset,
    SuccessClose,
}

/// Discriminant of [`AppEvent`], used for exact-topic subscriptions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ProductSelected,
    ProductOpened,
    CartAdd,
    CartRemove,
    CartChanged,
    OrderOpen,
    OrderOpenPayment,
    OrderOpenContacts,
    PaymentSubmit,
    ContactsSubmit,
    PaymentRejected,
    ContactsRejected,
    SubmitFailed,
    OrderSuccess,
    OrderReset,
    SuccessClose,
}

impl AppEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            AppEvent::ProductSelected(_) => EventKind::ProductSelected,
            AppEvent::ProductOpened(_) => EventKind::ProductOpened,
            AppEvent::CartAdd(_) => EventKind::CartAdd,
            AppEvent::CartRemove(_) => EventKind::CartRemove,
            AppEvent::CartChanged(_) => EventKind::CartChanged,
            AppEvent::OrderOpen(_) => EventKind::OrderOpen,
            AppEvent::OrderOpenPayment => EventKind::OrderOpenPayment,
            AppEvent::OrderOpenContacts => EventKind::OrderOpenContacts,
            AppEvent::PaymentSubmit(_) => EventKind::PaymentSubmit,
            AppEvent::ContactsSubmit(_) => EventKind::ContactsSubmit,
            AppEvent::PaymentRejected(_) => EventKind::PaymentRejected,
            AppEvent::ContactsRejected(_) => EventKind::ContactsRejected,
            AppEvent::SubmitFailed(_) => EventKind::SubmitFailed,
            AppEvent::OrderSuccess(_) => EventKind::OrderSuccess,
            AppEvent::OrderReset => EventKind::OrderReset,
            AppEvent::SuccessClose => EventKind::SuccessClose,
        }
    }

    /// Stable event name (the external contract between core and views).
    pub fn event_type(&self) -> &'static str {
        match self.kind() {
            EventKind::ProductSelected => "product:select",
            EventKind::ProductOpened => "product:open",
            EventKind::CartAdd => "cart:add",
            EventKind::CartRemove => "cart:remove",
            EventKind::CartChanged => "cart:changed",
            EventKind::OrderOpen => "order:open",
            EventKind::OrderOpenPayment => "order:openPayment",
            EventKind::OrderOpenContacts => "order:openContacts",
            EventKind::PaymentSubmit => "payment:submit",
            EventKind::ContactsSubmit => "contacts:submit",
            EventKind::PaymentRejected => "order:paymentInvalid",
            EventKind::ContactsRejected => "order:contactsInvalid",
            EventKind::SubmitFailed => "order:submitFailed",
            EventKind::OrderSuccess => "order:success",
            EventKind::OrderReset => "order:reset",
            EventKind::SuccessClose => "success:close",
        }
    }
}
