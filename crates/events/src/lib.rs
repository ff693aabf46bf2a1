//! Application events and the in-process publish/subscribe bus.

pub mod bus;
pub mod event;

pub use bus::{EventBus, HandlerId, Topic};
pub use event::{
    AppEvent, CartAddPayload, CartChangedPayload, CartRemovePayload, ContactsRejectedPayload,
    ContactsSubmitPayload, EventKind, OrderOpenPayload, OrderSuccessPayload,
    PaymentRejectedPayload, PaymentSubmitPayload, ProductOpenedPayload, ProductSelectedPayload,
    SubmitFailedPayload,
};
