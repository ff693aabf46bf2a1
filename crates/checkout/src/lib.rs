//! Checkout coordination: the protocol state machine sequencing
//! Payment → Contacts → Success, plus its boundary traits and bus wiring.

pub mod coordinator;
pub mod submit;
pub mod validators;
pub mod wiring;


pub use coordinator::{CheckoutCoordinator, CheckoutStep};
pub use submit::{OrderAck, OrderSubmitter, SubmitError};
pub use validators::{FieldValidators, StandardValidators};
pub use wiring::{attach, attach_diagnostics};
