//! Order submission boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lavka_core::OrderId;
use lavka_order::CompletedOrder;

/// Acknowledgement returned by the order backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    pub id: OrderId,
    pub total: u64,
}

/// Submission failure reported by the transport collaborator.
///
/// Recoverable: the coordinator keeps the draft so the user can retry
/// without re-entering data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The request never produced a backend answer (timeout, connection loss).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered but refused the order.
    #[error("order rejected by backend: {0}")]
    Rejected(String),
}

/// External collaborator that delivers a completed order to the backend.
///
/// Used exactly once per checkout, at the contacts → submitting transition.
/// The asynchronous transport is modeled as a synchronous call whose
/// `Result` is the resolved continuation; at most one submission is in
/// flight at a time (the coordinator gates re-entry).
pub trait OrderSubmitter {
    fn send_order(&self, order: &CompletedOrder) -> Result<OrderAck, SubmitError>;
}
