//! Order draft builder.
//!
//! The draft accumulates fields in any order; completeness is recomputed
//! from field presence on every query rather than tracked in a separate
//! state variable, so state and data cannot diverge.

use serde::{Deserialize, Serialize};

use lavka_core::{DomainError, Product, ProductId, ValueObject};

/// The frozen projection of a complete draft, ready for submission.
///
/// Produced only by [`OrderBuilder::get_data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedOrder {
    pub items: Vec<ProductId>,
    pub total: u64,
    pub address: String,
    pub payment: String,
    pub email: String,
    pub phone: String,
}

impl ValueObject for CompletedOrder {}

/// Progressive accumulator of checkout fields.
///
/// Setters store raw strings unconditionally; trimming and format checks
/// belong to the external validation collaborators. Completeness, not the
/// setter, is the validation gate: an empty or whitespace-only value is
/// stored but keeps `is_complete()` false, which lets the UI hold
/// intermediate keystrokes while submission stays blocked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBuilder {
    items: Vec<ProductId>,
    total: u64,
    address: Option<String>,
    payment: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot of the cart as the order's line items.
    /// Callable multiple times; last write wins.
    pub fn set_cart(&mut self, products: &[Product], total: u64) {
        self.items = products.iter().map(|p| p.id).collect();
        self.total = total;
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = Some(address.into());
    }

    pub fn set_payment_method(&mut self, method: impl Into<String>) {
        self.payment = Some(method.into());
    }

    pub fn set_contacts(&mut self, email: impl Into<String>, phone: impl Into<String>) {
        self.email = Some(email.into());
        self.phone = Some(phone.into());
    }

    /// Are the payment-step fields present? Evaluated against the stored
    /// fields, not the arguments last passed, so a step can be re-checked
    /// without resubmission.
    pub fn validate_payment(&self) -> bool {
        present(&self.payment) && present(&self.address)
    }

    /// Are the contact fields present? Same re-check semantics as
    /// [`validate_payment`](Self::validate_payment).
    pub fn validate_contacts(&self) -> bool {
        present(&self.email) && present(&self.phone)
    }

    /// True iff every required field is populated: items with a positive
    /// total, plus address, payment method, email, and phone all non-empty
    /// after trimming.
    pub fn is_complete(&self) -> bool {
        !self.items.is_empty()
            && self.total > 0
            && self.validate_payment()
            && self.validate_contacts()
    }

    /// Freeze the draft into a [`CompletedOrder`].
    ///
    /// Returns [`DomainError::IncompleteOrder`] naming the missing fields
    /// when called out of sequence. Does not mutate the draft.
    pub fn get_data(&self) -> Result<CompletedOrder, DomainError> {
        if !self.is_complete() {
            return Err(DomainError::incomplete_order(self.missing_fields().join(", ")));
        }

        Ok(CompletedOrder {
            items: self.items.clone(),
            total: self.total,
            address: self.address.clone().unwrap_or_default(),
            payment: self.payment.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
        })
    }

    /// Clear every field back to absent. Idempotent; never fails.
    pub fn reset(&mut self) {
        self.items.clear();
        self.total = 0;
        self.address = None;
        self.payment = None;
        self.email = None;
        self.phone = None;
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn payment(&self) -> Option<&str> {
        self.payment.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.items.is_empty() {
            missing.push("items");
        }
        if self.total == 0 {
            missing.push("total");
        }
        if !present(&self.address) {
            missing.push("address");
        }
        if !present(&self.payment) {
            missing.push("payment");
        }
        if !present(&self.email) {
            missing.push("email");
        }
        if !present(&self.phone) {
            missing.push("phone");
        }
        missing
    }
}
