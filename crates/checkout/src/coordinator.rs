//! Checkout protocol state machine.
//!
//! The coordinator is pure "event in, follow-up events out": it owns the
//! cart, the catalog, and the order draft, and the wiring layer feeds it
//! from the bus and re-emits whatever it returns. Step transitions happen
//! only on discrete events, never on polling or timers.

use lavka_cart::Cart;
use lavka_catalog::{gate, Catalog};
use lavka_core::DomainError;
use lavka_events::{
    AppEvent, CartAddPayload, CartChangedPayload, CartRemovePayload, ContactsRejectedPayload,
    ContactsSubmitPayload, OrderOpenPayload, OrderSuccessPayload, PaymentRejectedPayload,
    PaymentSubmitPayload, ProductOpenedPayload, ProductSelectedPayload, SubmitFailedPayload,
};
use lavka_order::OrderBuilder;

use crate::submit::OrderSubmitter;
use crate::validators::FieldValidators;

/// Where the checkout sequence currently is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CheckoutStep {
    Idle,
    Payment,
    Contacts,
    Submitting,
    Success,
}

/// Sequences Payment → Contacts → Success, driving the order builder and
/// translating user actions into view notifications.
///
/// Only one checkout may be in flight: a second `order:open` past `Idle`
/// discards the in-progress draft and restarts. Invalid step submissions
/// are answered with per-field rejection events, never silently dropped
/// and never advanced.
pub struct CheckoutCoordinator<S, V> {
    catalog: Catalog,
    cart: Cart,
    builder: OrderBuilder,
    submitter: S,
    validators: V,
    step: CheckoutStep,
}

impl<S, V> CheckoutCoordinator<S, V>
where
    S: OrderSubmitter,
    V: FieldValidators,
{
    pub fn new(catalog: Catalog, submitter: S, validators: V) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            builder: OrderBuilder::new(),
            submitter,
            validators,
            step: CheckoutStep::Idle,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn builder(&self) -> &OrderBuilder {
        &self.builder
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// React to one inbound event, mutating owned state and returning the
    /// follow-up events to broadcast.
    ///
    /// Events the coordinator itself emits (`cart:changed`, rejections,
    /// `order:open*`, …) are ignored here, so re-broadcasting the returned
    /// follow-ups cannot loop back into the state machine.
    pub fn handle(&mut self, event: &AppEvent) -> Result<Vec<AppEvent>, DomainError> {
        match event {
            AppEvent::ProductSelected(payload) => Ok(self.on_product_selected(payload)),
            AppEvent::CartAdd(payload) => Ok(self.on_cart_add(payload)),
            AppEvent::CartRemove(payload) => Ok(self.on_cart_remove(payload)),
            AppEvent::OrderOpen(payload) => Ok(self.on_order_open(payload)),
            AppEvent::PaymentSubmit(payload) => Ok(self.on_payment_submit(payload)),
            AppEvent::ContactsSubmit(payload) => self.on_contacts_submit(payload),
            AppEvent::SuccessClose => Ok(self.on_success_close()),
            _ => Ok(Vec::new()),
        }
    }

    fn on_product_selected(&mut self, payload: &ProductSelectedPayload) -> Vec<AppEvent> {
        let Some(product) = self.catalog.get(&payload.product_id) else {
            tracing::warn!(product_id = %payload.product_id, "selected product not in catalog");
            return Vec::new();
        };

        // A refetch may have raced in since the card was rendered; gate again.
        if !gate::validate(product) {
            tracing::warn!(product_id = %product.id, "selected product failed validation");
            return Vec::new();
        }

        vec![AppEvent::ProductOpened(ProductOpenedPayload {
            product: product.clone(),
            in_cart: self.cart.has(&payload.product_id),
        })]
    }

    fn on_cart_add(&mut self, payload: &CartAddPayload) -> Vec<AppEvent> {
        if payload.product.is_priceless() {
            tracing::warn!(product_id = %payload.product.id, "priceless product cannot be purchased");
            return Vec::new();
        }

        let inserted = self.cart.add(payload.product.clone());
        if !inserted {
            tracing::warn!(product_id = %payload.product.id, "duplicate cart add ignored");
        }
        vec![self.cart_changed()]
    }

    fn on_cart_remove(&mut self, payload: &CartRemovePayload) -> Vec<AppEvent> {
        let removed = self.cart.remove(&payload.product_id);
        if !removed {
            tracing::warn!(product_id = %payload.product_id, "removal of absent cart item ignored");
        }
        vec![self.cart_changed()]
    }

    fn on_order_open(&mut self, payload: &OrderOpenPayload) -> Vec<AppEvent> {
        if payload.items.is_empty() || payload.total == 0 {
            tracing::warn!(
                items = payload.items.len(),
                total = payload.total,
                "checkout cannot open with an empty or zero-total cart"
            );
            return Vec::new();
        }

        // Restart policy: a reopen mid-checkout discards the draft.
        if self.step != CheckoutStep::Idle {
            tracing::warn!(step = ?self.step, "checkout already in progress; discarding draft");
            self.builder.reset();
        }

        self.builder.set_cart(&payload.items, payload.total);
        self.step = CheckoutStep::Payment;
        vec![AppEvent::OrderOpenPayment]
    }

    fn on_payment_submit(&mut self, payload: &PaymentSubmitPayload) -> Vec<AppEvent> {
        if self.step != CheckoutStep::Payment {
            tracing::warn!(step = ?self.step, "stale payment submit ignored");
            return Vec::new();
        }

        // Store first, gate after: the draft keeps whatever was typed.
        self.builder.set_payment_method(&payload.payment);
        self.builder.set_address(&payload.address);

        let payment_ok = self
            .builder
            .payment()
            .is_some_and(|p| !p.trim().is_empty());
        let address_ok = self
            .builder
            .address()
            .is_some_and(|a| self.validators.address(a.trim()));

        if payment_ok && address_ok {
            self.step = CheckoutStep::Contacts;
            return vec![AppEvent::OrderOpenContacts];
        }

        vec![AppEvent::PaymentRejected(PaymentRejectedPayload {
            payment_missing: !payment_ok,
            address_invalid: !address_ok,
            is_valid: false,
        })]
    }

    fn on_contacts_submit(
        &mut self,
        payload: &ContactsSubmitPayload,
    ) -> Result<Vec<AppEvent>, DomainError> {
        match self.step {
            CheckoutStep::Contacts => {}
            CheckoutStep::Submitting => {
                tracing::warn!("submission already in flight; duplicate submit ignored");
                return Ok(Vec::new());
            }
            step => {
                tracing::warn!(step = ?step, "stale contacts submit ignored");
                return Ok(Vec::new());
            }
        }

        self.builder.set_contacts(&payload.email, &payload.phone);

        let email_ok = self
            .builder
            .email()
            .is_some_and(|e| self.validators.email(e.trim()));
        let phone_ok = self
            .builder
            .phone()
            .is_some_and(|p| self.validators.phone(p.trim()));

        if !(email_ok && phone_ok) {
            return Ok(vec![AppEvent::ContactsRejected(ContactsRejectedPayload {
                email_invalid: !email_ok,
                phone_invalid: !phone_ok,
                is_valid: false,
            })]);
        }

        // Complete by construction at this point; an error here means the
        // coordinator called out of sequence and surfaces on the error channel.
        let order = self.builder.get_data()?;
        self.step = CheckoutStep::Submitting;

        match self.submitter.send_order(&order) {
            Ok(ack) => {
                self.cart.clear();
                self.builder.reset();
                self.step = CheckoutStep::Success;
                tracing::info!(order_id = %ack.id, total = ack.total, "order submitted");
                Ok(vec![
                    AppEvent::OrderSuccess(OrderSuccessPayload {
                        order_id: ack.id,
                        total: ack.total,
                    }),
                    self.cart_changed(),
                ])
            }
            Err(err) => {
                // Draft and cart stay intact so the user can retry.
                self.step = CheckoutStep::Contacts;
                tracing::error!(error = %err, "order submission failed");
                Ok(vec![AppEvent::SubmitFailed(SubmitFailedPayload {
                    message: err.to_string(),
                })])
            }
        }
    }

    fn on_success_close(&mut self) -> Vec<AppEvent> {
        if self.step != CheckoutStep::Success {
            tracing::warn!(step = ?self.step, "stale success close ignored");
            return Vec::new();
        }

        // Already reset on submission success; reset is idempotent.
        self.builder.reset();
        self.step = CheckoutStep::Idle;
        vec![AppEvent::OrderReset, self.cart_changed()]
    }

    fn cart_changed(&self) -> AppEvent {
        AppEvent::CartChanged(CartChangedPayload {
            items: self.cart.products(),
            total: self.cart.total_price(),
            count: self.cart.total_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use lavka_core::{OrderId, Product, ProductId};
    use lavka_events::EventKind;
    use lavka_order::CompletedOrder;

    use crate::submit::{OrderAck, SubmitError};
    use crate::validators::StandardValidators;

    struct FakeSubmitter {
        sent: RefCell<Vec<CompletedOrder>>,
        fail_next: RefCell<bool>,
    }

    impl FakeSubmitter {
        fn new() -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                fail_next: RefCell::new(false),
            }
        }

        fn failing() -> Self {
            let s = Self::new();
            *s.fail_next.borrow_mut() = true;
            s
        }
    }

    impl OrderSubmitter for &FakeSubmitter {
        fn send_order(&self, order: &CompletedOrder) -> Result<OrderAck, SubmitError> {
            if *self.fail_next.borrow() {
                *self.fail_next.borrow_mut() = false;
                return Err(SubmitError::Transport("connection reset".into()));
            }
            self.sent.borrow_mut().push(order.clone());
            Ok(OrderAck {
                id: OrderId::new(),
                total: order.total,
            })
        }
    }

    fn product(title: &str, price: Option<u64>) -> Product {
        Product::new(ProductId::new(), title, "", price, "misc", "img.png")
    }

    fn coordinator_with<'a>(
        submitter: &'a FakeSubmitter,
        products: Vec<Product>,
    ) -> CheckoutCoordinator<&'a FakeSubmitter, StandardValidators> {
        let mut catalog = Catalog::new();
        catalog.ingest(products);
        CheckoutCoordinator::new(catalog, submitter, StandardValidators)
    }

    fn open_payload(coordinator: &CheckoutCoordinator<&FakeSubmitter, StandardValidators>) -> OrderOpenPayload {
        OrderOpenPayload {
            items: coordinator.cart().products(),
            total: coordinator.cart().total_price(),
        }
    }

    fn add_to_cart(
        coordinator: &mut CheckoutCoordinator<&FakeSubmitter, StandardValidators>,
        product: Product,
    ) {
        coordinator
            .handle(&AppEvent::CartAdd(CartAddPayload { product }))
            .unwrap();
    }

    fn valid_payment() -> AppEvent {
        AppEvent::PaymentSubmit(PaymentSubmitPayload {
            payment: "card".into(),
            address: "10 Main Street".into(),
        })
    }

    fn valid_contacts() -> AppEvent {
        AppEvent::ContactsSubmit(ContactsSubmitPayload {
            email: "buyer@example.com".into(),
            phone: "+12345678901".into(),
        })
    }

    #[test]
    fn happy_path_emits_exactly_one_success_and_empties_cart() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![]);
        add_to_cart(&mut coordinator, product("Pen", Some(100)));

        let open = open_payload(&coordinator);
        let events = coordinator.handle(&AppEvent::OrderOpen(open)).unwrap();
        assert_eq!(events, vec![AppEvent::OrderOpenPayment]);
        assert_eq!(coordinator.step(), CheckoutStep::Payment);

        let events = coordinator.handle(&valid_payment()).unwrap();
        assert_eq!(events, vec![AppEvent::OrderOpenContacts]);
        assert_eq!(coordinator.step(), CheckoutStep::Contacts);

        let events = coordinator.handle(&valid_contacts()).unwrap();
        let successes: Vec<_> = events
            .iter()
            .filter(|e| e.kind() == EventKind::OrderSuccess)
            .collect();
        assert_eq!(successes.len(), 1);
        assert_eq!(coordinator.step(), CheckoutStep::Success);
        assert!(coordinator.cart().is_empty());
        assert_eq!(submitter.sent.borrow().len(), 1);
        assert_eq!(submitter.sent.borrow()[0].total, 100);
    }

    #[test]
    fn invalid_payment_keeps_step_and_flags_fields() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![]);
        add_to_cart(&mut coordinator, product("Pen", Some(100)));
        let open = open_payload(&coordinator);
        coordinator.handle(&AppEvent::OrderOpen(open)).unwrap();

        let events = coordinator
            .handle(&AppEvent::PaymentSubmit(PaymentSubmitPayload {
                payment: "".into(),
                address: "abc".into(),
            }))
            .unwrap();

        match &events[..] {
            [AppEvent::PaymentRejected(p)] => {
                assert!(p.payment_missing);
                assert!(p.address_invalid);
                assert!(!p.is_valid);
            }
            other => panic!("expected PaymentRejected, got {other:?}"),
        }
        assert_eq!(coordinator.step(), CheckoutStep::Payment);

        // The draft stored the raw input anyway (store-always policy).
        assert_eq!(coordinator.builder().address(), Some("abc"));
    }

    #[test]
    fn invalid_contacts_keep_step_and_flag_fields() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![]);
        add_to_cart(&mut coordinator, product("Pen", Some(100)));
        let open = open_payload(&coordinator);
        coordinator.handle(&AppEvent::OrderOpen(open)).unwrap();
        coordinator.handle(&valid_payment()).unwrap();

        let events = coordinator
            .handle(&AppEvent::ContactsSubmit(ContactsSubmitPayload {
                email: "not-an-email".into(),
                phone: "+12345678901".into(),
            }))
            .unwrap();

        match &events[..] {
            [AppEvent::ContactsRejected(p)] => {
                assert!(p.email_invalid);
                assert!(!p.phone_invalid);
            }
            other => panic!("expected ContactsRejected, got {other:?}"),
        }
        assert_eq!(coordinator.step(), CheckoutStep::Contacts);
        assert!(submitter.sent.borrow().is_empty());
    }

    #[test]
    fn failed_submission_preserves_draft_and_cart() {
        let submitter = FakeSubmitter::failing();
        let mut coordinator = coordinator_with(&submitter, vec![]);
        add_to_cart(&mut coordinator, product("Pen", Some(100)));
        let open = open_payload(&coordinator);
        coordinator.handle(&AppEvent::OrderOpen(open)).unwrap();
        coordinator.handle(&valid_payment()).unwrap();

        let events = coordinator.handle(&valid_contacts()).unwrap();
        match &events[..] {
            [AppEvent::SubmitFailed(p)] => assert!(p.message.contains("connection reset")),
            other => panic!("expected SubmitFailed, got {other:?}"),
        }

        // No data loss: contacts as entered, cart untouched, step recoverable.
        assert_eq!(coordinator.step(), CheckoutStep::Contacts);
        assert_eq!(coordinator.builder().email(), Some("buyer@example.com"));
        assert_eq!(coordinator.builder().phone(), Some("+12345678901"));
        assert_eq!(coordinator.cart().total_count(), 1);

        // Retry with the same data now succeeds.
        let events = coordinator.handle(&valid_contacts()).unwrap();
        assert!(events.iter().any(|e| e.kind() == EventKind::OrderSuccess));
        assert!(coordinator.cart().is_empty());
        assert_eq!(submitter.sent.borrow().len(), 1);
    }

    #[test]
    fn reopen_mid_checkout_discards_draft() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![]);
        add_to_cart(&mut coordinator, product("Pen", Some(100)));
        let open = open_payload(&coordinator);
        coordinator.handle(&AppEvent::OrderOpen(open.clone())).unwrap();
        coordinator.handle(&valid_payment()).unwrap();
        assert_eq!(coordinator.builder().address(), Some("10 Main Street"));

        let events = coordinator.handle(&AppEvent::OrderOpen(open)).unwrap();
        assert_eq!(events, vec![AppEvent::OrderOpenPayment]);
        assert_eq!(coordinator.step(), CheckoutStep::Payment);
        assert_eq!(coordinator.builder().address(), None);
    }

    #[test]
    fn stale_step_events_are_ignored() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![]);

        assert_eq!(coordinator.handle(&valid_payment()).unwrap(), vec![]);
        assert_eq!(coordinator.handle(&valid_contacts()).unwrap(), vec![]);
        assert_eq!(coordinator.handle(&AppEvent::SuccessClose).unwrap(), vec![]);
        assert_eq!(coordinator.step(), CheckoutStep::Idle);
    }

    #[test]
    fn empty_cart_cannot_open_checkout() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![]);

        let events = coordinator
            .handle(&AppEvent::OrderOpen(OrderOpenPayload {
                items: vec![],
                total: 0,
            }))
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(coordinator.step(), CheckoutStep::Idle);
    }

    #[test]
    fn success_close_returns_to_idle_and_resyncs_views() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![]);
        add_to_cart(&mut coordinator, product("Pen", Some(100)));
        let open = open_payload(&coordinator);
        coordinator.handle(&AppEvent::OrderOpen(open)).unwrap();
        coordinator.handle(&valid_payment()).unwrap();
        coordinator.handle(&valid_contacts()).unwrap();
        assert_eq!(coordinator.step(), CheckoutStep::Success);

        let events = coordinator.handle(&AppEvent::SuccessClose).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), EventKind::OrderReset);
        assert_eq!(events[1].kind(), EventKind::CartChanged);
        assert_eq!(coordinator.step(), CheckoutStep::Idle);
        assert!(!coordinator.builder().is_complete());
    }

    #[test]
    fn duplicate_cart_add_is_logged_not_raised() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![]);
        let p = product("Pen", Some(100));

        add_to_cart(&mut coordinator, p.clone());
        add_to_cart(&mut coordinator, p);
        assert_eq!(coordinator.cart().total_count(), 1);
    }

    #[test]
    fn priceless_product_cannot_be_added() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![]);

        let events = coordinator
            .handle(&AppEvent::CartAdd(CartAddPayload {
                product: product("Gem", None),
            }))
            .unwrap();
        assert!(events.is_empty());
        assert!(coordinator.cart().is_empty());
    }

    #[test]
    fn selection_of_valid_product_opens_detail_view() {
        let submitter = FakeSubmitter::new();
        let p = product("Pen", Some(100));
        let id = p.id;
        let mut coordinator = coordinator_with(&submitter, vec![p.clone()]);
        add_to_cart(&mut coordinator, p);

        let events = coordinator
            .handle(&AppEvent::ProductSelected(ProductSelectedPayload {
                product_id: id,
            }))
            .unwrap();

        match &events[..] {
            [AppEvent::ProductOpened(opened)] => {
                assert_eq!(opened.product.id, id);
                assert!(opened.in_cart);
            }
            other => panic!("expected ProductOpened, got {other:?}"),
        }
    }

    #[test]
    fn selection_of_unknown_product_is_dropped() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![product("Pen", Some(100))]);

        let events = coordinator
            .handle(&AppEvent::ProductSelected(ProductSelectedPayload {
                product_id: ProductId::new(),
            }))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn coordinator_ignores_its_own_outbound_events() {
        let submitter = FakeSubmitter::new();
        let mut coordinator = coordinator_with(&submitter, vec![]);

        for event in [
            AppEvent::OrderOpenPayment,
            AppEvent::OrderOpenContacts,
            AppEvent::OrderReset,
        ] {
            assert_eq!(coordinator.handle(&event).unwrap(), vec![]);
        }
        assert_eq!(coordinator.step(), CheckoutStep::Idle);
    }
}
