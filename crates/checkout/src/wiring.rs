//! Glue between the event bus and the coordinator.
//!
//! The bus and the coordinator live in one execution context; the
//! coordinator is shared behind `Rc<RefCell<…>>` and its borrow is released
//! before any follow-up event is re-emitted, so re-entrant dispatch (the
//! wildcard registration sees the follow-ups too) cannot double-borrow.

use std::cell::RefCell;
use std::rc::Rc;

use lavka_events::{EventBus, HandlerId, Topic};

use crate::coordinator::CheckoutCoordinator;
use crate::submit::OrderSubmitter;
use crate::validators::FieldValidators;

/// Subscribe the coordinator to every event on the bus.
///
/// Each inbound event is handed to [`CheckoutCoordinator::handle`]; the
/// returned follow-ups are broadcast back onto the bus afterwards. Holds a
/// weak reference to the bus to avoid a registration cycle.
pub fn attach<S, V>(
    bus: &Rc<EventBus>,
    coordinator: &Rc<RefCell<CheckoutCoordinator<S, V>>>,
) -> HandlerId
where
    S: OrderSubmitter + 'static,
    V: FieldValidators + 'static,
{
    let bus_weak = Rc::downgrade(bus);
    let coordinator = Rc::clone(coordinator);

    bus.on(Topic::Any, move |event| {
        let follow_ups = coordinator.borrow_mut().handle(event)?;

        if let Some(bus) = bus_weak.upgrade() {
            for follow_up in &follow_ups {
                bus.emit(follow_up);
            }
        }
        Ok(())
    })
}

/// Catch-all diagnostic subscriber: logs every event that crosses the bus.
pub fn attach_diagnostics(bus: &EventBus) -> HandlerId {
    bus.on(Topic::Any, |event| {
        tracing::debug!(event = event.event_type(), "bus event");
        Ok(())
    })
}
