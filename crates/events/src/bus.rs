//! In-process pub/sub bus.
//!
//! - Synchronous, in-place dispatch in registration order
//! - Single execution context (no `Send`/`Sync`), but re-entrancy-safe:
//!   handlers may call `emit`, `on`, or `off` mid-dispatch
//! - A failing handler never starves the remaining handlers of the same
//!   emit; failures go to the diagnostic channel instead

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lavka_core::DomainError;

use crate::event::{AppEvent, EventKind};

/// What a registration listens to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Topic {
    /// Exactly one event kind.
    Event(EventKind),
    /// Every event (catch-all, e.g. for diagnostic logging).
    Any,
}

impl Topic {
    fn matches(self, kind: EventKind) -> bool {
        match self {
            Topic::Event(k) => k == kind,
            Topic::Any => true,
        }
    }
}

/// Opaque handle identifying a registration, returned by [`EventBus::on`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type HandlerFn = dyn Fn(&AppEvent) -> Result<(), DomainError>;

struct Registration {
    id: HandlerId,
    topic: Topic,
    handler: Rc<HandlerFn>,
}

/// Synchronous publish/subscribe dispatcher.
///
/// The handler list is snapshotted at the start of each `emit`, so
/// registrations added or removed by a handler only affect future emits;
/// the in-progress dispatch loop is never corrupted. Re-entrant emits take
/// their own snapshot of the registration list current at that moment.
pub struct EventBus {
    registrations: RefCell<Vec<Registration>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `topic`. Handlers run in registration order.
    pub fn on<F>(&self, topic: Topic, handler: F) -> HandlerId
    where
        F: Fn(&AppEvent) -> Result<(), DomainError> + 'static,
    {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.registrations.borrow_mut().push(Registration {
            id,
            topic,
            handler: Rc::new(handler),
        });
        id
    }

    /// Remove a registration. Returns whether it was present.
    pub fn off(&self, id: HandlerId) -> bool {
        let mut regs = self.registrations.borrow_mut();
        let before = regs.len();
        regs.retain(|r| r.id != id);
        regs.len() != before
    }

    /// Number of live registrations.
    pub fn handler_count(&self) -> usize {
        self.registrations.borrow().len()
    }

    /// Synchronously dispatch `event` to every matching handler plus every
    /// wildcard handler, in registration order.
    ///
    /// Emitting with no listeners is a silent no-op. A handler returning
    /// `Err` is reported via `tracing::error!` and dispatch continues; the
    /// error is never propagated to the emitter.
    pub fn emit(&self, event: &AppEvent) {
        // Snapshot before invoking anything so handlers can re-enter freely.
        let snapshot: Vec<Rc<HandlerFn>> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.topic.matches(event.kind()))
            .map(|r| Rc::clone(&r.handler))
            .collect();

        if snapshot.is_empty() {
            tracing::trace!(event = event.event_type(), "emit with no listeners");
            return;
        }

        for handler in snapshot {
            if let Err(err) = handler(event) {
                tracing::error!(
                    event = event.event_type(),
                    error = %err,
                    "event handler failed"
                );
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self {
            registrations: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }
}
