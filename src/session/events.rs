//! Lifecycle notifications
//!
//! Named events fanned out to registered listeners, in registration order,
//! at the moment they are emitted.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::BirdError;

/// Names of the events a session emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Open,
    Ready,
    Error,
    Close,
}

/// A lifecycle notification
#[derive(Debug, Clone)]
pub enum Event {
    /// Connect attempt finished; carries the failure if there was one
    Open(Option<BirdError>),

    /// `restrict` handshake accepted, caller commands may flow
    Ready,

    /// Session-level failure (rejected handshake, desync)
    Error(BirdError),

    /// Session closed; carries the transport error if there was one
    Close(Option<BirdError>),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Open(_) => EventKind::Open,
            Event::Ready => EventKind::Ready,
            Event::Error(_) => EventKind::Error,
            Event::Close(_) => EventKind::Close,
        }
    }

    /// Error carried by the event, if any
    pub fn error(&self) -> Option<&BirdError> {
        match self {
            Event::Open(err) | Event::Close(err) => err.as_ref(),
            Event::Error(err) => Some(err),
            Event::Ready => None,
        }
    }
}

/// Handle returned by [`Notifiable::on`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A registered listener, shared so emission can run without holding the list
pub type SharedListener<C> = Rc<RefCell<dyn FnMut(&mut C, &Event)>>;

/// Subscribe / publish capability
pub trait Notifiable: Sized {
    /// Register `listener` for events of `kind`
    fn on<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&mut Self, &Event) + 'static;

    /// Remove a listener; returns whether it was registered
    fn off(&mut self, id: ListenerId) -> bool;

    /// Deliver `event` to every listener registered for its kind
    fn emit(&mut self, event: Event);
}

/// Listener registry backing a [`Notifiable`] implementation
pub struct Notifier<C> {
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind, SharedListener<C>)>,
}

impl<C> Notifier<C> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&mut C, &Event) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let shared: SharedListener<C> = Rc::new(RefCell::new(listener));
        self.listeners.push((id, kind, shared));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Snapshot of the listeners for `kind`, in registration order
    ///
    /// Listeners added or removed while an event is being delivered only
    /// affect later emissions.
    pub fn listeners_for(&self, kind: EventKind) -> Vec<SharedListener<C>> {
        self.listeners
            .iter()
            .filter(|(_, listener_kind, _)| *listener_kind == kind)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect()
    }

    /// Deliver `event` to a snapshot taken with [`Notifier::listeners_for`]
    pub fn deliver(targets: Vec<SharedListener<C>>, context: &mut C, event: &Event) {
        for listener in targets {
            match listener.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(context, event),
                // The listener itself emitted this event
                Err(_) => tracing::warn!("Skipping re-entrant {:?} listener", event.kind()),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<C> Default for Notifier<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Notifier<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
