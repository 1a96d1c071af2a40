//! Single-threaded reactive primitives
//!
//! A [`Subject`] broadcasts values to its subscribers synchronously, in the
//! order they subscribed. A [`Stream`] is a view of a subject: `map`,
//! `filter` and `merge` wrap the subscriber's callback, so every subscription
//! ends up attached directly to a subject and [`Subscription::unsubscribe`]
//! detaches it completely.
//!
//! [`Changes`] pairs an optional initial value with a stream of edits and
//! always delivers the initial value before any edit. [`Held`] keeps the
//! latest value of a [`Changes`] around for reads.
//!
//! Nothing here is `Send`: everything runs inside the handler of the event
//! that produced the value.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::warn;

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

/// Run `callback` unless it is already running further up the stack
fn deliver<T>(callback: &Callback<T>, value: &T) {
    match callback.try_borrow_mut() {
        Ok(mut callback) => {
            let callback = &mut *callback;
            callback(value);
        }
        Err(_) => warn!("Dropped re-entrant emission into a running subscriber"),
    }
}

struct Subscribers<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Callback<T>)>>,
}

/// Handle to an attached callback.
///
/// Dropping the handle leaves the callback attached; call
/// [`Subscription::unsubscribe`] to detach it.
pub struct Subscription {
    detach: Vec<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: vec![Box::new(detach)],
        }
    }

    /// Combine several subscriptions into one handle
    pub fn all(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        Self {
            detach: subscriptions
                .into_iter()
                .flat_map(|subscription| subscription.detach)
                .collect(),
        }
    }

    pub fn unsubscribe(self) {
        for detach in self.detach {
            detach();
        }
    }
}

/// Source of values: the only place values enter the graph
pub struct Subject<T> {
    subscribers: Rc<Subscribers<T>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Subject<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(Subscribers {
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.entries.borrow().len()
    }

    /// Deliver `value` to every subscriber before returning.
    ///
    /// A subscriber that is already running (the value is being fed back into
    /// the subject from its own side effect) is skipped.
    pub fn emit(&self, value: &T) {
        // Snapshot so subscribers may (un)subscribe while we iterate
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in &callbacks {
            deliver(callback, value);
        }
    }

    pub fn stream(&self) -> Stream<T> {
        let subscribers = Rc::clone(&self.subscribers);
        Stream {
            attach: Rc::new(move |callback: Callback<T>| attach(&subscribers, callback)),
        }
    }
}

fn attach<T: 'static>(subscribers: &Rc<Subscribers<T>>, callback: Callback<T>) -> Subscription {
    let id = subscribers.next_id.get();
    subscribers.next_id.set(id + 1);
    subscribers.entries.borrow_mut().push((id, callback));

    let subscribers = Rc::downgrade(subscribers);
    Subscription::new(move || {
        if let Some(subscribers) = subscribers.upgrade() {
            subscribers
                .entries
                .borrow_mut()
                .retain(|(entry, _)| *entry != id);
        }
    })
}

/// Values over time, as seen through a chain of operators
pub struct Stream<T> {
    attach: Rc<dyn Fn(Callback<T>) -> Subscription>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            attach: Rc::clone(&self.attach),
        }
    }
}

impl<T: 'static> Stream<T> {
    /// Register a callback. It only sees values emitted after this call.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        (self.attach)(Rc::new(RefCell::new(callback)))
    }

    /// Derive a stream carrying `f` applied to every value.
    pub fn map<U: 'static>(&self, f: impl FnMut(&T) -> U + 'static) -> Stream<U> {
        let source = self.clone();
        let f = Rc::new(RefCell::new(f));
        Stream {
            attach: Rc::new(move |callback: Callback<U>| {
                let f = Rc::clone(&f);
                source.subscribe(move |value| {
                    let mapped = {
                        let mut f = f.borrow_mut();
                        (&mut *f)(value)
                    };
                    deliver(&callback, &mapped);
                })
            }),
        }
    }

    /// Derive a stream carrying only the values matching `predicate`.
    pub fn filter(&self, predicate: impl FnMut(&T) -> bool + 'static) -> Stream<T> {
        let source = self.clone();
        let predicate = Rc::new(RefCell::new(predicate));
        Stream {
            attach: Rc::new(move |callback: Callback<T>| {
                let predicate = Rc::clone(&predicate);
                source.subscribe(move |value| {
                    let keep = {
                        let mut predicate = predicate.borrow_mut();
                        (&mut *predicate)(value)
                    };
                    if keep {
                        deliver(&callback, value);
                    }
                })
            }),
        }
    }

    /// Forward the values of both streams, in the order they occur.
    pub fn merge(first: &Stream<T>, second: &Stream<T>) -> Stream<T> {
        let (first, second) = (first.clone(), second.clone());
        Stream {
            attach: Rc::new(move |callback: Callback<T>| {
                let forward = |source: &Stream<T>| {
                    let callback = Rc::clone(&callback);
                    source.subscribe(move |value| deliver(&callback, value))
                };
                Subscription::all([forward(&first), forward(&second)])
            }),
        }
    }
}

/// The value of a setting over time: an initial pull followed by edits.
///
/// Every subscriber receives the initial value synchronously inside
/// [`Changes::subscribe`], then each edit as it is emitted. Since edits can
/// only arrive from an event handler, the initial value strictly precedes them.
pub struct Changes<T> {
    initial: Option<T>,
    edits: Stream<T>,
}

impl<T: Clone + 'static> Changes<T> {
    pub fn new(initial: T, edits: Stream<T>) -> Self {
        Self {
            initial: Some(initial),
            edits,
        }
    }

    /// Initial value, if it survived filtering
    pub fn initial(&self) -> Option<&T> {
        self.initial.as_ref()
    }

    pub fn subscribe(&self, mut callback: impl FnMut(&T) + 'static) -> Subscription {
        if let Some(initial) = &self.initial {
            callback(initial);
        }
        self.edits.subscribe(callback)
    }

    pub fn map<U: Clone + 'static>(&self, mut f: impl FnMut(&T) -> U + 'static) -> Changes<U> {
        let initial = self.initial.as_ref().map(&mut f);
        Changes {
            initial,
            edits: self.edits.map(f),
        }
    }

    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool + 'static) -> Changes<T> {
        let initial = self.initial.clone().filter(|value| predicate(value));
        Changes {
            initial,
            edits: self.edits.filter(predicate),
        }
    }
}

/// Behavior cell holding the latest value seen on a [`Changes`]
pub struct Held<T> {
    value: Rc<RefCell<T>>,
}

impl<T: Clone> Held<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for Held<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
        }
    }
}

/// Hold the latest value of `changes`, starting from `default`.
///
/// The returned subscription keeps the cell updated until it is detached.
pub fn hold<T: Clone + 'static>(changes: &Changes<T>, default: T) -> (Held<T>, Subscription) {
    let value = Rc::new(RefCell::new(default));
    let cell = Rc::clone(&value);
    let subscription = changes.subscribe(move |latest| *cell.borrow_mut() = latest.clone());
    (Held { value }, subscription)
}
