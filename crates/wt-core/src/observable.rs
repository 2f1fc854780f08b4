//! Replay-one observable values.
//!
//! An [`Observable`] holds a current value and a list of callbacks. Setting
//! the value stores it first and then notifies every registered callback, in
//! registration order. A new subscriber is called with the current value
//! straight away.
//!
//! # Re-entrancy
//!
//! Callbacks may set the value of the observable that is notifying them. Such
//! values are queued and delivered once the current round finishes, so every
//! subscriber still sees every value in the order the mutations were applied
//! and no callback is ever entered twice.
//!
//! # Thread Safety
//!
//! The tracker runs on a single logical thread. `Observable` is built on
//! `Rc`/`RefCell` and is neither `Send` nor `Sync`.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Observer<T> {
    id: u64,
    callback: Callback<T>,
}

struct Inner<T> {
    value: RefCell<T>,
    observers: RefCell<Vec<Observer<T>>>,
    pending: RefCell<VecDeque<T>>,
    notifying: Cell<bool>,
    next_id: Cell<u64>,
}

/// A value that replays its latest state to new subscribers and broadcasts
/// every change.
///
/// Cloning an `Observable` yields another handle to the same value.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                observers: RefCell::new(Vec::new()),
                pending: RefCell::new(VecDeque::new()),
                notifying: Cell::new(false),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Stores `value`, then notifies every subscriber.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value.clone();
        self.inner.pending.borrow_mut().push_back(value);

        if self.inner.notifying.replace(true) {
            return;
        }
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(value) = next else { break };
            self.notify(&value);
        }
        self.inner.notifying.set(false);
    }

    fn notify(&self, value: &T) {
        let ids: Vec<u64> = self.inner.observers.borrow().iter().map(|o| o.id).collect();
        for id in ids {
            // Look the observer up again: an earlier callback may have
            // cancelled it.
            let callback = self
                .inner
                .observers
                .borrow()
                .iter()
                .find(|o| o.id == id)
                .map(|o| Rc::clone(&o.callback));
            if let Some(callback) = callback {
                if let Ok(mut callback) = callback.try_borrow_mut() {
                    (*callback)(value);
                }
            }
        }
    }

    /// Registers `callback` and immediately calls it with the current value.
    ///
    /// Delivery stops when the returned [`Subscription`] is dropped or
    /// cancelled.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        self.inner.observers.borrow_mut().push(Observer {
            id,
            callback: Rc::clone(&callback),
        });

        let current = self.get();
        if let Ok(mut callback) = callback.try_borrow_mut() {
            (*callback)(&current);
        }

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.observers.borrow_mut().retain(|o| o.id != id);
            }
        })
    }

    #[cfg(test)]
    fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.inner.value)
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

/// Handle to a registered callback.
///
/// Dropping the handle cancels the subscription. Use [`Subscription::detach`]
/// to keep the callback registered for the lifetime of the observable.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stops delivery to the callback.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Leaves the callback registered without keeping a handle.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
