use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// A single-threaded observable value.
///
/// Views read the current value with [`Signal::get`] and re-render from a
/// [`Signal::subscribe`] callback. Subscriptions end when the returned
/// [`Subscription`] is dropped.
pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

struct SignalInner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(u64, Subscriber<T>)>>,
    next_id: Cell<u64>,
}

trait Unsubscribe {
    fn unsubscribe(&self, id: u64);
}

impl<T> Unsubscribe for SignalInner<T> {
    fn unsubscribe(&self, id: u64) {
        self.subscribers
            .borrow_mut()
            .retain(|(subscriber_id, _)| *subscriber_id != id);
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for Signal<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(SignalInner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.inner.value.borrow())
    }

    /// Stores `value` and notifies subscribers. Returns `false` without
    /// notifying when the value is unchanged.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }

        let snapshot = self.get();
        // Callbacks may subscribe or unsubscribe while we iterate.
        let subscribers: Vec<Subscriber<T>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();

        for subscriber in subscribers {
            subscriber(&snapshot);
        }
        true
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));

        let weak: Weak<SignalInner<T>> = Rc::downgrade(&self.inner);
        let signal: Weak<dyn Unsubscribe> = weak;
        Subscription { id, signal }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

/// Keeps a [`Signal`] callback registered until dropped.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    signal: Weak<dyn Unsubscribe>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.upgrade() {
            signal.unsubscribe(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_notifies_subscribers_with_new_value() {
        let signal = Signal::new(String::from("home"));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_handle = Rc::clone(&seen);
        let _subscription = signal.subscribe(move |value: &String| {
            seen_handle.borrow_mut().push(value.clone());
        });

        assert!(signal.set(String::from("about")));
        assert!(signal.set(String::from("skills")));
        assert_eq!(*seen.borrow(), vec!["about".to_string(), "skills".to_string()]);
        assert_eq!(signal.get(), "skills");
    }

    #[test]
    fn equal_value_does_not_notify() {
        let signal = Signal::new(false);
        let calls = Rc::new(Cell::new(0));

        let calls_handle = Rc::clone(&calls);
        let _subscription = signal.subscribe(move |_| calls_handle.set(calls_handle.get() + 1));

        assert!(!signal.set(false));
        assert!(signal.set(true));
        assert!(!signal.set(true));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let signal = Signal::new(0_u32);
        let calls = Rc::new(Cell::new(0));

        let calls_handle = Rc::clone(&calls);
        let subscription = signal.subscribe(move |_| calls_handle.set(calls_handle.get() + 1));
        signal.set(1);
        drop(subscription);
        signal.set(2);

        assert_eq!(calls.get(), 1);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_signal_drops_cleanly() {
        let signal = Signal::new(0_u32);
        let subscription = signal.subscribe(|_| {});
        drop(signal);
        drop(subscription);
    }

    #[test]
    fn callback_may_drop_its_own_subscription() {
        let signal = Signal::new(0_u32);
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot_handle = Rc::clone(&slot);
        let subscription = signal.subscribe(move |_| {
            slot_handle.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(subscription);

        signal.set(1);
        assert_eq!(signal.subscriber_count(), 0);
    }
}
