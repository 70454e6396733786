//! Subscribable holder of the current state snapshot

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use super::State;

/// Handle returned by `StateStore::subscribe`
pub type SubscriptionId = u64;

type Observer = Box<dyn Fn(&State)>;

/// Holds the current `State` and the observers interested in it.
///
/// Swapping is a single assignment of a new `Arc<State>`, so a reader always
/// gets a complete snapshot. Meant for one caller thread (the UI loop).
/// Observers must not subscribe or unsubscribe while being notified.
pub struct StateStore {
    current: RefCell<Arc<State>>,
    observers: RefCell<Vec<(SubscriptionId, Observer)>>,
    next_id: Cell<SubscriptionId>,
}

impl StateStore {
    pub fn new(initial: State) -> Self {
        Self {
            current: RefCell::new(Arc::new(initial)),
            observers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Current snapshot
    pub fn get(&self) -> Arc<State> {
        self.current.borrow().clone()
    }

    /// Swap in a new snapshot and notify observers
    pub fn replace(&self, state: State) {
        let snapshot = Arc::new(state);
        *self.current.borrow_mut() = Arc::clone(&snapshot);

        for (_, observer) in self.observers.borrow().iter() {
            observer(&snapshot);
        }
    }

    /// Derive the next snapshot from the current one and swap it in
    pub fn update(&self, transition: impl FnOnce(&State) -> State) {
        let next = transition(&self.get());
        self.replace(next);
    }

    /// Register an observer, called after every swap
    pub fn subscribe(&self, observer: impl Fn(&State) + 'static) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.observers.borrow_mut().push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(State::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OperationMode;
    use std::rc::Rc;

    #[test]
    fn test_observers_see_new_snapshot() {
        let store = StateStore::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.subscribe(move |state| sink.borrow_mut().push(state.mode));

        store.update(|s| s.with_mode(OperationMode::Edit));
        store.update(|s| s.with_mode(OperationMode::Create));

        assert_eq!(*seen.borrow(), vec![OperationMode::Edit, OperationMode::Create]);
    }

    #[test]
    fn test_old_snapshot_is_untouched_by_swap() {
        let store = StateStore::default();
        let before = store.get();
        store.update(|s| s.with_mode(OperationMode::Edit));

        assert_eq!(before.mode, OperationMode::Create);
        assert_eq!(store.get().mode, OperationMode::Edit);
    }

    #[test]
    fn test_unsubscribe() {
        let store = StateStore::default();
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| counter.set(counter.get() + 1));
        store.replace(State::default());
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.replace(State::default());

        assert_eq!(calls.get(), 1);
        assert_eq!(store.observer_count(), 0);
    }
}
