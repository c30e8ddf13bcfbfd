//! Explicit, injectable state container.
//!
//! Each container is an independent handle over a `tokio::sync::watch`
//! channel: clones share state, separately constructed containers do not.
//! Works with or without a running Tokio runtime; only awaiting
//! `Receiver::changed` needs one.

use std::sync::Arc;

use tokio::sync::watch;

/// Observable state shared by every clone of the handle.
///
/// Readers take snapshots with [`get`](Self::get) or borrow with
/// [`read`](Self::read); writers go through [`update`](Self::update) or
/// [`update_if`](Self::update_if), which wake receivers from
/// [`subscribe`](Self::subscribe).
pub struct StateContainer<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for StateContainer<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Default> Default for StateContainer<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> StateContainer<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Reads the state without cloning it.
    #[must_use]
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Mutates the state and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Mutates the state; subscribers are notified only when `f` returns `true`.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// Receiver that sees every notified change after this call.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state_and_new_instances_do_not() {
        let a = StateContainer::new(1u32);
        let b = a.clone();
        let other = StateContainer::new(1u32);

        b.update(|v| *v += 1);
        assert_eq!(a.get(), 2);
        assert_eq!(other.get(), 1);
    }

    #[test]
    fn subscribers_see_updates() {
        let state = StateContainer::new(String::from("idle"));
        let mut rx = state.subscribe();
        assert!(!rx.has_changed().unwrap());

        state.update(|s| s.push_str("-busy"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "idle-busy");
    }

    #[test]
    fn update_if_false_does_not_notify() {
        let state = StateContainer::new(0i32);
        let rx = state.subscribe();
        assert!(!state.update_if(|_| false));
        assert!(!rx.has_changed().unwrap());
        assert!(state.update_if(|v| {
            *v = 7;
            true
        }));
        assert!(rx.has_changed().unwrap());
        assert_eq!(state.read(|v| *v), 7);
    }
}
