//! # Observable State
//!
//! [`StateCell`] is the single owner of a store's state. It wraps a `tokio::sync::watch`
//! sender: every write is published to all [`watch::Receiver`]s handed out by
//! [`StoreClient::subscribe`](crate::StoreClient::subscribe), so a UI can react to the `loading`
//! flag while a request is still in flight.

use tokio::sync::watch;

/// Owner of a store's current state.
pub struct StateCell<S> {
    sender: watch::Sender<S>,
}

impl<S: Clone + Send + Sync> StateCell<S> {
    /// Creates a cell holding `initial` and returns the first receiver for it.
    pub fn new(initial: S) -> (Self, watch::Receiver<S>) {
        let (sender, receiver) = watch::channel(initial);
        (Self { sender }, receiver)
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Reads a projection of the current state without cloning all of it.
    ///
    /// The borrow is released before this returns; never hold state across an `.await`.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Mutates the state in place and notifies every subscriber.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        self.sender.send_modify(f);
    }

    /// Replaces the whole state and notifies every subscriber.
    pub fn replace(&self, state: S) {
        self.sender.send_replace(state);
    }

    /// Opens another receiver on this cell.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    /// Sets the boolean selected by `flag` and returns a guard that clears it when dropped.
    ///
    /// The flag goes back to `false` on every exit path of the enclosing scope, including early
    /// returns through `?`.
    ///
    /// ```rust
    /// use store_framework::StateCell;
    ///
    /// #[derive(Clone, Default)]
    /// struct Feed { loading: bool }
    ///
    /// let (cell, rx) = StateCell::new(Feed::default());
    /// {
    ///     let _guard = cell.begin_loading(|s| &mut s.loading);
    ///     assert!(rx.borrow().loading);
    /// }
    /// assert!(!rx.borrow().loading);
    /// ```
    pub fn begin_loading(&self, flag: fn(&mut S) -> &mut bool) -> LoadingGuard<'_, S> {
        self.update(|state| *flag(state) = true);
        LoadingGuard { cell: self, flag }
    }
}

/// Scoped loading flag, see [`StateCell::begin_loading`].
#[must_use = "the loading flag is cleared as soon as the guard is dropped"]
pub struct LoadingGuard<'a, S: Clone + Send + Sync> {
    cell: &'a StateCell<S>,
    flag: fn(&mut S) -> &mut bool,
}

impl<S: Clone + Send + Sync> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        let flag = self.flag;
        self.cell.update(|state| *flag(state) = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Counter {
        value: u32,
        loading: bool,
    }

    fn failing_step(cell: &StateCell<Counter>) -> Result<(), String> {
        let _guard = cell.begin_loading(|s| &mut s.loading);
        cell.update(|s| s.value += 1);
        Err("boom".to_string())
    }

    #[test]
    fn test_update_is_published() {
        let (cell, rx) = StateCell::new(Counter::default());
        cell.update(|s| s.value = 7);
        assert_eq!(rx.borrow().value, 7);
        assert_eq!(cell.read(|s| s.value), 7);
    }

    #[test]
    fn test_loading_guard_resets_on_error_path() {
        let (cell, rx) = StateCell::new(Counter::default());
        assert!(failing_step(&cell).is_err());
        let state = rx.borrow().clone();
        assert_eq!(state.value, 1);
        assert!(!state.loading);
    }

    #[test]
    fn test_replace_overwrites_everything() {
        let (cell, _rx) = StateCell::new(Counter {
            value: 3,
            loading: true,
        });
        cell.replace(Counter::default());
        assert_eq!(cell.snapshot(), Counter::default());
    }
}
