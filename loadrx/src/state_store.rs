use crate::{ResourceState, State, StateCell};
use futures_signals::signal::{Mutable, MutableSignalCloned, SignalExt, SignalStream};

/// Reactive container for application state.
///
/// Writes are applied synchronously under the store's lock and then
/// broadcast to every signal and stream handed out by the store.
pub struct StateStore<S: State> {
    state: Mutable<S>,
}

impl<S: State> StateStore<S> {
    pub fn new(initial_state: S) -> Self {
        StateStore {
            state: Mutable::new(initial_state),
        }
    }

    pub fn to_stream(&self) -> SignalStream<MutableSignalCloned<S>> {
        self.state.signal_cloned().to_stream()
    }

    pub fn to_signal(&self) -> MutableSignalCloned<S> {
        self.state.signal_cloned()
    }

    pub fn get_state(&self) -> S {
        self.state.get_cloned()
    }

    /// Replaces the state with what `reducer` makes of the current one.
    pub fn set_state<F>(&self, reducer: F)
    where
        F: FnOnce(S) -> S,
    {
        let mut lock = self.state.lock_mut();
        let next = reducer((*lock).clone());
        *lock = next;
    }

    /// Edits the state in place.
    pub fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut S),
    {
        mutate(&mut *self.state.lock_mut());
    }

    /// Runs `action` against the current state without notifying anyone.
    pub fn with_state<F, R>(&self, action: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        action(&*self.state.lock_ref())
    }

    /// Exposes one resource slot of the state as a [`StateCell`].
    pub fn slice<T>(
        &self,
        get: fn(&S) -> &ResourceState<T>,
        get_mut: fn(&mut S) -> &mut ResourceState<T>,
    ) -> SliceCell<S, T> {
        SliceCell {
            state: self.state.clone(),
            get,
            get_mut,
        }
    }
}

impl<S: State + Default> Default for StateStore<S> {
    fn default() -> Self {
        StateStore::new(S::default())
    }
}

/// A [`StateCell`] addressing a single [`ResourceState`] inside a store.
pub struct SliceCell<S, T> {
    state: Mutable<S>,
    get: fn(&S) -> &ResourceState<T>,
    get_mut: fn(&mut S) -> &mut ResourceState<T>,
}

impl<S, T> Clone for SliceCell<S, T> {
    fn clone(&self) -> Self {
        SliceCell {
            state: self.state.clone(),
            get: self.get,
            get_mut: self.get_mut,
        }
    }
}

impl<S, T: Clone> StateCell<T> for SliceCell<S, T> {
    fn get(&self) -> ResourceState<T> {
        (self.get)(&*self.state.lock_ref()).clone()
    }

    fn set(&self, state: ResourceState<T>) {
        *(self.get_mut)(&mut *self.state.lock_mut()) = state;
    }

    fn replace_with<F>(&self, f: F) -> bool
    where
        F: FnOnce(&ResourceState<T>) -> Option<ResourceState<T>>,
    {
        let mut lock = self.state.lock_mut();
        match f((self.get)(&*lock)) {
            Some(next) => {
                *(self.get_mut)(&mut *lock) = next;
                true
            }
            None => false,
        }
    }
}
