use crate::ResourceState;
use futures_signals::signal::Mutable;

/// Mutable slot holding one [`ResourceState`].
///
/// The loader reads and writes resource state only through this trait.
pub trait StateCell<T> {
    fn get(&self) -> ResourceState<T>;

    fn set(&self, state: ResourceState<T>);

    /// Reads the current state and, if `f` returns a new one, writes it.
    ///
    /// Returns whether a write happened. Implementations backed by a lock
    /// must hold it across the read and the write; the default does not.
    fn replace_with<F>(&self, f: F) -> bool
    where
        F: FnOnce(&ResourceState<T>) -> Option<ResourceState<T>>,
    {
        match f(&self.get()) {
            Some(next) => {
                self.set(next);
                true
            }
            None => false,
        }
    }
}

impl<T, C> StateCell<T> for &C
where
    C: StateCell<T> + ?Sized,
{
    fn get(&self) -> ResourceState<T> {
        (**self).get()
    }

    fn set(&self, state: ResourceState<T>) {
        (**self).set(state)
    }

    fn replace_with<F>(&self, f: F) -> bool
    where
        F: FnOnce(&ResourceState<T>) -> Option<ResourceState<T>>,
    {
        (**self).replace_with(f)
    }
}

impl<T: Clone> StateCell<T> for Mutable<ResourceState<T>> {
    fn get(&self) -> ResourceState<T> {
        self.get_cloned()
    }

    fn set(&self, state: ResourceState<T>) {
        Mutable::set(self, state)
    }

    fn replace_with<F>(&self, f: F) -> bool
    where
        F: FnOnce(&ResourceState<T>) -> Option<ResourceState<T>>,
    {
        let mut lock = self.lock_mut();
        // Reading through `Deref` leaves subscribers unnotified when nothing is written.
        match f(&*lock) {
            Some(next) => {
                *lock = next;
                true
            }
            None => false,
        }
    }
}

/// A cell made of a getter and a setter closure.
///
/// Useful when the state lives somewhere the crate knows nothing about.
/// Reads and writes are separate calls, so [`StateCell::replace_with`] is
/// only as atomic as the caller's execution model.
pub struct FnCell<G, S> {
    getter: G,
    setter: S,
}

impl<G, S> FnCell<G, S> {
    pub fn new(getter: G, setter: S) -> Self {
        FnCell { getter, setter }
    }
}

impl<T, G, S> StateCell<T> for FnCell<G, S>
where
    G: Fn() -> ResourceState<T>,
    S: Fn(ResourceState<T>),
{
    fn get(&self) -> ResourceState<T> {
        (self.getter)()
    }

    fn set(&self, state: ResourceState<T>) {
        (self.setter)(state)
    }
}
