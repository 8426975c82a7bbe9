//! Test doubles for code built on resource loading.

use crate::{LoadError, ResourceState, StateCell};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

struct MockCellInner<T> {
    state: ResourceState<T>,
    writes: Vec<ResourceState<T>>,
}

/// A [`StateCell`] that remembers every state written to it.
///
/// Clones share the same state and history.
pub struct MockCell<T> {
    inner: Arc<Mutex<MockCellInner<T>>>,
}

impl<T> MockCell<T> {
    pub fn new(initial_state: ResourceState<T>) -> Self {
        MockCell {
            inner: Arc::new(Mutex::new(MockCellInner {
                state: initial_state,
                writes: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockCellInner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every state written so far, oldest first.
    pub fn writes(&self) -> Vec<ResourceState<T>>
    where
        T: Clone,
    {
        self.lock().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes.len()
    }

    pub fn clear_writes(&self) {
        self.lock().writes.clear();
    }
}

impl<T> Clone for MockCell<T> {
    fn clone(&self) -> Self {
        MockCell {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for MockCell<T> {
    fn default() -> Self {
        MockCell::new(ResourceState::Initial)
    }
}

impl<T: Clone> StateCell<T> for MockCell<T> {
    fn get(&self) -> ResourceState<T> {
        self.lock().state.clone()
    }

    fn set(&self, state: ResourceState<T>) {
        let mut inner = self.lock();
        inner.writes.push(state.clone());
        inner.state = state;
    }

    fn replace_with<F>(&self, f: F) -> bool
    where
        F: FnOnce(&ResourceState<T>) -> Option<ResourceState<T>>,
    {
        let mut inner = self.lock();
        match f(&inner.state) {
            Some(next) => {
                inner.writes.push(next.clone());
                inner.state = next;
                true
            }
            None => false,
        }
    }
}

type Pending<T> = Vec<oneshot::Sender<Result<T, LoadError>>>;

/// A loader whose calls stay pending until the test settles them.
///
/// ```
/// use loadrx::mock::PausedLoader;
///
/// # async fn example() {
/// let loader = PausedLoader::<u32>::new();
/// let call = loader.call();
/// assert_eq!(loader.pending(), 1);
///
/// loader.resolve_all(42);
/// assert_eq!(call.await, Ok(42));
/// # }
/// ```
pub struct PausedLoader<T> {
    pending: Arc<Mutex<Pending<T>>>,
    calls: Arc<AtomicUsize>,
}

impl<T: Send + 'static> PausedLoader<T> {
    pub fn new() -> Self {
        PausedLoader {
            pending: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending<T>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a call and returns its result, available once settled.
    ///
    /// A call whose loader is dropped before settling fails with
    /// [`LoadError::Unspecified`].
    pub fn call(&self) -> impl Future<Output = Result<T, LoadError>> + Send + 'static {
        let (tx, rx) = oneshot::channel();
        self.lock().push(tx);
        self.calls.fetch_add(1, Ordering::SeqCst);
        async move { rx.await.unwrap_or(Err(LoadError::Unspecified)) }
    }

    /// Number of calls ever made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of calls not settled yet.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    pub fn resolve_all(&self, value: T)
    where
        T: Clone,
    {
        for tx in self.lock().drain(..) {
            let _ = tx.send(Ok(value.clone()));
        }
    }

    pub fn reject_all(&self, message: &str) {
        for tx in self.lock().drain(..) {
            let _ = tx.send(Err(LoadError::new(message)));
        }
    }
}

impl<T> Clone for PausedLoader<T> {
    fn clone(&self) -> Self {
        PausedLoader {
            pending: self.pending.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<T: Send + 'static> Default for PausedLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}
