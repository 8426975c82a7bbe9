use crate::{Clock, LoadResult, ResourceState, StateCell, SystemClock, Timestamp};
use pin_project::{pin_project, pinned_drop};
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tracing::{debug, warn};

/// How a call to [`load`] ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Outcome {
    /// The loader resolved and its value is now loaded.
    Success,
    /// Nothing happened: a load was in flight, or data was loaded and no refresh was asked for.
    Skipped,
    /// The loader failed and the failure was recorded in the state.
    Error,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error)
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct LoadOptions {
    /// Reload even if data is already loaded.
    pub refresh: bool,
}

impl LoadOptions {
    pub fn refresh() -> Self {
        LoadOptions { refresh: true }
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }
}

/// Loads a resource into `cell` using the system clock.
///
/// See [`ResourceLoader::load`].
pub fn load<T, C, F, Fut>(loader: F, cell: C, options: LoadOptions) -> Load<T, C, Fut, SystemClock>
where
    T: Clone,
    C: StateCell<T>,
    F: FnOnce() -> Fut,
    Fut: Future,
    Fut::Output: LoadResult<T>,
{
    ResourceLoader::new().load(loader, cell, options)
}

/// Drives resource states through their load lifecycle.
#[derive(Debug, Clone, Default)]
pub struct ResourceLoader<K = SystemClock> {
    clock: K,
}

impl ResourceLoader<SystemClock> {
    pub fn new() -> Self {
        ResourceLoader { clock: SystemClock }
    }
}

impl<K: Clock + Clone> ResourceLoader<K> {
    pub fn with_clock(clock: K) -> Self {
        ResourceLoader { clock }
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Starts loading `cell` with `loader`, unless a load is redundant.
    ///
    /// The skip decision and the "loading" write happen before this returns,
    /// as one [`StateCell::replace_with`] call; `loader` is only called when
    /// the load proceeds. The returned future settles the state when it
    /// completes and never fails itself: loader errors end up in the state
    /// and in [`Outcome::Error`].
    pub fn load<T, C, F, Fut>(&self, loader: F, cell: C, options: LoadOptions) -> Load<T, C, Fut, K>
    where
        T: Clone,
        C: StateCell<T>,
        F: FnOnce() -> Fut,
        Fut: Future,
        Fut::Output: LoadResult<T>,
    {
        let started_at = self.clock.now();
        let mut previous = None;
        let started = cell.replace_with(|current| {
            let next = current.begin_load(options.refresh, started_at);
            previous = Some(current.clone());
            next
        });
        let status = previous.as_ref().map(ResourceState::status);

        match previous.filter(|_| started) {
            None => {
                debug!(status = ?status, refresh = options.refresh, "load skipped");
                Load::skipped(cell, self.clock.clone(), started_at)
            }
            Some(previous) => {
                debug!(from = ?status, refresh = options.refresh, "load started");
                Load::in_flight(loader(), cell, self.clock.clone(), started_at, previous)
            }
        }
    }
}

/// Future returned by [`load`] and [`ResourceLoader::load`].
///
/// Dropping it before it completes puts back the state the load started
/// from, so the resource can be loaded again.
#[pin_project(project = LoadProj, PinnedDrop)]
#[must_use = "a started load does not settle unless the future is polled"]
pub struct Load<T, C, Fut, K>
where
    C: StateCell<T>,
{
    #[pin]
    pending: Option<Fut>,
    cell: C,
    clock: K,
    started_at: Timestamp,
    outcome: Outcome,
    previous: Option<ResourceState<T>>,
}

impl<T, C: StateCell<T>, Fut, K> Load<T, C, Fut, K> {
    fn skipped(cell: C, clock: K, started_at: Timestamp) -> Self {
        Load {
            pending: None,
            cell,
            clock,
            started_at,
            outcome: Outcome::Skipped,
            previous: None,
        }
    }

    fn in_flight(
        future: Fut,
        cell: C,
        clock: K,
        started_at: Timestamp,
        previous: ResourceState<T>,
    ) -> Self {
        Load {
            pending: Some(future),
            cell,
            clock,
            started_at,
            outcome: Outcome::Skipped,
            previous: Some(previous),
        }
    }

    /// True when the load was skipped, which is known as soon as the future exists.
    pub fn is_skipped(&self) -> bool {
        self.pending.is_none() && self.outcome.is_skipped()
    }

    /// When the load call was made.
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }
}

#[pinned_drop]
impl<T, C: StateCell<T>, Fut, K> PinnedDrop for Load<T, C, Fut, K> {
    fn drop(self: Pin<&mut Self>) {
        let this = self.project();
        if this.pending.is_none() {
            return;
        }
        let Some(previous) = this.previous.take() else {
            return;
        };
        // Only the in-flight marker written by this load is undone.
        let restored = this
            .cell
            .replace_with(|current| current.is_in_flight().then_some(previous));
        if restored {
            warn!("load dropped before settling, previous state restored");
        }
    }
}

impl<T, C, Fut, K> Future for Load<T, C, Fut, K>
where
    T: Clone,
    C: StateCell<T>,
    Fut: Future,
    Fut::Output: LoadResult<T>,
    K: Clock,
{
    type Output = Outcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let LoadProj {
            mut pending,
            cell,
            clock,
            started_at,
            outcome,
            ..
        } = self.project();

        let result = match pending.as_mut().as_pin_mut() {
            Some(future) => <Fut::Output as LoadResult<T>>::into_load_result(ready!(future.poll(cx))),
            None => return Poll::Ready(*outcome),
        };
        pending.set(None);

        let now = clock.now();
        *outcome = match result {
            Ok(data) => {
                cell.set(ResourceState::loaded(data, now));
                debug!(
                    elapsed_ms = now.as_millis().saturating_sub(started_at.as_millis()),
                    "load succeeded"
                );
                Outcome::Success
            }
            Err(error) => {
                let message = error.message();
                let mut refreshing = false;
                cell.replace_with(|current| {
                    refreshing = current.is_loaded();
                    Some(current.fail(message.as_str(), now))
                });
                warn!(error = %message, refresh = refreshing, "load failed");
                Outcome::Error
            }
        };
        Poll::Ready(*outcome)
    }
}
