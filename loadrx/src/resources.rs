use crate::{Clock, LoadError, LoadOptions, LoadResult, Outcome, ResourceLoader, StateCell};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::Instrument;

pub type BoxLoadFuture<T> = Pin<Box<dyn Future<Output = Result<T, LoadError>> + Send>>;

/// How to fetch one declared resource.
///
/// Implemented for every `Fn() -> impl Future` whose output is a
/// [`LoadResult`], so plain async closures can be registered directly.
pub trait ResourceDefinition<T>: Send + Sync + 'static {
    fn fetch(&self) -> BoxLoadFuture<T>;
}

impl<T, F, Fut> ResourceDefinition<T> for F
where
    T: 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: LoadResult<T>,
{
    fn fetch(&self) -> BoxLoadFuture<T> {
        let future = (self)();
        Box::pin(async move { <Fut::Output as LoadResult<T>>::into_load_result(future.await) })
    }
}

/// Store states that carry a slice of declared resources.
///
/// `R` is the states struct generated by [`define_resources!`](crate::define_resources).
pub trait HasResources<R> {
    fn resources(&self) -> &R;

    fn resources_mut(&mut self) -> &mut R;
}

/// A load started through a resource registry.
#[must_use = "a started load does not settle unless the future is polled"]
pub struct ResourceLoad {
    resource: &'static str,
    skipped: bool,
    future: Pin<Box<dyn Future<Output = Outcome> + Send>>,
}

impl ResourceLoad {
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped
    }
}

impl fmt::Debug for ResourceLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceLoad")
            .field("resource", &self.resource)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

impl Future for ResourceLoad {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(cx)
    }
}

impl<K> ResourceLoader<K>
where
    K: Clock + Clone + 'static,
{
    /// Loads a named resource, tracing the whole load under a `resource` span.
    pub fn load_resource<T, C, F, Fut>(
        &self,
        resource: &'static str,
        loader: F,
        cell: C,
        options: LoadOptions,
    ) -> ResourceLoad
    where
        T: Clone + Send + 'static,
        C: StateCell<T> + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future + Send + 'static,
        Fut::Output: LoadResult<T>,
    {
        let span = tracing::debug_span!("resource", name = resource, refresh = options.refresh);
        let load = {
            let _entered = span.enter();
            self.load(loader, cell, options)
        };
        ResourceLoad {
            resource,
            skipped: load.is_skipped(),
            future: Box::pin(load.instrument(span)),
        }
    }
}
