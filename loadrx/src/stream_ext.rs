use crate::ResourceState;
use futures_core::stream::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream adapters for watching resources change.
pub trait ResourceStreamExt: Stream {
    /// Ends the stream right after the first item for which `test` is true.
    ///
    /// The matching item is still yielded.
    fn stop_if<F>(self, test: F) -> StopIf<Self, F>
    where
        F: FnMut(&Self::Item) -> bool,
        Self: Sized,
    {
        StopIf {
            stream: self,
            stopped: false,
            test,
        }
    }

    /// Ends a stream of resource states once one is settled: loaded and not
    /// refreshing, or failed.
    ///
    /// ```
    /// use futures::StreamExt;
    /// use futures_signals::signal::{Mutable, SignalExt};
    /// use loadrx::{load, LoadOptions, ResourceState, ResourceStreamExt};
    ///
    /// # async fn example() {
    /// let cell = Mutable::new(ResourceState::<u32>::Initial);
    /// let states = cell.signal_cloned().to_stream().until_settled();
    ///
    /// load(|| async { 7u32 }, &cell, LoadOptions::default()).await;
    ///
    /// let last = states.collect::<Vec<_>>().await.pop();
    /// assert_eq!(last.and_then(ResourceState::data), Some(7));
    /// # }
    /// ```
    fn until_settled<T>(self) -> StopIf<Self, fn(&ResourceState<T>) -> bool>
    where
        Self: Stream<Item = ResourceState<T>> + Sized,
    {
        self.stop_if(ResourceState::<T>::is_settled)
    }
}

impl<St: ?Sized> ResourceStreamExt for St where St: Stream {}

#[pin_project(project = StopIfProj)]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct StopIf<St, F> {
    #[pin]
    stream: St,
    stopped: bool,
    test: F,
}

impl<St, F> Stream for StopIf<St, F>
where
    St: Stream,
    F: FnMut(&St::Item) -> bool,
{
    type Item = St::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let StopIfProj {
            stream,
            stopped,
            test,
        } = self.project();

        if *stopped {
            return Poll::Ready(None);
        }

        match stream.poll_next(cx) {
            Poll::Ready(Some(item)) => {
                *stopped = test(&item);
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                *stopped = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
