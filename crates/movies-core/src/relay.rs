//! Replay-all publish/subscribe relay.
//!
//! A `ReplayRelay` keeps every item published since it was created. Each
//! call to [`ReplayRelay::subscribe`] returns an independent stream that
//! yields the full history in publish order and then every later item as it
//! is published. The CRUD services build one relay per record type at
//! startup and hand it to their handlers through application state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;

/// Stream handed to a subscriber. It never ends while the relay is alive.
pub type ReplayStream<T> = UnboundedReceiverStream<T>;

#[derive(Debug)]
struct Inner<T> {
    history: Vec<T>,
    subscribers: Vec<UnboundedSender<T>>,
}

/// Replay-all relay with a single publish point.
///
/// Publishing and subscribing serialize on one lock, so every subscriber
/// sees the same total order and no item is missed or duplicated between a
/// subscriber's replay and its live tail. Subscriber buffers are unbounded:
/// a slow reader never blocks `publish`.
#[derive(Debug)]
pub struct ReplayRelay<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone + Send + 'static> ReplayRelay<T> {
    /// Creates an empty relay.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                history: Vec::new(),
                subscribers: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `item` and forwards it to every live subscriber.
    ///
    /// Subscribers whose stream has been dropped are pruned. Delivery
    /// failures never surface to the publisher.
    pub fn publish(&self, item: T) {
        let mut inner = self.lock();
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(item.clone()).is_ok());
        inner.history.push(item);
    }

    /// Returns a new stream replaying all published items, then live items.
    #[must_use]
    pub fn subscribe(&self) -> ReplayStream<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        for item in &inner.history {
            // The receiver is still in scope, so this cannot fail.
            let _ = tx.send(item.clone());
        }
        inner.subscribers.push(tx);
        debug!(
            replayed = inner.history.len(),
            subscribers = inner.subscribers.len(),
            "relay subscriber attached"
        );
        UnboundedReceiverStream::new(rx)
    }

    /// Number of items published so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().history.len()
    }

    /// Returns `true` if nothing has been published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + 'static> Default for ReplayRelay<T> {
    fn default() -> Self {
        Self::new()
    }
}
