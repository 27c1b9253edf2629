//! Per-request context handed to the failure pipeline.

use tokio::sync::watch;

/// Cooperative cancellation signal threaded through the request context.
///
/// Built on a `watch` channel: the transport holds the [`CancelHandle`] and
/// flips it when the client goes away. A dropped handle means the request
/// ran to completion, not cancellation.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    receiver: watch::Receiver<bool>,
}

/// Transport-side handle that triggers cancellation.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

/// Create a connected handle/signal pair.
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (sender, receiver) = watch::channel(false);
    (CancelHandle { sender }, CancelSignal { receiver })
}

impl CancelSignal {
    /// A signal that can never fire, for contexts with no cancellation
    /// source (tests, one-shot tools).
    pub fn never() -> Self {
        let (_sender, receiver) = watch::channel(false);
        Self { receiver }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }
}

impl CancelHandle {
    /// Request cancellation; observers see it on their next check.
    pub fn cancel(&self) {
        let _ = self.sender.send(true);
    }
}

/// Context for the one request a failure belongs to.
///
/// Immutable; created by the transport before the failure pipeline runs and
/// discarded with the request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    path: String,
    cancellation: CancelSignal,
}

impl RequestContext {
    pub fn new(path: impl Into<String>, cancellation: CancelSignal) -> Self {
        Self {
            path: path.into(),
            cancellation,
        }
    }

    /// The request path, used as the document's `instance`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn cancellation(&self) -> &CancelSignal {
        &self.cancellation
    }
}
