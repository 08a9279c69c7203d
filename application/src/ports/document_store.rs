//! Shared document store port
//!
//! Defines the contract over the external real-time key-path data store
//! that holds all shared session state. Implementations (adapters) live in
//! the infrastructure layer.
//!
//! Writes are fire-and-forget: a rejected write surfaces later through the
//! [`notifier`](super::notifier) side-channel, never as a return value at
//! the call site. Consumers therefore treat every write as accepted and
//! rely on the subscription echo for the visible result.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::warn;

/// Errors raised inside store adapters.
///
/// None of these are returned from the port's write operations; they exist
/// for adapters to classify failures before routing them to the
/// notification side-channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Permission denied writing {path}")]
    PermissionDenied { path: String },

    #[error("Malformed path: {0}")]
    MalformedPath(String),

    #[error("Store disconnected")]
    Disconnected,
}

/// Whether the store currently has a live connection.
///
/// Views render a degraded "connecting" indicator instead of silently
/// presenting stale replicas as live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connected,
    Connecting,
}

/// A live subscription to one store path.
///
/// Yields the value present at subscription time immediately, then one
/// snapshot per committed mutation of the path. Dropping the guard
/// unregisters the subscriber — scoped acquisition with guaranteed release
/// on every exit path.
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<Option<Value>>,
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<Option<Value>>,
        unsubscribe: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            receiver,
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Next snapshot: `Some(None)` means the path has no value; `None`
    /// means the store side shut down.
    pub async fn next(&mut self) -> Option<Option<Value>> {
        self.receiver.recv().await
    }

    /// Next snapshot decoded into a typed replica.
    ///
    /// A snapshot that fails to decode is reported and treated as an empty
    /// path — replicas self-correct on the following delivery.
    pub async fn next_as<T: DeserializeOwned>(&mut self) -> Option<Option<T>> {
        match self.next().await {
            None => None,
            Some(None) => Some(None),
            Some(Some(value)) => match serde_json::from_value(value) {
                Ok(decoded) => Some(Some(decoded)),
                Err(e) => {
                    warn!("Discarding snapshot that failed to decode: {}", e);
                    Some(None)
                }
            },
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl futures::Stream for Subscription {
    type Item = Option<Value>;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// Contract over the external real-time key-path data store.
///
/// Paths are `/`-separated strings (`committees/{id}/motions/{key}`). The
/// store alone serializes writes: for a single path, every subscriber
/// observes them in commit order. No guarantee holds across paths.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Subscribe to a path. The current value (or `None`) is delivered
    /// immediately, then one update per committed mutation.
    async fn subscribe(&self, path: &str) -> Subscription;

    /// Replace the value at `path`, fanning the update out to all
    /// subscribers — including the writer.
    fn write(&self, path: &str, value: Value);

    /// Append `value` under a freshly generated key beneath `path`.
    ///
    /// Generated keys are chronologically monotonic: natural string order
    /// equals insertion order.
    fn push(&self, path: &str, value: Value) -> String;

    /// Delete the value at `path`, firing updates.
    fn remove(&self, path: &str);

    /// Mint a push key without writing anything.
    fn generate_key(&self) -> String;

    /// Observe the store's connection state.
    fn connection(&self) -> watch::Receiver<ConnectionState>;
}

/// Encode a domain value for the store.
///
/// Serialization of the domain types cannot fail (plain structs, string
/// map keys); `Null` is the defensive fallback rather than a panic path.
pub fn encode<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
