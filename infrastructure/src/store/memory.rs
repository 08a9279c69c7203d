//! In-memory document store
//!
//! A faithful in-process implementation of the store port. One mutex
//! serializes every commit, and fan-out happens under the same lock, so
//! all subscribers of a path observe its writes in commit order — the
//! single ordering guarantee the rest of the system builds on.
//!
//! Writes against paths the access rules reject are dropped and reported
//! through the notification side-channel, matching the remote store's
//! behavior of failing asynchronously rather than at the call site.

use super::push_id::PushIdGenerator;
use super::rules::AccessRules;
use async_trait::async_trait;
use gavel_application::ports::document_store::{
    ConnectionState, DocumentStore, Subscription,
};
use gavel_application::ports::notifier::{FailureNotifier, NoFailureNotifier, Notice};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, watch};
use tracing::warn;

struct Subscriber {
    id: u64,
    path: Vec<String>,
    sender: mpsc::UnboundedSender<Option<Value>>,
}

struct StoreInner {
    root: Value,
    subscribers: Vec<Subscriber>,
    next_subscriber: u64,
    keys: PushIdGenerator,
}

/// In-process document store with remote-store semantics
pub struct MemoryDocumentStore {
    inner: Arc<Mutex<StoreInner>>,
    connection: watch::Sender<ConnectionState>,
    notifier: Arc<dyn FailureNotifier>,
    rules: AccessRules,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::with_rules(AccessRules::allow_all(), Arc::new(NoFailureNotifier))
    }

    /// Store enforcing `rules`, reporting rejections to `notifier`
    pub fn with_rules(rules: AccessRules, notifier: Arc<dyn FailureNotifier>) -> Self {
        let (connection, _) = watch::channel(ConnectionState::Connected);
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                root: Value::Object(Map::new()),
                subscribers: Vec::new(),
                next_subscriber: 0,
                keys: PushIdGenerator::new(),
            })),
            connection,
            notifier,
            rules,
        }
    }

    /// Flip the reported connection state (used when bridging to a real
    /// remote store, and by tests of the degraded indicator)
    pub fn set_connection(&self, state: ConnectionState) {
        let _ = self.connection.send(state);
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribers
            .len()
    }

    fn commit(&self, path: &str, value: Option<Value>) {
        if !self.rules.can_write(path) {
            warn!("Write to {} rejected by access rules", path);
            self.notifier.notify(Notice::permission_denied(path));
            return;
        }
        let segments = segments(path);
        if segments.is_empty() {
            warn!("Ignoring write to malformed path {:?}", path);
            return;
        }

        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        match value {
            Some(value) => set_at(&mut inner.root, &segments, value),
            None => remove_at(&mut inner.root, &segments),
        }
        fan_out(&mut inner, &segments);
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn subscribe(&self, path: &str) -> Subscription {
        let segments = segments(path);
        let (sender, receiver) = mpsc::unbounded_channel();

        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;

        // Initial snapshot inside the lock: nothing can commit between the
        // snapshot and the registration, so no update is lost or reordered
        let _ = sender.send(value_at(&inner.root, &segments).cloned());
        inner.subscribers.push(Subscriber {
            id,
            path: segments,
            sender,
        });

        let registry = Arc::clone(&self.inner);
        Subscription::new(receiver, move || {
            if let Ok(mut inner) = registry.lock() {
                inner.subscribers.retain(|s| s.id != id);
            }
        })
    }

    fn write(&self, path: &str, value: Value) {
        self.commit(path, Some(value));
    }

    fn push(&self, path: &str, value: Value) -> String {
        let key = self.generate_key();
        self.commit(&format!("{}/{}", path, key), Some(value));
        key
    }

    fn remove(&self, path: &str) {
        self.commit(path, None);
    }

    fn generate_key(&self) -> String {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.keys.next(chrono::Utc::now().timestamp_millis())
    }

    fn connection(&self) -> watch::Receiver<ConnectionState> {
        self.connection.subscribe()
    }
}

fn segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn value_at<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn set_at(root: &mut Value, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut current = root;
    for segment in parents {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Some(object) = current.as_object_mut() else {
            return;
        };
        current = object
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Some(object) = current.as_object_mut() {
        object.insert(last.clone(), value);
    }
}

fn remove_at(root: &mut Value, segments: &[String]) {
    let (last, parents) = match segments.split_last() {
        Some(split) => split,
        None => return,
    };
    let mut current = root;
    for segment in parents {
        match current.as_object_mut().and_then(|o| o.get_mut(segment)) {
            Some(next) => current = next,
            None => return,
        }
    }
    if let Some(object) = current.as_object_mut() {
        object.remove(last);
    }
}

/// Deliver the committed mutation to every subscriber it affects: exact
/// path, ancestors (their document changed beneath them), and descendants
/// (their value was replaced from above).
fn fan_out(inner: &mut StoreInner, written: &[String]) {
    let root = std::mem::replace(&mut inner.root, Value::Null);
    inner.subscribers.retain(|subscriber| {
        if !overlaps(&subscriber.path, written) {
            return true;
        }
        let snapshot = value_at(&root, &subscriber.path).cloned();
        subscriber.sender.send(snapshot).is_ok()
    });
    inner.root = root;
}

fn overlaps(a: &[String], b: &[String]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x == y)
}
