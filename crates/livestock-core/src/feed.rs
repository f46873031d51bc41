//! Table change feed.
//!
//! Components register interest in a table and get told when a row in it
//! changes. The event says which table and row changed, nothing more;
//! consumers refetch and recompute.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

/// Subscribe to this name to receive events for every table.
pub const ALL_TABLES: &str = "*";

/// Kind of row change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A row changed in a table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeEvent {
    pub table: String,
    pub kind: ChangeKind,
    pub record_id: String,
}

/// Callback invoked for each event.
pub type ChangeHandler = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Handle returned by [`ChangeFeed::subscribe`].
pub type SubscriptionId = u64;

/// Observe/publish changes keyed by table name.
pub trait ChangeFeed: Send + Sync {
    fn subscribe(&self, table: &str, handler: ChangeHandler) -> SubscriptionId;

    /// Returns whether the subscription existed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    fn publish(&self, event: &ChangeEvent);
}

/// In-process change feed.
///
/// Handlers run synchronously on the publishing thread, after the registry
/// lock has been released, so a handler may subscribe or unsubscribe.
#[derive(Default)]
pub struct LocalChangeFeed {
    handlers: Mutex<HashMap<String, Vec<(SubscriptionId, ChangeHandler)>>>,
    next_id: AtomicU64,
}

impl LocalChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions across all tables.
    pub fn subscriber_count(&self) -> usize {
        self.registry().values().map(Vec::len).sum()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, Vec<(SubscriptionId, ChangeHandler)>>> {
        // Handlers never run under the lock, so a poisoned registry is still consistent.
        match self.handlers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ChangeFeed for LocalChangeFeed {
    fn subscribe(&self, table: &str, handler: ChangeHandler) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.registry()
            .entry(table.to_string())
            .or_default()
            .push((id, handler));
        tracing::debug!(table, id, "change feed subscription added");
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry();
        let mut removed = false;
        for handlers in registry.values_mut() {
            let before = handlers.len();
            handlers.retain(|(sid, _)| *sid != id);
            removed |= handlers.len() != before;
        }
        registry.retain(|_, handlers| !handlers.is_empty());
        if removed {
            tracing::debug!(id, "change feed subscription removed");
        }
        removed
    }

    fn publish(&self, event: &ChangeEvent) {
        let targets: Vec<ChangeHandler> = {
            let registry = self.registry();
            [event.table.as_str(), ALL_TABLES]
                .iter()
                .filter_map(|table| registry.get(*table))
                .flatten()
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };
        tracing::trace!(
            table = %event.table,
            kind = ?event.kind,
            record_id = %event.record_id,
            handlers = targets.len(),
            "publishing change"
        );
        for handler in targets {
            handler(event);
        }
    }
}

/// A live subscription that is removed on [`Subscription::dispose`] or drop.
pub struct Subscription {
    feed: Arc<dyn ChangeFeed>,
    id: Option<SubscriptionId>,
}

impl Subscription {
    /// Subscribe `handler` to `table` on `feed`.
    pub fn new(feed: Arc<dyn ChangeFeed>, table: &str, handler: ChangeHandler) -> Self {
        let id = feed.subscribe(table, handler);
        Self { feed, id: Some(id) }
    }

    pub fn id(&self) -> Option<SubscriptionId> {
        self.id
    }

    /// Stop receiving events.
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.feed.unsubscribe(id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn event(table: &str) -> ChangeEvent {
        ChangeEvent {
            table: table.into(),
            kind: ChangeKind::Insert,
            record_id: "r1".into(),
        }
    }

    fn counter() -> (Arc<AtomicUsize>, ChangeHandler) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, Arc::new(move |_: &ChangeEvent| {
            c.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test]
    fn test_publish_reaches_table_subscribers_only() {
        let feed = LocalChangeFeed::new();
        let (animals, h1) = counter();
        let (vaccinations, h2) = counter();
        feed.subscribe("animals", h1);
        feed.subscribe("vaccinations", h2);

        feed.publish(&event("animals"));

        assert_eq!(animals.load(Ordering::SeqCst), 1);
        assert_eq!(vaccinations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_wildcard_subscription() {
        let feed = LocalChangeFeed::new();
        let (count, handler) = counter();
        feed.subscribe(ALL_TABLES, handler);

        feed.publish(&event("animals"));
        feed.publish(&event("health_records"));

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let feed = LocalChangeFeed::new();
        let (count, handler) = counter();
        let id = feed.subscribe("animals", handler);

        assert!(feed.unsubscribe(id));
        assert!(!feed.unsubscribe(id));
        feed.publish(&event("animals"));

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_guard_disposes_on_drop() {
        let feed: Arc<LocalChangeFeed> = Arc::new(LocalChangeFeed::new());
        let (count, handler) = counter();
        {
            let _sub = Subscription::new(feed.clone(), "animals", handler);
            feed.publish(&event("animals"));
            assert_eq!(feed.subscriber_count(), 1);
        }
        feed.publish(&event("animals"));

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_handler_may_unsubscribe_itself() {
        let feed: Arc<LocalChangeFeed> = Arc::new(LocalChangeFeed::new());
        let feed_ref = Arc::clone(&feed);
        let id_cell = Arc::new(AtomicU64::new(0));
        let id_ref = Arc::clone(&id_cell);

        let id = feed.subscribe(
            "animals",
            Arc::new(move |_: &ChangeEvent| {
                feed_ref.unsubscribe(id_ref.load(Ordering::SeqCst));
            }),
        );
        id_cell.store(id, Ordering::SeqCst);

        feed.publish(&event("animals"));
        assert_eq!(feed.subscriber_count(), 0);
    }
}
