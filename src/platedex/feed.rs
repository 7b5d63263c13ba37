//! Snapshot publishing.
//!
//! Whoever owns the store publishes the full item list of a kind after every
//! change; views hold a [`Receiver`] and re-derive from the newest snapshot.
//! Subscribers whose receiver has been dropped are pruned on the next publish.

use crate::model::{Item, ItemKind};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub kind: ItemKind,
    pub items: Arc<Vec<Item>>,
}

impl Snapshot {
    pub fn new(kind: ItemKind, items: Vec<Item>) -> Self {
        Self {
            kind,
            items: Arc::new(items),
        }
    }
}

#[derive(Debug, Default)]
pub struct SnapshotFeed {
    subscribers: Vec<Sender<Snapshot>>,
}

impl SnapshotFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<Snapshot> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, snapshot: Snapshot) {
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
        tracing::debug!(
            kind = %snapshot.kind,
            items = snapshot.items.len(),
            subscribers = self.subscribers.len(),
            "published snapshot"
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
