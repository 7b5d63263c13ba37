//! # Storage Layer
//!
//! The [`DataStore`] trait is everything the command layer needs from
//! persistence: items keyed by id, named collections, and the many-to-many
//! membership between them. It carries no query logic; filtering, sorting and
//! search run over the lists it returns.
//!
//! ## Layering
//!
//! [`CatalogStore`] implements the trait once, over a [`StorageBackend`] that
//! only knows how to load and save whole tables:
//!
//! - [`fs::FileStore`]: JSON files in the data directory.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── items.json          # Uuid -> Item, every kind
//! ├── collections.json    # Collection list
//! ├── memberships.json    # (collection, item) pairs
//! └── config.json         # PlatedexConfig
//! ```
//!
//! Every write replaces a whole table atomically (write to a temp file, then
//! rename). There is no implicit batching: each mutating call is persisted
//! before it returns.

use crate::error::Result;
use crate::model::{Collection, Item, ItemKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod backend;
pub mod catalog_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

pub use backend::StorageBackend;
pub use catalog_store::CatalogStore;

/// One item's membership in one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Membership {
    pub collection_id: Uuid,
    pub item_id: Uuid,
}

/// Abstract interface for catalog storage.
pub trait DataStore {
    /// Save an item (create or replace by id). Replacing may change its kind.
    fn save_item(&mut self, item: &Item) -> Result<()>;

    /// Save several items with a single write.
    fn save_items(&mut self, items: &[Item]) -> Result<()>;

    fn get_item(&self, id: &Uuid) -> Result<Item>;

    /// All items of one kind, in no particular order.
    fn list_items(&self, kind: ItemKind) -> Result<Vec<Item>>;

    /// Delete an item and every membership that refers to it.
    fn delete_item(&mut self, id: &Uuid) -> Result<()>;

    /// Delete several items with a single write per table. Fails without
    /// deleting anything if any id is unknown.
    fn delete_items(&mut self, ids: &[Uuid]) -> Result<()>;

    fn save_collection(&mut self, collection: &Collection) -> Result<()>;

    fn get_collection(&self, id: &Uuid) -> Result<Collection>;

    /// All collections, oldest first.
    fn list_collections(&self) -> Result<Vec<Collection>>;

    /// Delete a collection and its memberships. Member items are untouched.
    fn delete_collection(&mut self, id: &Uuid) -> Result<()>;

    /// Returns false if the item was already a member.
    fn add_member(&mut self, collection_id: &Uuid, item_id: &Uuid) -> Result<bool>;

    /// Returns false if the item was not a member.
    fn remove_member(&mut self, collection_id: &Uuid, item_id: &Uuid) -> Result<bool>;

    /// Ids of the items in a collection.
    fn members(&self, collection_id: &Uuid) -> Result<Vec<Uuid>>;
}
