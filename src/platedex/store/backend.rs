use super::Membership;
use crate::error::Result;
use crate::model::{Collection, Item};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while [`super::CatalogStore`] handles the "what" (lookups, cascades).
pub trait StorageBackend {
    /// Load every item (items.json). Missing storage is an empty table.
    fn load_items(&self) -> Result<HashMap<Uuid, Item>>;

    /// Replace the item table. MUST be atomic.
    fn save_items(&self, items: &HashMap<Uuid, Item>) -> Result<()>;

    fn load_collections(&self) -> Result<Vec<Collection>>;

    fn save_collections(&self, collections: &[Collection]) -> Result<()>;

    fn load_memberships(&self) -> Result<BTreeSet<Membership>>;

    fn save_memberships(&self, memberships: &BTreeSet<Membership>) -> Result<()>;
}
