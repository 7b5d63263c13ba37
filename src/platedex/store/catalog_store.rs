use super::backend::StorageBackend;
use super::{DataStore, Membership};
use crate::error::{PlatedexError, Result};
use crate::model::{Collection, Item, ItemKind};
use uuid::Uuid;

pub struct CatalogStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> CatalogStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: StorageBackend> DataStore for CatalogStore<B> {
    fn save_item(&mut self, item: &Item) -> Result<()> {
        self.save_items(std::slice::from_ref(item))
    }

    fn save_items(&mut self, items: &[Item]) -> Result<()> {
        let mut table = self.backend.load_items()?;
        for item in items {
            table.insert(item.id(), item.clone());
        }
        self.backend.save_items(&table)
    }

    fn get_item(&self, id: &Uuid) -> Result<Item> {
        let mut table = self.backend.load_items()?;
        table.remove(id).ok_or(PlatedexError::ItemNotFound(*id))
    }

    fn list_items(&self, kind: ItemKind) -> Result<Vec<Item>> {
        let table = self.backend.load_items()?;
        Ok(table
            .into_values()
            .filter(|item| item.kind() == kind)
            .collect())
    }

    fn delete_item(&mut self, id: &Uuid) -> Result<()> {
        self.delete_items(std::slice::from_ref(id))
    }

    fn delete_items(&mut self, ids: &[Uuid]) -> Result<()> {
        let mut table = self.backend.load_items()?;
        for id in ids {
            if table.remove(id).is_none() {
                return Err(PlatedexError::ItemNotFound(*id));
            }
        }
        self.backend.save_items(&table)?;

        let mut memberships = self.backend.load_memberships()?;
        let before = memberships.len();
        memberships.retain(|m| !ids.contains(&m.item_id));
        if memberships.len() != before {
            self.backend.save_memberships(&memberships)?;
        }
        Ok(())
    }

    fn save_collection(&mut self, collection: &Collection) -> Result<()> {
        let mut collections = self.backend.load_collections()?;
        match collections.iter_mut().find(|c| c.id == collection.id) {
            Some(existing) => *existing = collection.clone(),
            None => collections.push(collection.clone()),
        }
        self.backend.save_collections(&collections)
    }

    fn get_collection(&self, id: &Uuid) -> Result<Collection> {
        self.backend
            .load_collections()?
            .into_iter()
            .find(|c| c.id == *id)
            .ok_or_else(|| PlatedexError::CollectionNotFound(id.to_string()))
    }

    fn list_collections(&self) -> Result<Vec<Collection>> {
        let mut collections = self.backend.load_collections()?;
        collections.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(collections)
    }

    fn delete_collection(&mut self, id: &Uuid) -> Result<()> {
        let mut collections = self.backend.load_collections()?;
        let before = collections.len();
        collections.retain(|c| c.id != *id);
        if collections.len() == before {
            return Err(PlatedexError::CollectionNotFound(id.to_string()));
        }
        self.backend.save_collections(&collections)?;

        let mut memberships = self.backend.load_memberships()?;
        memberships.retain(|m| m.collection_id != *id);
        self.backend.save_memberships(&memberships)
    }

    fn add_member(&mut self, collection_id: &Uuid, item_id: &Uuid) -> Result<bool> {
        self.get_collection(collection_id)?;
        if !self.backend.load_items()?.contains_key(item_id) {
            return Err(PlatedexError::ItemNotFound(*item_id));
        }

        let mut memberships = self.backend.load_memberships()?;
        let added = memberships.insert(Membership {
            collection_id: *collection_id,
            item_id: *item_id,
        });
        if added {
            self.backend.save_memberships(&memberships)?;
        }
        Ok(added)
    }

    fn remove_member(&mut self, collection_id: &Uuid, item_id: &Uuid) -> Result<bool> {
        self.get_collection(collection_id)?;

        let mut memberships = self.backend.load_memberships()?;
        let removed = memberships.remove(&Membership {
            collection_id: *collection_id,
            item_id: *item_id,
        });
        if removed {
            self.backend.save_memberships(&memberships)?;
        }
        Ok(removed)
    }

    fn members(&self, collection_id: &Uuid) -> Result<Vec<Uuid>> {
        self.get_collection(collection_id)?;
        Ok(self
            .backend
            .load_memberships()?
            .into_iter()
            .filter(|m| m.collection_id == *collection_id)
            .map(|m| m.item_id)
            .collect())
    }
}
