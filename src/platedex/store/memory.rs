use super::catalog_store::CatalogStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = CatalogStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        CatalogStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::fields::set_field;
    use crate::model::{Collection, Item, ItemKind};
    use crate::store::DataStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_items(mut self, count: usize, kind: ItemKind) -> Self {
            for i in 0..count {
                let item = Item::new(kind, format!("TEST-{}", i + 1));
                self.store.save_item(&item).unwrap();
            }
            self
        }

        /// Adds an item with `name=value` field assignments.
        pub fn with_item(mut self, kind: ItemKind, reg: &str, fields: &[(&str, &str)]) -> Self {
            let mut item = Item::new(kind, reg);
            for (name, value) in fields {
                set_field(&mut item, name, value).unwrap();
            }
            self.store.save_item(&item).unwrap();
            self
        }

        /// Adds a collection holding the owned items with the given registrations.
        pub fn with_collection(mut self, name: &str, regs: &[&str]) -> Self {
            let collection = Collection::new(name);
            self.store.save_collection(&collection).unwrap();
            let owned = self.store.list_items(ItemKind::Owned).unwrap();
            for reg in regs {
                let item = owned
                    .iter()
                    .find(|i| i.registration_number() == *reg)
                    .unwrap();
                self.store.add_member(&collection.id, &item.id()).unwrap();
            }
            self
        }
    }
}
