use super::backend::StorageBackend;
use super::Membership;
use crate::error::{PlatedexError, Result};
use crate::model::{Collection, Item};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since platedex is single-threaded,
/// which lets `StorageBackend` take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<Uuid, Item>>,
    collections: RefCell<Vec<Collection>>,
    memberships: RefCell<BTreeSet<Membership>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(PlatedexError::Io(std::io::Error::other(
                "Simulated write error",
            )));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_items(&self) -> Result<HashMap<Uuid, Item>> {
        Ok(self.items.borrow().clone())
    }

    fn save_items(&self, items: &HashMap<Uuid, Item>) -> Result<()> {
        self.check_write()?;
        *self.items.borrow_mut() = items.clone();
        Ok(())
    }

    fn load_collections(&self) -> Result<Vec<Collection>> {
        Ok(self.collections.borrow().clone())
    }

    fn save_collections(&self, collections: &[Collection]) -> Result<()> {
        self.check_write()?;
        *self.collections.borrow_mut() = collections.to_vec();
        Ok(())
    }

    fn load_memberships(&self) -> Result<BTreeSet<Membership>> {
        Ok(self.memberships.borrow().clone())
    }

    fn save_memberships(&self, memberships: &BTreeSet<Membership>) -> Result<()> {
        self.check_write()?;
        *self.memberships.borrow_mut() = memberships.clone();
        Ok(())
    }
}
