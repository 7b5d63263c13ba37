//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all platedex operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: raw selector strings become [`ItemSelector`]s,
//!   `name=value` strings become [`FieldAssignment`]s
//! - **Publishes snapshots**: after every mutation, the full item list of each
//!   touched kind is sent to subscribed views (see [`crate::feed`])
//!
//! It does no business logic and no terminal I/O.
//!
//! ## Selectors
//!
//! - **Index**: `N`, the item's 1-based position in its kind ordered by
//!   registration number
//! - **Registration**: anything else, matched exactly ignoring case
//!
//! Duplicates are dropped, first occurrence wins.
//!
//! ## Generic Over DataStore
//!
//! `CatalogApi<S: DataStore>` runs against `FileStore` in production and
//! `InMemoryStore` in tests.

use crate::commands::{
    self, archive::ArchiveDraft, collections::CollectionAction, config::ConfigAction,
    list::ListOptions, CmdResult, FieldAssignment, ItemSelector,
};
use crate::config::PlatedexConfig;
use crate::error::Result;
use crate::feed::{Snapshot, SnapshotFeed};
use crate::model::ItemKind;
use crate::store::DataStore;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

pub use commands::add::ItemDraft;

/// The main API facade for platedex operations.
pub struct CatalogApi<S: DataStore> {
    store: S,
    data_dir: PathBuf,
    config: PlatedexConfig,
    feed: SnapshotFeed,
}

impl<S: DataStore> CatalogApi<S> {
    pub fn new(store: S, data_dir: PathBuf, config: PlatedexConfig) -> Self {
        Self {
            store,
            data_dir,
            config,
            feed: SnapshotFeed::new(),
        }
    }

    pub fn config(&self) -> &PlatedexConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Receives a snapshot of each kind touched by later mutations.
    pub fn subscribe(&mut self) -> Receiver<Snapshot> {
        self.feed.subscribe()
    }

    /// Sends the current list of every kind in `kinds` to all subscribers.
    pub fn publish(&mut self, kinds: &[ItemKind]) -> Result<()> {
        if self.feed.subscriber_count() == 0 {
            return Ok(());
        }
        for &kind in kinds {
            let items = self.store.list_items(kind)?;
            self.feed.publish(Snapshot::new(kind, items));
        }
        Ok(())
    }

    fn published(&mut self, result: CmdResult, kinds: &[ItemKind]) -> Result<CmdResult> {
        self.publish(kinds)?;
        Ok(result)
    }

    pub fn add_item(&mut self, kind: ItemKind, draft: ItemDraft) -> Result<CmdResult> {
        let result = commands::add::run(&mut self.store, kind, draft)?;
        self.published(result, &[kind])
    }

    pub fn update_items<I: AsRef<str>, A: AsRef<str>>(
        &mut self,
        kind: ItemKind,
        selectors: &[I],
        assignments: &[A],
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        let assignments = parse_assignments(assignments)?;
        let result = commands::update::run(&mut self.store, kind, &selectors, &assignments)?;
        self.published(result, &[kind])
    }

    pub fn delete_items<I: AsRef<str>>(
        &mut self,
        kind: ItemKind,
        selectors: &[I],
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        let result = commands::delete::run(&mut self.store, kind, &selectors)?;
        self.published(result, &[kind])
    }

    pub fn list_items(&self, kind: ItemKind, options: ListOptions) -> Result<CmdResult> {
        commands::list::run(&self.store, kind, options)
    }

    pub fn show_items<I: AsRef<str>>(&self, kind: ItemKind, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::show::run(&self.store, kind, &selectors)
    }

    pub fn acquire_items<I: AsRef<str>, A: AsRef<str>>(
        &mut self,
        selectors: &[I],
        date: Option<&str>,
        fields: &[A],
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        let fields = parse_assignments(fields)?;
        let result = commands::acquire::run(&mut self.store, &selectors, date, &fields)?;
        self.published(result, &[ItemKind::Wanted, ItemKind::Owned])
    }

    pub fn archive_items<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
        draft: ArchiveDraft,
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        let result = commands::archive::run(&mut self.store, &selectors, draft)?;
        self.published(result, &[ItemKind::Owned, ItemKind::Archived])
    }

    pub fn list_collections(&mut self) -> Result<CmdResult> {
        commands::collections::run(&mut self.store, CollectionAction::List)
    }

    pub fn create_collection(&mut self, name: &str) -> Result<CmdResult> {
        commands::collections::run(&mut self.store, CollectionAction::Create(name.to_string()))
    }

    pub fn rename_collection(&mut self, name: &str, new_name: &str) -> Result<CmdResult> {
        commands::collections::run(
            &mut self.store,
            CollectionAction::Rename {
                name: name.to_string(),
                new_name: new_name.to_string(),
            },
        )
    }

    pub fn delete_collection(&mut self, name: &str, cascade: bool) -> Result<CmdResult> {
        let result = commands::collections::run(
            &mut self.store,
            CollectionAction::Delete {
                name: name.to_string(),
                cascade,
            },
        )?;
        if cascade {
            self.publish(&[ItemKind::Owned])?;
        }
        Ok(result)
    }

    pub fn add_to_collection<I: AsRef<str>>(
        &mut self,
        name: &str,
        selectors: &[I],
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::collections::run(
            &mut self.store,
            CollectionAction::Add {
                name: name.to_string(),
                selectors,
            },
        )
    }

    pub fn remove_from_collection<I: AsRef<str>>(
        &mut self,
        name: &str,
        selectors: &[I],
    ) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::collections::run(
            &mut self.store,
            CollectionAction::Remove {
                name: name.to_string(),
                selectors,
            },
        )
    }

    /// Bounds of `kind`, restricted to a collection's members when given.
    pub fn bounds(&self, kind: ItemKind, collection: Option<&str>) -> Result<CmdResult> {
        commands::bounds::run(&self.store, kind, collection)
    }

    pub fn export(&self, kind: ItemKind, output: Option<&Path>) -> Result<CmdResult> {
        commands::export::run(&self.store, kind, &self.config, output)
    }

    pub fn import(&mut self, kind: ItemKind, path: &Path) -> Result<CmdResult> {
        let result = commands::import::run(&mut self.store, kind, path)?;
        self.published(result, &[kind])
    }

    pub fn template(&self, output: Option<&Path>) -> Result<CmdResult> {
        commands::template::run(output)
    }

    pub fn config_action(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }
}

/// Parses raw selector strings, dropping duplicates.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<ItemSelector>> {
    let mut selectors: Vec<ItemSelector> = Vec::new();
    for input in inputs {
        let selector: ItemSelector = input.as_ref().parse()?;
        if !selectors.contains(&selector) {
            selectors.push(selector);
        }
    }
    Ok(selectors)
}

pub fn parse_assignments<A: AsRef<str>>(inputs: &[A]) -> Result<Vec<FieldAssignment>> {
    inputs.iter().map(|a| a.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use crate::view::CatalogView;

    fn make_api() -> CatalogApi<InMemoryStore> {
        CatalogApi::new(
            InMemoryStore::new(),
            PathBuf::from("/nonexistent"),
            PlatedexConfig::default(),
        )
    }

    #[test]
    fn parse_selectors_dedupes_in_order() {
        let selectors = parse_selectors(&["2", "abc", "2", "ABC"]).unwrap();
        assert_eq!(
            selectors,
            vec![
                ItemSelector::Index(2),
                ItemSelector::Registration("abc".into()),
                ItemSelector::Registration("ABC".into()),
            ]
        );
    }

    #[test]
    fn parse_assignments_rejects_bare_names() {
        assert!(parse_assignments(&["country=Finland", "cost=100"]).is_ok());
        assert!(parse_assignments(&["country"]).is_err());
    }

    #[test]
    fn mutations_reach_subscribed_views() {
        let mut api = make_api();
        let rx = api.subscribe();
        let mut view = CatalogView::new(ItemKind::Owned);

        api.add_item(ItemKind::Owned, ItemDraft::new("B 2")).unwrap();
        api.add_item(ItemKind::Owned, ItemDraft::new("A 1")).unwrap();
        assert!(view.sync(&rx));
        assert_eq!(view.items().len(), 2);

        api.delete_items(ItemKind::Owned, &["1"]).unwrap();
        assert!(view.sync(&rx));
        assert_eq!(view.items()[0].registration_number(), "B 2");
    }

    #[test]
    fn acquire_publishes_both_kinds() {
        let mut api = make_api();
        api.add_item(ItemKind::Wanted, ItemDraft::new("W 1")).unwrap();

        let rx = api.subscribe();
        let mut wanted = CatalogView::new(ItemKind::Wanted);
        let mut owned = CatalogView::new(ItemKind::Owned);

        api.acquire_items(&["W 1"], Some("2024-01-02"), &["cost=500"])
            .unwrap();

        let snapshots: Vec<Snapshot> = rx.try_iter().collect();
        assert_eq!(snapshots.len(), 2);
        for snapshot in &snapshots {
            wanted.refresh(&snapshot.items);
            owned.refresh(&snapshot.items);
        }
        assert!(wanted.items().is_empty());
        assert_eq!(owned.items().len(), 1);
    }

    #[test]
    fn reads_do_not_publish() {
        let mut api = make_api();
        api.add_item(ItemKind::Owned, ItemDraft::new("A 1")).unwrap();
        let rx = api.subscribe();

        api.list_items(ItemKind::Owned, ListOptions::default()).unwrap();
        api.show_items(ItemKind::Owned, &["1"]).unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn collection_round_trip_through_api() {
        let mut api = make_api();
        api.add_item(ItemKind::Owned, ItemDraft::new("A 1")).unwrap();
        api.create_collection("Nordics").unwrap();
        api.add_to_collection("nordics", &["A 1"]).unwrap();

        let result = api.list_collections().unwrap();
        assert_eq!(result.collections[0].member_count, 1);

        let rx = api.subscribe();
        api.delete_collection("Nordics", true).unwrap();
        assert!(rx.try_recv().unwrap().items.is_empty());
    }

    #[test]
    fn config_set_updates_live_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = CatalogApi::new(
            InMemoryStore::new(),
            dir.path().to_path_buf(),
            PlatedexConfig::default(),
        );

        api.config_action(ConfigAction::Set("currency-symbol".into(), "€".into()))
            .unwrap();
        assert_eq!(api.config().currency_symbol, "€");
    }
}
