//! # Catalog View
//!
//! A view is one screen's worth of transient query state: which kind of item
//! it shows, the active [`FilterSpec`], [`SortKey`] and search query. Nothing
//! here is persisted; dropping the view drops the state.
//!
//! Every new snapshot is re-derived from scratch in a fixed order:
//! filter → sort → search. The derived list and bounds are swapped in together
//! so a reader never sees a half-updated view.

use crate::bounds::DataBounds;
use crate::feed::Snapshot;
use crate::filter::FilterSpec;
use crate::model::{Item, ItemKind};
use crate::search;
use crate::sort::{self, SortKey};
use chrono::{Local, NaiveDate};
use std::sync::mpsc::Receiver;

/// Result of running a view over a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub items: Vec<Item>,
    pub bounds: DataBounds,
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    pub kind: ItemKind,
    pub filter: FilterSpec,
    pub sort: SortKey,
    pub query: String,
    derived: Derived,
}

impl CatalogView {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            filter: FilterSpec::default(),
            sort: SortKey::default(),
            query: String::new(),
            derived: Derived {
                items: Vec::new(),
                bounds: DataBounds::compute_now(&[]),
            },
        }
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Pure derivation: items of other kinds in `snapshot` are ignored.
    pub fn derive(&self, snapshot: &[Item], today: NaiveDate) -> Derived {
        let items: Vec<Item> = snapshot
            .iter()
            .filter(|i| i.kind() == self.kind)
            .cloned()
            .collect();
        let bounds = DataBounds::compute(&items, today);

        let mut items = self.filter.apply(items, &bounds);
        sort::sort_items(&mut items, self.sort, self.kind);
        let items = search::search(items, &self.query);

        Derived { items, bounds }
    }

    /// Re-derives from `snapshot` and replaces the visible state.
    pub fn refresh(&mut self, snapshot: &[Item]) {
        self.derived = self.derive(snapshot, Local::now().date_naive());
    }

    /// Drains `feed`, refreshing from the newest snapshot of this view's kind.
    /// Returns whether anything changed.
    pub fn sync(&mut self, feed: &Receiver<Snapshot>) -> bool {
        let latest = feed.try_iter().filter(|s| s.kind == self.kind).last();
        match latest {
            Some(snapshot) => {
                self.refresh(&snapshot.items);
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.derived.items
    }

    pub fn bounds(&self) -> &DataBounds {
        &self.derived.bounds
    }

    /// Back to no filter, default order, empty query.
    pub fn reset(&mut self) {
        self.filter = FilterSpec::default();
        self.sort = SortKey::default();
        self.query.clear();
    }
}
