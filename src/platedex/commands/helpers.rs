use super::{DisplayItem, FieldAssignment, ItemSelector};
use crate::error::{PlatedexError, Result};
use crate::fields::set_field;
use crate::model::{Collection, Item, ItemKind};
use crate::store::DataStore;
use std::collections::HashMap;
use uuid::Uuid;

/// Orders items by registration number (case-insensitive), id breaking ties.
pub fn registration_order(a: &Item, b: &Item) -> std::cmp::Ordering {
    a.registration_number()
        .to_lowercase()
        .cmp(&b.registration_number().to_lowercase())
        .then_with(|| a.registration_number().cmp(b.registration_number()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// All items of `kind` with their canonical 1-based index.
pub fn indexed_items<S: DataStore>(store: &S, kind: ItemKind) -> Result<Vec<DisplayItem>> {
    let mut items = store.list_items(kind)?;
    items.sort_by(registration_order);
    Ok(items
        .into_iter()
        .enumerate()
        .map(|(i, item)| DisplayItem { index: i + 1, item })
        .collect())
}

/// Id to canonical index, for tagging items that come back from a view.
pub fn index_map(indexed: &[DisplayItem]) -> HashMap<Uuid, usize> {
    indexed.iter().map(|d| (d.item.id(), d.index)).collect()
}

/// Resolves selectors against `kind`'s listing, in selector order, without
/// duplicates.
///
/// An index past the end of the listing is retried as a registration number,
/// so purely numeric plates stay reachable.
pub fn resolve_selectors<S: DataStore>(
    store: &S,
    kind: ItemKind,
    selectors: &[ItemSelector],
) -> Result<Vec<DisplayItem>> {
    let indexed = indexed_items(store, kind)?;
    let mut results: Vec<DisplayItem> = Vec::new();

    for selector in selectors {
        let found = match selector {
            ItemSelector::Index(n) => match n.checked_sub(1).and_then(|i| indexed.get(i)) {
                Some(hit) => hit.clone(),
                None => find_by_registration(&indexed, &n.to_string())
                    .map_err(|_| {
                        PlatedexError::Api(format!("Index {} not found in {} items", n, kind))
                    })?,
            },
            ItemSelector::Registration(reg) => find_by_registration(&indexed, reg)?,
        };

        if !results.iter().any(|r| r.item.id() == found.item.id()) {
            results.push(found);
        }
    }

    Ok(results)
}

fn find_by_registration(indexed: &[DisplayItem], reg: &str) -> Result<DisplayItem> {
    let needle = reg.trim().to_lowercase();
    let matches: Vec<&DisplayItem> = indexed
        .iter()
        .filter(|d| d.item.registration_number().to_lowercase() == needle)
        .collect();

    match matches.as_slice() {
        [one] => Ok((*one).clone()),
        [] => Err(PlatedexError::Api(format!(
            "No item with registration number {}",
            reg
        ))),
        many => {
            let indexes: Vec<String> = many.iter().map(|d| d.index.to_string()).collect();
            Err(PlatedexError::Api(format!(
                "Registration number {} is ambiguous, use one of indexes {}",
                reg,
                indexes.join(", ")
            )))
        }
    }
}

/// Canonical index of `id` within `kind` after a mutation.
pub fn display_item<S: DataStore>(store: &S, kind: ItemKind, id: Uuid) -> Result<DisplayItem> {
    indexed_items(store, kind)?
        .into_iter()
        .find(|d| d.item.id() == id)
        .ok_or(PlatedexError::ItemNotFound(id))
}

/// Applies assignments in order. Stops at the first invalid one.
pub fn apply_assignments(item: &mut Item, assignments: &[FieldAssignment]) -> Result<()> {
    for assignment in assignments {
        set_field(item, &assignment.name, &assignment.value)?;
    }
    Ok(())
}

/// Finds a collection by name, case-insensitively.
pub fn find_collection<S: DataStore>(store: &S, name: &str) -> Result<Collection> {
    let needle = name.trim().to_lowercase();
    store
        .list_collections()?
        .into_iter()
        .find(|c| c.name.to_lowercase() == needle)
        .ok_or_else(|| PlatedexError::CollectionNotFound(name.to_string()))
}

/// Removes `item_id` from every collection. Returns how many it left.
pub fn leave_all_collections<S: DataStore>(store: &mut S, item_id: &Uuid) -> Result<usize> {
    let mut left = 0;
    for collection in store.list_collections()? {
        if store.remove_member(&collection.id, item_id)? {
            left += 1;
        }
    }
    Ok(left)
}
