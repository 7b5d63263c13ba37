use super::helpers::{find_collection, resolve_selectors};
use super::{CmdMessage, CmdResult, CollectionSummary, ItemSelector};
use crate::error::{PlatedexError, Result};
use crate::model::{Collection, ItemKind};
use crate::store::DataStore;

#[derive(Debug, Clone)]
pub enum CollectionAction {
    List,
    Create(String),
    Rename { name: String, new_name: String },
    /// With `cascade`, member items are deleted too.
    Delete { name: String, cascade: bool },
    Add { name: String, selectors: Vec<ItemSelector> },
    Remove { name: String, selectors: Vec<ItemSelector> },
}

pub fn run<S: DataStore>(store: &mut S, action: CollectionAction) -> Result<CmdResult> {
    match action {
        CollectionAction::List => list(store),
        CollectionAction::Create(name) => create(store, &name),
        CollectionAction::Rename { name, new_name } => rename(store, &name, &new_name),
        CollectionAction::Delete { name, cascade } => delete(store, &name, cascade),
        CollectionAction::Add { name, selectors } => add(store, &name, &selectors),
        CollectionAction::Remove { name, selectors } => remove(store, &name, &selectors),
    }
}

fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut summaries = Vec::new();
    for collection in store.list_collections()? {
        let member_count = store.members(&collection.id)?.len();
        summaries.push(CollectionSummary {
            collection,
            member_count,
        });
    }

    let mut result = CmdResult::default();
    if summaries.is_empty() {
        result.add_message(CmdMessage::info("No collections yet."));
    }
    Ok(result.with_collections(summaries))
}

/// Names are trimmed, non-blank, and unique ignoring case. `except` is the
/// collection being renamed.
fn validate_name<S: DataStore>(store: &S, name: &str, except: Option<&Collection>) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlatedexError::Validation(
            "Collection name cannot be empty".to_string(),
        ));
    }
    let taken = store.list_collections()?.into_iter().any(|c| {
        c.name.to_lowercase() == name.to_lowercase() && except.map_or(true, |e| e.id != c.id)
    });
    if taken {
        return Err(PlatedexError::Validation(format!(
            "A collection named {} already exists",
            name
        )));
    }
    Ok(name.to_string())
}

fn create<S: DataStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let name = validate_name(store, name, None)?;
    let collection = Collection::new(&name);
    store.save_collection(&collection)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Created collection {}", name)));
    Ok(result.with_collections(vec![CollectionSummary {
        collection,
        member_count: 0,
    }]))
}

fn rename<S: DataStore>(store: &mut S, name: &str, new_name: &str) -> Result<CmdResult> {
    let mut collection = find_collection(store, name)?;
    let new_name = validate_name(store, new_name, Some(&collection))?;
    let old_name = std::mem::replace(&mut collection.name, new_name);
    store.save_collection(&collection)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Renamed collection {} to {}",
        old_name, collection.name
    )));
    Ok(result)
}

fn delete<S: DataStore>(store: &mut S, name: &str, cascade: bool) -> Result<CmdResult> {
    let collection = find_collection(store, name)?;
    let members = store.members(&collection.id)?;

    let mut result = CmdResult::default();
    // Collection first: a failed item write then leaves the items intact.
    store.delete_collection(&collection.id)?;
    if cascade {
        store.delete_items(&members)?;
    }

    let detail = match (cascade, members.len()) {
        (_, 0) => String::new(),
        (true, n) => format!(" and its {} item(s)", n),
        (false, n) => format!(", keeping its {} item(s)", n),
    };
    result.add_message(CmdMessage::success(format!(
        "Deleted collection {}{}",
        collection.name, detail
    )));
    Ok(result)
}

fn add<S: DataStore>(store: &mut S, name: &str, selectors: &[ItemSelector]) -> Result<CmdResult> {
    let collection = find_collection(store, name)?;
    let resolved = resolve_selectors(store, ItemKind::Owned, selectors)?;

    let mut result = CmdResult::default();
    for display in &resolved {
        let reg = display.item.registration_number();
        if store.add_member(&collection.id, &display.item.id())? {
            result.add_message(CmdMessage::success(format!(
                "Added {} to {}",
                reg, collection.name
            )));
        } else {
            result.add_message(CmdMessage::info(format!(
                "{} is already in {}",
                reg, collection.name
            )));
        }
    }
    Ok(result.with_affected_items(resolved))
}

fn remove<S: DataStore>(
    store: &mut S,
    name: &str,
    selectors: &[ItemSelector],
) -> Result<CmdResult> {
    let collection = find_collection(store, name)?;
    let resolved = resolve_selectors(store, ItemKind::Owned, selectors)?;

    let mut result = CmdResult::default();
    for display in &resolved {
        let reg = display.item.registration_number();
        if store.remove_member(&collection.id, &display.item.id())? {
            result.add_message(CmdMessage::success(format!(
                "Removed {} from {}",
                reg, collection.name
            )));
        } else {
            result.add_message(CmdMessage::warning(format!(
                "{} is not in {}",
                reg, collection.name
            )));
        }
    }
    Ok(result.with_affected_items(resolved))
}
