use super::helpers::{apply_assignments, display_item, leave_all_collections, resolve_selectors};
use super::{CmdMessage, CmdResult, FieldAssignment, ItemSelector};
use crate::error::{PlatedexError, Result};
use crate::fields::parse_date;
use crate::model::{ArchivedPlate, Disposition, Item, ItemKind};
use crate::store::DataStore;
use chrono::Local;

#[derive(Debug, Clone, Default)]
pub struct ArchiveDraft {
    /// Defaults to today.
    pub date: Option<String>,
    pub reason: Option<String>,
    /// Any other archived-item fields (price, recipient, details...).
    pub fields: Vec<FieldAssignment>,
}

/// Moves owned plates into the archive.
///
/// Archived plates are no longer collection members; their memberships are
/// dropped.
pub fn run<S: DataStore>(
    store: &mut S,
    selectors: &[ItemSelector],
    draft: ArchiveDraft,
) -> Result<CmdResult> {
    let date = match &draft.date {
        Some(raw) => parse_date(raw)
            .ok_or_else(|| PlatedexError::Validation(format!("Invalid date: {}", raw)))?,
        None => Local::now().date_naive().format("%Y-%m-%d").to_string(),
    };
    let reason = draft
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    let resolved = resolve_selectors(store, ItemKind::Owned, selectors)?;
    let mut archived = Vec::with_capacity(resolved.len());
    for display in resolved {
        let Item::Owned(owned) = display.item else {
            return Err(PlatedexError::Store(format!(
                "Expected an owned item at index {}",
                display.index
            )));
        };
        let disposition = Disposition {
            date: Some(date.clone()),
            reason: reason.clone(),
            ..Default::default()
        };
        let mut item = Item::Archived(ArchivedPlate::from_owned(owned, disposition));
        apply_assignments(&mut item, &draft.fields)?;
        item.touch();
        archived.push(item);
    }
    store.save_items(&archived)?;

    let mut result = CmdResult::default();
    let mut affected = Vec::with_capacity(archived.len());
    for item in &archived {
        let left = leave_all_collections(store, &item.id())?;
        let display = display_item(store, ItemKind::Archived, item.id())?;
        result.add_message(CmdMessage::success(format!(
            "Archived {} (now archived {})",
            item.registration_number(),
            display.index
        )));
        if left > 0 {
            result.add_message(CmdMessage::info(format!(
                "{} removed from {} collection(s)",
                item.registration_number(),
                left
            )));
        }
        affected.push(display);
    }
    Ok(result.with_affected_items(affected))
}
