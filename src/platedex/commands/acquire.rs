use super::helpers::{apply_assignments, display_item, resolve_selectors};
use super::{CmdMessage, CmdResult, FieldAssignment, ItemSelector};
use crate::error::{PlatedexError, Result};
use crate::fields::parse_date;
use crate::model::{Acquisition, Item, ItemKind, OwnedPlate};
use crate::store::DataStore;
use chrono::Local;

/// Moves wishlist entries into the collection.
///
/// `date` defaults to today. `fields` may set any owned-item field, typically
/// cost, source or location.
pub fn run<S: DataStore>(
    store: &mut S,
    selectors: &[ItemSelector],
    date: Option<&str>,
    fields: &[FieldAssignment],
) -> Result<CmdResult> {
    let date = match date {
        Some(raw) => parse_date(raw)
            .ok_or_else(|| PlatedexError::Validation(format!("Invalid date: {}", raw)))?,
        None => Local::now().date_naive().format("%Y-%m-%d").to_string(),
    };

    let resolved = resolve_selectors(store, ItemKind::Wanted, selectors)?;
    let mut acquired = Vec::with_capacity(resolved.len());
    for display in resolved {
        let Item::Wanted(wanted) = display.item else {
            return Err(PlatedexError::Store(format!(
                "Expected a wanted item at index {}",
                display.index
            )));
        };
        let acquisition = Acquisition {
            date: Some(date.clone()),
            ..Default::default()
        };
        let mut item = Item::Owned(OwnedPlate::from_wanted(wanted, acquisition));
        apply_assignments(&mut item, fields)?;
        item.touch();
        acquired.push(item);
    }
    store.save_items(&acquired)?;

    let mut result = CmdResult::default();
    let mut affected = Vec::with_capacity(acquired.len());
    for item in &acquired {
        let display = display_item(store, ItemKind::Owned, item.id())?;
        result.add_message(CmdMessage::success(format!(
            "Acquired {} (now owned {})",
            item.registration_number(),
            display.index
        )));
        affected.push(display);
    }
    Ok(result.with_affected_items(affected))
}
