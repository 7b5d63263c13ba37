use super::helpers::{apply_assignments, display_item, resolve_selectors};
use super::{CmdMessage, CmdResult, FieldAssignment, ItemSelector};
use crate::error::{PlatedexError, Result};
use crate::model::ItemKind;
use crate::store::DataStore;

/// Applies the same assignments to every selected item.
///
/// All items are validated before any is saved.
pub fn run<S: DataStore>(
    store: &mut S,
    kind: ItemKind,
    selectors: &[ItemSelector],
    assignments: &[FieldAssignment],
) -> Result<CmdResult> {
    if assignments.is_empty() {
        return Err(PlatedexError::Validation(
            "Nothing to update: give at least one name=value".to_string(),
        ));
    }

    let resolved = resolve_selectors(store, kind, selectors)?;
    let mut updated = Vec::with_capacity(resolved.len());
    for display in resolved {
        let mut item = display.item;
        apply_assignments(&mut item, assignments)?;
        updated.push(item);
    }
    store.save_items(&updated)?;

    let mut result = CmdResult::default();
    let mut affected = Vec::with_capacity(updated.len());
    for item in &updated {
        // Editing the registration number can move the index.
        let display = display_item(store, kind, item.id())?;
        result.add_message(CmdMessage::success(format!(
            "Updated {}: {}",
            display.index,
            item.registration_number()
        )));
        affected.push(display);
    }
    Ok(result.with_affected_items(affected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn updates_selected_items() {
        let mut fixture = StoreFixture::new()
            .with_item(ItemKind::Owned, "A 1", &[])
            .with_item(ItemKind::Owned, "B 2", &[]);

        run(
            &mut fixture.store,
            ItemKind::Owned,
            &[ItemSelector::Index(1), ItemSelector::Registration("b 2".into())],
            &[FieldAssignment::new("country", "Norway")],
        )
        .unwrap();

        for item in fixture.store.list_items(ItemKind::Owned).unwrap() {
            assert_eq!(item.fields().country, Some("Norway"));
        }
    }

    #[test]
    fn renaming_reports_new_index() {
        let mut fixture = StoreFixture::new()
            .with_item(ItemKind::Wanted, "A 1", &[])
            .with_item(ItemKind::Wanted, "B 2", &[]);

        let result = run(
            &mut fixture.store,
            ItemKind::Wanted,
            &[ItemSelector::Index(1)],
            &[FieldAssignment::new("reg_no", "Z 9")],
        )
        .unwrap();

        assert_eq!(result.affected_items[0].index, 2);
        assert_eq!(result.affected_items[0].item.registration_number(), "Z 9");
    }

    #[test]
    fn one_bad_item_updates_none() {
        let mut fixture = StoreFixture::new()
            .with_item(ItemKind::Owned, "A 1", &[])
            .with_item(ItemKind::Owned, "B 2", &[]);

        let err = run(
            &mut fixture.store,
            ItemKind::Owned,
            &[ItemSelector::Index(1), ItemSelector::Index(7)],
            &[FieldAssignment::new("notes", "hello")],
        );
        assert!(err.is_err());
        for item in fixture.store.list_items(ItemKind::Owned).unwrap() {
            assert_eq!(item.fields().notes, None);
        }
    }

    #[test]
    fn clearing_a_field() {
        let mut fixture =
            StoreFixture::new().with_item(ItemKind::Owned, "A 1", &[("vehicle", "Volvo 240")]);

        run(
            &mut fixture.store,
            ItemKind::Owned,
            &[ItemSelector::Index(1)],
            &[FieldAssignment::new("vehicle", "")],
        )
        .unwrap();

        let item = &fixture.store.list_items(ItemKind::Owned).unwrap()[0];
        assert_eq!(item.fields().vehicle, None);
    }
}
