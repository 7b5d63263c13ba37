use super::helpers::resolve_selectors;
use super::{CmdMessage, CmdResult, ItemSelector};
use crate::error::Result;
use crate::model::ItemKind;
use crate::store::DataStore;

/// Deletes items permanently. Memberships go with them.
pub fn run<S: DataStore>(
    store: &mut S,
    kind: ItemKind,
    selectors: &[ItemSelector],
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, kind, selectors)?;
    let ids: Vec<_> = resolved.iter().map(|d| d.item.id()).collect();
    store.delete_items(&ids)?;

    let mut result = CmdResult::default();
    for display in &resolved {
        result.add_message(CmdMessage::success(format!(
            "Deleted {}: {}",
            display.index,
            display.item.registration_number()
        )));
    }

    Ok(result.with_affected_items(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn deletes_by_index_and_drops_memberships() {
        let mut fixture = StoreFixture::new()
            .with_item(ItemKind::Owned, "A 1", &[])
            .with_item(ItemKind::Owned, "B 2", &[])
            .with_collection("Mine", &["A 1", "B 2"]);

        let result = run(&mut fixture.store, ItemKind::Owned, &[ItemSelector::Index(1)]).unwrap();
        assert_eq!(result.affected_items[0].item.registration_number(), "A 1");

        let left = fixture.store.list_items(ItemKind::Owned).unwrap();
        assert_eq!(left.len(), 1);
        let collection = &fixture.store.list_collections().unwrap()[0];
        assert_eq!(fixture.store.members(&collection.id).unwrap(), vec![left[0].id()]);
    }

    #[test]
    fn selectors_are_scoped_to_kind() {
        let mut fixture = StoreFixture::new().with_item(ItemKind::Wanted, "W 1", &[]);
        let err = run(
            &mut fixture.store,
            ItemKind::Owned,
            &[ItemSelector::Registration("W 1".into())],
        );
        assert!(err.is_err());
        assert_eq!(fixture.store.list_items(ItemKind::Wanted).unwrap().len(), 1);
    }
}
