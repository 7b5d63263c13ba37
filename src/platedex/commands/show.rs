use super::helpers::resolve_selectors;
use super::{CmdResult, ItemSelector};
use crate::error::Result;
use crate::model::ItemKind;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, kind: ItemKind, selectors: &[ItemSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, kind, selectors)?;
    Ok(CmdResult::default().with_listed_items(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn shows_in_selector_order() {
        let fixture = StoreFixture::new()
            .with_item(ItemKind::Archived, "A 1", &[])
            .with_item(ItemKind::Archived, "B 2", &[]);

        let result = run(
            &fixture.store,
            ItemKind::Archived,
            &[ItemSelector::Index(2), ItemSelector::Index(1), ItemSelector::Index(2)],
        )
        .unwrap();

        let regs: Vec<_> = result
            .listed_items
            .iter()
            .map(|d| d.item.registration_number())
            .collect();
        assert_eq!(regs, vec!["B 2", "A 1"]);
    }
}
