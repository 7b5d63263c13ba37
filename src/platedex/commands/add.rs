use super::helpers::{apply_assignments, display_item};
use super::{CmdMessage, CmdResult, FieldAssignment};
use crate::error::{PlatedexError, Result};
use crate::model::{Item, ItemKind};
use crate::store::DataStore;

/// What the user typed for a new item.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub registration_number: String,
    pub fields: Vec<FieldAssignment>,
}

impl ItemDraft {
    pub fn new(registration_number: impl Into<String>) -> Self {
        Self {
            registration_number: registration_number.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.push(FieldAssignment::new(name, value));
        self
    }
}

pub fn run<S: DataStore>(store: &mut S, kind: ItemKind, draft: ItemDraft) -> Result<CmdResult> {
    let reg = draft.registration_number.trim();
    if reg.is_empty() {
        return Err(PlatedexError::Validation(
            "Registration number cannot be empty".to_string(),
        ));
    }

    // Build fully before saving so a bad field leaves nothing behind.
    let mut item = Item::new(kind, reg);
    apply_assignments(&mut item, &draft.fields)?;
    store.save_item(&item)?;

    let display = display_item(store, kind, item.id())?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {} item {}: {}",
        kind,
        display.index,
        item.registration_number()
    )));
    Ok(result.with_affected_items(vec![display]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn adds_item_with_fields() {
        let mut store = InMemoryStore::new();
        let draft = ItemDraft::new("  ABC-123 ")
            .with_field("country", "Finland")
            .with_field("cost", "2500");

        let result = run(&mut store, ItemKind::Owned, draft).unwrap();

        assert_eq!(result.affected_items.len(), 1);
        assert_eq!(result.affected_items[0].index, 1);
        let stored = store.list_items(ItemKind::Owned).unwrap();
        assert_eq!(stored[0].registration_number(), "ABC-123");
        assert_eq!(stored[0].fields().cost, Some(2500));
    }

    #[test]
    fn rejects_blank_registration() {
        let mut store = InMemoryStore::new();
        let err = run(&mut store, ItemKind::Wanted, ItemDraft::new("   ")).unwrap_err();
        assert!(matches!(err, PlatedexError::Validation(_)));
        assert!(store.list_items(ItemKind::Wanted).unwrap().is_empty());
    }

    #[test]
    fn invalid_field_saves_nothing() {
        let mut store = InMemoryStore::new();
        let draft = ItemDraft::new("W 1").with_field("cost", "10");

        assert!(run(&mut store, ItemKind::Wanted, draft).is_err());
        assert!(store.list_items(ItemKind::Wanted).unwrap().is_empty());
    }
}
