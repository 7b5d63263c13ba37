use super::list::scoped_items;
use super::CmdResult;
use crate::bounds::DataBounds;
use crate::error::Result;
use crate::model::ItemKind;
use crate::store::DataStore;

/// Range bounds over every stored item of `kind`, or over the members of
/// `collection` when one is named.
pub fn run<S: DataStore>(store: &S, kind: ItemKind, collection: Option<&str>) -> Result<CmdResult> {
    let items = scoped_items(store, kind, collection)?;
    Ok(CmdResult::default().with_bounds(DataBounds::compute_now(&items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Span;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn bounds_cover_only_requested_kind() {
        let fixture = StoreFixture::new()
            .with_item(ItemKind::Owned, "A", &[("cost", "100"), ("period_start", "1950")])
            .with_item(ItemKind::Owned, "B", &[("cost", "900"), ("period_end", "1980")])
            .with_item(ItemKind::Archived, "C", &[("cost", "50000")]);

        let bounds = run(&fixture.store, ItemKind::Owned, None).unwrap().bounds.unwrap();
        assert_eq!(bounds.cost, Span::new(100, 900));
        assert_eq!(bounds.period, Span::new(1950, 1980));
    }

    #[test]
    fn empty_kind_uses_fallbacks() {
        let fixture = StoreFixture::new();
        let bounds = run(&fixture.store, ItemKind::Wanted, None).unwrap().bounds.unwrap();
        assert_eq!(bounds.cost, Span::new(0, 0));
        assert_eq!(bounds.year.min, crate::bounds::FALLBACK_MIN_YEAR);
    }

    #[test]
    fn collection_bounds_cover_only_members() {
        let fixture = StoreFixture::new()
            .with_item(ItemKind::Owned, "A", &[("period_start", "1960")])
            .with_item(ItemKind::Owned, "B", &[("period_end", "2010")])
            .with_collection("Mine", &["A"]);

        let bounds = run(&fixture.store, ItemKind::Owned, Some("mine"))
            .unwrap()
            .bounds
            .unwrap();
        assert_eq!(bounds.period, Span::new(1959, 1960));
    }
}
