use super::helpers::{find_collection, index_map, indexed_items};
use super::{CmdMessage, CmdResult, DisplayItem};
use crate::error::Result;
use crate::filter::FilterSpec;
use crate::model::{Item, ItemKind};
use crate::sort::SortKey;
use crate::store::DataStore;
use crate::view::CatalogView;
use chrono::{Local, NaiveDate};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub filter: FilterSpec,
    pub sort: SortKey,
    pub query: String,
    /// Restrict to members of this collection (by name).
    pub collection: Option<String>,
}

pub fn run<S: DataStore>(store: &S, kind: ItemKind, options: ListOptions) -> Result<CmdResult> {
    run_at(store, kind, options, Local::now().date_naive())
}

/// The items a listing starts from: every item of `kind`, or only the members
/// of `collection`. Range bounds must come from this same set.
pub fn scoped_items<S: DataStore>(
    store: &S,
    kind: ItemKind,
    collection: Option<&str>,
) -> Result<Vec<Item>> {
    let mut items: Vec<Item> = indexed_items(store, kind)?
        .into_iter()
        .map(|d| d.item)
        .collect();
    if let Some(name) = collection {
        let collection = find_collection(store, name)?;
        let members: HashSet<_> = store.members(&collection.id)?.into_iter().collect();
        items.retain(|item| members.contains(&item.id()));
    }
    Ok(items)
}

/// [`run`] with an explicit "today" for the date bounds.
pub fn run_at<S: DataStore>(
    store: &S,
    kind: ItemKind,
    options: ListOptions,
    today: NaiveDate,
) -> Result<CmdResult> {
    let indexes = index_map(&indexed_items(store, kind)?);
    let snapshot = scoped_items(store, kind, options.collection.as_deref())?;

    let mut result = CmdResult::default();
    if !options.sort.applies_to(kind) {
        result.add_message(CmdMessage::warning(format!(
            "Sort {} does not apply to {} items; order unchanged",
            options.sort, kind
        )));
    }

    let view = CatalogView::new(kind)
        .with_filter(options.filter)
        .with_sort(options.sort)
        .with_query(options.query);
    let derived = view.derive(&snapshot, today);

    let listed: Vec<DisplayItem> = derived
        .items
        .into_iter()
        .map(|item| DisplayItem {
            index: indexes.get(&item.id()).copied().unwrap_or_default(),
            item,
        })
        .collect();

    match (&options.collection, snapshot.is_empty(), listed.is_empty()) {
        (Some(name), true, _) => {
            result.add_message(CmdMessage::info(format!("No {} items in {}.", kind, name)))
        }
        (None, true, _) => result.add_message(CmdMessage::info(format!("No {} items.", kind))),
        (_, false, true) => result.add_message(CmdMessage::info("No items match.")),
        _ => {}
    }

    Ok(result.with_listed_items(listed).with_bounds(derived.bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Span;
    use crate::store::memory::fixtures::StoreFixture;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn listed(result: &CmdResult) -> Vec<(usize, &str)> {
        result
            .listed_items
            .iter()
            .map(|d| (d.index, d.item.registration_number()))
            .collect()
    }

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_item(ItemKind::Owned, "SWE 1", &[("country", "Sweden"), ("year", "1990")])
            .with_item(ItemKind::Owned, "FIN 2", &[("country", "Finland"), ("year", "1975")])
            .with_item(ItemKind::Owned, "FIN 1", &[("country", "Finland")])
            .with_item(ItemKind::Wanted, "EST 1", &[("country", "Estonia")])
    }

    #[test]
    fn default_listing_sorts_by_country_and_keeps_canonical_index() {
        let fixture = fixture();
        let result = run_at(&fixture.store, ItemKind::Owned, ListOptions::default(), today()).unwrap();
        assert_eq!(listed(&result), vec![(1, "FIN 1"), (2, "FIN 2"), (3, "SWE 1")]);
    }

    #[test]
    fn age_sort_puts_unknown_years_last() {
        let fixture = fixture();
        let options = ListOptions {
            sort: SortKey::AgeDesc,
            ..Default::default()
        };
        let result = run_at(&fixture.store, ItemKind::Owned, options, today()).unwrap();
        assert_eq!(listed(&result), vec![(2, "FIN 2"), (3, "SWE 1"), (1, "FIN 1")]);
    }

    #[test]
    fn filter_and_search_combine() {
        let fixture = fixture();
        let options = ListOptions {
            filter: FilterSpec {
                year: Some(Span::new(1980, 1995)),
                ..Default::default()
            },
            query: "swe".to_string(),
            ..Default::default()
        };
        let result = run_at(&fixture.store, ItemKind::Owned, options, today()).unwrap();
        assert_eq!(listed(&result), vec![(3, "SWE 1")]);
    }

    #[test]
    fn inapplicable_sort_warns_and_passes_through() {
        let fixture = fixture();
        let options = ListOptions {
            sort: SortKey::ArchivedNewest,
            ..Default::default()
        };
        let result = run_at(&fixture.store, ItemKind::Wanted, options, today()).unwrap();
        assert_eq!(listed(&result), vec![(1, "EST 1")]);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == crate::commands::MessageLevel::Warning));
    }

    #[test]
    fn restricts_to_collection() {
        let fixture = fixture().with_collection("Swedish", &["SWE 1"]);
        let options = ListOptions {
            collection: Some("swedish".to_string()),
            ..Default::default()
        };
        let result = run_at(&fixture.store, ItemKind::Owned, options, today()).unwrap();
        assert_eq!(listed(&result), vec![(3, "SWE 1")]);
    }

    #[test]
    fn reports_bounds_of_listed_kind() {
        let fixture = fixture();
        let result = run_at(&fixture.store, ItemKind::Owned, ListOptions::default(), today()).unwrap();
        let bounds = result.bounds.unwrap();
        assert_eq!(bounds.year, Span::new(1975, 1990));
    }

    #[test]
    fn half_open_period_inside_collection_keeps_start_only_items() {
        let fixture = StoreFixture::new()
            .with_item(ItemKind::Owned, "X 1", &[("period_start", "1960")])
            .with_item(
                ItemKind::Owned,
                "Z 1",
                &[("period_start", "1930"), ("period_end", "1990")],
            )
            .with_item(
                ItemKind::Owned,
                "Y 1",
                &[("period_start", "1920"), ("period_end", "2010")],
            )
            .with_collection("Mine", &["X 1", "Z 1"]);

        // An open upper end takes the maximum of the collection, not the kind.
        let scoped = scoped_items(&fixture.store, ItemKind::Owned, Some("Mine")).unwrap();
        let bounds = crate::bounds::DataBounds::compute(&scoped, today());
        assert_eq!(bounds.period.max, 1990);

        let options = ListOptions {
            filter: FilterSpec {
                period: Some(Span::new(1950, bounds.period.max)),
                ..Default::default()
            },
            collection: Some("Mine".to_string()),
            ..Default::default()
        };
        let result = run_at(&fixture.store, ItemKind::Owned, options, today()).unwrap();
        assert_eq!(listed(&result), vec![(1, "X 1")]);
    }

    #[test]
    fn empty_kind_and_empty_match_say_different_things() {
        let fixture = fixture();
        let empty = run_at(&fixture.store, ItemKind::Archived, ListOptions::default(), today())
            .unwrap();
        assert_eq!(empty.messages[0].content, "No archived items.");

        let options = ListOptions {
            query: "nothing".to_string(),
            ..Default::default()
        };
        let none = run_at(&fixture.store, ItemKind::Owned, options, today()).unwrap();
        assert_eq!(none.messages[0].content, "No items match.");
    }
}
