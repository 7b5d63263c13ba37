//! # Sort Orders
//!
//! Each [`SortKey`] is a chain of keys with explicit null placement, always
//! ending in the registration number so equal-key items still have a
//! deterministic order.
//!
//! | Key | Chain |
//! |-----|-------|
//! | `CountryAndTypeAsc` | country ↑ (nulls last), type ↑ (nulls last), region ↑ (nulls first), reg ↑ |
//! | `CountryAndTypeDesc` | country ↓ (nulls last), type ↓ (nulls last), region ↓ (nulls first), reg ↓ |
//! | `AgeAsc` | age year ↓ (nulls last), reg ↑ |
//! | `AgeDesc` | age year ↑ (nulls last), reg ↑ |
//! | `AcquiredNewest` / `AcquiredOldest` | acquisition date ↓ / ↑ (nulls last), reg ↑ |
//! | `ArchivedNewest` / `ArchivedOldest` | archival date ↓ / ↑ (nulls last), reg ↑ |
//!
//! Age and acquisition orders do not exist for wanted items, archival orders
//! only exist for archived items. Asking for them is not an error: there is
//! simply no comparator and the list keeps its order.

use crate::fields::FieldBag;
use crate::model::{Item, ItemKind};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    CountryAndTypeAsc,
    CountryAndTypeDesc,
    /// Youngest plates first.
    AgeAsc,
    /// Oldest plates first.
    AgeDesc,
    AcquiredNewest,
    AcquiredOldest,
    ArchivedNewest,
    ArchivedOldest,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::CountryAndTypeAsc,
        SortKey::CountryAndTypeDesc,
        SortKey::AgeAsc,
        SortKey::AgeDesc,
        SortKey::AcquiredNewest,
        SortKey::AcquiredOldest,
        SortKey::ArchivedNewest,
        SortKey::ArchivedOldest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CountryAndTypeAsc => "country-and-type-asc",
            SortKey::CountryAndTypeDesc => "country-and-type-desc",
            SortKey::AgeAsc => "age-asc",
            SortKey::AgeDesc => "age-desc",
            SortKey::AcquiredNewest => "acquired-newest",
            SortKey::AcquiredOldest => "acquired-oldest",
            SortKey::ArchivedNewest => "archived-newest",
            SortKey::ArchivedOldest => "archived-oldest",
        }
    }

    pub fn applies_to(&self, kind: ItemKind) -> bool {
        match self {
            SortKey::CountryAndTypeAsc | SortKey::CountryAndTypeDesc => true,
            SortKey::AgeAsc
            | SortKey::AgeDesc
            | SortKey::AcquiredNewest
            | SortKey::AcquiredOldest => kind != ItemKind::Wanted,
            SortKey::ArchivedNewest | SortKey::ArchivedOldest => kind == ItemKind::Archived,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| format!("Unknown sort key: {}", s))
    }
}

pub type Comparator = Box<dyn Fn(&Item, &Item) -> Ordering>;

#[derive(Debug, Clone, Copy)]
enum Dir {
    Asc,
    Desc,
}

impl Dir {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Dir::Asc => ord,
            Dir::Desc => ord.reverse(),
        }
    }
}

fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>, dir: Dir) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => dir.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn nulls_first<T: Ord>(a: Option<T>, b: Option<T>, dir: Dir) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => dir.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn registration(a: &FieldBag, b: &FieldBag, dir: Dir) -> Ordering {
    dir.apply(a.registration_number.cmp(b.registration_number))
}

fn country_and_type(a: &FieldBag, b: &FieldBag, dir: Dir) -> Ordering {
    nulls_last(a.country, b.country, dir)
        .then_with(|| nulls_last(a.plate_type, b.plate_type, dir))
        .then_with(|| nulls_first(a.region_1st, b.region_1st, dir))
        .then_with(|| registration(a, b, dir))
}

fn by_key(key: SortKey, a: &FieldBag, b: &FieldBag) -> Ordering {
    match key {
        SortKey::CountryAndTypeAsc => country_and_type(a, b, Dir::Asc),
        SortKey::CountryAndTypeDesc => country_and_type(a, b, Dir::Desc),
        SortKey::AgeAsc => nulls_last(a.age_year(), b.age_year(), Dir::Desc)
            .then_with(|| registration(a, b, Dir::Asc)),
        SortKey::AgeDesc => nulls_last(a.age_year(), b.age_year(), Dir::Asc)
            .then_with(|| registration(a, b, Dir::Asc)),
        SortKey::AcquiredNewest => nulls_last(a.acquisition_date, b.acquisition_date, Dir::Desc)
            .then_with(|| registration(a, b, Dir::Asc)),
        SortKey::AcquiredOldest => nulls_last(a.acquisition_date, b.acquisition_date, Dir::Asc)
            .then_with(|| registration(a, b, Dir::Asc)),
        SortKey::ArchivedNewest => nulls_last(a.archival_date, b.archival_date, Dir::Desc)
            .then_with(|| registration(a, b, Dir::Asc)),
        SortKey::ArchivedOldest => nulls_last(a.archival_date, b.archival_date, Dir::Asc)
            .then_with(|| registration(a, b, Dir::Asc)),
    }
}

/// Builds the comparator for `key`, or `None` when the key has no meaning for
/// items of `kind`.
pub fn comparator(key: SortKey, kind: ItemKind) -> Option<Comparator> {
    if !key.applies_to(kind) {
        return None;
    }
    Some(Box::new(move |a: &Item, b: &Item| {
        by_key(key, &a.fields(), &b.fields())
    }))
}

/// Sorts in place. Returns `false` (and leaves the order alone) when the key
/// does not apply to `kind`.
pub fn sort_items(items: &mut [Item], key: SortKey, kind: ItemKind) -> bool {
    match comparator(key, kind) {
        Some(cmp) => {
            items.sort_by(|a, b| cmp(a, b));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::set_field;

    fn item(kind: ItemKind, reg: &str, pairs: &[(&str, &str)]) -> Item {
        let mut item = Item::new(kind, reg);
        for (k, v) in pairs {
            set_field(&mut item, k, v).unwrap();
        }
        item
    }

    fn regs(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.registration_number()).collect()
    }

    fn classified() -> Vec<Item> {
        vec![
            item(ItemKind::Owned, "S-2", &[("country", "Sweden"), ("type", "Taxi"), ("region_1st", "Uppsala")]),
            item(ItemKind::Owned, "F-1", &[("country", "Finland"), ("type", "Normal"), ("region_1st", "Uusimaa")]),
            item(ItemKind::Owned, "S-1", &[("country", "Sweden"), ("type", "Normal"), ("region_1st", "Kalmar")]),
            item(ItemKind::Owned, "F-2", &[("country", "Finland"), ("type", "Normal"), ("region_1st", "Uusimaa")]),
        ]
    }

    #[test]
    fn country_and_type_desc_reverses_asc() {
        let mut asc = classified();
        let mut desc = classified();
        assert!(sort_items(&mut asc, SortKey::CountryAndTypeAsc, ItemKind::Owned));
        assert!(sort_items(&mut desc, SortKey::CountryAndTypeDesc, ItemKind::Owned));

        assert_eq!(regs(&asc), vec!["F-1", "F-2", "S-1", "S-2"]);
        let mut reversed = regs(&desc);
        reversed.reverse();
        assert_eq!(regs(&asc), reversed);
    }

    #[test]
    fn missing_country_sorts_last_and_missing_region_first() {
        let mut items = classified();
        items.push(item(ItemKind::Owned, "A-0", &[]));
        items.push(item(ItemKind::Owned, "F-0", &[("country", "Finland"), ("type", "Normal")]));

        sort_items(&mut items, SortKey::CountryAndTypeAsc, ItemKind::Owned);
        assert_eq!(regs(&items), vec!["F-0", "F-1", "F-2", "S-1", "S-2", "A-0"]);

        sort_items(&mut items, SortKey::CountryAndTypeDesc, ItemKind::Owned);
        assert_eq!(regs(&items).last(), Some(&"A-0"));
    }

    #[test]
    fn age_orders_use_year_then_period() {
        let mut items = vec![
            item(ItemKind::Owned, "OLD", &[("period_start", "1930")]),
            item(ItemKind::Owned, "NEW", &[("year", "2001")]),
            item(ItemKind::Owned, "NONE", &[]),
            item(ItemKind::Owned, "MID", &[("year", "1975")]),
        ];

        sort_items(&mut items, SortKey::AgeAsc, ItemKind::Owned);
        assert_eq!(regs(&items), vec!["NEW", "MID", "OLD", "NONE"]);

        sort_items(&mut items, SortKey::AgeDesc, ItemKind::Owned);
        assert_eq!(regs(&items), vec!["OLD", "MID", "NEW", "NONE"]);
    }

    #[test]
    fn acquisition_date_orders() {
        let mut items = vec![
            item(ItemKind::Owned, "B", &[("date", "2021-01-01")]),
            item(ItemKind::Owned, "A", &[]),
            item(ItemKind::Owned, "C", &[("date", "2023-05-05")]),
        ];
        sort_items(&mut items, SortKey::AcquiredNewest, ItemKind::Owned);
        assert_eq!(regs(&items), vec!["C", "B", "A"]);
        sort_items(&mut items, SortKey::AcquiredOldest, ItemKind::Owned);
        assert_eq!(regs(&items), vec!["B", "C", "A"]);
    }

    #[test]
    fn ties_break_on_registration() {
        let mut items = vec![
            item(ItemKind::Archived, "Z", &[("archival_date", "2022-02-02")]),
            item(ItemKind::Archived, "M", &[("archival_date", "2022-02-02")]),
        ];
        sort_items(&mut items, SortKey::ArchivedNewest, ItemKind::Archived);
        assert_eq!(regs(&items), vec!["M", "Z"]);
    }

    #[test]
    fn inapplicable_keys_leave_order_unchanged() {
        let mut wanted = vec![
            item(ItemKind::Wanted, "B", &[("year", "1990")]),
            item(ItemKind::Wanted, "A", &[("year", "1950")]),
        ];
        assert!(comparator(SortKey::AgeAsc, ItemKind::Wanted).is_none());
        assert!(!sort_items(&mut wanted, SortKey::AgeAsc, ItemKind::Wanted));
        assert!(!sort_items(&mut wanted, SortKey::AcquiredNewest, ItemKind::Wanted));
        assert!(!sort_items(&mut wanted, SortKey::ArchivedOldest, ItemKind::Owned));
        assert_eq!(regs(&wanted), vec!["B", "A"]);
    }

    #[test]
    fn sort_key_round_trips_through_str() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("by-color".parse::<SortKey>().is_err());
    }
}
