//! Range bounds derived from the current item set.
//!
//! Range filters are initialised from these bounds, and a filter range that
//! covers them is treated as inactive (see [`crate::filter`]).

use crate::model::Item;
use chrono::{Datelike, Local, NaiveDate};
use std::borrow::Borrow;

/// Earliest year offered when the data set has no years at all.
pub const FALLBACK_MIN_YEAR: i32 = 1900;

/// An inclusive `min..=max` interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd> Span<T> {
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        self.min.borrow() <= value && value <= self.max.borrow()
    }

    /// True when this span includes all of `other`.
    pub fn covers(&self, other: &Span<T>) -> bool {
        self.min <= other.min && self.max >= other.max
    }
}

/// Min/max of every range-filterable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBounds {
    pub period: Span<i32>,
    pub year: Span<i32>,
    pub cost: Span<i64>,
    pub value: Span<i64>,
    pub date: Span<String>,
    pub archival_date: Span<String>,
}

impl DataBounds {
    pub fn compute(items: &[Item], today: NaiveDate) -> Self {
        let bags: Vec<_> = items.iter().map(Item::fields).collect();
        let today_str = today.format("%Y-%m-%d").to_string();

        let years = bags.iter().filter_map(|b| b.year);
        let periods = bags
            .iter()
            .flat_map(|b| [b.period_start, b.period_end])
            .flatten();

        DataBounds {
            period: year_span(periods, today.year()),
            year: year_span(years, today.year()),
            cost: amount_span(bags.iter().filter_map(|b| b.cost)),
            value: amount_span(bags.iter().filter_map(|b| b.value)),
            date: date_span(bags.iter().filter_map(|b| b.acquisition_date), &today_str),
            archival_date: date_span(bags.iter().filter_map(|b| b.archival_date), &today_str),
        }
    }

    /// Bounds relative to the local calendar date.
    pub fn compute_now(items: &[Item]) -> Self {
        Self::compute(items, Local::now().date_naive())
    }
}

fn min_max<T: Ord + Copy>(values: impl Iterator<Item = T>) -> Option<(T, T)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn year_span(values: impl Iterator<Item = i32>, current_year: i32) -> Span<i32> {
    let (min, max) = min_max(values).unwrap_or((FALLBACK_MIN_YEAR, current_year));
    // Keep the slider range non-empty.
    if min >= max {
        Span::new(max - 1, max)
    } else {
        Span::new(min, max)
    }
}

fn amount_span(values: impl Iterator<Item = i64>) -> Span<i64> {
    let (min, max) = min_max(values).unwrap_or((0, 0));
    Span::new(min, max)
}

fn date_span<'a>(values: impl Iterator<Item = &'a str>, today: &'a str) -> Span<String> {
    let (min, max) = min_max(values.chain(std::iter::once(today))).unwrap_or((today, today));
    Span::new(min.to_string(), max.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::set_field;
    use crate::model::ItemKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn item(pairs: &[(&str, &str)]) -> Item {
        let mut item = Item::new(ItemKind::Owned, "R");
        for (k, v) in pairs {
            set_field(&mut item, k, v).unwrap();
        }
        item
    }

    #[test]
    fn empty_set_uses_fallbacks() {
        let bounds = DataBounds::compute(&[], today());
        assert_eq!(bounds.year, Span::new(1900, 2024));
        assert_eq!(bounds.period, Span::new(1900, 2024));
        assert_eq!(bounds.cost, Span::new(0, 0));
        assert_eq!(bounds.value, Span::new(0, 0));
        assert_eq!(bounds.date, Span::new("2024-06-15".into(), "2024-06-15".into()));
    }

    #[test]
    fn single_year_is_widened_downwards() {
        let bounds = DataBounds::compute(&[item(&[("year", "1999")])], today());
        assert_eq!(bounds.year, Span::new(1998, 1999));
    }

    #[test]
    fn period_uses_both_ends() {
        let items = vec![
            item(&[("period_start", "1950"), ("period_end", "1972")]),
            item(&[("period_end", "1990")]),
        ];
        let bounds = DataBounds::compute(&items, today());
        assert_eq!(bounds.period, Span::new(1950, 1990));
    }

    #[test]
    fn money_spans_observed_values() {
        let items = vec![item(&[("cost", "500")]), item(&[("cost", "150000")])];
        let bounds = DataBounds::compute(&items, today());
        assert_eq!(bounds.cost, Span::new(500, 150000));
        assert_eq!(bounds.value, Span::new(0, 0));
    }

    #[test]
    fn dates_widen_to_include_today() {
        let past = DataBounds::compute(&[item(&[("date", "2020-01-01")])], today());
        assert_eq!(past.date, Span::new("2020-01-01".into(), "2024-06-15".into()));

        let future = DataBounds::compute(&[item(&[("date", "2030-01-01")])], today());
        assert_eq!(future.date, Span::new("2024-06-15".into(), "2030-01-01".into()));
    }

    #[test]
    fn span_contains_and_covers() {
        let span: Span<i32> = Span::new(10, 20);
        assert!(span.contains(&10_i32));
        assert!(span.contains(&20_i32));
        assert!(!span.contains(&21_i32));
        assert!(Span::new(5, 25).covers(&span));
        assert!(!Span::new(11, 25).covers(&span));

        let dates = Span::new("2020-01-01".to_string(), "2020-12-31".to_string());
        assert!(dates.contains("2020-06-01"));
        assert!(!dates.contains("2021-01-01"));
    }
}
