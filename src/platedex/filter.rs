//! # Filter Evaluation
//!
//! A [`FilterSpec`] is a conjunction of independent predicates over a
//! [`FieldBag`]. Each predicate is inactive at its default value, so
//! `FilterSpec::default()` matches everything.
//!
//! Missing data is excluded, not passed: once a categorical set is non-empty,
//! an item without that field fails it; once a range is narrower than the data
//! set, an item without that field fails it.
//!
//! Ranges are evaluated against the [`DataBounds`] of the current item set. A
//! range that covers the bounds is a no-op, which makes an "active but
//! full-range" spec evaluate exactly like the default one.

use crate::bounds::{DataBounds, Span};
use crate::fields::FieldBag;
use crate::model::Item;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub countries: BTreeSet<String>,
    pub types: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    /// Matches either the main or the secondary color.
    pub colors: BTreeSet<String>,
    pub source_types: BTreeSet<String>,
    pub source_countries: BTreeSet<String>,
    pub archival_reasons: BTreeSet<String>,
    pub recipient_countries: BTreeSet<String>,
    pub period: Option<Span<i32>>,
    pub year: Option<Span<i32>>,
    pub cost: Option<Span<i64>>,
    pub value: Option<Span<i64>>,
    pub date: Option<Span<String>>,
    pub archival_date: Option<Span<String>>,
    pub has_vehicle: bool,
}

impl FilterSpec {
    /// True when nothing has been set, not even a full-range slider.
    pub fn is_default(&self) -> bool {
        self == &FilterSpec::default()
    }

    /// True when at least one predicate would actually exclude something,
    /// given the current bounds.
    pub fn is_active(&self, bounds: &DataBounds) -> bool {
        let sets = [
            &self.countries,
            &self.types,
            &self.locations,
            &self.colors,
            &self.source_types,
            &self.source_countries,
            &self.archival_reasons,
            &self.recipient_countries,
        ];

        sets.iter().any(|s| !s.is_empty())
            || self.has_vehicle
            || narrowing(&self.period, &bounds.period).is_some()
            || narrowing(&self.year, &bounds.year).is_some()
            || narrowing(&self.cost, &bounds.cost).is_some()
            || narrowing(&self.value, &bounds.value).is_some()
            || narrowing(&self.date, &bounds.date).is_some()
            || narrowing(&self.archival_date, &bounds.archival_date).is_some()
    }

    /// Returns the items this spec accepts, in their original order.
    pub fn apply(&self, items: Vec<Item>, bounds: &DataBounds) -> Vec<Item> {
        items
            .into_iter()
            .filter(|item| matches(&item.fields(), self, bounds))
            .collect()
    }
}

/// A range only constrains when it is narrower than the data set.
fn narrowing<'a, T: PartialOrd>(range: &'a Option<Span<T>>, full: &Span<T>) -> Option<&'a Span<T>> {
    range.as_ref().filter(|r| !r.covers(full))
}

fn in_set(set: &BTreeSet<String>, value: Option<&str>) -> bool {
    if set.is_empty() {
        return true;
    }
    value.is_some_and(|v| set.contains(v))
}

fn in_range<T: PartialOrd>(range: Option<&Span<T>>, value: Option<T>) -> bool {
    match range {
        None => true,
        Some(r) => value.is_some_and(|v| r.contains(&v)),
    }
}

fn in_text_range(range: Option<&Span<String>>, value: Option<&str>) -> bool {
    match range {
        None => true,
        Some(r) => value.is_some_and(|v| r.contains(v)),
    }
}

/// Period is a start/end pair where either end may be missing. A single known
/// end is only trusted when the other side of the range is left open at the
/// data set's extreme.
fn period_matches(range: Option<&Span<i32>>, full: &Span<i32>, bag: &FieldBag) -> bool {
    let Some(r) = range else {
        return true;
    };

    match (bag.period_start, bag.period_end) {
        (Some(start), Some(end)) => r.contains(&start) && r.contains(&end),
        (Some(start), None) => r.max == full.max && r.contains(&start),
        (None, Some(end)) => r.min == full.min && r.contains(&end),
        (None, None) => false,
    }
}

/// Decides whether an item passes every active predicate of `spec`.
pub fn matches(bag: &FieldBag, spec: &FilterSpec, bounds: &DataBounds) -> bool {
    let colors_ok = spec.colors.is_empty()
        || [bag.color_main, bag.color_secondary]
            .into_iter()
            .flatten()
            .any(|c| spec.colors.contains(c));

    in_set(&spec.countries, bag.country)
        && in_set(&spec.types, bag.plate_type)
        && in_set(&spec.locations, bag.location_status)
        && colors_ok
        && in_set(&spec.source_types, bag.source_type)
        && in_set(&spec.source_countries, bag.source_country)
        && in_set(&spec.archival_reasons, bag.archival_reason)
        && in_set(&spec.recipient_countries, bag.recipient_country)
        && period_matches(narrowing(&spec.period, &bounds.period), &bounds.period, bag)
        && in_range(narrowing(&spec.year, &bounds.year), bag.year)
        && in_range(narrowing(&spec.cost, &bounds.cost), bag.cost)
        && in_range(narrowing(&spec.value, &bounds.value), bag.value)
        && in_text_range(narrowing(&spec.date, &bounds.date), bag.acquisition_date)
        && in_text_range(
            narrowing(&spec.archival_date, &bounds.archival_date),
            bag.archival_date,
        )
        && (!spec.has_vehicle || bag.vehicle.is_some())
}
