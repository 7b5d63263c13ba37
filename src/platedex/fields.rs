//! # Field Bag
//!
//! Filtering, sorting, search and CSV interchange all need to read an item's
//! attributes without caring which kind of item it is. [`FieldBag`] is that
//! uniform, read-only projection: every attribute of every kind, with `None`
//! where the attribute does not apply (an owned plate has no archival date, a
//! wanted plate has no cost).
//!
//! The [`FIELDS`] registry describes each attribute once: its name, the kind
//! of value it holds, and which item kinds carry it. Named access
//! ([`FieldBag::get`], [`set_field`]) is driven by the registry.

use crate::error::{PlatedexError, Result};
use crate::model::{Item, ItemKind};
use chrono::NaiveDate;
use uuid::Uuid;

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// A calendar year, valid range 1..=9999.
    Year,
    /// Minor currency units.
    Money,
    /// Millimetres or grams.
    Measure,
    /// ISO `YYYY-MM-DD`.
    Date,
    Flag,
}

/// Which item kinds carry a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    All,
    /// Owned and archived items (anything that was acquired).
    Acquired,
    ArchivedOnly,
}

impl Availability {
    pub fn applies_to(&self, kind: ItemKind) -> bool {
        match self {
            Availability::All => true,
            Availability::Acquired => kind != ItemKind::Wanted,
            Availability::ArchivedOnly => kind == ItemKind::Archived,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub availability: Availability,
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            availability: Availability::All,
        }
    }

    const fn acquired(mut self) -> Self {
        self.availability = Availability::Acquired;
        self
    }

    const fn archived(mut self) -> Self {
        self.availability = Availability::ArchivedOnly;
        self
    }
}

/// Registry of every settable item field.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("registration_number", FieldKind::Text),
    FieldSpec::new("image_path", FieldKind::Text),
    FieldSpec::new("notes", FieldKind::Text),
    FieldSpec::new("vehicle", FieldKind::Text),
    // classification
    FieldSpec::new("country", FieldKind::Text),
    FieldSpec::new("region_1st", FieldKind::Text),
    FieldSpec::new("region_2nd", FieldKind::Text),
    FieldSpec::new("region_3rd", FieldKind::Text),
    FieldSpec::new("type", FieldKind::Text),
    FieldSpec::new("period_start", FieldKind::Year),
    FieldSpec::new("period_end", FieldKind::Year),
    FieldSpec::new("year", FieldKind::Year),
    // acquisition
    FieldSpec::new("acquisition_date", FieldKind::Date).acquired(),
    FieldSpec::new("cost", FieldKind::Money).acquired(),
    FieldSpec::new("value", FieldKind::Money).acquired(),
    FieldSpec::new("location_status", FieldKind::Text).acquired(),
    FieldSpec::new("is_keeper", FieldKind::Flag).acquired(),
    FieldSpec::new("is_for_trade", FieldKind::Flag).acquired(),
    // physical
    FieldSpec::new("width", FieldKind::Measure),
    FieldSpec::new("height", FieldKind::Measure),
    FieldSpec::new("weight", FieldKind::Measure),
    FieldSpec::new("color_main", FieldKind::Text),
    FieldSpec::new("color_secondary", FieldKind::Text),
    // source
    FieldSpec::new("source_name", FieldKind::Text).acquired(),
    FieldSpec::new("source_alias", FieldKind::Text).acquired(),
    FieldSpec::new("source_type", FieldKind::Text).acquired(),
    FieldSpec::new("source_details", FieldKind::Text).acquired(),
    FieldSpec::new("source_country", FieldKind::Text).acquired(),
    // disposition
    FieldSpec::new("archival_date", FieldKind::Date).archived(),
    FieldSpec::new("archival_reason", FieldKind::Text).archived(),
    FieldSpec::new("archival_details", FieldKind::Text).archived(),
    FieldSpec::new("price", FieldKind::Money).archived(),
    FieldSpec::new("recipient_name", FieldKind::Text).archived(),
    FieldSpec::new("recipient_alias", FieldKind::Text).archived(),
    FieldSpec::new("recipient_country", FieldKind::Text).archived(),
];

/// Look up a field spec by name. CSV column spellings are accepted too.
pub fn get_spec(name: &str) -> Option<&'static FieldSpec> {
    let name = canonical_name(name);
    FIELDS.iter().find(|spec| spec.name == name)
}

fn canonical_name(name: &str) -> &str {
    match name {
        "reg_no" => "registration_number",
        "date" => "acquisition_date",
        "status" => "location_status",
        other => other,
    }
}

/// Runtime value of a field, borrowed from the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    Flag(bool),
}

/// Flattened read-only projection of any [`Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBag<'a> {
    pub id: Uuid,
    pub kind: ItemKind,
    pub registration_number: &'a str,
    pub image_path: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub vehicle: Option<&'a str>,
    pub country: Option<&'a str>,
    pub region_1st: Option<&'a str>,
    pub region_2nd: Option<&'a str>,
    pub region_3rd: Option<&'a str>,
    pub plate_type: Option<&'a str>,
    pub period_start: Option<i32>,
    pub period_end: Option<i32>,
    pub year: Option<i32>,
    pub acquisition_date: Option<&'a str>,
    pub cost: Option<i64>,
    pub value: Option<i64>,
    pub location_status: Option<&'a str>,
    pub is_keeper: Option<bool>,
    pub is_for_trade: Option<bool>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub color_main: Option<&'a str>,
    pub color_secondary: Option<&'a str>,
    pub source_name: Option<&'a str>,
    pub source_alias: Option<&'a str>,
    pub source_type: Option<&'a str>,
    pub source_details: Option<&'a str>,
    pub source_country: Option<&'a str>,
    pub archival_date: Option<&'a str>,
    pub archival_reason: Option<&'a str>,
    pub archival_details: Option<&'a str>,
    pub price: Option<i64>,
    pub recipient_name: Option<&'a str>,
    pub recipient_alias: Option<&'a str>,
    pub recipient_country: Option<&'a str>,
}

/// Blank strings are treated as absent.
fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl Item {
    /// Projects this item into a [`FieldBag`].
    pub fn fields(&self) -> FieldBag<'_> {
        let plate = self.plate();
        let class = &plate.classification;
        let phys = &plate.physical;
        let acq = self.acquisition();
        let disp = self.disposition();
        let flags = match self {
            Item::Owned(o) => Some((o.is_keeper, o.is_for_trade)),
            Item::Archived(a) => Some((a.is_keeper, a.is_for_trade)),
            Item::Wanted(_) => None,
        };

        FieldBag {
            id: plate.id,
            kind: self.kind(),
            registration_number: &plate.registration_number,
            image_path: text(&plate.image_path),
            notes: text(&plate.notes),
            vehicle: text(&plate.vehicle),
            country: text(&class.country),
            region_1st: text(&class.region_1st),
            region_2nd: text(&class.region_2nd),
            region_3rd: text(&class.region_3rd),
            plate_type: text(&class.plate_type),
            period_start: class.period_start,
            period_end: class.period_end,
            year: class.year,
            acquisition_date: acq.and_then(|a| text(&a.date)),
            cost: acq.and_then(|a| a.cost),
            value: acq.and_then(|a| a.value),
            location_status: acq.and_then(|a| text(&a.location_status)),
            is_keeper: flags.map(|(k, _)| k),
            is_for_trade: flags.map(|(_, t)| t),
            width: phys.width,
            height: phys.height,
            weight: phys.weight,
            color_main: text(&phys.color_main),
            color_secondary: text(&phys.color_secondary),
            source_name: acq.and_then(|a| text(&a.source_name)),
            source_alias: acq.and_then(|a| text(&a.source_alias)),
            source_type: acq.and_then(|a| text(&a.source_type)),
            source_details: acq.and_then(|a| text(&a.source_details)),
            source_country: acq.and_then(|a| text(&a.source_country)),
            archival_date: disp.and_then(|d| text(&d.date)),
            archival_reason: disp.and_then(|d| text(&d.reason)),
            archival_details: disp.and_then(|d| text(&d.details)),
            price: disp.and_then(|d| d.price),
            recipient_name: disp.and_then(|d| text(&d.recipient_name)),
            recipient_alias: disp.and_then(|d| text(&d.recipient_alias)),
            recipient_country: disp.and_then(|d| text(&d.recipient_country)),
        }
    }
}

impl<'a> FieldBag<'a> {
    /// Named access. Returns `None` for unknown names and for absent values.
    pub fn get(&self, name: &str) -> Option<FieldValue<'a>> {
        use FieldValue::{Flag, Int, Text};

        let int = |v: Option<i32>| v.map(|n| Int(n as i64));
        match canonical_name(name) {
            "registration_number" => Some(Text(self.registration_number)),
            "image_path" => self.image_path.map(Text),
            "notes" => self.notes.map(Text),
            "vehicle" => self.vehicle.map(Text),
            "country" => self.country.map(Text),
            "region_1st" => self.region_1st.map(Text),
            "region_2nd" => self.region_2nd.map(Text),
            "region_3rd" => self.region_3rd.map(Text),
            "type" => self.plate_type.map(Text),
            "period_start" => int(self.period_start),
            "period_end" => int(self.period_end),
            "year" => int(self.year),
            "acquisition_date" => self.acquisition_date.map(Text),
            "cost" => self.cost.map(Int),
            "value" => self.value.map(Int),
            "location_status" => self.location_status.map(Text),
            "is_keeper" => self.is_keeper.map(Flag),
            "is_for_trade" => self.is_for_trade.map(Flag),
            "width" => self.width.map(Int),
            "height" => self.height.map(Int),
            "weight" => self.weight.map(Int),
            "color_main" => self.color_main.map(Text),
            "color_secondary" => self.color_secondary.map(Text),
            "source_name" => self.source_name.map(Text),
            "source_alias" => self.source_alias.map(Text),
            "source_type" => self.source_type.map(Text),
            "source_details" => self.source_details.map(Text),
            "source_country" => self.source_country.map(Text),
            "archival_date" => self.archival_date.map(Text),
            "archival_reason" => self.archival_reason.map(Text),
            "archival_details" => self.archival_details.map(Text),
            "price" => self.price.map(Int),
            "recipient_name" => self.recipient_name.map(Text),
            "recipient_alias" => self.recipient_alias.map(Text),
            "recipient_country" => self.recipient_country.map(Text),
            _ => None,
        }
    }

    /// The year used for age ordering: `year`, else the period bounds.
    pub fn age_year(&self) -> Option<i32> {
        self.year.or(self.period_start).or(self.period_end)
    }
}

// --- Mutable slots, shared by `set_field` and CSV import ---

pub(crate) fn text_slot<'a>(item: &'a mut Item, name: &str) -> Option<&'a mut Option<String>> {
    match canonical_name(name) {
        "image_path" => Some(&mut item.plate_mut().image_path),
        "notes" => Some(&mut item.plate_mut().notes),
        "vehicle" => Some(&mut item.plate_mut().vehicle),
        "country" => Some(&mut item.plate_mut().classification.country),
        "region_1st" => Some(&mut item.plate_mut().classification.region_1st),
        "region_2nd" => Some(&mut item.plate_mut().classification.region_2nd),
        "region_3rd" => Some(&mut item.plate_mut().classification.region_3rd),
        "type" => Some(&mut item.plate_mut().classification.plate_type),
        "color_main" => Some(&mut item.plate_mut().physical.color_main),
        "color_secondary" => Some(&mut item.plate_mut().physical.color_secondary),
        "acquisition_date" => item.acquisition_mut().map(|a| &mut a.date),
        "location_status" => item.acquisition_mut().map(|a| &mut a.location_status),
        "source_name" => item.acquisition_mut().map(|a| &mut a.source_name),
        "source_alias" => item.acquisition_mut().map(|a| &mut a.source_alias),
        "source_type" => item.acquisition_mut().map(|a| &mut a.source_type),
        "source_details" => item.acquisition_mut().map(|a| &mut a.source_details),
        "source_country" => item.acquisition_mut().map(|a| &mut a.source_country),
        "archival_date" => item.disposition_mut().map(|d| &mut d.date),
        "archival_reason" => item.disposition_mut().map(|d| &mut d.reason),
        "archival_details" => item.disposition_mut().map(|d| &mut d.details),
        "recipient_name" => item.disposition_mut().map(|d| &mut d.recipient_name),
        "recipient_alias" => item.disposition_mut().map(|d| &mut d.recipient_alias),
        "recipient_country" => item.disposition_mut().map(|d| &mut d.recipient_country),
        _ => None,
    }
}

pub(crate) fn year_slot<'a>(item: &'a mut Item, name: &str) -> Option<&'a mut Option<i32>> {
    let class = &mut item.plate_mut().classification;
    match name {
        "period_start" => Some(&mut class.period_start),
        "period_end" => Some(&mut class.period_end),
        "year" => Some(&mut class.year),
        _ => None,
    }
}

pub(crate) fn amount_slot<'a>(item: &'a mut Item, name: &str) -> Option<&'a mut Option<i64>> {
    match name {
        "width" => Some(&mut item.plate_mut().physical.width),
        "height" => Some(&mut item.plate_mut().physical.height),
        "weight" => Some(&mut item.plate_mut().physical.weight),
        "cost" => item.acquisition_mut().map(|a| &mut a.cost),
        "value" => item.acquisition_mut().map(|a| &mut a.value),
        "price" => item.disposition_mut().map(|d| &mut d.price),
        _ => None,
    }
}

fn flag_slot<'a>(item: &'a mut Item, name: &str) -> Option<&'a mut bool> {
    match (item, name) {
        (Item::Owned(o), "is_keeper") => Some(&mut o.is_keeper),
        (Item::Owned(o), "is_for_trade") => Some(&mut o.is_for_trade),
        (Item::Archived(a), "is_keeper") => Some(&mut a.is_keeper),
        (Item::Archived(a), "is_for_trade") => Some(&mut a.is_for_trade),
        _ => None,
    }
}

/// Valid years are 1..=9999.
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|y| (1..=9999).contains(y))
}

pub fn parse_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" | "" => Some(false),
        _ => None,
    }
}

fn invalid(name: &str, raw: &str, expected: &str) -> PlatedexError {
    PlatedexError::Validation(format!(
        "`{}` is not a valid {} for field `{}`",
        raw, expected, name
    ))
}

/// Sets a field by name from user input. An empty value clears the field.
///
/// Strict: unparsable values are rejected rather than dropped. CSV import uses
/// its own lenient rules (see [`crate::interchange`]).
pub fn set_field(item: &mut Item, name: &str, raw: &str) -> Result<()> {
    let spec = get_spec(name)
        .ok_or_else(|| PlatedexError::Validation(format!("Unknown field: {}", name)))?;
    if !spec.availability.applies_to(item.kind()) {
        return Err(PlatedexError::Validation(format!(
            "Field `{}` does not apply to {} items",
            spec.name,
            item.kind()
        )));
    }

    let value = raw.trim();
    let missing = || PlatedexError::Validation(format!("Field `{}` is not settable", spec.name));

    match spec.kind {
        FieldKind::Text if spec.name == "registration_number" => {
            if value.is_empty() {
                return Err(PlatedexError::Validation(
                    "Registration number cannot be empty".into(),
                ));
            }
            item.plate_mut().registration_number = value.to_string();
        }
        FieldKind::Text => {
            let slot = text_slot(item, spec.name).ok_or_else(missing)?;
            *slot = (!value.is_empty()).then(|| value.to_string());
        }
        FieldKind::Date => {
            let parsed = if value.is_empty() {
                None
            } else {
                Some(parse_date(value).ok_or_else(|| invalid(spec.name, raw, "date"))?)
            };
            *text_slot(item, spec.name).ok_or_else(missing)? = parsed;
        }
        FieldKind::Year => {
            let parsed = if value.is_empty() {
                None
            } else {
                Some(parse_year(value).ok_or_else(|| invalid(spec.name, raw, "year"))?)
            };
            *year_slot(item, spec.name).ok_or_else(missing)? = parsed;
        }
        FieldKind::Money | FieldKind::Measure => {
            let parsed = if value.is_empty() {
                None
            } else {
                Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| invalid(spec.name, raw, "whole number"))?,
                )
            };
            *amount_slot(item, spec.name).ok_or_else(missing)? = parsed;
        }
        FieldKind::Flag => {
            let parsed = parse_flag(value).ok_or_else(|| invalid(spec.name, raw, "flag"))?;
            *flag_slot(item, spec.name).ok_or_else(missing)? = parsed;
        }
    }

    item.touch();
    Ok(())
}
