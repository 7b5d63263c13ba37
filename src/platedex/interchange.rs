//! # CSV Interchange
//!
//! Export, import and the blank import template share one column layout,
//! [`COLUMNS`]. Export writes money and measurements as display strings
//! (grouped digits, configured separators and currency symbol, unit suffix);
//! import reads them back by keeping only the digits. That round trip is lossy
//! on purpose: a spreadsheet user can type `€1 500,00` or `1500.00` and both
//! land as `150000` minor units.
//!
//! Import is permissive per field and strict per file: a bad year becomes
//! `None` and the row is kept, but a read error aborts the whole import before
//! anything is returned.

use crate::config::PlatedexConfig;
use crate::error::{PlatedexError, Result};
use crate::fields::{self, FieldKind, FieldValue};
use crate::model::{Item, ItemKind};
use std::io::{Read, Write};

/// Column order for export and the import template.
pub const COLUMNS: &[&str] = &[
    "reg_no",
    "country",
    "region_1st",
    "region_2nd",
    "region_3rd",
    "type",
    "period_start",
    "period_end",
    "year",
    "notes",
    "vehicle",
    "date",
    "cost",
    "value",
    "status",
    "width",
    "height",
    "weight",
    "color_main",
    "color_secondary",
    "source_name",
    "source_alias",
    "source_type",
    "source_country",
    "source_details",
    "archival_date",
    "archival_reason",
    "price",
    "recipient_name",
    "recipient_alias",
    "recipient_country",
    "archival_details",
];

/// Items parsed from a CSV source, plus the data lines that were skipped.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub items: Vec<Item>,
    /// 1-based line numbers (header is line 1) of rows without a registration.
    pub skipped_lines: Vec<u64>,
}

/// Writes only the header row.
pub fn write_template<W: Write>(writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;
    wtr.flush()?;
    Ok(())
}

/// Writes `items` in the given order.
pub fn write_items<W: Write>(writer: W, items: &[Item], config: &PlatedexConfig) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;

    for item in items {
        let bag = item.fields();
        let row: Vec<String> = COLUMNS
            .iter()
            .map(|column| {
                let Some(spec) = fields::get_spec(column) else {
                    return String::new();
                };
                match bag.get(spec.name) {
                    None => String::new(),
                    Some(FieldValue::Text(s)) => s.to_string(),
                    Some(FieldValue::Flag(b)) => b.to_string(),
                    Some(FieldValue::Int(n)) => match spec.kind {
                        FieldKind::Money => format_money(n, config),
                        FieldKind::Measure => format_measure(n, unit_for(spec.name), config),
                        _ => n.to_string(),
                    },
                }
            })
            .collect();
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    tracing::info!(count = items.len(), "exported items");
    Ok(())
}

/// Parses every row of `reader` into items of `kind`.
///
/// Columns are matched by header name, case-insensitively; unknown columns are
/// ignored and missing ones leave the field empty. Fields that `kind` does not
/// carry are dropped. Returns [`PlatedexError::ImportEmpty`] when no row
/// yields an item.
pub fn read_items<R: Read>(reader: R, kind: ItemKind) -> Result<ImportOutcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut outcome = ImportOutcome::default();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let cell = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .and_then(|i| record.get(i))
                .unwrap_or("")
        };

        let reg = cell("reg_no");
        if reg.is_empty() {
            tracing::warn!(line, "skipping row without reg_no");
            outcome.skipped_lines.push(line);
            continue;
        }

        let mut item = Item::new(kind, reg);
        for column in COLUMNS.iter().skip(1) {
            apply_lenient(&mut item, column, cell(column));
        }
        outcome.items.push(item);
    }

    if outcome.items.is_empty() {
        return Err(PlatedexError::ImportEmpty);
    }

    tracing::info!(
        count = outcome.items.len(),
        skipped = outcome.skipped_lines.len(),
        "parsed import rows"
    );
    Ok(outcome)
}

fn apply_lenient(item: &mut Item, column: &str, raw: &str) {
    let Some(spec) = fields::get_spec(column) else {
        return;
    };
    if raw.is_empty() || !spec.availability.applies_to(item.kind()) {
        return;
    }

    match spec.kind {
        FieldKind::Text => {
            if let Some(slot) = fields::text_slot(item, spec.name) {
                *slot = Some(raw.to_string());
            }
        }
        FieldKind::Date => {
            if let Some(slot) = fields::text_slot(item, spec.name) {
                *slot = fields::parse_date(raw);
            }
        }
        FieldKind::Year => {
            if let Some(slot) = fields::year_slot(item, spec.name) {
                *slot = fields::parse_year(raw);
            }
        }
        FieldKind::Money | FieldKind::Measure => {
            if let Some(slot) = fields::amount_slot(item, spec.name) {
                *slot = parse_digits(raw);
            }
        }
        FieldKind::Flag => {}
    }
}

/// Keeps only ASCII digits. Signs, separators, symbols and units are lost.
pub fn parse_digits(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Display unit of a measurement field.
pub fn unit_for(field: &str) -> &'static str {
    match field {
        "weight" => "g",
        _ => "mm",
    }
}

fn group_digits(n: u64, separator: &str) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// `150000` → `"1,500.00"` with the default separators.
pub fn format_money(minor: i64, config: &PlatedexConfig) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!(
        "{}{}{}{}{:02}",
        sign,
        config.currency_symbol,
        group_digits(abs / 100, &config.thousands_separator),
        config.decimal_separator,
        abs % 100
    )
}

pub fn format_measure(amount: i64, unit: &str, config: &PlatedexConfig) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!(
        "{}{} {}",
        sign,
        group_digits(amount.unsigned_abs(), &config.thousands_separator),
        unit
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::set_field;

    fn export(items: &[Item], config: &PlatedexConfig) -> String {
        let mut buf = Vec::new();
        write_items(&mut buf, items, config).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn money_formatting() {
        let config = PlatedexConfig::default();
        assert_eq!(format_money(150000, &config), "1,500.00");
        assert_eq!(format_money(5, &config), "0.05");
        assert_eq!(format_money(123456789, &config), "1,234,567.89");

        let euro = PlatedexConfig {
            currency_symbol: "€".into(),
            thousands_separator: " ".into(),
            decimal_separator: ",".into(),
            ..Default::default()
        };
        assert_eq!(format_money(150000, &euro), "€1 500,00");
    }

    #[test]
    fn measure_formatting() {
        let config = PlatedexConfig::default();
        assert_eq!(format_measure(520, "mm", &config), "520 mm");
        assert_eq!(format_measure(1200, "g", &config), "1,200 g");
    }

    #[test]
    fn template_is_header_only() {
        let mut buf = Vec::new();
        write_template(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("reg_no,country,region_1st"));
        assert!(text.trim_end().ends_with("recipient_country,archival_details"));
    }

    #[test]
    fn cost_and_country_survive_export_and_import() {
        let mut item = Item::new(ItemKind::Owned, "ABC-123");
        set_field(&mut item, "cost", "150000").unwrap();
        set_field(&mut item, "country", "Finland").unwrap();

        let csv = export(&[item], &PlatedexConfig::default());
        assert!(csv.contains("\"1,500.00\""));

        let outcome = read_items(csv.as_bytes(), ItemKind::Owned).unwrap();
        let back = outcome.items[0].fields();
        assert_eq!(back.registration_number, "ABC-123");
        assert_eq!(back.cost, Some(150000));
        assert_eq!(back.country, Some("Finland"));
    }

    #[test]
    fn bad_year_imports_as_none_and_keeps_row() {
        let csv = "reg_no,year,country\nXYZ 1,abcd,Estonia\nXYZ 2,12000,Latvia\n";
        let outcome = read_items(csv.as_bytes(), ItemKind::Wanted).unwrap();

        assert_eq!(outcome.items.len(), 2);
        let first = outcome.items[0].fields();
        assert_eq!(first.year, None);
        assert_eq!(first.country, Some("Estonia"));
        assert_eq!(outcome.items[1].fields().year, None);
    }

    #[test]
    fn blank_reg_rows_are_skipped() {
        let csv = "reg_no,country\n,Sweden\nAB 1,Norway\n  ,Denmark\n";
        let outcome = read_items(csv.as_bytes(), ItemKind::Owned).unwrap();
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.skipped_lines, vec![2, 4]);
    }

    #[test]
    fn zero_rows_is_import_empty() {
        let header_only = "reg_no,country\n";
        assert!(matches!(
            read_items(header_only.as_bytes(), ItemKind::Owned),
            Err(PlatedexError::ImportEmpty)
        ));

        let all_blank = "reg_no,country\n,Sweden\n";
        assert!(matches!(
            read_items(all_blank.as_bytes(), ItemKind::Owned),
            Err(PlatedexError::ImportEmpty)
        ));
    }

    #[test]
    fn columns_are_matched_by_header_name() {
        let csv = "Country,weight,REG_NO,unknown\nFinland,\"1,200 g\",FIN-1,zzz\n";
        let outcome = read_items(csv.as_bytes(), ItemKind::Owned).unwrap();
        let bag = outcome.items[0].fields();
        assert_eq!(bag.registration_number, "FIN-1");
        assert_eq!(bag.country, Some("Finland"));
        assert_eq!(bag.weight, Some(1200));
        assert_eq!(bag.cost, None);
    }

    #[test]
    fn fields_outside_target_kind_are_ignored() {
        let csv = "reg_no,cost,archival_reason,country\nW 1,\"$10.00\",sold,Chile\n";
        let outcome = read_items(csv.as_bytes(), ItemKind::Wanted).unwrap();
        let bag = outcome.items[0].fields();
        assert_eq!(bag.cost, None);
        assert_eq!(bag.archival_reason, None);
        assert_eq!(bag.country, Some("Chile"));

        let outcome = read_items(csv.as_bytes(), ItemKind::Archived).unwrap();
        let bag = outcome.items[0].fields();
        assert_eq!(bag.cost, Some(1000));
        assert_eq!(bag.archival_reason, Some("sold"));
    }

    #[test]
    fn archived_export_has_disposition_columns() {
        let mut item = Item::new(ItemKind::Archived, "OLD 1");
        set_field(&mut item, "archival_date", "2023-02-01").unwrap();
        set_field(&mut item, "price", "2500").unwrap();
        set_field(&mut item, "recipient_country", "Norway").unwrap();

        let csv = export(&[item], &PlatedexConfig::default());
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("2023-02-01"));
        assert!(row.contains("25.00"));
        assert!(row.contains("Norway"));
    }

    #[test]
    fn parse_digits_is_lossy() {
        assert_eq!(parse_digits("€1 500,00"), Some(150000));
        assert_eq!(parse_digits("-12"), Some(12));
        assert_eq!(parse_digits("n/a"), None);
    }
}
