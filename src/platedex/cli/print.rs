use colored::Colorize;
use platedex::bounds::DataBounds;
use platedex::commands::{CmdMessage, CollectionSummary, DisplayItem, MessageLevel};
use platedex::config::{PlatedexConfig, CONFIG_KEYS};
use platedex::fields::{FieldBag, FieldKind, FieldValue, FIELDS};
use platedex::interchange::{format_measure, format_money, unit_for};
use platedex::model::ItemKind;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const REG_WIDTH: usize = 18;
const ORIGIN_WIDTH: usize = 32;
const AGE_WIDTH: usize = 11;
const LABEL_WIDTH: usize = 20;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_item_list(items: &[DisplayItem], kind: ItemKind) {
    if items.is_empty() {
        return;
    }

    let idx_width = items
        .iter()
        .map(|d| d.index.to_string().len())
        .max()
        .unwrap_or(1);

    for d in items {
        let bag = d.item.fields();
        let idx = format!("{:>width$}. ", d.index, width = idx_width);
        let reg = fit(bag.registration_number, REG_WIDTH);
        let origin = fit(&origin_label(&bag), ORIGIN_WIDTH);
        let age = fit(&age_label(&bag), AGE_WIDTH);
        let date = match kind {
            ItemKind::Owned => bag.acquisition_date,
            ItemKind::Archived => bag.archival_date,
            ItemKind::Wanted => None,
        }
        .unwrap_or("");

        println!(
            "{}{} {} {} {}",
            idx.yellow(),
            reg.bold(),
            origin,
            age,
            date.dimmed()
        );
    }
}

pub(super) fn print_full_items(items: &[DisplayItem], config: &PlatedexConfig) {
    for (i, d) in items.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} {} {}",
            format!("{}.", d.index).yellow(),
            d.item.registration_number().bold(),
            format!("({})", d.item.kind()).dimmed()
        );

        let bag = d.item.fields();
        for spec in FIELDS.iter().skip(1) {
            let Some(value) = bag.get(spec.name) else {
                continue;
            };
            let shown = match (value, spec.kind) {
                (FieldValue::Int(n), FieldKind::Money) => format_money(n, config),
                (FieldValue::Int(n), FieldKind::Measure) => {
                    format_measure(n, unit_for(spec.name), config)
                }
                (FieldValue::Int(n), _) => n.to_string(),
                (FieldValue::Flag(b), _) => (if b { "yes" } else { "no" }).to_string(),
                (FieldValue::Text(s), _) => s.to_string(),
            };
            println!("  {} {}", fit(spec.name, LABEL_WIDTH).dimmed(), shown);
        }
    }
}

pub(super) fn print_collections(collections: &[CollectionSummary]) {
    let name_width = collections
        .iter()
        .map(|s| s.collection.name.width())
        .max()
        .unwrap_or(0);
    for summary in collections {
        println!(
            "{} {}",
            fit(&summary.collection.name, name_width).bold(),
            format!("{} item(s)", summary.member_count).dimmed()
        );
    }
}

pub(super) fn print_bounds(bounds: &DataBounds, kind: ItemKind) {
    let row = |label: &str, min: String, max: String| {
        println!("{} {}..{}", fit(label, LABEL_WIDTH).dimmed(), min, max);
    };
    row("period", bounds.period.min.to_string(), bounds.period.max.to_string());
    row("year", bounds.year.min.to_string(), bounds.year.max.to_string());
    if kind != ItemKind::Wanted {
        row("cost", bounds.cost.min.to_string(), bounds.cost.max.to_string());
        row("value", bounds.value.min.to_string(), bounds.value.max.to_string());
        row("date", bounds.date.min.clone(), bounds.date.max.clone());
    }
    if kind == ItemKind::Archived {
        row(
            "archival_date",
            bounds.archival_date.min.clone(),
            bounds.archival_date.max.clone(),
        );
    }
}

pub(super) fn print_config(config: &PlatedexConfig) {
    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} {:?}", fit(key, LABEL_WIDTH).dimmed(), value);
    }
}

/// "Finland · Uusimaa · passenger", skipping what is missing.
fn origin_label(bag: &FieldBag) -> String {
    [bag.country, bag.region_1st, bag.plate_type]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ")
}

/// The year if known, else the period.
fn age_label(bag: &FieldBag) -> String {
    match (bag.year, bag.period_start, bag.period_end) {
        (Some(y), _, _) => y.to_string(),
        (None, Some(s), Some(e)) => format!("{}–{}", s, e),
        (None, Some(s), None) => format!("{}–", s),
        (None, None, Some(e)) => format!("–{}", e),
        (None, None, None) => String::new(),
    }
}

/// Truncates with an ellipsis or pads with spaces to exactly `width` columns.
fn fit(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;

    if s.width() > width {
        for c in s.chars() {
            let w = c.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        used += 1;
    } else {
        out.push_str(s);
        used = s.width();
    }

    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use platedex::fields::set_field;
    use platedex::model::Item;

    #[test]
    fn fit_pads_and_truncates_by_display_width() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("品川", 6), "品川  ");
        assert_eq!(fit("品川300", 6), "品川3…");
        assert_eq!(fit("品川品", 4), "品… ");
    }

    #[test]
    fn age_label_prefers_year() {
        let mut item = Item::new(ItemKind::Owned, "A");
        set_field(&mut item, "period_start", "1960").unwrap();
        assert_eq!(age_label(&item.fields()), "1960–");

        set_field(&mut item, "period_end", "1972").unwrap();
        assert_eq!(age_label(&item.fields()), "1960–1972");

        set_field(&mut item, "year", "1965").unwrap();
        assert_eq!(age_label(&item.fields()), "1965");
    }

    #[test]
    fn origin_label_skips_missing_parts() {
        let mut item = Item::new(ItemKind::Wanted, "A");
        set_field(&mut item, "country", "Finland").unwrap();
        set_field(&mut item, "type", "passenger").unwrap();
        assert_eq!(origin_label(&item.fields()), "Finland · passenger");
    }
}
