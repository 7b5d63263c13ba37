use super::helpers::indexed_items;
use super::{CmdMessage, CmdResult};
use crate::config::PlatedexConfig;
use crate::error::{PlatedexError, Result};
use crate::interchange;
use crate::model::{Item, ItemKind};
use crate::store::DataStore;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Exports every item of `kind` in display-index order.
///
/// With `output`, the CSV goes to that file; otherwise it is returned in
/// [`CmdResult::output`].
pub fn run<S: DataStore>(
    store: &S,
    kind: ItemKind,
    config: &PlatedexConfig,
    output: Option<&Path>,
) -> Result<CmdResult> {
    let items: Vec<Item> = indexed_items(store, kind)?
        .into_iter()
        .map(|d| d.item)
        .collect();

    match output {
        Some(path) => {
            let file = File::create(path)?;
            interchange::write_items(BufWriter::new(file), &items, config)?;
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!(
                "Exported {} {} item(s) to {}",
                items.len(),
                kind,
                path.display()
            )));
            Ok(result)
        }
        None => {
            let mut buf = Vec::new();
            interchange::write_items(&mut buf, &items, config)?;
            let text = String::from_utf8(buf)
                .map_err(|e| PlatedexError::Api(format!("Export produced invalid UTF-8: {}", e)))?;
            Ok(CmdResult::default().with_output(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn exports_kind_in_index_order() {
        let fixture = StoreFixture::new()
            .with_item(ItemKind::Owned, "B 2", &[("cost", "150000")])
            .with_item(ItemKind::Owned, "A 1", &[])
            .with_item(ItemKind::Wanted, "W 1", &[]);

        let result = run(&fixture.store, ItemKind::Owned, &PlatedexConfig::default(), None).unwrap();
        let text = result.output.unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("A 1,"));
        assert!(lines[2].starts_with("B 2,"));
        assert!(lines[2].contains("\"1,500.00\""));
    }

    #[test]
    fn writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owned.csv");
        let fixture = StoreFixture::new().with_item(ItemKind::Owned, "A 1", &[]);

        let result = run(
            &fixture.store,
            ItemKind::Owned,
            &PlatedexConfig::default(),
            Some(&path),
        )
        .unwrap();

        assert!(result.output.is_none());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("reg_no,"));
        assert!(text.contains("A 1"));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let fixture = StoreFixture::new();

        let err = run(
            &fixture.store,
            ItemKind::Owned,
            &PlatedexConfig::default(),
            Some(&path),
        );
        assert!(matches!(err, Err(PlatedexError::Io(_))));
    }
}
