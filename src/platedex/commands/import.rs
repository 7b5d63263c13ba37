use super::helpers::{index_map, indexed_items};
use super::{CmdMessage, CmdResult, DisplayItem};
use crate::error::Result;
use crate::interchange;
use crate::model::ItemKind;
use crate::store::DataStore;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Imports a CSV file as new items of `kind`.
///
/// The whole file is parsed before anything is saved: a read error or an
/// empty file leaves the store untouched.
pub fn run<S: DataStore>(store: &mut S, kind: ItemKind, path: &Path) -> Result<CmdResult> {
    let file = File::open(path)?;
    let outcome = interchange::read_items(BufReader::new(file), kind)?;

    store.save_items(&outcome.items)?;

    let mut result = CmdResult::default();
    for line in &outcome.skipped_lines {
        result.add_message(CmdMessage::warning(format!(
            "Line {}: no reg_no, row skipped",
            line
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Imported {} {} item(s) from {}",
        outcome.items.len(),
        kind,
        path.display()
    )));

    let indexes = index_map(&indexed_items(store, kind)?);
    let affected = outcome
        .items
        .into_iter()
        .map(|item| DisplayItem {
            index: indexes.get(&item.id()).copied().unwrap_or_default(),
            item,
        })
        .collect();
    Ok(result.with_affected_items(affected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatedexError;
    use crate::store::memory::InMemoryStore;
    use std::fs;

    #[test]
    fn imports_rows_and_warns_on_skips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "reg_no,country\nA 1,Finland\n,Nowhere\nB 2,Sweden\n").unwrap();

        let mut store = InMemoryStore::new();
        let result = run(&mut store, ItemKind::Wanted, &path).unwrap();

        assert_eq!(store.list_items(ItemKind::Wanted).unwrap().len(), 2);
        assert_eq!(result.affected_items.len(), 2);
        assert!(result.messages[0].content.contains("Line 3"));
    }

    #[test]
    fn missing_file_applies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InMemoryStore::new();

        let err = run(&mut store, ItemKind::Owned, &dir.path().join("nope.csv"));
        assert!(matches!(err, Err(PlatedexError::Io(_))));
        assert!(store.list_items(ItemKind::Owned).unwrap().is_empty());
    }

    #[test]
    fn empty_file_is_distinct_from_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "reg_no,country\n").unwrap();

        let mut store = InMemoryStore::new();
        let err = run(&mut store, ItemKind::Owned, &path);
        assert!(matches!(err, Err(PlatedexError::ImportEmpty)));
    }

    #[test]
    fn malformed_utf8_aborts_whole_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        let mut bytes = b"reg_no,country\nA 1,Finland\nB 2,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        fs::write(&path, bytes).unwrap();

        let mut store = InMemoryStore::new();
        let err = run(&mut store, ItemKind::Owned, &path);
        assert!(matches!(err, Err(PlatedexError::Csv(_))));
        assert!(store.list_items(ItemKind::Owned).unwrap().is_empty());
    }
}
