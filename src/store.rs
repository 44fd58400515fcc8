//! Append-only record store.

use crate::table::TableRow;

/// Full, unfiltered list of records behind a grid.
///
/// Records are never mutated in place; new records are appended.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: TableRow> RecordStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Appends a record and returns its id.
    pub fn append(&mut self, record: T) -> u64 {
        let id = record.id();
        self.records.push(record);
        id
    }

    /// Largest id in the store.
    pub fn max_id(&self) -> Option<u64> {
        self.records.iter().map(TableRow::id).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_rows::row;

    #[test]
    fn append_grows_store() {
        let mut store = RecordStore::new(vec![row(1, "a", "-")]);
        assert_eq!(store.append(row(7, "b", "1k")), 7);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(7).map(|r| r.name.as_str()), Some("b"));
        assert_eq!(store.max_id(), Some(7));
    }

    #[test]
    fn empty_store() {
        let store: RecordStore<crate::table::test_rows::Row> = RecordStore::default();
        assert!(store.is_empty());
        assert_eq!(store.max_id(), None);
        assert!(store.get(0).is_none());
    }
}
