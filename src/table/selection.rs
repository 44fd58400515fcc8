//! Set of row identifiers that survives sorting, filtering and paging.

use std::collections::BTreeSet;

use super::TableRow;

/// Selected (or expanded) row identifiers.
///
/// Membership is independent of which rows are currently visible: an id stays
/// in the set while its row is filtered out or on another page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<u64>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`. Returns true if the id is now in the set.
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Adds every id. Returns true if the set grew.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = u64>) -> bool {
        let before = self.ids.len();
        self.ids.extend(ids);
        self.ids.len() != before
    }

    /// Empties the set. Returns true if it was non-empty.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.ids.is_empty();
        self.ids.clear();
        had_any
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<u64> {
        self.ids.iter().copied().collect()
    }

    /// Selected records, in store order.
    pub fn selected_records<'a, T: TableRow>(&self, records: &'a [T]) -> Vec<&'a T> {
        records
            .iter()
            .filter(|r| self.ids.contains(&r.id()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_rows::row;

    #[test]
    fn toggle_flips_membership() {
        let mut sel = SelectionSet::new();
        assert!(sel.toggle(3));
        assert!(sel.is_selected(3));
        assert!(!sel.toggle(3));
        assert!(!sel.is_selected(3));
    }

    #[test]
    fn selected_records_follow_store_order() {
        let records = vec![row(5, "e", "-"), row(1, "a", "-"), row(9, "i", "-")];
        let mut sel = SelectionSet::new();
        sel.toggle(9);
        sel.toggle(5);
        // Ids not in the store are kept but not returned.
        sel.toggle(42);

        let names: Vec<&str> = sel
            .selected_records(&records)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["e", "i"]);
        assert_eq!(sel.ids(), vec![5, 9, 42]);
    }

    #[test]
    fn select_all_and_clear() {
        let mut sel = SelectionSet::new();
        assert!(sel.select_all([1, 2, 3]));
        assert!(!sel.select_all([2, 3]));
        assert_eq!(sel.len(), 3);
        assert!(sel.clear());
        assert!(sel.is_empty());
        assert!(!sel.clear());
    }
}
