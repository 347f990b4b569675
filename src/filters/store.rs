use super::types::LeadColumn;

/// Current per-column filter values for the lead list
///
/// Insertion-ordered: `to_query_params` emits entries in the order filters
/// were first applied. The server treats the parameters as an unordered set,
/// so the order is cosmetic, but keeping it stable makes requests
/// reproducible in logs.
///
/// An absent column means "no filter". Setting a column to the empty string
/// removes it; an empty value is never sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStore {
    entries: Vec<(LeadColumn, String)>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current filter value for a column, if one is applied
    pub fn get(&self, column: LeadColumn) -> Option<&str> {
        self.entries
            .iter()
            .find(|(col, _)| *col == column)
            .map(|(_, value)| value.as_str())
    }

    /// Apply a filter to a column
    ///
    /// An empty value clears the column. Overwriting keeps the column's
    /// original insertion position. Arbitrary text is accepted as-is.
    pub fn set(&mut self, column: LeadColumn, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.clear(column);
            return;
        }
        match self.entries.iter_mut().find(|(col, _)| *col == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Remove a column's filter
    pub fn clear(&mut self, column: LeadColumn) {
        self.entries.retain(|(col, _)| *col != column);
    }

    /// Remove every filter
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Encode the active filters as query parameters
    ///
    /// One `(key, value)` pair per entry, insertion order, keys exactly the
    /// recognized column identifiers. Pure transform; no I/O.
    pub fn to_query_params(&self) -> Vec<(&'static str, &str)> {
        self.entries
            .iter()
            .map(|(col, value)| (col.as_str(), value.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry_emits_exactly_one_pair() {
        let mut filters = FilterStore::new();
        filters.set(LeadColumn::Status, "New");

        assert_eq!(filters.to_query_params(), vec![("status", "New")]);
    }

    #[test]
    fn test_empty_value_removes_entry() {
        let mut filters = FilterStore::new();
        filters.set(LeadColumn::Source, "Referral");
        filters.set(LeadColumn::Source, "");

        assert_eq!(filters.get(LeadColumn::Source), None);
        assert!(filters.is_empty());
    }

    #[test]
    fn test_empty_store_emits_zero_params() {
        let filters = FilterStore::new();
        assert!(filters.to_query_params().is_empty());
    }

    #[test]
    fn test_overwrite_keeps_insertion_position() {
        let mut filters = FilterStore::new();
        filters.set(LeadColumn::LeadName, "Acme");
        filters.set(LeadColumn::Status, "New");
        filters.set(LeadColumn::LeadName, "Apex");

        assert_eq!(
            filters.to_query_params(),
            vec![("lead_name", "Apex"), ("status", "New")]
        );
    }

    #[test]
    fn test_set_leaves_other_columns_untouched() {
        let mut filters = FilterStore::new();
        filters.set(LeadColumn::Status, "New");
        filters.set(LeadColumn::Salesperson, "Dana");
        filters.clear(LeadColumn::Status);

        assert_eq!(filters.get(LeadColumn::Salesperson), Some("Dana"));
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_arbitrary_text_accepted() {
        let mut filters = FilterStore::new();
        filters.set(LeadColumn::ContactInformation, "jo@ex.com; +1 555 / note");

        assert_eq!(
            filters.get(LeadColumn::ContactInformation),
            Some("jo@ex.com; +1 555 / note")
        );
    }
}
