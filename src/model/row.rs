//! A single record in a table

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Value;

/// One record: a mapping from field name to value.
///
/// Field names are unique within a row; no schema is enforced, so different
/// rows from the same table may carry different field sets. Iteration order
/// is insertion order, which keeps downstream output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    fields: IndexMap<String, Value>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field's value by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a field, replacing any existing value under the same name
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Remove a field, returning its value if it was present
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    /// Check whether a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the row has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over field names in insertion order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Row
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut row = Row::new();
        row.set("name", "ada");
        row.set("age", 36i64);
        assert_eq!(row.get("name"), Some(&Value::from("ada")));
        assert_eq!(row.get("age"), Some(&Value::Int(36)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut row = Row::from([("k", "old")]);
        row.set("k", "new");
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("k"), Some(&Value::from("new")));
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let row = Row::from([("b", 1i64), ("a", 2i64), ("c", 3i64)]);
        let names: Vec<&str> = row.field_names().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_equality_ignores_field_order() {
        let left = Row::from([("a", 1i64), ("b", 2i64)]);
        let right = Row::from([("b", 2i64), ("a", 1i64)]);
        // IndexMap equality compares contents, not order.
        assert_eq!(left, right);
    }
}
