//! Row mapping for sqlframe
//!
//! A row mapping is the ordered column → value association used as the
//! payload of both INSERT and UPDATE statements. Iteration follows
//! insertion order, which fixes the column order of the rendered SQL.

use crate::value::Value;

/// Ordered mapping from column name to field value
///
/// Inserting a column that is already present replaces its value but keeps
/// the column at its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowMapping {
    entries: Vec<(String, Value)>,
}

impl RowMapping {
    pub fn new() -> Self {
        RowMapping {
            entries: Vec::new(),
        }
    }

    /// Set a column's value, returning the value it replaced
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((column, value));
                None
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (column, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for RowMapping
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = RowMapping::new();
        for (column, value) in iter {
            mapping.insert(column, value);
        }
        mapping
    }
}
