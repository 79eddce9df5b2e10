use crate::{
    model::{CREATED_AT_COLUMN, ID_COLUMN, OWNER_COLUMN},
    types::{Id, Timestamp},
    value::Value,
};
use std::collections::BTreeMap;

///
/// Row
///
/// One stored record: column name to value, including the engine-owned
/// reserved columns.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row(BTreeMap<&'static str, Value>);

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn set(&mut self, column: &'static str, value: Value) {
        self.0.insert(column, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Reserved-column accessor: unique identifier.
    #[must_use]
    pub fn id(&self) -> Option<Id> {
        match self.get(ID_COLUMN) {
            Some(Value::Id(id)) => Some(*id),
            _ => None,
        }
    }

    /// Reserved-column accessor: owner identity.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        match self.get(OWNER_COLUMN) {
            Some(Value::Text(owner)) => Some(owner),
            _ => None,
        }
    }

    /// Reserved-column accessor: creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> Option<Timestamp> {
        match self.get(CREATED_AT_COLUMN) {
            Some(Value::Timestamp(ts)) => Some(*ts),
            _ => None,
        }
    }
}

impl FromIterator<(&'static str, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (&'static str, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
