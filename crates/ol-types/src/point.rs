use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::variable::VariableId;

/// A candidate experiment point: variable id mapped to a value.
///
/// The variable set is request-defined, so a point is an explicit ordered
/// mapping rather than a fixed record. JSON form is an object keyed by
/// stringified variable ids, e.g. `{"1": 0.25, "2": -3.0}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point {
    values: BTreeMap<VariableId, f64>,
}

impl Point {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: VariableId, value: f64) {
        self.values.insert(id, value);
    }

    pub fn get(&self, id: VariableId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    pub fn contains(&self, id: VariableId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, f64)> + '_ {
        self.values.iter().map(|(id, v)| (*id, *v))
    }
}

impl FromIterator<(VariableId, f64)> for Point {
    fn from_iter<T: IntoIterator<Item = (VariableId, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<VariableId, f64>> for Point {
    fn from(values: BTreeMap<VariableId, f64>) -> Self {
        Self { values }
    }
}
