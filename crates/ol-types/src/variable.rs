use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier for a variable, assigned by the variable store.
///
/// Serialized as a bare integer; when used as a JSON object key (points,
/// domain snapshots) it appears as the stringified integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VariableId(pub i64);

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VariableId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A variable as resolved from the variable store.
///
/// Bounds are optional here: the store can hold variables that have not been
/// given a domain yet. Requests that include such variables are rejected by
/// the domain validator before any sampling happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRecord {
    pub id: VariableId,
    pub name: String,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub unit: Option<String>,
}

/// A fully-bounded dimension of a search domain.
///
/// Produced by the domain validator; invariant `lower <= upper`, both finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: VariableId,
    pub lower: f64,
    pub upper: f64,
    pub unit: Option<String>,
}

impl Dimension {
    pub fn new(id: VariableId, lower: f64, upper: f64) -> Self {
        Self {
            id,
            lower,
            upper,
            unit: None,
        }
    }

    /// Closed-interval membership check.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Affine map from the unit interval into this dimension's domain.
    ///
    /// For a zero-width domain every `u` maps to `lower`.
    pub fn from_unit(&self, u: f64) -> f64 {
        self.lower + (self.upper - self.lower) * u
    }
}

/// Per-variable domain description attached to response metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEntry {
    pub min: f64,
    pub max: f64,
    pub unit: Option<String>,
}

/// Snapshot of a resolved domain, keyed by variable id.
pub type DomainSnapshot = BTreeMap<VariableId, DomainEntry>;

/// Build the metadata snapshot for a validated dimension list.
pub fn domain_snapshot(dimensions: &[Dimension]) -> DomainSnapshot {
    dimensions
        .iter()
        .map(|d| {
            (
                d.id,
                DomainEntry {
                    min: d.lower,
                    max: d.upper,
                    unit: d.unit.clone(),
                },
            )
        })
        .collect()
}
