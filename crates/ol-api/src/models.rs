//! Boundary payloads for the experiment endpoints.

use serde::{Deserialize, Serialize};

use ol_experiments::{ObjectiveSpec, SampleMethod};
use ol_types::{DomainSnapshot, Point, VariableId};

/// Hard cap on requested points/iterations per call, keeping latency bounded.
pub const MAX_REQUEST_POINTS: usize = 5000;

pub(crate) fn default_n_points() -> usize {
    20
}

pub(crate) fn default_n_iter() -> usize {
    30
}

pub(crate) fn default_max_initial_points() -> usize {
    100
}

/// Sampling methods exposed by the DOE endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DoeMethod {
    #[default]
    Sobol,
    Lhs,
}

impl From<DoeMethod> for SampleMethod {
    fn from(method: DoeMethod) -> Self {
        match method {
            DoeMethod::Sobol => SampleMethod::Sobol,
            DoeMethod::Lhs => SampleMethod::Lhs,
        }
    }
}

/// The optimize endpoint only exposes seeded random search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OptimizeMethod {
    #[default]
    Random,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoeRequest {
    pub variable_ids: Vec<VariableId>,
    #[serde(default = "default_n_points")]
    pub n_points: usize,
    #[serde(default)]
    pub method: DoeMethod,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoeMeta {
    pub variable_order: Vec<VariableId>,
    pub domain: DomainSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoeResponse {
    pub method: DoeMethod,
    pub n_points: usize,
    pub variable_ids: Vec<VariableId>,
    pub points: Vec<Point>,
    pub meta: DoeMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub variable_ids: Vec<VariableId>,
    #[serde(default = "default_n_iter")]
    pub n_iter: usize,
    #[serde(default)]
    pub method: OptimizeMethod,
    #[serde(default)]
    pub seed: Option<u64>,
    pub objective: ObjectiveSpec,
    #[serde(default)]
    pub initial_points: Vec<Point>,
    #[serde(default = "default_max_initial_points")]
    pub max_initial_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeMeta {
    pub objective: ObjectiveSpec,
    pub best_score: f64,
    pub initial_points_used: usize,
    pub max_initial_points: usize,
    pub variable_order: Vec<VariableId>,
    pub domain: DomainSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub method: OptimizeMethod,
    pub n_iter: usize,
    pub variable_ids: Vec<VariableId>,
    pub best_point: Point,
    pub history: Vec<Point>,
    pub meta: OptimizeMeta,
}
