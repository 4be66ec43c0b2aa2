//! Seeded random-search driver with chronological history and best tracking.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ol_types::{domain_snapshot, Dimension, DomainSnapshot, Point, SearchError, VariableId};

use crate::objective::ObjectiveSpec;
use crate::sampler::{sample, SampleMethod};

/// Default cap on caller-supplied seed points.
pub const DEFAULT_MAX_SEED_POINTS: usize = 100;

/// Knobs for one search invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of fresh points to sample after the seed points.
    pub n_iter: usize,
    /// Sampling method for the fresh points.
    pub method: SampleMethod,
    pub seed: Option<u64>,
    /// Cap on retained seed points; extras beyond the prefix are dropped.
    pub max_seed_points: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            n_iter: 30,
            method: SampleMethod::UniformRandom,
            seed: None,
            max_seed_points: DEFAULT_MAX_SEED_POINTS,
        }
    }
}

/// Metadata attached to a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMeta {
    pub objective: ObjectiveSpec,
    pub domain: DomainSnapshot,
    pub variable_order: Vec<VariableId>,
    pub seed_points_used: usize,
    pub max_seed_points: usize,
    pub sampled_points: usize,
}

/// Outcome of a search run.
///
/// `history` is chronological: retained seed points in caller order, then
/// sampled points in generation order. `best_point`/`best_score` are the
/// maximum over the whole history; ties keep the earliest point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub best_point: Point,
    pub best_score: f64,
    pub history: Vec<Point>,
    pub meta: SearchMeta,
}

/// Run a seeded random search over validated dimensions.
///
/// Seed points are truncated to the first `max_seed_points`, then each
/// retained point is checked for membership and range (points outer,
/// dimensions inner, dimensions in request order); the first violation
/// aborts the run. Sampling starts only after all validation passed, so a
/// failed run returns no partial history.
///
/// With an empty history (`n_iter == 0` and no seed points) the result
/// carries an empty best point and a `-inf` score.
pub fn run_search(
    dimensions: &[Dimension],
    objective: &ObjectiveSpec,
    seed_points: &[Point],
    config: &SearchConfig,
) -> Result<SearchResult, SearchError> {
    let active: HashSet<VariableId> = dimensions.iter().map(|d| d.id).collect();
    objective.validate(&active)?;

    let retained = &seed_points[..seed_points.len().min(config.max_seed_points)];
    for (index, point) in retained.iter().enumerate() {
        for dim in dimensions {
            let value = point
                .get(dim.id)
                .ok_or(SearchError::SeedPointMissingKey {
                    index,
                    variable_id: dim.id,
                })?;
            if !dim.contains(value) {
                return Err(SearchError::OutOfDomainSeedPoint {
                    index,
                    variable_id: dim.id,
                    value,
                    lower: dim.lower,
                    upper: dim.upper,
                });
            }
        }
    }

    let sampled = sample(dimensions, config.n_iter, config.method, config.seed)?;
    let sampled_count = sampled.len();

    let mut history = Vec::with_capacity(retained.len() + sampled_count);
    let mut best_point = Point::new();
    let mut best_score = f64::NEG_INFINITY;
    for point in retained.iter().cloned().chain(sampled) {
        let score = objective.score(&point)?;
        if score > best_score {
            best_score = score;
            best_point = point.clone();
        }
        history.push(point);
    }

    debug!(
        seed_points = retained.len(),
        sampled = sampled_count,
        best_score,
        "search run complete"
    );

    Ok(SearchResult {
        best_point,
        best_score,
        history,
        meta: SearchMeta {
            objective: objective.clone(),
            domain: domain_snapshot(dimensions),
            variable_order: dimensions.iter().map(|d| d.id).collect(),
            seed_points_used: retained.len(),
            max_seed_points: config.max_seed_points,
            sampled_points: sampled_count,
        },
    })
}
