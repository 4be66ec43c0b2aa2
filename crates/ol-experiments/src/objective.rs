//! Objective specifications and deterministic point scoring.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use ol_types::{ObjectiveError, Point, VariableId};

fn default_weight() -> f64 {
    1.0
}

/// A weighted term of a linear objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearTerm {
    pub variable_id: VariableId,
    pub weight: f64,
}

/// Loss shape for the `target` objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetLoss {
    Abs,
    Squared,
}

/// What a search run optimizes.
///
/// "Best" always means maximal score; minimization is expressed through
/// sign-flipped variants. One variant per kind, carrying only its own fields;
/// a payload missing a required field fails at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectiveSpec {
    /// score = weight * x
    MaximizeVariable {
        variable_id: VariableId,
        #[serde(default = "default_weight")]
        weight: f64,
    },
    /// score = -weight * x
    MinimizeVariable {
        variable_id: VariableId,
        #[serde(default = "default_weight")]
        weight: f64,
    },
    /// score = Σ weight_i * x_i
    Linear { terms: Vec<LinearTerm> },
    /// score = -|x - target| (abs) or -(x - target)² (squared)
    Target {
        variable_id: VariableId,
        target: f64,
        loss: TargetLoss,
    },
}

impl ObjectiveSpec {
    /// Variable ids this objective reads.
    pub fn referenced_ids(&self) -> Vec<VariableId> {
        match self {
            Self::MaximizeVariable { variable_id, .. }
            | Self::MinimizeVariable { variable_id, .. }
            | Self::Target { variable_id, .. } => vec![*variable_id],
            Self::Linear { terms } => terms.iter().map(|t| t.variable_id).collect(),
        }
    }

    /// Reject specs that are structurally invalid or reference variables
    /// outside the active set. Runs before any sampling.
    pub fn validate(&self, active: &HashSet<VariableId>) -> Result<(), ObjectiveError> {
        if let Self::Linear { terms } = self {
            if terms.is_empty() {
                return Err(ObjectiveError::InvalidSpec {
                    reason: "linear objective requires at least one term".to_string(),
                });
            }
        }
        for id in self.referenced_ids() {
            if !active.contains(&id) {
                return Err(ObjectiveError::VariableNotInSet { variable_id: id });
            }
        }
        Ok(())
    }

    /// Score a point. Deterministic, no hidden state; fails only when the
    /// point lacks a value the objective references.
    pub fn score(&self, point: &Point) -> Result<f64, ObjectiveError> {
        let value = |id: VariableId| {
            point
                .get(id)
                .ok_or(ObjectiveError::MissingKey { variable_id: id })
        };

        match self {
            Self::MaximizeVariable {
                variable_id,
                weight,
            } => Ok(weight * value(*variable_id)?),
            Self::MinimizeVariable {
                variable_id,
                weight,
            } => Ok(-weight * value(*variable_id)?),
            Self::Linear { terms } => {
                if terms.is_empty() {
                    return Err(ObjectiveError::InvalidSpec {
                        reason: "linear objective requires at least one term".to_string(),
                    });
                }
                let mut score = 0.0;
                for term in terms {
                    score += term.weight * value(term.variable_id)?;
                }
                Ok(score)
            }
            Self::Target {
                variable_id,
                target,
                loss,
            } => {
                let x = value(*variable_id)?;
                Ok(match loss {
                    TargetLoss::Abs => -(x - target).abs(),
                    TargetLoss::Squared => -(x - target).powi(2),
                })
            }
        }
    }
}
