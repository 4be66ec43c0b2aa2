use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique experiment-run identifier.
pub type RunId = Uuid;

/// The kind of experiment a stored run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunType {
    Doe,
    Optimize,
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doe => write!(f, "doe"),
            Self::Optimize => write!(f, "optimize"),
        }
    }
}

/// A persisted experiment run: opaque request/response payload snapshots.
///
/// The experiment core never reads these back; they exist so callers can keep
/// a browsable history of what was asked and what came out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: RunId,
    pub run_type: RunType,
    pub title: Option<String>,
    pub request_json: serde_json::Value,
    pub response_json: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a run; id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRun {
    pub run_type: RunType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub request_json: serde_json::Value,
    #[serde(default)]
    pub response_json: serde_json::Value,
}

/// One page of run records, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunPage {
    pub items: Vec<RunRecord>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}
