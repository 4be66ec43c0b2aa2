//! Experiment-run persistence: create, list, get, soft-delete.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use ol_types::{NewRun, OlResult, RunId, RunPage, RunRecord, RunType, StoreError};

/// Persistence for experiment-run payloads.
///
/// The experiment core never reads this store; callers persist opaque
/// request/response blobs here to keep a browsable history.
#[async_trait]
pub trait RunStore: Send + Sync {
    async fn create(&self, new: NewRun) -> OlResult<RunRecord>;

    /// Newest-first page of active runs, optionally filtered by type.
    async fn list(
        &self,
        run_type: Option<RunType>,
        skip: usize,
        limit: usize,
    ) -> OlResult<RunPage>;

    async fn get(&self, id: RunId) -> OlResult<RunRecord>;

    /// Mark a run inactive. Fails with `RunNotFound` for absent or
    /// already-deleted runs.
    async fn soft_delete(&self, id: RunId) -> OlResult<()>;
}

/// In-memory run store; records are held in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRunStore {
    runs: RwLock<Vec<RunRecord>>,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RunStore for InMemoryRunStore {
    async fn create(&self, new: NewRun) -> OlResult<RunRecord> {
        let now = Utc::now();
        let record = RunRecord {
            id: Uuid::new_v4(),
            run_type: new.run_type,
            title: new.title,
            request_json: new.request_json,
            response_json: new.response_json,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.runs.write().push(record.clone());
        info!(id = %record.id, run_type = %record.run_type, "stored experiment run");
        Ok(record)
    }

    async fn list(
        &self,
        run_type: Option<RunType>,
        skip: usize,
        limit: usize,
    ) -> OlResult<RunPage> {
        let runs = self.runs.read();
        // Insertion order is chronological, so newest-first is a reverse scan.
        let filtered: Vec<&RunRecord> = runs
            .iter()
            .rev()
            .filter(|r| r.is_active && run_type.map_or(true, |t| r.run_type == t))
            .collect();

        let total = filtered.len();
        let items: Vec<RunRecord> = filtered
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();
        debug!(total, returned = items.len(), "listed runs");

        Ok(RunPage {
            items,
            total,
            skip,
            limit,
        })
    }

    async fn get(&self, id: RunId) -> OlResult<RunRecord> {
        let runs = self.runs.read();
        runs.iter()
            .find(|r| r.id == id && r.is_active)
            .cloned()
            .ok_or_else(|| StoreError::RunNotFound { id }.into())
    }

    async fn soft_delete(&self, id: RunId) -> OlResult<()> {
        let mut runs = self.runs.write();
        match runs.iter_mut().find(|r| r.id == id && r.is_active) {
            Some(record) => {
                record.is_active = false;
                record.updated_at = Utc::now();
                Ok(())
            }
            None => Err(StoreError::RunNotFound { id }.into()),
        }
    }
}
