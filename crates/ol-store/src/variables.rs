//! Variable resolution backed by an in-memory registry.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use ol_types::{OlResult, VariableId, VariableRecord};

/// Source of variable bound records for experiment requests.
#[async_trait]
pub trait VariableStore: Send + Sync {
    /// Resolve ids to active records. The returned order is unspecified
    /// (the domain validator re-orders by the request); unknown or inactive
    /// ids are simply absent from the result.
    async fn resolve(&self, ids: &[VariableId]) -> OlResult<Vec<VariableRecord>>;
}

#[derive(Debug, Clone)]
struct Entry {
    record: VariableRecord,
    is_active: bool,
}

/// In-memory variable registry with sequential id assignment.
#[derive(Debug, Default)]
pub struct InMemoryVariableStore {
    next_id: AtomicI64,
    entries: DashMap<VariableId, Entry>,
}

impl InMemoryVariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable and return its assigned record.
    pub fn add(
        &self,
        name: impl Into<String>,
        min_value: Option<f64>,
        max_value: Option<f64>,
        unit: Option<String>,
    ) -> VariableRecord {
        let id = VariableId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let record = VariableRecord {
            id,
            name: name.into(),
            min_value,
            max_value,
            unit,
        };
        self.entries.insert(
            id,
            Entry {
                record: record.clone(),
                is_active: true,
            },
        );
        debug!(%id, name = %record.name, "registered variable");
        record
    }

    /// Soft-delete a variable; resolution will no longer see it.
    /// Returns false if the id is unknown.
    pub fn deactivate(&self, id: VariableId) -> bool {
        match self.entries.get_mut(&id) {
            Some(mut entry) => {
                entry.is_active = false;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl VariableStore for InMemoryVariableStore {
    async fn resolve(&self, ids: &[VariableId]) -> OlResult<Vec<VariableRecord>> {
        let records: Vec<VariableRecord> = ids
            .iter()
            .filter_map(|id| {
                self.entries
                    .get(id)
                    .filter(|entry| entry.is_active)
                    .map(|entry| entry.record.clone())
            })
            .collect();
        debug!(requested = ids.len(), resolved = records.len(), "resolved variables");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolve_returns_only_known_active_records() {
        let store = InMemoryVariableStore::new();
        let a = store.add("temperature", Some(20.0), Some(90.0), Some("C".into()));
        let b = store.add("pressure", Some(0.5), Some(3.0), None);
        let c = store.add("flow", Some(0.0), Some(1.0), None);
        store.deactivate(c.id);

        let records = store
            .resolve(&[a.id, b.id, c.id, VariableId(999)])
            .await
            .unwrap();

        let ids: Vec<VariableId> = records.iter().map(|r| r.id).collect();
        assert!(ids.contains(&a.id));
        assert!(ids.contains(&b.id));
        assert!(!ids.contains(&c.id));
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let store = InMemoryVariableStore::new();
        let first = store.add("x", None, None, None);
        let second = store.add("y", None, None, None);
        assert_eq!(second.id.0, first.id.0 + 1);
    }

    #[test]
    fn deactivate_unknown_id_is_false() {
        let store = InMemoryVariableStore::new();
        assert!(!store.deactivate(VariableId(42)));
    }
}
