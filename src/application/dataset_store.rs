// Process-wide handle for the uploaded dataset
use crate::domain::dataset::Dataset;
use std::sync::{Arc, RwLock};

/// Owned handle to the single in-memory dataset slot. Clones share the slot,
/// and handlers receive the handle through application state rather than a
/// module global. Concurrent uploads race on the one replace with
/// last-write-wins semantics.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    slot: Arc<RwLock<Option<Dataset>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-assignment replace. Readers observe the previous dataset or the
    /// new one, never a partial mix.
    pub fn replace(&self, dataset: Dataset) {
        *self.slot.write().unwrap() = Some(dataset);
    }

    /// Clone of the currently held dataset, if any upload has succeeded.
    /// No request path reads it back yet; the panels render the bundled
    /// sample data instead.
    #[allow(dead_code)]
    pub fn snapshot(&self) -> Option<Dataset> {
        self.slot.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Column;

    fn dataset(values: Vec<f64>) -> Dataset {
        Dataset::new(vec![Column::number("x", values)]).unwrap()
    }

    #[test]
    fn test_starts_empty() {
        assert!(DatasetStore::new().snapshot().is_none());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let store = DatasetStore::new();
        let handle = store.clone();

        store.replace(dataset(vec![1.0, 2.0]));
        assert_eq!(handle.snapshot().unwrap().row_count(), 2);
    }

    #[test]
    fn test_last_write_wins() {
        let store = DatasetStore::new();
        store.replace(dataset(vec![1.0]));
        store.replace(dataset(vec![2.0, 3.0, 4.0]));

        assert_eq!(store.snapshot().unwrap().row_count(), 3);
    }
}
