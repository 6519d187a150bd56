use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use loanflow::workflows::wizard::{FormSnapshot, SnapshotError, SnapshotStore};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) asset_root: Arc<PathBuf>,
}

/// Keyed JSON store standing in for the browser's local storage: snapshots
/// are held as serialized strings so every save/load really round-trips.
#[derive(Default, Clone)]
pub(crate) struct InMemorySnapshotStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&self, key: &str, snapshot: &FormSnapshot) -> Result<(), SnapshotError> {
        let json = serde_json::to_string(snapshot)?;
        let mut guard = self.entries.lock().map_err(|_| poisoned())?;
        guard.insert(key.to_owned(), json);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<FormSnapshot>, SnapshotError> {
        let guard = self.entries.lock().map_err(|_| poisoned())?;
        guard
            .get(key)
            .map(|json| serde_json::from_str(json).map_err(SnapshotError::from))
            .transpose()
    }

    fn clear(&self, key: &str) -> Result<(), SnapshotError> {
        let mut guard = self.entries.lock().map_err(|_| poisoned())?;
        guard.remove(key);
        Ok(())
    }
}

fn poisoned() -> SnapshotError {
    SnapshotError::Unavailable("snapshot store mutex poisoned".to_string())
}
