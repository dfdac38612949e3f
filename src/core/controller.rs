use crate::core::grid::Grid;
use crate::core::notifications;
use crate::core::outcome::{Outcome, UploadFailure};
use crate::domain::model::{
    ListState, PendingUpload, Record, RecordId, TemplateDownload, UploadState,
};
use crate::domain::ports::{EntityBackend, Notifier, Storage};
use crate::domain::schema::{EntityKind, EntitySpec};
use crate::utils::error::{AdminError, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct TableState {
    records: Vec<Record>,
    list_state: ListState,
    pending: Option<PendingUpload>,
    upload_state: UploadState,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            list_state: ListState::Idle,
            pending: None,
            upload_state: UploadState::NoFile,
        }
    }
}

/// Keeps the working list of one entity type in sync with its backend
/// collection.
///
/// Operations take `&self`: the list and upload tracks are independent and
/// may run concurrently. State is only locked between suspension points, so
/// overlapping requests are not serialized; a later `load()` always
/// overwrites the list with what the backend holds.
pub struct EntityTableController<B: EntityBackend, S: Storage, N: Notifier> {
    spec: &'static EntitySpec,
    backend: B,
    storage: S,
    notifier: N,
    state: Mutex<TableState>,
}

/// Turns a collection payload into records, requiring a unique `id` on each.
pub fn decode_records(values: Vec<serde_json::Value>) -> Result<Vec<Record>> {
    let mut seen = HashSet::with_capacity(values.len());
    let mut records = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let record: Record =
            serde_json::from_value(value).map_err(|e| AdminError::DecodeError {
                message: format!("record #{}: {}", index, e),
            })?;
        if !seen.insert(record.id.to_string()) {
            return Err(AdminError::DecodeError {
                message: format!("duplicate id {}", record.id),
            });
        }
        records.push(record);
    }

    Ok(records)
}

impl<B: EntityBackend, S: Storage, N: Notifier> EntityTableController<B, S, N> {
    pub fn new(kind: EntityKind, backend: B, storage: S, notifier: N) -> Self {
        Self {
            spec: kind.spec(),
            backend,
            storage,
            notifier,
            state: Mutex::new(TableState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, outcome: Outcome) -> Outcome {
        self.notifier.notify(notifications::render(self.spec, &outcome));
        outcome
    }

    pub fn spec(&self) -> &'static EntitySpec {
        self.spec
    }

    pub fn records(&self) -> Vec<Record> {
        self.state().records.clone()
    }

    pub fn len(&self) -> usize {
        self.state().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().records.is_empty()
    }

    pub fn list_state(&self) -> ListState {
        self.state().list_state
    }

    pub fn upload_state(&self) -> UploadState {
        self.state().upload_state
    }

    pub fn pending_file(&self) -> Option<PendingUpload> {
        self.state().pending.clone()
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.spec, &self.state().records)
    }

    /// First load when a view is opened.
    pub async fn mount(&self) -> Outcome {
        self.load().await
    }

    pub async fn load(&self) -> Outcome {
        let collection = self.spec.collection_path;
        self.state().list_state = ListState::Loading;
        tracing::debug!("Loading collection '{}'", collection);

        let result = match self.backend.list(collection).await {
            Ok(values) => decode_records(values),
            Err(e) => Err(e),
        };

        let outcome = {
            let mut state = self.state();
            match result {
                Ok(records) => {
                    let count = records.len();
                    state.records = records;
                    state.list_state = ListState::Loaded;
                    Outcome::Loaded { count }
                }
                Err(e) => {
                    tracing::error!("❌ Failed to load '{}': {}", collection, e);
                    state.list_state = ListState::LoadFailed;
                    Outcome::LoadFailed {
                        reason: e.to_string(),
                    }
                }
            }
        };

        self.emit(outcome)
    }

    /// `requested` is matched by value, so `RecordId::from("3")` finds a
    /// record the backend sent with id `"3"`.
    pub async fn delete_record(&self, requested: &RecordId) -> Outcome {
        let collection = self.spec.collection_path;

        let known = self
            .state()
            .records
            .iter()
            .find(|r| r.id.matches(requested))
            .map(|r| r.id.clone());
        let Some(id) = known else {
            let err = AdminError::UnknownRecord {
                id: requested.to_string(),
            };
            tracing::error!("❌ Refusing to delete from '{}': {}", collection, err);
            return self.emit(Outcome::DeleteFailed {
                id: requested.clone(),
                reason: err.to_string(),
            });
        };

        tracing::debug!("Deleting {}/{}", collection, id);
        let outcome = match self.backend.delete(collection, &id).await {
            Ok(()) => {
                let mut state = self.state();
                if let Some(position) = state.records.iter().position(|r| r.id == id) {
                    state.records.remove(position);
                }
                Outcome::Deleted { id }
            }
            Err(e) => {
                tracing::error!("❌ Failed to delete {}/{}: {}", collection, id, e);
                let reason = e.to_string();
                Outcome::DeleteFailed { id, reason }
            }
        };

        self.emit(outcome)
    }

    /// Replaces any previous selection. The file is not inspected.
    pub fn select_file(&self, path: impl Into<PathBuf>) -> Outcome {
        let pending = PendingUpload::from_path(path);
        let file_name = pending.file_name.clone();
        {
            let mut state = self.state();
            state.pending = Some(pending);
            state.upload_state = UploadState::FileSelected;
        }
        self.emit(Outcome::FileSelected { file_name })
    }

    /// Sends the selected file to the bulk-import endpoint and reloads the
    /// list once the backend accepts it.
    pub async fn upload_pending_file(&self) -> Outcome {
        let pending = self.state().pending.clone();
        let Some(pending) = pending else {
            tracing::warn!("Upload requested for '{}' without a file", self.spec.upload_table);
            return self.emit(Outcome::UploadSkipped);
        };

        self.state().upload_state = UploadState::Uploading;
        let table = self.spec.upload_table;
        tracing::debug!("Uploading '{}' to table '{}'", pending.file_name, table);

        let result = match self
            .storage
            .read_file(&pending.path.to_string_lossy())
            .await
        {
            Ok(content) => {
                self.backend
                    .upload(table, &pending.file_name, content)
                    .await
            }
            Err(e) => Err(AdminError::RequestError {
                message: e.to_string(),
            }),
        };

        match result {
            Ok(receipt) => {
                {
                    let mut state = self.state();
                    state.upload_state = UploadState::Succeeded;
                    if state.pending.as_ref() == Some(&pending) {
                        state.pending = None;
                    }
                }
                tracing::info!("📤 Uploaded '{}' to table '{}'", pending.file_name, table);
                let outcome = self.emit(Outcome::Uploaded {
                    message: receipt.message,
                });
                self.load().await;
                outcome
            }
            Err(e) => {
                tracing::error!("❌ Failed to upload '{}': {}", pending.file_name, e);
                self.state().upload_state = UploadState::Failed;
                self.emit(Outcome::UploadFailed(UploadFailure::from(&e)))
            }
        }
    }

    /// Static template asset of this entity; no request is made.
    pub fn download_template(&self) -> TemplateDownload {
        let template = self.spec.template();
        tracing::debug!("Template for '{}': {}", self.spec.upload_table, template.href);
        template
    }
}
