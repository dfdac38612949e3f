use crate::domain::model::{Notification, RecordId, UploadReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn templates_dir(&self) -> Option<PathBuf>;
    fn output_path(&self) -> &str;
}

/// REST collaborator holding the entity collections.
///
/// Implementations must classify failures as `ServerError` (a response with
/// an error status arrived), `ConnectivityError` (no response) or
/// `RequestError` (the request could not be built or sent).
#[async_trait]
pub trait EntityBackend: Send + Sync {
    async fn list(&self, collection: &str) -> Result<Vec<serde_json::Value>>;
    async fn delete(&self, collection: &str, id: &RecordId) -> Result<()>;
    async fn upload(&self, table: &str, file_name: &str, content: Vec<u8>)
        -> Result<UploadReceipt>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
