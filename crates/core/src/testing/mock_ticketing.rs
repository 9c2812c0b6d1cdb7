//! Mock ticketing client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ticket::CorrespondenceEntry;
use crate::ticketing::{ApiError, AttachmentUpload, TicketingApi};

/// A recorded flag update for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFlagUpdate {
    pub ticket_id: u64,
    pub value: String,
}

/// Mock implementation of the [`TicketingApi`] trait.
///
/// Provides controllable behavior for testing:
/// - Serve configured correspondence entries by id
/// - Record flag updates and attachment uploads for assertions
/// - Inject failures per operation
pub struct MockTicketing {
    /// Entries served by `fetch_correspondence`, keyed by entry id.
    entries: Arc<RwLock<HashMap<u64, CorrespondenceEntry>>>,
    /// Recorded flag updates.
    flag_updates: Arc<RwLock<Vec<RecordedFlagUpdate>>>,
    /// Recorded attachment uploads.
    uploads: Arc<RwLock<Vec<AttachmentUpload>>>,
    /// If set, every fetch fails with this error.
    fetch_error: Arc<RwLock<Option<ApiError>>>,
    /// If set, the next flag update fails with this error.
    flag_error: Arc<RwLock<Option<ApiError>>>,
    /// If set, the next upload fails with this error.
    upload_error: Arc<RwLock<Option<ApiError>>>,
}

impl Default for MockTicketing {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTicketing {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            flag_updates: Arc::new(RwLock::new(Vec::new())),
            uploads: Arc::new(RwLock::new(Vec::new())),
            fetch_error: Arc::new(RwLock::new(None)),
            flag_error: Arc::new(RwLock::new(None)),
            upload_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Add an entry to be served by `fetch_correspondence`.
    pub async fn add_entry(&self, entry: CorrespondenceEntry) {
        self.entries.write().await.insert(entry.id, entry);
    }

    /// Get recorded flag updates.
    pub async fn recorded_flag_updates(&self) -> Vec<RecordedFlagUpdate> {
        self.flag_updates.read().await.clone()
    }

    /// Get recorded attachment uploads.
    pub async fn recorded_uploads(&self) -> Vec<AttachmentUpload> {
        self.uploads.read().await.clone()
    }

    /// Make every subsequent fetch fail with the given error.
    pub async fn set_fetch_error(&self, error: ApiError) {
        *self.fetch_error.write().await = Some(error);
    }

    /// Make the next flag update fail with the given error.
    pub async fn set_flag_error(&self, error: ApiError) {
        *self.flag_error.write().await = Some(error);
    }

    /// Make the next upload fail with the given error.
    pub async fn set_upload_error(&self, error: ApiError) {
        *self.upload_error.write().await = Some(error);
    }
}

#[async_trait]
impl TicketingApi for MockTicketing {
    async fn fetch_correspondence(&self, entry_id: u64) -> Result<CorrespondenceEntry, ApiError> {
        if let Some(err) = self.fetch_error.read().await.clone() {
            return Err(err);
        }
        self.entries
            .read()
            .await
            .get(&entry_id)
            .cloned()
            .ok_or_else(|| ApiError::Remote {
                status: 404,
                body: format!("no such article: {}", entry_id),
            })
    }

    async fn set_generation_flag(&self, ticket_id: u64, value: &str) -> Result<(), ApiError> {
        if let Some(err) = self.flag_error.write().await.take() {
            return Err(err);
        }
        self.flag_updates.write().await.push(RecordedFlagUpdate {
            ticket_id,
            value: value.to_string(),
        });
        Ok(())
    }

    async fn upload_attachment(&self, upload: AttachmentUpload) -> Result<(), ApiError> {
        if let Some(err) = self.upload_error.write().await.take() {
            return Err(err);
        }
        self.uploads.write().await.push(upload);
        Ok(())
    }
}
