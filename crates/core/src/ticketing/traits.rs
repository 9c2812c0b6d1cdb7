use async_trait::async_trait;

use crate::ticket::CorrespondenceEntry;

use super::types::{ApiError, AttachmentUpload};

/// Typed surface over the originating ticket system's REST API.
///
/// Every operation is independently fallible and never raises past its
/// boundary; retry policy, if any, belongs to the caller.
#[async_trait]
pub trait TicketingApi: Send + Sync {
    /// Fetch a single correspondence entry by id.
    async fn fetch_correspondence(&self, entry_id: u64) -> Result<CorrespondenceEntry, ApiError>;

    /// Set the ticket's generation-request flag so the source system will
    /// not re-trigger generation.
    async fn set_generation_flag(&self, ticket_id: u64, value: &str) -> Result<(), ApiError>;

    /// Create a new correspondence entry on the ticket with the rendered
    /// document attached.
    async fn upload_attachment(&self, upload: AttachmentUpload) -> Result<(), ApiError>;
}
