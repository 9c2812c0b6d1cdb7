use thiserror::Error;

use crate::renderer::RenderedDocument;

/// Per-call failure taxonomy for the ticket system's REST surface.
///
/// `Network` means no response was obtained (connect/timeout); `Remote` means
/// the system answered with a non-success status, carried verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote error (HTTP {status}): {body}")]
    Remote { status: u16, body: String },
}

/// Everything needed to attach a rendered document to a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    pub ticket_id: u64,
    pub subject: String,
    pub body: String,
    pub filename: String,
    /// Document bytes in their portable base64 encoding.
    pub data_base64: String,
}

impl AttachmentUpload {
    /// Build the standard archive upload for a ticket.
    pub fn for_ticket(ticket_id: u64, number: &str, document: &RenderedDocument) -> Self {
        Self {
            ticket_id,
            subject: format!("Document for ticket #{}", number),
            body: "Automatically generated archive document for this ticket.".to_string(),
            filename: format!("ticket_{}.pdf", number),
            data_base64: document.base64.clone(),
        }
    }
}
