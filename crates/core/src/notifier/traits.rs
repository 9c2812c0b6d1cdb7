use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail configuration error: {0}")]
    Config(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Outbound mail transport for rendered documents.
///
/// Sender, recipient list, subject and body are fixed by configuration; the
/// only per-call inputs are the document bytes and filename.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_with_attachment(&self, document: &[u8], filename: &str)
        -> Result<(), MailError>;
}
