//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::notifier::{MailError, Notifier};

/// A recorded mail send for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSend {
    pub filename: String,
    pub document_len: usize,
}

/// Mock implementation of the [`Notifier`] trait.
pub struct MockNotifier {
    sends: Arc<RwLock<Vec<RecordedSend>>>,
    next_error: Arc<RwLock<Option<String>>>,
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sends: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Get recorded sends.
    pub async fn recorded_sends(&self) -> Vec<RecordedSend> {
        self.sends.read().await.clone()
    }

    /// Make the next send fail with a transport error.
    pub async fn set_next_error(&self, message: &str) {
        *self.next_error.write().await = Some(message.to_string());
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_with_attachment(
        &self,
        document: &[u8],
        filename: &str,
    ) -> Result<(), MailError> {
        if let Some(message) = self.next_error.write().await.take() {
            return Err(MailError::Transport(message));
        }
        self.sends.write().await.push(RecordedSend {
            filename: filename.to_string(),
            document_len: document.len(),
        });
        Ok(())
    }
}
