//! REST implementation of the ticketing client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::TicketingConfig;
use crate::ticket::{ChannelType, CorrespondenceEntry};

use super::types::{ApiError, AttachmentUpload};
use super::TicketingApi;

/// Reqwest-backed client for the ticket system's REST surface.
///
/// Stateless apart from the connection configuration; a fixed per-call
/// timeout bounds every request and no retries are performed here.
pub struct RestTicketing {
    client: Client,
    config: TicketingConfig,
}

impl RestTicketing {
    pub fn new(config: TicketingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn auth_header(&self) -> String {
        format!("Token token={}", self.config.api_token)
    }

    /// Map non-success responses into `ApiError::Remote` with the body kept
    /// verbatim.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Remote {
            status: status.as_u16(),
            body,
        })
    }
}

fn request_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Network(format!("timeout: {}", e))
    } else if e.is_connect() {
        ApiError::Network(format!("connection failed: {}", e))
    } else {
        ApiError::Network(e.to_string())
    }
}

#[async_trait]
impl TicketingApi for RestTicketing {
    async fn fetch_correspondence(&self, entry_id: u64) -> Result<CorrespondenceEntry, ApiError> {
        debug!(entry_id = entry_id, "Fetching correspondence entry");

        let response = self
            .client
            .get(self.url(&format!("ticket_articles/{}", entry_id)))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(request_error)?;

        let response = Self::check_status(response).await?;
        let payload: ArticlePayload = response.json().await.map_err(|e| ApiError::Remote {
            status: 200,
            body: format!("unparseable response: {}", e),
        })?;

        Ok(payload.into_entry(entry_id))
    }

    async fn set_generation_flag(&self, ticket_id: u64, value: &str) -> Result<(), ApiError> {
        debug!(ticket_id = ticket_id, value = value, "Updating generation flag");

        let payload = FlagPayload {
            document_generation: value,
        };

        let response = self
            .client
            .put(self.url(&format!("tickets/{}", ticket_id)))
            .header("Authorization", self.auth_header())
            .json(&payload)
            .send()
            .await
            .map_err(request_error)?;

        Self::check_status(response).await.map(|_| ())
    }

    async fn upload_attachment(&self, upload: AttachmentUpload) -> Result<(), ApiError> {
        debug!(
            ticket_id = upload.ticket_id,
            filename = %upload.filename,
            "Uploading document attachment"
        );

        let payload = ArticleCreatePayload {
            ticket_id: upload.ticket_id,
            subject: &upload.subject,
            body: &upload.body,
            content_type: "text/plain",
            attachments: vec![AttachmentPayload {
                filename: &upload.filename,
                data: &upload.data_base64,
                mime_type: "application/pdf",
            }],
        };

        let response = self
            .client
            .post(self.url("ticket_articles"))
            .header("Authorization", self.auth_header())
            .json(&payload)
            .send()
            .await
            .map_err(request_error)?;

        Self::check_status(response).await.map(|_| ())
    }
}

// Wire types

#[derive(Debug, Deserialize)]
struct ArticlePayload {
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    type_id: u32,
}

impl ArticlePayload {
    fn into_entry(self, entry_id: u64) -> CorrespondenceEntry {
        CorrespondenceEntry {
            id: entry_id,
            created_at: self.created_at,
            sender: self.from.unwrap_or_default(),
            body: self.body,
            channel: ChannelType::from_code(self.type_id),
        }
    }
}

#[derive(Debug, Serialize)]
struct FlagPayload<'a> {
    document_generation: &'a str,
}

#[derive(Debug, Serialize)]
struct ArticleCreatePayload<'a> {
    ticket_id: u64,
    subject: &'a str,
    body: &'a str,
    content_type: &'a str,
    attachments: Vec<AttachmentPayload<'a>>,
}

#[derive(Debug, Serialize)]
struct AttachmentPayload<'a> {
    filename: &'a str,
    data: &'a str,
    #[serde(rename = "mime-type")]
    mime_type: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TicketingConfig {
        TicketingConfig {
            base_url: "http://localhost:3000/api/v1/".to_string(), // trailing slash
            api_token: "test-token".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_url_building() {
        let client = RestTicketing::new(test_config());
        assert_eq!(
            client.url("ticket_articles/7"),
            "http://localhost:3000/api/v1/ticket_articles/7"
        );
        assert_eq!(
            client.url("tickets/42"),
            "http://localhost:3000/api/v1/tickets/42"
        );
    }

    #[test]
    fn test_auth_header() {
        let client = RestTicketing::new(test_config());
        assert_eq!(client.auth_header(), "Token token=test-token");
    }

    #[test]
    fn test_article_create_payload_shape() {
        let payload = ArticleCreatePayload {
            ticket_id: 42,
            subject: "Document for ticket #20101",
            body: "body",
            content_type: "text/plain",
            attachments: vec![AttachmentPayload {
                filename: "ticket_20101.pdf",
                data: "AQID",
                mime_type: "application/pdf",
            }],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["ticket_id"], 42);
        assert_eq!(json["content_type"], "text/plain");
        assert_eq!(json["attachments"][0]["mime-type"], "application/pdf");
        assert_eq!(json["attachments"][0]["data"], "AQID");
    }

    #[test]
    fn test_flag_payload_shape() {
        let payload = FlagPayload {
            document_generation: "false",
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["document_generation"], "false");
    }

    #[test]
    fn test_article_payload_into_entry() {
        let payload: ArticlePayload = serde_json::from_value(serde_json::json!({
            "created_at": "2024-06-15T10:00:00.000Z",
            "from": "rita@example.org",
            "body": "hello",
            "type_id": 10
        }))
        .unwrap();

        let entry = payload.into_entry(7);
        assert_eq!(entry.id, 7);
        assert_eq!(entry.channel, ChannelType::Note);
        assert_eq!(entry.sender, "rita@example.org");
    }

    #[test]
    fn test_article_payload_defaults() {
        let payload: ArticlePayload = serde_json::from_value(serde_json::json!({})).unwrap();
        let entry = payload.into_entry(1);
        assert_eq!(entry.sender, "");
        assert_eq!(entry.channel, ChannelType::Other(0));
    }
}
