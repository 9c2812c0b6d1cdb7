//! Inbound webhook payload parsing and validation.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::types::{
    GenerationMode, PersonName, TicketSnapshot, ValidationError, GENERATION_FLAG_FIELD,
};

/// Raw webhook body as sent by the ticket system.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub ticket: Option<TicketPayload>,
}

/// Ticket object inside the webhook body. Everything beyond the known fields
/// lands in `attributes` so custom fields survive the parse.
#[derive(Debug, Deserialize)]
pub struct TicketPayload {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub owner: Option<PersonName>,
    #[serde(default)]
    pub created_by: Option<PersonName>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub article_ids: Vec<u64>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A validated ticket event ready for dispatch.
#[derive(Debug, Clone)]
pub struct TicketEvent {
    pub snapshot: TicketSnapshot,
    pub mode: GenerationMode,
}

impl TicketEvent {
    /// Validate a raw webhook payload into a dispatchable event.
    ///
    /// Fails when the ticket object or its id is missing, or when the
    /// generation flag carries a value outside the known set.
    pub fn from_payload(payload: WebhookPayload) -> Result<Self, ValidationError> {
        let ticket = payload.ticket.ok_or(ValidationError::MissingTicket)?;
        let id = ticket.id.ok_or(ValidationError::MissingTicketId)?;

        let flag = ticket
            .attributes
            .get(GENERATION_FLAG_FIELD)
            .and_then(|v| v.as_str());
        let mode = GenerationMode::parse(flag)?;

        Ok(Self {
            snapshot: TicketSnapshot {
                id,
                number: ticket.number.unwrap_or_else(|| id.to_string()),
                title: ticket.title.unwrap_or_default(),
                owner: ticket.owner.unwrap_or_default(),
                requester: ticket.created_by.unwrap_or_default(),
                created_at: ticket.created_at,
                attributes: ticket.attributes,
                article_ids: ticket.article_ids,
            },
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_from(value: Value) -> WebhookPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_event() {
        let payload = payload_from(json!({
            "ticket": {
                "id": 42,
                "number": "20101",
                "title": "Spring festival",
                "document_generation": "ticket",
                "owner": {"firstname": "Owen", "lastname": "Owner"},
                "created_by": {"firstname": "Rita", "lastname": "Requester"},
                "created_at": "2024-06-15T10:30:00.000000Z",
                "article_ids": [7, 9],
                "group": "Events",
                "places": "Main hall"
            }
        }));

        let event = TicketEvent::from_payload(payload).unwrap();
        assert_eq!(event.snapshot.id, 42);
        assert_eq!(event.snapshot.number, "20101");
        assert_eq!(event.mode, GenerationMode::TicketOnly);
        assert_eq!(event.snapshot.article_ids, vec![7, 9]);
        assert_eq!(
            event.snapshot.attributes.get("places").and_then(|v| v.as_str()),
            Some("Main hall")
        );
    }

    #[test]
    fn test_missing_ticket_object() {
        let payload = payload_from(json!({}));
        let result = TicketEvent::from_payload(payload);
        assert!(matches!(result, Err(ValidationError::MissingTicket)));
    }

    #[test]
    fn test_missing_ticket_id() {
        let payload = payload_from(json!({
            "ticket": {"number": "20101", "document_generation": "ticket"}
        }));
        let result = TicketEvent::from_payload(payload);
        assert!(matches!(result, Err(ValidationError::MissingTicketId)));
    }

    #[test]
    fn test_invalid_generation_flag() {
        let payload = payload_from(json!({
            "ticket": {"id": 42, "document_generation": "maybe"}
        }));
        let result = TicketEvent::from_payload(payload);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidGenerationMode(_))
        ));
    }

    #[test]
    fn test_missing_flag_means_no_generation() {
        let payload = payload_from(json!({"ticket": {"id": 42}}));
        let event = TicketEvent::from_payload(payload).unwrap();
        assert_eq!(event.mode, GenerationMode::None);
    }

    #[test]
    fn test_number_falls_back_to_id() {
        let payload = payload_from(json!({"ticket": {"id": 42}}));
        let event = TicketEvent::from_payload(payload).unwrap();
        assert_eq!(event.snapshot.number, "42");
    }
}
