//! Test fixtures for common domain objects.

use serde_json::{json, Map, Value};

use crate::ticket::{
    ChannelType, CorrespondenceEntry, GenerationMode, PersonName, TicketEvent, TicketSnapshot,
};

/// A ticket snapshot with sensible defaults and two correspondence entries.
pub fn snapshot(id: u64, number: &str) -> TicketSnapshot {
    let mut attributes = Map::new();
    attributes.insert("date_begin".to_string(), json!("2024-06-20T09:00:00Z"));
    attributes.insert("attendees_expected".to_string(), json!(40));
    attributes.insert("external_visitors".to_string(), json!(true));
    attributes.insert("group".to_string(), json!("Events"));

    TicketSnapshot {
        id,
        number: number.to_string(),
        title: "Summer workshop".to_string(),
        owner: PersonName {
            firstname: Some("Omar".to_string()),
            lastname: Some("Osei".to_string()),
        },
        requester: PersonName {
            firstname: Some("Rita".to_string()),
            lastname: Some("Rivers".to_string()),
        },
        created_at: Some("2024-06-15T09:30:00.000Z".to_string()),
        attributes,
        article_ids: vec![101, 102],
    }
}

/// A ticket event for the given mode, built on [`snapshot`].
pub fn event(id: u64, mode: GenerationMode) -> TicketEvent {
    TicketEvent {
        snapshot: snapshot(id, &format!("{}", 20000 + id)),
        mode,
    }
}

/// A note entry (qualifies for the Messages section).
pub fn note_entry(id: u64, created_at: &str, sender: &str, body: &str) -> CorrespondenceEntry {
    CorrespondenceEntry {
        id,
        created_at: created_at.to_string(),
        sender: sender.to_string(),
        body: body.to_string(),
        channel: ChannelType::Note,
    }
}

/// An email entry (excluded from the Messages section).
pub fn email_entry(id: u64, created_at: &str, sender: &str, body: &str) -> CorrespondenceEntry {
    CorrespondenceEntry {
        id,
        created_at: created_at.to_string(),
        sender: sender.to_string(),
        body: body.to_string(),
        channel: ChannelType::Email,
    }
}

/// A webhook payload as the ticket system posts it.
pub fn webhook_payload(ticket_id: u64, flag: Option<&str>) -> Value {
    let mut ticket = json!({
        "id": ticket_id,
        "number": format!("{}", 20000 + ticket_id),
        "title": "Summer workshop",
        "owner": { "firstname": "Omar", "lastname": "Osei" },
        "created_by": { "firstname": "Rita", "lastname": "Rivers" },
        "created_at": "2024-06-15T09:30:00.000Z",
        "article_ids": [101, 102],
        "group": "Events"
    });
    if let Some(value) = flag {
        ticket["document_generation"] = json!(value);
    }
    json!({ "ticket": ticket })
}
