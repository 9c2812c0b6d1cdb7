use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the ticket attribute carrying the generation request flag.
pub const GENERATION_FLAG_FIELD: &str = "document_generation";

/// Flag value written back to the ticket system once a dispatch has started.
pub const GENERATION_FLAG_CLEARED: &str = "false";

/// Validation failures for inbound ticket events.
///
/// These are the only errors ever surfaced to the webhook caller; everything
/// after acceptance is fire-and-forget.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Payload does not contain a ticket object")]
    MissingTicket,

    #[error("Ticket is missing an identifier")]
    MissingTicketId,

    #[error("Unknown generation flag value: {0:?}")]
    InvalidGenerationMode(String),
}

/// Requested scope of document dispatch for one ticket event.
///
/// Parsed strictly from the inbound flag; unknown values are rejected at the
/// boundary instead of being treated as truthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// No document requested; the dispatch does nothing.
    None,
    /// Render and upload to the originating ticket only.
    TicketOnly,
    /// Render, upload to the ticket, and mail the distribution list.
    TicketAndNotify,
}

impl GenerationMode {
    /// Parse the inbound string flag. A missing flag means no generation.
    pub fn parse(flag: Option<&str>) -> Result<Self, ValidationError> {
        match flag {
            None | Some("false") => Ok(Self::None),
            Some("ticket") => Ok(Self::TicketOnly),
            Some("email") => Ok(Self::TicketAndNotify),
            Some(other) => Err(ValidationError::InvalidGenerationMode(other.to_string())),
        }
    }

    /// Whether a document should be rendered and uploaded at all.
    pub fn wants_document(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether the rendered document should also be mailed.
    pub fn wants_mail(&self) -> bool {
        matches!(self, Self::TicketAndNotify)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TicketOnly => "ticket_only",
            Self::TicketAndNotify => "ticket_and_notify",
        }
    }
}

/// First/last name pair as the ticket system reports people.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PersonName {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}

impl PersonName {
    /// Joined display form; empty string when neither part is present.
    pub fn display(&self) -> String {
        let parts: Vec<&str> = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();
        parts.join(" ")
    }
}

/// How a correspondence entry was created in the source system.
///
/// Decoded from the numeric type code the ticket system attaches to each
/// entry. Only notes and web replies qualify for the Messages section of the
/// rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    Email,
    Web,
    Note,
    Other(u32),
}

impl ChannelType {
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Email,
            5 => Self::Web,
            10 => Self::Note,
            other => Self::Other(other),
        }
    }

    /// Whether entries of this type belong in the Messages section.
    pub fn is_message(&self) -> bool {
        matches!(self, Self::Note | Self::Web)
    }
}

/// One message/note within a ticket's correspondence thread.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrespondenceEntry {
    pub id: u64,
    /// Creation timestamp as received (ISO-8601 string).
    pub created_at: String,
    /// Sender display string.
    pub sender: String,
    /// Marked-up body text.
    pub body: String,
    pub channel: ChannelType,
}

impl CorrespondenceEntry {
    /// Parsed creation time used as the sort key. Unparseable timestamps sort
    /// before everything else so they still render rather than vanish.
    pub fn created_ts(&self) -> Option<DateTime<Utc>> {
        parse_iso_timestamp(&self.created_at)
    }
}

/// Sort entries ascending by creation time, with the raw string as a
/// tie-breaker so ordering stays total and deterministic.
pub fn sort_by_creation(entries: &mut [CorrespondenceEntry]) {
    entries.sort_by(|a, b| {
        (a.created_ts(), a.created_at.as_str()).cmp(&(b.created_ts(), b.created_at.as_str()))
    });
}

/// Parse the ticket system's ISO-8601 timestamps (`2024-06-15T10:30:00.000Z`
/// with or without fractional seconds).
pub fn parse_iso_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|ndt| ndt.and_utc())
        })
}

/// Immutable view of the ticket a dispatch operates on.
#[derive(Debug, Clone)]
pub struct TicketSnapshot {
    pub id: u64,
    /// Human-facing display number.
    pub number: String,
    pub title: String,
    pub owner: PersonName,
    pub requester: PersonName,
    /// Creation timestamp as received; formatted at render time.
    pub created_at: Option<String>,
    /// Open mapping of custom attribute key to scalar value.
    pub attributes: Map<String, Value>,
    /// Correspondence entry ids in the order the ticket system lists them.
    pub article_ids: Vec<u64>,
}
