//! Pure document rendering: (ticket snapshot, sorted thread) -> PDF bytes.
//!
//! Rendering is deterministic by contract: identical inputs always produce
//! byte-identical output, so there is no "generated at" stamp anywhere in
//! the document.

mod format;
mod layout;
mod markup;
mod pdf;

pub use format::{format_opt_str, format_timestamp, format_value, PLACEHOLDER};
pub use layout::{compose, Align, Element, TableRow, TextStyle, ATTRIBUTE_FIELDS, GROUP_FIELD};
pub use markup::normalize_body;

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

use crate::ticket::{CorrespondenceEntry, TicketSnapshot};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

/// A rendered document: raw bytes plus their portable base64 form.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub base64: String,
}

impl RenderedDocument {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Render a ticket document.
///
/// `entries` must be sorted ascending by creation time (the dispatcher does
/// this). Missing fields never fail the render; they degrade to placeholders.
pub fn render(
    snapshot: &TicketSnapshot,
    entries: &[CorrespondenceEntry],
) -> Result<RenderedDocument, RenderError> {
    let elements = layout::compose(snapshot, entries);
    let bytes = pdf::write_document(&elements);
    let base64 = STANDARD.encode(&bytes);
    Ok(RenderedDocument { bytes, base64 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::{ChannelType, PersonName};
    use serde_json::json;

    fn snapshot() -> TicketSnapshot {
        let mut attributes = serde_json::Map::new();
        attributes.insert("group".to_string(), json!("Events"));
        TicketSnapshot {
            id: 42,
            number: "20101".to_string(),
            title: "Spring festival".to_string(),
            owner: PersonName::default(),
            requester: PersonName::default(),
            created_at: Some("2024-06-15T10:30:00.000000Z".to_string()),
            attributes,
            article_ids: vec![1, 2],
        }
    }

    fn entries() -> Vec<CorrespondenceEntry> {
        vec![
            CorrespondenceEntry {
                id: 1,
                created_at: "2024-06-15T10:00:00.000Z".to_string(),
                sender: "rita@example.org".to_string(),
                body: "We would like to host the festival.<br>Thanks!".to_string(),
                channel: ChannelType::Email,
            },
            CorrespondenceEntry {
                id: 2,
                created_at: "2024-06-15T11:00:00.000Z".to_string(),
                sender: "owen@example.org".to_string(),
                body: "<div>Approved.</div>".to_string(),
                channel: ChannelType::Note,
            },
        ]
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let doc = render(&snapshot(), &entries()).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF-"));
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render(&snapshot(), &entries()).unwrap();
        let b = render(&snapshot(), &entries()).unwrap();
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(a.base64, b.base64);
    }

    #[test]
    fn test_base64_matches_bytes() {
        use base64::{engine::general_purpose::STANDARD, Engine};
        let doc = render(&snapshot(), &entries()).unwrap();
        assert_eq!(STANDARD.decode(&doc.base64).unwrap(), doc.bytes);
    }

    #[test]
    fn test_render_tolerates_empty_thread() {
        let doc = render(&snapshot(), &[]).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_different_input_different_bytes() {
        let a = render(&snapshot(), &entries()).unwrap();
        let mut other = snapshot();
        other.title = "Autumn festival".to_string();
        let b = render(&other, &entries()).unwrap();
        assert_ne!(a.bytes, b.bytes);
    }
}
