//! Document composition: turns a ticket snapshot and its sorted thread into
//! an ordered list of layout elements. Pure; typesetting happens in `pdf`.

use serde_json::Value;

use crate::ticket::{CorrespondenceEntry, TicketSnapshot};

use super::format::{format_opt_str, format_value, PLACEHOLDER};
use super::markup::normalize_body;

/// Fixed, ordered set of custom fields shown in the attributes table.
pub const ATTRIBUTE_FIELDS: &[(&str, &str)] = &[
    ("Start date", "date_begin"),
    ("End date", "date_end"),
    ("Expected attendance", "attendees_expected"),
    ("External visitors", "external_visitors"),
    ("Locations", "places"),
    ("Food & drinks", "food_drinks"),
    ("Responsible persons", "organizers"),
    ("Weekly recurrence", "weekly"),
];

/// Attribute key carrying the group/category label shown in the header.
pub const GROUP_FIELD: &str = "group";

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Text style for a paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
}

impl TextStyle {
    pub const TITLE: Self = Self {
        size: 16.0,
        bold: true,
    };
    pub const HEADING: Self = Self {
        size: 12.0,
        bold: true,
    };
    pub const BODY: Self = Self {
        size: 10.0,
        bold: false,
    };
}

/// One flowable block of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Paragraph {
        text: String,
        style: TextStyle,
        align: Align,
    },
    Spacer(f32),
    Table { rows: Vec<TableRow> },
}

/// A single label/value row; `header` marks the visually distinguished
/// header row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub value: String,
    pub header: bool,
}

fn paragraph(text: impl Into<String>, style: TextStyle, align: Align) -> Element {
    Element::Paragraph {
        text: text.into(),
        style,
        align,
    }
}

fn name_or_placeholder(display: String) -> String {
    if display.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        display
    }
}

/// Compose the full element sequence for one ticket document.
///
/// `entries` must already be sorted ascending by creation time; the first
/// entry becomes the Description section and the remaining qualifying entries
/// the Messages section.
pub fn compose(snapshot: &TicketSnapshot, entries: &[CorrespondenceEntry]) -> Vec<Element> {
    let mut elements = Vec::new();

    // Header block
    elements.push(paragraph(
        format!("Ticket #{}: {}", snapshot.number, snapshot.title),
        TextStyle::TITLE,
        Align::Left,
    ));
    elements.push(Element::Spacer(6.0));

    let group = snapshot
        .attributes
        .get(GROUP_FIELD)
        .map(format_value)
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    elements.push(paragraph(
        format!("Group: {}", group),
        TextStyle::HEADING,
        Align::Left,
    ));
    elements.push(Element::Spacer(6.0));

    elements.push(paragraph(
        format!(
            "Requested by: {}",
            name_or_placeholder(snapshot.requester.display())
        ),
        TextStyle::BODY,
        Align::Left,
    ));
    elements.push(paragraph(
        format!("Owner: {}", name_or_placeholder(snapshot.owner.display())),
        TextStyle::BODY,
        Align::Left,
    ));
    elements.push(paragraph(
        format!(
            "Submitted: {}",
            format_opt_str(snapshot.created_at.as_deref())
        ),
        TextStyle::BODY,
        Align::Left,
    ));
    elements.push(Element::Spacer(12.0));

    // Attributes table
    elements.push(paragraph("Details", TextStyle::HEADING, Align::Left));
    elements.push(Element::Spacer(6.0));
    elements.push(Element::Table {
        rows: attribute_rows(snapshot),
    });
    elements.push(Element::Spacer(12.0));

    // Description: earliest entry's normalized body
    elements.push(paragraph("Description", TextStyle::HEADING, Align::Left));
    elements.push(Element::Spacer(6.0));
    let description = entries
        .first()
        .map(|e| normalize_body(&e.body))
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    elements.push(paragraph(description, TextStyle::BODY, Align::Left));
    elements.push(Element::Spacer(12.0));

    // Messages: remaining entries whose channel type qualifies
    elements.push(paragraph("Messages", TextStyle::HEADING, Align::Left));
    elements.push(Element::Spacer(6.0));

    for entry in entries.iter().skip(1).filter(|e| e.channel.is_message()) {
        elements.push(paragraph(
            normalize_body(&entry.body),
            TextStyle::BODY,
            Align::Left,
        ));
        elements.push(paragraph(
            entry.sender.clone(),
            TextStyle::BODY,
            Align::Right,
        ));
        elements.push(paragraph(
            format_opt_str(Some(&entry.created_at)),
            TextStyle::BODY,
            Align::Right,
        ));
        elements.push(Element::Spacer(12.0));
    }

    elements
}

fn attribute_rows(snapshot: &TicketSnapshot) -> Vec<TableRow> {
    let mut rows = vec![TableRow {
        label: "Field".to_string(),
        value: "Value".to_string(),
        header: true,
    }];

    for (label, key) in ATTRIBUTE_FIELDS {
        let value = snapshot
            .attributes
            .get(*key)
            .unwrap_or(&Value::Null)
            .clone();
        rows.push(TableRow {
            label: (*label).to_string(),
            value: format_value(&value),
            header: false,
        });
    }

    rows
}
