//! PDF typesetting for composed layout elements.
//!
//! Uses pdf-writer's low-level primitives so output is byte-deterministic:
//! the same element sequence always serializes to the same bytes, with no
//! creation-date metadata or random identifiers.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use super::layout::{Align, Element, TableRow, TextStyle};

// A4 in points
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 50.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

// Line spacing relative to font size
const LEADING: f32 = 1.3;

// Attributes table geometry
const LABEL_COL_WIDTH: f32 = 190.0;
const CELL_PADDING: f32 = 6.0;

// Table colors (header blue, alternating light rows)
const HEADER_BG: (f32, f32, f32) = (0.098, 0.463, 0.824);
const ROW_BG_EVEN: (f32, f32, f32) = (0.961, 0.969, 0.980);
const ROW_BG_ODD: (f32, f32, f32) = (0.890, 0.910, 0.933);

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");

/// Serialize composed elements into a finished PDF document.
pub fn write_document(elements: &[Element]) -> Vec<u8> {
    let pages = typeset(elements);

    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_regular_id = Ref::new(3);
    let font_bold_id = Ref::new(4);
    let page_ids: Vec<Ref> = (0..pages.len())
        .map(|i| Ref::new(5 + 2 * i as i32))
        .collect();

    pdf.catalog(catalog_id).pages(page_tree_id);
    {
        let mut tree = pdf.pages(page_tree_id);
        tree.kids(page_ids.iter().copied());
        tree.count(pages.len() as i32);
    }

    pdf.type1_font(font_regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(font_bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (i, content) in pages.into_iter().enumerate() {
        let page_id = page_ids[i];
        let content_id = Ref::new(6 + 2 * i as i32);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT_REGULAR, font_regular_id);
            fonts.pair(FONT_BOLD, font_bold_id);
        }
        page.finish();

        pdf.stream(content_id, &content);
    }

    pdf.finish()
}

/// Flows elements onto pages, returning one finished content stream per page.
struct Typesetter {
    finished: Vec<Vec<u8>>,
    current: Content,
    y: f32,
}

impl Typesetter {
    fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: Content::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn break_page(&mut self) {
        let done = std::mem::replace(&mut self.current, Content::new());
        self.finished.push(done.finish().to_vec());
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.break_page();
        }
    }

    fn finish(mut self) -> Vec<Vec<u8>> {
        self.finished.push(self.current.finish().to_vec());
        self.finished
    }

    fn spacer(&mut self, height: f32) {
        self.y -= height;
    }

    fn paragraph(&mut self, text: &str, style: TextStyle, align: Align) {
        let line_height = style.size * LEADING;
        for raw_line in text.split('\n') {
            for line in wrap_text(raw_line, style, CONTENT_WIDTH) {
                self.ensure_room(line_height);
                let x = match align {
                    Align::Left => MARGIN,
                    Align::Right => PAGE_WIDTH - MARGIN - text_width(&line, style),
                };
                let baseline = self.y - style.size;
                self.draw_text(&line, style, x, baseline, (0.0, 0.0, 0.0));
                self.y -= line_height;
            }
        }
    }

    fn table(&mut self, rows: &[TableRow]) {
        let value_col_width = CONTENT_WIDTH - LABEL_COL_WIDTH;

        for (index, row) in rows.iter().enumerate() {
            let style = if row.header {
                TextStyle {
                    size: 11.0,
                    bold: true,
                }
            } else {
                TextStyle::BODY
            };
            let line_height = style.size * LEADING;

            let label_lines = wrap_text(&row.label, style, LABEL_COL_WIDTH - 2.0 * CELL_PADDING);
            let value_lines = wrap_text(&row.value, style, value_col_width - 2.0 * CELL_PADDING);
            let line_count = label_lines.len().max(value_lines.len()).max(1);
            let row_height = line_count as f32 * line_height + 2.0 * CELL_PADDING;

            // Rows never split across pages; a tall row moves whole
            self.ensure_room(row_height);

            let (bg, fg) = if row.header {
                (HEADER_BG, (1.0, 1.0, 1.0))
            } else if index % 2 == 0 {
                (ROW_BG_ODD, (0.0, 0.0, 0.0))
            } else {
                (ROW_BG_EVEN, (0.0, 0.0, 0.0))
            };

            self.current.set_fill_rgb(bg.0, bg.1, bg.2);
            self.current
                .rect(MARGIN, self.y - row_height, CONTENT_WIDTH, row_height);
            self.current.fill_nonzero();

            let mut baseline = self.y - CELL_PADDING - style.size;
            for i in 0..line_count {
                if let Some(line) = label_lines.get(i) {
                    self.draw_text(line, style, MARGIN + CELL_PADDING, baseline, fg);
                }
                if let Some(line) = value_lines.get(i) {
                    self.draw_text(
                        line,
                        style,
                        MARGIN + LABEL_COL_WIDTH + CELL_PADDING,
                        baseline,
                        fg,
                    );
                }
                baseline -= line_height;
            }

            self.y -= row_height;
        }
    }

    fn draw_text(&mut self, text: &str, style: TextStyle, x: f32, y: f32, color: (f32, f32, f32)) {
        let font = if style.bold { FONT_BOLD } else { FONT_REGULAR };
        let encoded = encode_win_ansi(text);

        self.current.set_fill_rgb(color.0, color.1, color.2);
        self.current.begin_text();
        self.current.set_font(font, style.size);
        self.current.next_line(x, y);
        self.current.show(Str(&encoded));
        self.current.end_text();
    }
}

fn typeset(elements: &[Element]) -> Vec<Vec<u8>> {
    let mut typesetter = Typesetter::new();

    for element in elements {
        match element {
            Element::Paragraph { text, style, align } => {
                typesetter.paragraph(text, *style, *align)
            }
            Element::Spacer(height) => typesetter.spacer(*height),
            Element::Table { rows } => typesetter.table(rows),
        }
    }

    typesetter.finish()
}

/// Greedy word wrap against an estimated line width. Overlong words are
/// hard-broken so no line ever exceeds the column.
fn wrap_text(text: &str, style: TextStyle, max_width: f32) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };

        if text_width(&candidate, style) <= max_width {
            line = candidate;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }

        // Word alone still too wide: break it by characters
        let mut piece = String::new();
        for c in word.chars() {
            piece.push(c);
            if text_width(&piece, style) > max_width && piece.chars().count() > 1 {
                piece.pop();
                lines.push(std::mem::take(&mut piece));
                piece.push(c);
            }
        }
        line = piece;
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }

    lines
}

/// Estimated rendered width of a string in points.
fn text_width(text: &str, style: TextStyle) -> f32 {
    let factor = if style.bold { 1.05 } else { 1.0 };
    text.chars().map(char_units).sum::<f32>() / 1000.0 * style.size * factor
}

/// Approximate Helvetica advance widths (thousandths of the font size).
/// Close enough for wrapping and right alignment; exact metrics are not
/// needed because columns carry generous padding.
fn char_units(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' | 'I' => 240.0,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' | ' ' | '/' => 300.0,
        'm' | 'w' => 800.0,
        'M' | 'W' => 900.0,
        'A'..='Z' | '0'..='9' | '@' | '#' => 660.0,
        _ => 540.0,
    }
}

/// Encode text for the WinAnsi (CP-1252) simple font encoding. Characters
/// outside the encoding degrade to '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u8,
            '\u{20ac}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            '\u{0152}' => 0x8c,
            '\u{0153}' => 0x9c,
            _ => b'?',
        })
        .collect()
}
