//! Best-effort plain-text degradation of lightweight correspondence markup.
//!
//! This is deliberately not an HTML renderer. Only the substitutions listed
//! here are performed; any other markup passes through verbatim.

/// Enumerated substitutions, applied in order. Entity decoding runs last so
/// escaped entities (`&amp;lt;`) degrade to their literal text form exactly
/// once.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("<br />", "\n"),
    ("<br/>", "\n"),
    ("<br>", "\n"),
    ("</div>", "\n"),
    ("<div>", ""),
    ("</p>", "\n"),
    ("<p>", ""),
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Normalize a correspondence body for layout: line-break markup becomes a
/// newline, block wrappers collapse to a single newline, a handful of common
/// entities decode to their characters.
pub fn normalize_body(body: &str) -> String {
    let mut out = body.replace("\r\n", "\n");
    for (from, to) in SUBSTITUTIONS {
        out = out.replace(from, to);
    }
    out.trim().to_string()
}
