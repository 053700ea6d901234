//! Download file names: `<DocumentType>_<PrimaryField>[_<side>].png`

use crate::model::{CardSide, DocumentKind};

const FALLBACK_TOKEN: &str = "Student";

/// Derive the suggested file name for an exported document.
///
/// Whitespace runs become `_`, characters that are unsafe in a path segment
/// become `-`, and an empty result falls back to `placeholder`. Never fails.
///
/// ```
/// use scholardocs::export::suggested_filename;
/// use scholardocs::model::{CardSide, DocumentKind};
///
/// assert_eq!(
///     suggested_filename(DocumentKind::StudentIdCard, "Sarah Williams", Some(CardSide::Back), "Student"),
///     "StudentID_Sarah_Williams_back.png"
/// );
/// assert_eq!(
///     suggested_filename(DocumentKind::Transcript, "  ", None, "Student"),
///     "Transcript_Student.png"
/// );
/// ```
pub fn suggested_filename(
    kind: DocumentKind,
    label: &str,
    side: Option<CardSide>,
    placeholder: &str,
) -> String {
    let primary = segment(label)
        .or_else(|| segment(placeholder))
        .unwrap_or_else(|| FALLBACK_TOKEN.to_string());
    match side {
        Some(side) => format!("{}_{}_{}.png", kind.file_token(), primary, side.token()),
        None => format!("{}_{}.png", kind.file_token(), primary),
    }
}

fn segment(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        let mapped = if ch.is_whitespace() {
            '_'
        } else if ch.is_control()
            || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
        {
            '-'
        } else {
            ch
        };
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }
    let trimmed = out.trim_matches(|c| matches!(c, '.' | '_' | '-'));
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
