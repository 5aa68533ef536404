use crate::config::ChangelogConfig;
use crate::patterns::BLANK_LINES_PATTERN;
use crate::types::{NoteType, ParsedNote};

/// Normalizes line endings, collapses blank-line runs and trims, while
/// preserving links and inline references
#[must_use]
pub fn clean_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    BLANK_LINES_PATTERN
        .replace_all(&normalized, "\n")
        .trim()
        .to_string()
}

/// Turns raw `(type, component, category, description)` strings into a
/// `ParsedNote`, supplying defaults for anything absent or unrecognized.
/// Pure and total; there is no failure path.
#[must_use]
pub fn normalize_note(
    note_type: Option<&str>,
    component: Option<&str>,
    category: Option<&str>,
    description: &str,
    issue_number: u64,
    config: &ChangelogConfig,
) -> ParsedNote {
    let note_type = note_type
        .and_then(NoteType::parse)
        .unwrap_or(NoteType::Added);

    let component = component
        .map(clean_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| config.default_component.clone());

    let category = category
        .map(clean_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| config.default_category.clone());

    let mut description = clean_text(description);
    if description.is_empty() {
        description = config.empty_description_placeholder.clone();
    }

    ParsedNote {
        note_type,
        component,
        category,
        description,
        issue_number,
    }
}
