use std::collections::HashMap;

use log::debug;

use crate::error::{ChangelogError, Result};
use crate::parser::NoteParser;
use crate::types::{GroupedChangelog, Issue, ParsedNote, RawNote};

/// Filters the milestone's issues down to the selected ones and pairs each
/// with its edited note text. Issues lacking usable text are collected as
/// soft errors; the call fails only when no issue is selected or none has
/// text.
pub fn collect_raw_notes(
    issues: &[Issue],
    notes: &HashMap<u64, String>,
    selection: &HashMap<u64, bool>,
) -> Result<(Vec<RawNote>, Vec<String>)> {
    let selected: Vec<&Issue> = issues
        .iter()
        .filter(|issue| selection.get(&issue.number).copied().unwrap_or(false))
        .collect();

    if selected.is_empty() {
        return Err(ChangelogError::EmptySelection);
    }

    let mut raw_notes = Vec::with_capacity(selected.len());
    let mut errors = Vec::new();

    for issue in selected {
        let content = notes
            .get(&issue.number)
            .map(|text| text.trim())
            .filter(|text| !text.is_empty());
        match content {
            Some(content) => raw_notes.push(RawNote {
                issue_number: issue.number,
                title: issue.title.clone(),
                content: content.to_string(),
            }),
            None => errors.push(format!(
                "Issue #{}: Missing or empty release note",
                issue.number
            )),
        }
    }

    if raw_notes.is_empty() {
        return Err(ChangelogError::NoValidNotes(errors));
    }
    Ok((raw_notes, errors))
}

/// Re-parses each surviving note into categorized entries. A note may yield
/// several entries; a note no strategy can parse becomes a soft error. Fails
/// only when nothing at all parsed.
pub fn categorize_notes(
    parser: &NoteParser,
    raw_notes: &[RawNote],
) -> Result<(Vec<ParsedNote>, Vec<String>)> {
    let mut parsed_notes = Vec::with_capacity(raw_notes.len());
    let mut errors = Vec::new();

    for note in raw_notes {
        let parsed = parser.parse_notes(&note.content, note.issue_number);
        if parsed.is_empty() {
            errors.push(format!(
                "Issue #{}: Could not extract a valid release note. Please ensure it has at \
                 least a type in brackets [TYPE] and some description text.",
                note.issue_number
            ));
        } else {
            parsed_notes.extend(parsed);
        }
    }

    if parsed_notes.is_empty() {
        return Err(ChangelogError::NoFormattedNotes(errors));
    }
    if !errors.is_empty() {
        debug!(
            "{} note(s) could not be parsed and were skipped",
            errors.len()
        );
    }
    Ok((parsed_notes, errors))
}

/// Groups parsed notes by type, component and category, deduplicating
/// descriptions per bucket
pub fn group_notes(notes: &[ParsedNote]) -> Result<GroupedChangelog> {
    let mut grouped = GroupedChangelog::default();
    for note in notes {
        grouped.insert(note);
    }
    if grouped.is_empty() {
        return Err(ChangelogError::GroupingFailed);
    }
    Ok(grouped)
}
