use log::debug;
use regex::Regex;

use crate::config::ChangelogConfig;
use crate::normalize::{clean_text, normalize_note};
use crate::patterns::{
    BRACKET_TRIPLE_PATTERN, FENCE_END_PATTERN, FENCE_SECTION_PATTERN, H2_SECTION_PATTERN,
    H3_SECTION_PATTERN, HEADING_END_PATTERN, INLINE_LABEL_PATTERN, LAST_RESORT_PATTERN,
    NEXT_SECTION_PATTERN, NOTE_HEAD_PATTERN, RELEASE_NOTE_HEADING_PATTERN, TEXT_TOKEN_PATTERN,
    TYPE_BRACKET_PATTERN, TYPE_ONLY_HEAD_PATTERN,
};
use crate::types::{NoteSection, ParsedNote};

/// Issue number used when extracting a note for display rather than
/// aggregation
const PREVIEW_ISSUE: u64 = 0;

/// Parses loosely-structured release notes out of issue bodies using a
/// priority-ordered cascade of pattern strategies. Every entry point is
/// total; issue bodies are untrusted free text and must never abort the
/// pipeline.
#[derive(Debug, Clone)]
pub struct NoteParser {
    config: ChangelogConfig,
}

impl NoteParser {
    #[must_use]
    pub fn new(config: ChangelogConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ChangelogConfig {
        &self.config
    }

    /// Extracts a formatted release note from an issue body, falling back to
    /// a distinguishable placeholder when the body is empty or nothing
    /// matches. Multiple categorized blocks join with a blank line.
    #[must_use]
    pub fn extract_release_note(&self, body: &str) -> String {
        if body.trim().is_empty() {
            return self.placeholder(&self.config.missing_note_placeholder);
        }

        let notes = self.parse_notes(body, PREVIEW_ISSUE);
        if notes.is_empty() {
            debug!("no extraction strategy matched, returning placeholder note");
            return self.placeholder(&self.config.unmatched_note_placeholder);
        }

        notes
            .iter()
            .map(format_note)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// True when every entry in the note carries one of the generated
    /// placeholder descriptions, marking a note nobody has edited yet.
    /// Unparsable text is not a placeholder note.
    #[must_use]
    pub fn is_placeholder_note(&self, note: &str) -> bool {
        let placeholders = [
            self.config.empty_description_placeholder.as_str(),
            self.config.missing_note_placeholder.as_str(),
            self.config.unmatched_note_placeholder.as_str(),
            self.config.extraction_error_placeholder.as_str(),
        ];
        let notes = self.parse_notes(note, PREVIEW_ISSUE);
        !notes.is_empty()
            && notes
                .iter()
                .all(|n| placeholders.contains(&n.description.as_str()))
    }

    /// Parses note text into zero or more categorized notes. Strategies are
    /// tried in a fixed priority order: bracketed blocks, then bare typed
    /// notes, then release-note sections, then a loose keyword scan. An
    /// empty result means no strategy matched; callers decide whether that
    /// is fatal.
    #[must_use]
    pub fn parse_notes(&self, text: &str, issue_number: u64) -> Vec<ParsedNote> {
        let primary = self.parse_blocks(text, issue_number);
        if !primary.is_empty() {
            debug!(
                "parsed {} categorized block(s) from issue #{issue_number}",
                primary.len()
            );
            return primary;
        }

        let typed = self.parse_type_only(text, issue_number);
        if !typed.is_empty() {
            debug!(
                "parsed {} bare typed note(s) from issue #{issue_number}",
                typed.len()
            );
            return typed;
        }

        if let Some(note) = self.parse_sections(text, issue_number) {
            return vec![note];
        }

        if let Some(note) = self.parse_last_resort(text, issue_number) {
            debug!("issue #{issue_number} matched only the loose keyword scan");
            return vec![note];
        }

        Vec::new()
    }

    /// Primary strategy: every `[Type][Component][Category] description`
    /// block in the text. Descriptions run to the next block head or the
    /// next recognized type bracket, whichever comes first.
    fn parse_blocks(&self, text: &str, issue_number: u64) -> Vec<ParsedNote> {
        let mut heads = Vec::new();
        for captures in NOTE_HEAD_PATTERN.captures_iter(text) {
            let (Some(whole), Some(note_type), Some(component), Some(category)) = (
                captures.get(0),
                captures.get(1),
                captures.get(2),
                captures.get(3),
            ) else {
                continue;
            };
            heads.push((
                whole.start(),
                whole.end(),
                note_type.as_str(),
                component.as_str(),
                category.as_str(),
            ));
        }

        let mut notes = Vec::with_capacity(heads.len());
        for (idx, &(_, head_end, note_type, component, category)) in heads.iter().enumerate() {
            let block_end = heads
                .get(idx + 1)
                .map_or(text.len(), |&(next_start, ..)| next_start);
            let mut description = &text[head_end..block_end];
            if let Some(terminator) = TYPE_BRACKET_PATTERN.find(description) {
                description = &description[..terminator.start()];
            }
            notes.push(normalize_note(
                Some(note_type),
                Some(component),
                Some(category),
                description,
                issue_number,
                &self.config,
            ));
        }
        notes
    }

    /// Secondary strategy: bare `[TYPE] description` notes carrying no full
    /// component/category triple. Matched notes fall under the default
    /// component and category. The description is salvaged as the text
    /// outside brackets and dashes, capped at the next typed head or the
    /// next heading; a type bracket with no such text is ignored.
    fn parse_type_only(&self, text: &str, issue_number: u64) -> Vec<ParsedNote> {
        let heads: Vec<(usize, usize, &str)> = TYPE_ONLY_HEAD_PATTERN
            .captures_iter(text)
            .filter_map(|captures| {
                let whole = captures.get(0)?;
                let note_type = captures.get(1)?;
                Some((whole.start(), whole.end(), note_type.as_str()))
            })
            .collect();

        let mut notes = Vec::with_capacity(heads.len());
        for (idx, &(_, head_end, note_type)) in heads.iter().enumerate() {
            let block_end = heads
                .get(idx + 1)
                .map_or(text.len(), |&(next_start, ..)| next_start);
            let mut rest = &text[head_end..block_end];
            if let Some(heading) = HEADING_END_PATTERN.find(rest) {
                rest = &rest[..heading.start()];
            }
            let words: Vec<&str> = TEXT_TOKEN_PATTERN
                .find_iter(rest)
                .map(|m| m.as_str())
                .collect();
            if words.is_empty() {
                continue;
            }
            notes.push(normalize_note(
                Some(note_type),
                None,
                None,
                &words.join(" "),
                issue_number,
                &self.config,
            ));
        }
        notes
    }

    /// Fallback strategy: dedicated release-note sections, in order of
    /// preference. Extracted content is re-parsed as an optional bracket
    /// triple; otherwise the whole cleaned text becomes the description.
    fn parse_sections(&self, text: &str, issue_number: u64) -> Option<ParsedNote> {
        let strategies: [(&str, &Regex, &Regex); 4] = [
            ("### heading", &H3_SECTION_PATTERN, &HEADING_END_PATTERN),
            ("## heading", &H2_SECTION_PATTERN, &HEADING_END_PATTERN),
            ("inline label", &INLINE_LABEL_PATTERN, &HEADING_END_PATTERN),
            ("fenced block", &FENCE_SECTION_PATTERN, &FENCE_END_PATTERN),
        ];

        for (name, start, end) in strategies {
            let Some(content) = extract_between(text, start, end) else {
                continue;
            };
            let cleaned = clean_text(content);
            if cleaned.is_empty() {
                continue;
            }
            debug!("issue #{issue_number} release note found via {name} section");
            return Some(self.parse_loose(&cleaned, issue_number));
        }
        None
    }

    /// Re-parses fallback section content, tolerating a partial or missing
    /// bracket triple
    fn parse_loose(&self, text: &str, issue_number: u64) -> ParsedNote {
        if let Some(captures) = BRACKET_TRIPLE_PATTERN.captures(text) {
            if let (Some(note_type), Some(description)) = (captures.get(1), captures.get(4)) {
                return normalize_note(
                    Some(note_type.as_str()),
                    captures.get(2).map(|m| m.as_str()),
                    captures.get(3).map(|m| m.as_str()),
                    description.as_str(),
                    issue_number,
                    &self.config,
                );
            }
        }
        normalize_note(None, None, None, text, issue_number, &self.config)
    }

    /// Last resort: a loose case-insensitive scan for release-note keywords
    fn parse_last_resort(&self, text: &str, issue_number: u64) -> Option<ParsedNote> {
        let captures = LAST_RESORT_PATTERN.captures(text)?;
        let content = clean_text(captures.get(1)?.as_str());
        if content.is_empty() {
            return None;
        }
        Some(normalize_note(
            None,
            None,
            None,
            &content,
            issue_number,
            &self.config,
        ))
    }

    fn placeholder(&self, description: &str) -> String {
        format_note(&normalize_note(
            None,
            None,
            None,
            description,
            PREVIEW_ISSUE,
            &self.config,
        ))
    }
}

/// Renders a note back into the canonical bracketed block accepted by the
/// primary parsing strategy
#[must_use]
pub fn format_note(note: &ParsedNote) -> String {
    format!(
        "[{}]\n- [{}]\n     - [{}] \n        - {}",
        note.note_type, note.component, note.category, note.description
    )
}

/// Locates a literal `## Release Note` section in an issue body, returning
/// its byte span so the consumer can splice an edited note back in place
#[must_use]
pub fn find_release_note_section(body: &str) -> Option<NoteSection> {
    let heading = RELEASE_NOTE_HEADING_PATTERN.find(body)?;
    let rest = &body[heading.end()..];
    let end = NEXT_SECTION_PATTERN
        .find(rest)
        .map_or(body.len(), |m| heading.end() + m.start());
    Some(NoteSection {
        start: heading.start(),
        end,
        header: heading.as_str().to_string(),
    })
}

fn extract_between<'a>(content: &'a str, start: &Regex, end: &Regex) -> Option<&'a str> {
    let marker = start.find(content)?;
    let rest = &content[marker.end()..];
    let end_idx = end.find(rest).map_or(rest.len(), |m| m.start());
    Some(&rest[..end_idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NoteType;

    fn parser() -> NoteParser {
        NoteParser::new(ChangelogConfig::default())
    }

    #[test]
    fn empty_body_yields_placeholder_note() {
        let note = parser().extract_release_note("");
        assert_eq!(
            note,
            "[ADDED]\n- [General]\n     - [Other] \n        - No release note available"
        );
        assert_eq!(parser().extract_release_note("   \n  "), note);
    }

    #[test]
    fn unmatched_body_yields_distinguishable_placeholder() {
        let note = parser().extract_release_note("Just some plain description text");
        assert!(note.ends_with("No release note section found"));
    }

    #[test]
    fn bracketed_block_parses_into_taxonomy() {
        let notes = parser().parse_notes("[FIXED][Auth][Bugfix] - Null pointer on login", 7);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_type, NoteType::Fixed);
        assert_eq!(notes[0].component, "Auth");
        assert_eq!(notes[0].category, "Bugfix");
        assert_eq!(notes[0].description, "Null pointer on login");
        assert_eq!(notes[0].issue_number, 7);
    }

    #[test]
    fn multiple_blocks_yield_multiple_notes() {
        let body = "[ADDED][UI][Theme] dark mode\n[FIXED][Auth][Login] crash on logout";
        let notes = parser().parse_notes(body, 1);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].description, "dark mode");
        assert_eq!(notes[1].note_type, NoteType::Fixed);
        assert_eq!(notes[1].description, "crash on logout");
    }

    #[test]
    fn description_stops_at_next_recognized_type_bracket() {
        let notes = parser().parse_notes("[ADDED][UI][Theme] dark mode [FIXED] trailing", 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].description, "dark mode");
    }

    #[test]
    fn canonical_formatted_note_reparses() {
        let p = parser();
        let original = "[SECURITY]\n- [Core]\n     - [Hardening] \n        - Rotated signing keys";
        let notes = p.parse_notes(original, 4);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_type, NoteType::Security);
        assert_eq!(notes[0].component, "Core");
        assert_eq!(notes[0].category, "Hardening");
        assert_eq!(notes[0].description, "Rotated signing keys");
        assert_eq!(format_note(&notes[0]), original);
    }

    #[test]
    fn unrecognized_type_bracket_defaults_to_added() {
        let notes = parser().parse_notes("[Tweaked][Core][API] adjusted limits", 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_type, NoteType::Added);
        assert_eq!(notes[0].component, "Core");
    }

    #[test]
    fn type_only_note_falls_under_default_taxonomy() {
        let notes = parser().parse_notes("[FIXED] crash on login", 3);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_type, NoteType::Fixed);
        assert_eq!(notes[0].component, "General");
        assert_eq!(notes[0].category, "Other");
        assert_eq!(notes[0].description, "crash on login");
        assert_eq!(notes[0].issue_number, 3);
    }

    #[test]
    fn multiple_type_only_blocks_yield_multiple_notes() {
        let notes = parser().parse_notes("[FIXED] crash on login\n[ADDED] - dark mode", 1);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].note_type, NoteType::Fixed);
        assert_eq!(notes[1].note_type, NoteType::Added);
        assert_eq!(notes[1].description, "dark mode");
    }

    #[test]
    fn type_bracket_without_description_matches_nothing() {
        assert!(parser().parse_notes("[FIXED]", 1).is_empty());
        assert!(parser().parse_notes("[FIXED]\n\n   ", 1).is_empty());
    }

    #[test]
    fn heading_section_fallback_extracts_between_headings() {
        let notes = parser().parse_notes("## Release Notes\nImproved startup time\n## Other", 9);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_type, NoteType::Added);
        assert_eq!(notes[0].component, "General");
        assert_eq!(notes[0].category, "Other");
        assert_eq!(notes[0].description, "Improved startup time");
    }

    #[test]
    fn h3_heading_section_is_extracted() {
        let body = "### Release Note\nFaster builds\n## Details";
        let notes = parser().parse_notes(body, 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].description, "Faster builds");
    }

    #[test]
    fn typed_note_inside_section_keeps_default_taxonomy() {
        let body = "## Release Notes\n[DEPRECATED] legacy export API\n## Next";
        let notes = parser().parse_notes(body, 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_type, NoteType::Deprecated);
        assert_eq!(notes[0].component, "General");
        assert_eq!(notes[0].category, "Other");
        assert_eq!(notes[0].description, "legacy export API");
    }

    #[test]
    fn section_content_with_partial_bracket_structure_is_reparsed() {
        // An unrecognized type bracket is not a typed head; the section
        // tier re-parses it as a loose bracket triple.
        let body = "## Release Notes\n[Tweak] legacy export API\n## Next";
        let notes = parser().parse_notes(body, 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_type, NoteType::Added);
        assert_eq!(notes[0].component, "General");
        assert_eq!(notes[0].category, "Other");
        assert_eq!(notes[0].description, "legacy export API");
    }

    #[test]
    fn fenced_release_note_block_is_extracted() {
        let body = "intro\n```release-note\nSupports proxy configuration\n```\noutro";
        let notes = parser().parse_notes(body, 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].description, "Supports proxy configuration");
    }

    #[test]
    fn inline_label_is_extracted() {
        let notes = parser().parse_notes("Release Note: tightened retry budget", 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].description, "tightened retry budget");
    }

    #[test]
    fn loose_keyword_scan_is_the_last_resort() {
        let notes = parser().parse_notes("Summary of changes:\nreduced memory usage\n# Footer", 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].description, "reduced memory usage");
        assert_eq!(notes[0].note_type, NoteType::Added);
    }

    #[test]
    fn parser_is_total_over_adversarial_bracket_nesting() {
        let p = parser();
        for body in [
            "[[[]]][",
            "[A][B]",
            "][ broken ][",
            "[ADDED][][] ",
            "\u{0}\u{1}[FIXED]",
        ] {
            let formatted = p.extract_release_note(body);
            assert!(!formatted.is_empty());
        }
    }

    #[test]
    fn empty_bracket_groups_fall_back_to_defaults() {
        // Brackets with no content do not form a primary head; the typed
        // tier salvages the text outside the brackets.
        let notes = parser().parse_notes("[ADDED][][] something", 1);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_type, NoteType::Added);
        assert_eq!(notes[0].component, "General");
        assert_eq!(notes[0].category, "Other");
        assert_eq!(notes[0].description, "something");
    }

    #[test]
    fn placeholder_notes_are_recognized() {
        let p = parser();
        assert!(p.is_placeholder_note(&p.extract_release_note("")));
        assert!(p.is_placeholder_note(&p.extract_release_note("plain prose, nothing marked")));
        assert!(p.is_placeholder_note(
            "[ADDED]\n- [General]\n     - [Other] \n        - Error extracting release note"
        ));
        assert!(!p.is_placeholder_note("[FIXED][Auth][Bugfix] - Null pointer on login"));
        assert!(!p.is_placeholder_note("[FIXED] crash on login"));
        assert!(!p.is_placeholder_note(""));
    }

    #[test]
    fn find_release_note_section_returns_span_and_header() {
        let body = "# Title\n\n## Release Note\ncontent line\n\n## Next Section\nrest";
        let section = find_release_note_section(body).expect("section should be found");
        assert_eq!(section.header, "## Release Note");
        assert_eq!(&body[section.start..section.start + 15], "## Release Note");
        assert!(body[section.start..section.end].contains("content line"));
        assert!(!body[section.start..section.end].contains("Next Section"));
    }

    #[test]
    fn find_release_note_section_without_heading_is_none() {
        assert_eq!(find_release_note_section("no headings here"), None);
    }
}
