/// Configuration options for release-note defaults and changelog formatting
#[derive(Debug, Clone)]
pub struct ChangelogConfig {
    pub date_format: String,
    pub default_component: String,
    pub default_category: String,
    /// Description used when a note has no text after cleaning
    pub empty_description_placeholder: String,
    /// Description used when the issue body is empty
    pub missing_note_placeholder: String,
    /// Description used when no extraction strategy matched
    pub unmatched_note_placeholder: String,
    /// Description stored by earlier tooling when extraction failed;
    /// `NoteParser::is_placeholder_note` matches it alongside the other
    /// placeholders so persisted failure notes are flagged as unedited
    pub extraction_error_placeholder: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            default_component: "General".to_string(),
            default_category: "Other".to_string(),
            empty_description_placeholder: "No detailed description available".to_string(),
            missing_note_placeholder: "No release note available".to_string(),
            unmatched_note_placeholder: "No release note section found".to_string(),
            extraction_error_placeholder: "Error extracting release note".to_string(),
        }
    }
}
