use thiserror::Error;

/// Type alias for Result with `ChangelogError`
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// Errors that can occur when assembling a changelog from release notes
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("No issues selected for changelog generation")]
    EmptySelection,

    #[error("{}", no_valid_notes_message(.0))]
    NoValidNotes(Vec<String>),

    #[error("{}", no_formatted_notes_message(.0))]
    NoFormattedNotes(Vec<String>),

    #[error("Failed to group release notes by type")]
    GroupingFailed,

    #[error("{0}")]
    Other(String),
}

fn no_valid_notes_message(errors: &[String]) -> String {
    if errors.is_empty() {
        "No release notes found to generate changelog".to_string()
    } else {
        format!(
            "No valid release notes found. Issues with errors:\n{}",
            errors.join("\n")
        )
    }
}

fn no_formatted_notes_message(errors: &[String]) -> String {
    if errors.is_empty() {
        "No properly formatted release notes found".to_string()
    } else {
        format!(
            "No valid release notes found. Format errors:\n{}",
            errors.join("\n")
        )
    }
}

impl ChangelogError {
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        match self {
            Self::Other(msg) => Self::Other(format!("{}: {}", context.into(), msg)),
            error => error,
        }
    }

    /// Message suitable for surfacing directly to a maintainer
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptySelection => {
                "Please select at least one issue to include in the changelog".to_string()
            }
            Self::GroupingFailed => {
                "Failed to group release notes by type; no notes survived processing".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Per-issue messages carried by the aggregate error variants
    #[must_use]
    pub fn item_errors(&self) -> &[String] {
        match self {
            Self::NoValidNotes(errors) | Self::NoFormattedNotes(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_valid_notes_enumerates_per_issue_failures() {
        let error = ChangelogError::NoValidNotes(vec![
            "Issue #1: Missing or empty release note".to_string(),
            "Issue #2: Missing or empty release note".to_string(),
        ]);
        let message = error.to_string();
        assert!(message.starts_with("No valid release notes found"));
        assert!(message.contains("Issue #1"));
        assert!(message.contains("\nIssue #2"));
        assert_eq!(error.item_errors().len(), 2);
    }

    #[test]
    fn with_context_enriches_plain_errors() {
        let error = ChangelogError::Other("rendering failed".to_string()).with_context("generate");
        assert_eq!(error.to_string(), "generate: rendering failed");
        // context only applies to the catch-all variant
        assert!(matches!(
            ChangelogError::EmptySelection.with_context("generate"),
            ChangelogError::EmptySelection
        ));
        assert_eq!(
            ChangelogError::EmptySelection.user_message(),
            "Please select at least one issue to include in the changelog"
        );
    }

    #[test]
    fn empty_error_lists_degrade_to_generic_messages() {
        assert_eq!(
            ChangelogError::NoValidNotes(Vec::new()).to_string(),
            "No release notes found to generate changelog"
        );
        assert_eq!(
            ChangelogError::NoFormattedNotes(Vec::new()).to_string(),
            "No properly formatted release notes found"
        );
    }
}
