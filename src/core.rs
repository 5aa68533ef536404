use std::collections::HashMap;

use chrono::Local;
use log::debug;

use crate::aggregator::{categorize_notes, collect_raw_notes, group_notes};
use crate::config::ChangelogConfig;
use crate::error::Result;
use crate::formatter::MarkdownChangelogFormatter;
use crate::parser::NoteParser;
use crate::types::Issue;

/// Metadata for one changelog generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub milestone_title: String,
    /// Pre-formatted date string; today's date in the configured format when
    /// absent
    pub date: Option<String>,
    pub important_text: Option<String>,
    pub announcement_text: Option<String>,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(milestone_title: impl Into<String>) -> Self {
        Self {
            milestone_title: milestone_title.into(),
            ..Self::default()
        }
    }
}

/// Drives the full pipeline: selection filtering, note parsing, grouping and
/// markdown rendering. Holds no state across invocations; each call is an
/// independent pure computation over snapshots of its inputs.
#[derive(Debug, Clone)]
pub struct ChangelogGenerator {
    config: ChangelogConfig,
    parser: NoteParser,
    formatter: MarkdownChangelogFormatter,
}

impl Default for ChangelogGenerator {
    fn default() -> Self {
        Self::new(ChangelogConfig::default())
    }
}

impl ChangelogGenerator {
    #[must_use]
    pub fn new(config: ChangelogConfig) -> Self {
        Self {
            parser: NoteParser::new(config.clone()),
            formatter: MarkdownChangelogFormatter,
            config,
        }
    }

    #[must_use]
    pub fn parser(&self) -> &NoteParser {
        &self.parser
    }

    #[must_use]
    pub fn config(&self) -> &ChangelogConfig {
        &self.config
    }

    /// Generates the changelog document for the selected issues.
    ///
    /// # Arguments
    ///
    /// * `issues` - All issues under the milestone
    /// * `notes` - Issue number to edited release-note text
    /// * `selection` - Issue number to selection flag
    /// * `request` - Milestone title and rendering metadata
    ///
    /// # Errors
    ///
    /// Returns an error when no issue is selected, when no selected issue
    /// has usable text, when nothing parses, or when grouping comes up
    /// empty. Per-issue failures are carried inside the fatal variants.
    pub fn generate(
        &self,
        issues: &[Issue],
        notes: &HashMap<u64, String>,
        selection: &HashMap<u64, bool>,
        request: &GenerationRequest,
    ) -> Result<String> {
        let (raw_notes, missing) = collect_raw_notes(issues, notes, selection)?;
        if !missing.is_empty() {
            debug!("{} issue(s) skipped for missing note text", missing.len());
        }

        let (parsed_notes, _unparsable) = categorize_notes(&self.parser, &raw_notes)?;
        let grouped = group_notes(&parsed_notes)?;

        let date = match &request.date {
            Some(date) => date.clone(),
            None => Local::now().format(&self.config.date_format).to_string(),
        };

        Ok(self.formatter.format(
            &grouped,
            &request.milestone_title,
            &date,
            request.important_text.as_deref(),
            request.announcement_text.as_deref(),
        ))
    }
}
