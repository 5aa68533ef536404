//! Release-note extraction and changelog assembly for milestone issues.
//!
//! The pipeline turns loosely-structured, human-authored markdown fragments
//! embedded in issue bodies into a `[TYPE]/[Component]/[Category]/description`
//! taxonomy, groups and deduplicates the results, and renders a canonical
//! markdown changelog with deterministic ordering. Data flows strictly
//! forward: raw issue bodies → parser → validator → aggregator → renderer.
//!
//! The crate performs no I/O; issue data, edited-note maps and selection
//! flags are supplied by the caller, and the rendered document is returned
//! as a string for the caller to publish.

pub mod aggregator;
pub mod config;
pub mod core;
pub mod error;
pub mod formatter;
pub mod links;
pub mod normalize;
pub mod parser;
mod patterns;
pub mod types;

pub use config::ChangelogConfig;
pub use core::{ChangelogGenerator, GenerationRequest};
pub use error::{ChangelogError, Result};
pub use formatter::MarkdownChangelogFormatter;
pub use links::{extract_issue_and_pr_links, extract_pr_number, pr_number_from_url};
pub use parser::{find_release_note_section, format_note, NoteParser};
pub use types::{
    GroupedChangelog, Issue, LinkInfo, NoteSection, NoteType, ParsedNote, RawNote,
};
