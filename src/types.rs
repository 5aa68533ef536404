use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level classification of a change, following the Keep a Changelog
/// vocabulary. Unrecognized input normalizes to `Added` during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteType {
    Added,
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
}

impl NoteType {
    pub const ALL: [Self; 6] = [
        Self::Added,
        Self::Changed,
        Self::Deprecated,
        Self::Removed,
        Self::Fixed,
        Self::Security,
    ];

    /// Parses a type token case-insensitively. Returns `None` for anything
    /// outside the six-value vocabulary.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "ADDED" => Some(Self::Added),
            "CHANGED" => Some(Self::Changed),
            "DEPRECATED" => Some(Self::Deprecated),
            "REMOVED" => Some(Self::Removed),
            "FIXED" => Some(Self::Fixed),
            "SECURITY" => Some(Self::Security),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "ADDED",
            Self::Changed => "CHANGED",
            Self::Deprecated => "DEPRECATED",
            Self::Removed => "REMOVED",
            Self::Fixed => "FIXED",
            Self::Security => "SECURITY",
        }
    }

    /// Render order: ADDED first, FIXED second, the rest alphabetically.
    pub(crate) fn sort_key(self) -> (u8, &'static str) {
        match self {
            Self::Added => (0, ""),
            Self::Fixed => (1, ""),
            other => (2, other.as_str()),
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue as supplied by the issue source, mirroring the GitHub REST
/// payload. The pipeline reads only `number`, `title` and `body`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
}

/// One maintainer-edited release note awaiting aggregation
#[derive(Debug, Clone)]
pub struct RawNote {
    pub issue_number: u64,
    pub title: String,
    pub content: String,
}

/// A release note parsed into the type/component/category taxonomy.
/// All text fields are non-empty after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNote {
    pub note_type: NoteType,
    pub component: String,
    pub category: String,
    pub description: String,
    pub issue_number: u64,
}

/// Issue and PR cross-references recovered from free text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkInfo {
    pub issue_link: Option<String>,
    pub issue_number: Option<String>,
    pub pr_links: Vec<String>,
}

/// Span of a `## Release Note` section located inside an issue body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSection {
    pub start: usize,
    pub end: usize,
    pub header: String,
}

/// Notes grouped by type, component and category. Components and categories
/// keep first-insertion order; descriptions within a bucket behave as an
/// insertion-ordered set keyed on exact string equality.
#[derive(Debug, Clone, Default)]
pub struct GroupedChangelog {
    groups: Vec<TypeGroup>,
}

#[derive(Debug, Clone)]
pub struct TypeGroup {
    pub note_type: NoteType,
    pub components: Vec<ComponentGroup>,
}

#[derive(Debug, Clone)]
pub struct ComponentGroup {
    pub name: String,
    pub categories: Vec<CategoryGroup>,
}

#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub name: String,
    pub descriptions: Vec<String>,
}

impl GroupedChangelog {
    /// Inserts a note, creating nesting levels on first sight and dropping
    /// duplicate descriptions within their bucket.
    pub fn insert(&mut self, note: &ParsedNote) {
        let type_idx = match self
            .groups
            .iter()
            .position(|g| g.note_type == note.note_type)
        {
            Some(idx) => idx,
            None => {
                self.groups.push(TypeGroup {
                    note_type: note.note_type,
                    components: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        let components = &mut self.groups[type_idx].components;

        let component_idx = match components.iter().position(|c| c.name == note.component) {
            Some(idx) => idx,
            None => {
                components.push(ComponentGroup {
                    name: note.component.clone(),
                    categories: Vec::new(),
                });
                components.len() - 1
            }
        };
        let categories = &mut components[component_idx].categories;

        let category_idx = match categories.iter().position(|c| c.name == note.category) {
            Some(idx) => idx,
            None => {
                categories.push(CategoryGroup {
                    name: note.category.clone(),
                    descriptions: Vec::new(),
                });
                categories.len() - 1
            }
        };
        let descriptions = &mut categories[category_idx].descriptions;

        if !descriptions.iter().any(|d| d == &note.description) {
            descriptions.push(note.description.clone());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn types(&self) -> &[TypeGroup] {
        &self.groups
    }

    /// Returns an iterator over every (type, component, category, description)
    pub fn iter_entries(&self) -> impl Iterator<Item = (NoteType, &str, &str, &str)> + '_ {
        self.groups.iter().flat_map(|group| {
            group.components.iter().flat_map(move |component| {
                component.categories.iter().flat_map(move |category| {
                    category.descriptions.iter().map(move |description| {
                        (
                            group.note_type,
                            component.name.as_str(),
                            category.name.as_str(),
                            description.as_str(),
                        )
                    })
                })
            })
        })
    }
}
