use crate::links::{extract_issue_and_pr_links, pr_number_from_url};
use crate::patterns::{EMPTY_PARENS_PATTERN, INLINE_REFERENCE_PATTERN};
use crate::types::{GroupedChangelog, TypeGroup};

/// Serializes a grouped changelog into the final markdown document.
/// Rendering is a deterministic pure function: identical input always yields
/// byte-identical output. Types render ADDED first, FIXED second, the rest
/// alphabetically; components and categories keep aggregation encounter
/// order.
#[derive(Debug, Clone, Default)]
pub struct MarkdownChangelogFormatter;

impl MarkdownChangelogFormatter {
    #[must_use]
    pub fn format(
        &self,
        grouped: &GroupedChangelog,
        milestone_title: &str,
        date: &str,
        important_text: Option<&str>,
        announcement_text: Option<&str>,
    ) -> String {
        let mut content = String::with_capacity(1024);
        content.push_str(&format!("# {milestone_title}\n\n{date}\n\n"));

        if let Some(text) = important_text.filter(|text| !text.trim().is_empty()) {
            content.push_str(&format!("#### _Important_ **\n - {text}\n\n"));
        }
        if let Some(text) = announcement_text.filter(|text| !text.trim().is_empty()) {
            content.push_str(&format!("#### _Announcement_ **\n - {text}\n\n"));
        }

        content.push_str("\n\n## Changes\n\n");

        let mut groups: Vec<&TypeGroup> = grouped.types().iter().collect();
        groups.sort_by_key(|group| group.note_type.sort_key());

        for group in groups {
            content.push_str(&format!("- [{}]\n", group.note_type));
            for component in &group.components {
                content.push_str(&format!("  - **{}**\n", component.name));
                for category in &component.categories {
                    for description in &category.descriptions {
                        let formatted = annotate_links(description);
                        content.push_str(&format!("      - {} : {}\n", category.name, formatted));
                    }
                }
            }
            content.push('\n');
        }

        content.push_str("---");
        content
    }
}

/// Rewrites a description's inline `Issue ...: PR ...` reference into the
/// canonical link suffix ` (Issue [#N](link) : PR #n1, #n2)`. Descriptions
/// without link information pass through untouched apart from empty-paren
/// cleanup.
fn annotate_links(description: &str) -> String {
    let links = extract_issue_and_pr_links(description);

    let formatted = match (&links.issue_number, &links.issue_link) {
        (Some(number), Some(link)) if !links.pr_links.is_empty() => {
            let stripped = INLINE_REFERENCE_PATTERN.replace(description, "");
            let pr_numbers: Vec<String> = links
                .pr_links
                .iter()
                .filter_map(|url| pr_number_from_url(url))
                .map(|n| format!("#{n}"))
                .collect();
            format!(
                "{} (Issue [#{number}]({link}) : PR {})",
                stripped.trim(),
                pr_numbers.join(", ")
            )
        }
        _ => description.to_string(),
    };

    EMPTY_PARENS_PATTERN
        .replace_all(&formatted, "")
        .trim()
        .to_string()
}
