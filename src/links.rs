use crate::patterns::{
    BASE_REPO_PATTERN, HASH_NUMBER_PATTERN, ISSUE_NUMBER_PATTERN, MARKDOWN_ISSUE_PATTERN,
    PLAIN_ISSUE_PATTERN, PR_DIRECT_PATTERN, PR_NUMBER_LIST_PATTERN, PR_SINGLE_PATTERN,
    PULL_NUMBER_PATTERN,
};
use crate::types::LinkInfo;

/// Extracts issue and PR cross-references from free text.
///
/// Issue references are recognized as a markdown link `Issue [#N](URL)` or a
/// plain `Issue URL`; in the plain form the number is derived from a trailing
/// `/issues/<N>` path segment. PR references are direct `PR URL` links first,
/// then bare `PR #N, #M` lists whose URLs are synthesized against the
/// `scheme://host/owner/repo` prefix of the issue link. The returned links
/// preserve first-seen order and contain no duplicates.
///
/// Total over arbitrary input; degrades to an empty result on malformed text.
#[must_use]
pub fn extract_issue_and_pr_links(content: &str) -> LinkInfo {
    if content.is_empty() {
        return LinkInfo::default();
    }

    let mut issue_link = None;
    let mut issue_number = None;

    if let Some(captures) = MARKDOWN_ISSUE_PATTERN.captures(content) {
        if let (Some(number), Some(link)) = (captures.get(1), captures.get(2)) {
            issue_number = Some(number.as_str().to_string());
            issue_link = Some(link.as_str().to_string());
        }
    } else if let Some(captures) = PLAIN_ISSUE_PATTERN.captures(content) {
        if let Some(link) = captures.get(1) {
            let link = link.as_str().to_string();
            issue_number = ISSUE_NUMBER_PATTERN
                .captures(&link)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
            issue_link = Some(link);
        }
    }

    let mut pr_links: Vec<String> = Vec::new();

    for captures in PR_DIRECT_PATTERN.captures_iter(content) {
        if let Some(link) = captures.get(1) {
            let link = link.as_str();
            if !pr_links.iter().any(|existing| existing == link) {
                pr_links.push(link.to_string());
            }
        }
    }

    for list in PR_NUMBER_LIST_PATTERN.find_iter(content) {
        for captures in HASH_NUMBER_PATTERN.captures_iter(list.as_str()) {
            let Some(number) = captures
                .get(1)
                .and_then(|m| m.as_str().parse::<u64>().ok())
            else {
                continue;
            };

            // A direct link with the same trailing number takes precedence
            // over synthesis; the comparison is on the number, not the path
            // text, so `/pull/12` does not shadow `#1`.
            if pr_links
                .iter()
                .any(|link| pr_number_from_url(link) == Some(number))
            {
                continue;
            }
            let Some(link) = issue_link.as_deref() else {
                continue;
            };
            let Some(base) = BASE_REPO_PATTERN.find(link) else {
                continue;
            };
            let constructed = format!("{}/pull/{}", base.as_str(), number);
            if !pr_links.iter().any(|existing| existing == &constructed) {
                pr_links.push(constructed);
            }
        }
    }

    LinkInfo {
        issue_link,
        issue_number,
        pr_links,
    }
}

/// First `PR #N` reference in the text, if any
#[must_use]
pub fn extract_pr_number(content: &str) -> Option<u64> {
    PR_SINGLE_PATTERN
        .captures(content)
        .and_then(|captures| captures.get(1))
        .and_then(|number| number.as_str().parse().ok())
}

/// PR number from a trailing `/pull/<N>` path segment
#[must_use]
pub fn pr_number_from_url(url: &str) -> Option<u64> {
    PULL_NUMBER_PATTERN
        .captures(url)
        .and_then(|captures| captures.get(1))
        .and_then(|number| number.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_issue_link_is_recognized() {
        let links = extract_issue_and_pr_links(
            "Fixed crash Issue [#4029](https://git.example.com/org/repo/issues/4029)",
        );
        assert_eq!(links.issue_number.as_deref(), Some("4029"));
        assert_eq!(
            links.issue_link.as_deref(),
            Some("https://git.example.com/org/repo/issues/4029")
        );
        assert!(links.pr_links.is_empty());
    }

    #[test]
    fn plain_issue_url_derives_number_from_path() {
        let links =
            extract_issue_and_pr_links("Issue https://git.example.com/o/r/issues/42: PR #10");
        assert_eq!(
            links.issue_link.as_deref(),
            Some("https://git.example.com/o/r/issues/42")
        );
        assert_eq!(links.issue_number.as_deref(), Some("42"));
    }

    #[test]
    fn plain_issue_url_without_issues_segment_has_no_number() {
        let links = extract_issue_and_pr_links("Issue https://git.example.com/o/r");
        assert_eq!(
            links.issue_link.as_deref(),
            Some("https://git.example.com/o/r")
        );
        assert_eq!(links.issue_number, None);
    }

    #[test]
    fn text_without_references_yields_empty_result() {
        let links = extract_issue_and_pr_links("Plain description with no cross references");
        assert_eq!(links, LinkInfo::default());
    }

    #[test]
    fn direct_pr_links_keep_first_seen_order_without_duplicates() {
        let links = extract_issue_and_pr_links(
            "PR https://git.example.com/o/r/pull/7 and PR https://git.example.com/o/r/pull/9 \
             again PR https://git.example.com/o/r/pull/7",
        );
        assert_eq!(
            links.pr_links,
            [
                "https://git.example.com/o/r/pull/7",
                "https://git.example.com/o/r/pull/9"
            ]
        );
    }

    #[test]
    fn bare_pr_numbers_synthesize_urls_from_issue_link() {
        let links = extract_issue_and_pr_links(
            "Issue https://git.example.com/o/r/issues/42: PR #10, #11",
        );
        assert_eq!(
            links.pr_links,
            [
                "https://git.example.com/o/r/pull/10",
                "https://git.example.com/o/r/pull/11"
            ]
        );
    }

    #[test]
    fn synthesis_skips_numbers_covered_by_direct_links() {
        let links = extract_issue_and_pr_links(
            "Issue https://git.example.com/o/r/issues/42 \
             PR https://git.example.com/o/r/pull/10 and PR #10, #11",
        );
        assert_eq!(
            links.pr_links,
            [
                "https://git.example.com/o/r/pull/10",
                "https://git.example.com/o/r/pull/11"
            ]
        );
    }

    #[test]
    fn synthesis_compares_pr_numbers_exactly() {
        // A direct link to PR #12 must not shadow bare #1 or #2
        let links = extract_issue_and_pr_links(
            "Issue https://git.example.com/o/r/issues/5 \
             PR https://git.example.com/o/r/pull/12 and PR #1, #2",
        );
        assert_eq!(
            links.pr_links,
            [
                "https://git.example.com/o/r/pull/12",
                "https://git.example.com/o/r/pull/1",
                "https://git.example.com/o/r/pull/2"
            ]
        );
    }

    #[test]
    fn bare_pr_numbers_without_issue_link_are_not_synthesized() {
        let links = extract_issue_and_pr_links("See PR #10, #11");
        assert!(links.pr_links.is_empty());
        assert_eq!(links.issue_link, None);
    }

    #[test]
    fn pr_number_helpers() {
        assert_eq!(extract_pr_number("merged via PR #123 yesterday"), Some(123));
        assert_eq!(extract_pr_number("no reference here"), None);
        assert_eq!(
            pr_number_from_url("https://git.example.com/o/r/pull/55"),
            Some(55)
        );
        assert_eq!(pr_number_from_url("https://git.example.com/o/r"), None);
    }
}
