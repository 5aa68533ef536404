use once_cell::sync::Lazy;
use regex::Regex;

/// Head of a categorized block: `[Type][Component][Category]` with optional
/// `-`-prefixed bullet separators between brackets and before the description.
pub static NOTE_HEAD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[([^\[\]\r\n]+)\]\s*(?:-\s*)?\[([^\[\]\r\n]+)\]\s*(?:-\s*)?\[([^\[\]\r\n]+)\]\s*(?:-\s*)?",
    )
    .expect("Failed to compile note head regex")
});

/// A bracket holding one of the six recognized types, used to terminate the
/// description of the preceding block
pub static TYPE_BRACKET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[(?:ADDED|CHANGED|DEPRECATED|REMOVED|FIXED|SECURITY)\]")
        .expect("Failed to compile type bracket regex")
});

/// Head of a bare `[TYPE] description` note, restricted to the six
/// recognized types so arbitrary bracketed tokens do not form heads
pub static TYPE_ONLY_HEAD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[(ADDED|CHANGED|DEPRECATED|REMOVED|FIXED|SECURITY)\]\s*(?:-\s*)?")
        .expect("Failed to compile type only head regex")
});

/// A run of description text outside brackets, whitespace, and dashes,
/// used to salvage the description of a bare typed note
pub static TEXT_TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\[\]\s\-]+").expect("Failed to compile text token regex"));

/// Optional bracket triple at the start of extracted fallback content
pub static BRACKET_TRIPLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)^\s*\[([^\[\]\r\n]+)\]\s*(?:-\s*)?(?:\[([^\[\]\r\n]+)\]\s*(?:-\s*)?)?(?:\[([^\[\]\r\n]+)\]\s*(?:-\s*)?)?(.*)$",
    )
    .expect("Failed to compile bracket triple regex")
});

pub static H3_SECTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)###\s*Release\s*Notes?\s*(?:\(.*?\))?\s*\n")
        .expect("Failed to compile h3 section regex")
});

pub static H2_SECTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)##\s*Release\s*Notes?\s*(?:\(.*?\))?\s*\n")
        .expect("Failed to compile h2 section regex")
});

pub static INLINE_LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Release\s*Notes?\s*:\s*").expect("Failed to compile inline label regex")
});

pub static FENCE_SECTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)```\s*release-note\s*\n").expect("Failed to compile fence section regex")
});

/// Heading or fence markers that end an extracted section
pub static HEADING_END_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n#").expect("Failed to compile heading end regex"));

pub static FENCE_END_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```").expect("Failed to compile fence end regex"));

/// Loose scan for anything that looks like a release note, capped at the
/// next heading or end of text
pub static LAST_RESORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(?:release\s*note|changelog|changes?)(?:\s*:|>|\n)\s*(.+?)(?:\n#|\z)")
        .expect("Failed to compile last resort regex")
});

/// Runs of blank lines, collapsed to a single newline during cleaning
pub static BLANK_LINES_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("Failed to compile blank lines regex"));

/// Markdown issue reference: `Issue [#N](URL)`
pub static MARKDOWN_ISSUE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Issue\s+\[#(\d+)\]\((https?://[^\s)]+)\)")
        .expect("Failed to compile markdown issue regex")
});

/// Plain issue reference: `Issue URL`. The URL match excludes `:` so that a
/// trailing `: PR ...` suffix does not bleed into the link.
pub static PLAIN_ISSUE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Issue\s+(https?://[^\s:)]+)").expect("Failed to compile plain issue regex")
});

pub static ISSUE_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/issues/(\d+)").expect("Failed to compile issue number regex"));

pub static PR_DIRECT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)PR\s+(https?://[^\s)]+)").expect("Failed to compile direct PR regex")
});

/// Bare PR number lists: `PR #10, #11`
pub static PR_NUMBER_LIST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bPR\s+#\d+(?:\s*,\s*#\d+)*").expect("Failed to compile PR number list regex")
});

pub static HASH_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(\d+)").expect("Failed to compile hash number regex"));

pub static PULL_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/pull/(\d+)").expect("Failed to compile pull number regex"));

pub static PR_SINGLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)PR\s*#(\d+)").expect("Failed to compile single PR regex"));

/// `scheme://host/owner/repo` prefix of a repository URL
pub static BASE_REPO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[^/\s]+/[^/\s]+/[^/\s]+").expect("Failed to compile base repo regex")
});

/// An inline `Issue ...: PR ...` reference inside a description, stripped
/// before the canonical link suffix is appended
pub static INLINE_REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)Issue\s+(?:https?://[^\s:)]+|\[#\d+\]\([^)]+\))(?:\s*:\s*PR\s*#\d+(?:\s*,\s*#\d+)*)?",
    )
    .expect("Failed to compile inline reference regex")
});

pub static EMPTY_PARENS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*\)").expect("Failed to compile empty parens regex"));

/// A literal `## Release Note` heading line
pub static RELEASE_NOTE_HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^##\s*Release\s*Note\s*$")
        .expect("Failed to compile release note heading regex")
});

/// The next `##` heading, horizontal rule, or end of text after a section
pub static NEXT_SECTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n(?:##[^#]|---|\z)").expect("Failed to compile next section regex")
});
