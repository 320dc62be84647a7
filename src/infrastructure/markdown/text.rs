use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_CHAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#*_`~>\[\]]").expect("valid markup pattern"));

static PAREN_SPAN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.*?\)").expect("valid paren pattern"));

static LIST_MARKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*-\s+").expect("valid list marker pattern"));

/// Lossy plain-text approximation of markdown, for card previews only.
///
/// Steps run in order: drop `# * _ ` ~ > [ ]`, drop every `(...)` span
/// (link targets, but real parentheticals too), then drop leading `- `
/// list markers on every line.
pub fn strip_markdown_markup(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped = MARKUP_CHAR_PATTERN.replace_all(text, "");
    let stripped = PAREN_SPAN_PATTERN.replace_all(&stripped, "");
    LIST_MARKER_PATTERN.replace_all(&stripped, "").into_owned()
}

/// Replace `& < > " '` with entities.
///
/// Used for every title and preview, and as the detail-view fallback when
/// markdown rendering is unavailable or fails.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}
