//! App names from window titles.
//!
//! Window titles follow loose conventions: editors tend to write
//! `"file - project - Editor"`, most other apps `"App - document"`.
//! [`clean_title`] strips annotations and picks the segment most likely to
//! be the application's name.
//!
//! This is a best-effort heuristic, not a parser.  A title that merely
//! contains `" - "` inside a file name will be split anyway.

/// Marker some shells put in front of elevated windows' titles.
const ADMIN_MARKER: &str = "Administrator:";

/// Separator between title segments.
const SEPARATOR: &str = " - ";

/// A way of picking the app name out of an annotation-free title.
type Strategy = fn(&str) -> Option<&str>;

/// Tried in order; the first non-empty result wins.
const STRATEGIES: &[Strategy] = &[trailing_segment, leading_segment, whole_title];

/// Derive a display name for the app owning a window titled `title`.
///
/// Returns an empty string only for an empty (or all-whitespace) title.
/// Cleaning is idempotent: `clean_title(&clean_title(t)) == clean_title(t)`.
pub fn clean_title(title: &str) -> String {
    let mut current = title.trim().to_string();
    // Every pass either returns its input or something strictly shorter.
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }
    let stripped = strip_annotations(title);
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(&stripped))
        .unwrap_or(title)
        .to_string()
}

/// Drop every `[...]` annotation and any leading `Administrator:` marker.
///
/// An annotation and the whitespace around it collapse into one space, so
/// `"a [x] - b"` keeps its separator.
fn strip_annotations(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut rest = title;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']') else {
            break;
        };
        out.push_str(rest[..open].trim_end());
        out.push(' ');
        rest = rest[open + close + 1..].trim_start();
    }
    out.push_str(rest);

    let mut cleaned = out.trim();
    while let Some(after) = cleaned.strip_prefix(ADMIN_MARKER) {
        cleaned = after.trim_start();
    }
    cleaned.to_string()
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// `"file - project - App"` → `"App"`.
fn trailing_segment(title: &str) -> Option<&str> {
    let segments: Vec<&str> = title.split(SEPARATOR).collect();
    if segments.len() < 3 {
        return None;
    }
    segments.last().copied().and_then(non_empty)
}

/// `"App - document"` → `"App"`.
fn leading_segment(title: &str) -> Option<&str> {
    let (first, _) = title.split_once(SEPARATOR)?;
    non_empty(first)
}

fn whole_title(title: &str) -> Option<&str> {
    non_empty(title)
}
