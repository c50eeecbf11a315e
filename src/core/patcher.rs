use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::core::formatter::STANDARD_SUMMARY;

/// Label that marks the managed bullet inside the description's list.
pub const VARIANT_BULLET_LABEL: &str = "Available Variants";

const LIST_OPEN_PATTERN: &str = r"(?i)<ul[^>]*>";

/// Reconcile the "Available Variants" bullet of a description document with
/// the given summary, leaving every other byte of the document untouched.
///
/// A non-empty summary leaves the document with exactly one bullet: existing
/// copies are replaced (duplicates collapse to one), or a new bullet is
/// inserted as the first item of the first unordered list. An empty or
/// `"Standard"` summary removes every copy. Applying the same summary twice
/// produces no further change.
///
/// Fails open: when the document cannot be patched (no list structure to
/// insert into), the input is returned unchanged rather than corrupted.
pub fn apply_variant_summary(html: &str, summary: &str) -> String {
    match patch_document(html, summary) {
        Some(patched) => patched,
        None => {
            warn!("Description has no list structure to patch, leaving it unchanged");
            html.to_string()
        }
    }
}

fn patch_document(html: &str, summary: &str) -> Option<String> {
    let bullet_re = Regex::new(&bullet_pattern()).ok()?;
    let summary = summary.trim();

    // An empty or sentinel summary means the bullet has nothing to say:
    // delete every copy, including duplicates left behind by earlier bugs.
    if summary.is_empty() || summary == STANDARD_SUMMARY {
        let matches = bullet_re.find_iter(html).count();
        if matches > 0 {
            debug!("Removing {} variant bullet(s)", matches);
        }
        return Some(bullet_re.replace_all(html, "").into_owned());
    }

    let bullet = format!("<li><strong>{VARIANT_BULLET_LABEL}:</strong> {summary}</li>");

    if bullet_re.is_match(html) {
        // Replace the first occurrence, delete the rest. Never append: the
        // single-bullet invariant must hold from any starting state.
        let mut replaced = false;
        let patched = bullet_re.replace_all(html, |_: &Captures| {
            if replaced {
                String::new()
            } else {
                replaced = true;
                bullet.clone()
            }
        });
        return Some(patched.into_owned());
    }

    let list_re = Regex::new(LIST_OPEN_PATTERN).ok()?;
    let opening = list_re.find(html)?;

    let mut patched = String::with_capacity(html.len() + bullet.len() + 1);
    patched.push_str(&html[..opening.end()]);
    patched.push('\n');
    patched.push_str(&bullet);
    patched.push_str(&html[opening.end()..]);

    debug!("Inserted variant bullet at the top of the first list");
    Some(patched)
}

/// Match a variant bullet from `<li>` to the nearest `</li>`, tolerating
/// whitespace and newlines between the item open tag and the bold label.
/// The upstream document generator may or may not break the line there.
fn bullet_pattern() -> String {
    format!(r"(?is)<li>\s*<(?:strong|b)>\s*{VARIANT_BULLET_LABEL}\s*:?\s*</(?:strong|b)>.*?</li>")
}
