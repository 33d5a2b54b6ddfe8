//! Helpers for the comma-joined list tag field.
//!
//! A record's `list_tags` holds one or more list names joined by `", "`.
//! Membership in N lists is encoded entirely in this string, so every
//! operation that touches membership goes through these functions to keep
//! split/join behavior uniform.

/// Separator used when joining tags back into the stored string.
pub const TAG_SEPARATOR: &str = ", ";

/// Split a raw tag string into trimmed, non-empty tokens.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct tags in first-occurrence order.
pub fn distinct_tags(raw: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in split_tags(raw) {
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

/// Exact (case-sensitive) membership test against the split tokens.
pub fn contains_tag(raw: &str, tag: &str) -> bool {
    split_tags(raw).iter().any(|t| t == tag)
}

/// Replace the `old` token with `new`, de-duplicating the result.
pub fn rename_tag(raw: &str, old: &str, new: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for tag in split_tags(raw) {
        let tag = if tag == old { new.to_string() } else { tag };
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    join_tags(&out)
}

/// Drop the `tag` token; the result may be empty.
pub fn remove_tag(raw: &str, tag: &str) -> String {
    let out: Vec<String> = distinct_tags(raw).into_iter().filter(|t| t != tag).collect();
    join_tags(&out)
}
