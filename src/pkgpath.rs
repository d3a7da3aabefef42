//! Slash-separated package path helpers.
//!
//! Package paths are import paths (`example.com/apis/core/v1`), not filesystem
//! paths, so these helpers never consult the host separator. Empty and
//! separator-free inputs behave like the import-path conventions the
//! declaration loader uses: `dir("")` and `dir("v1")` are both `"."`, and
//! `base("")` is `"."`.

/// Everything before the last `/`, with trailing separators removed.
pub fn dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => {
            let parent = path[..idx].trim_end_matches('/');
            if parent.is_empty() {
                "/"
            } else {
                parent
            }
        }
        None => ".",
    }
}

/// The last element of the path.
pub fn base(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Title-case each alphanumeric run (`mushroom-kingdom` -> `Mushroom-Kingdom`).
pub fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}
