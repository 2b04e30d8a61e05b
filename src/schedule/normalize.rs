//! Whitespace cleanup for text scraped out of the schedule markup

/// Collapses every run of ASCII whitespace (newlines included) into a single
/// space and trims both ends.
///
/// Non-ASCII spaces such as NBSP are kept as they are, so a league written
/// `"Premier\u{a0}League"` does not match `"Premier League"`.
///
/// The function is idempotent: normalizing an already normalized string
/// returns it unchanged.
pub fn normalize_text(raw: &str) -> String {
    raw.split(|c: char| c.is_ascii_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
