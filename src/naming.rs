//! Name sanitizing for sqlframe
//!
//! Labels taken from spreadsheets and CSV headers ("U.S. President",
//! "Canal+", "father-son") are awkward as SQL identifiers. `sanitize` turns
//! them into lowercase names that can be used unquoted.

use std::sync::OnceLock;

use regex::Regex;

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \-]").expect("valid separator pattern"))
}

fn dropped() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"['.()+]").expect("valid dropped-character pattern"))
}

/// Make a label usable as a column or table name
///
/// Spaces and hyphens become underscores; apostrophes, periods,
/// parentheses and plus signs are removed; the result is lowercased.
///
/// # Example
/// ```
/// # use sqlframe::naming::sanitize;
/// assert_eq!(sanitize("U.S. President"), "us_president");
/// ```
pub fn sanitize(label: &str) -> String {
    let underscored = separators().replace_all(label, "_");
    dropped().replace_all(&underscored, "").to_lowercase()
}
