//! Spell name → filesystem-safe slug.
//!
//! The slug names all three assets of a spell, so it has to be stable across
//! runs: re-processing a deck overwrites the same files.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lower-case, trim, drop everything but `[a-z0-9]`, whitespace and `-`,
/// then turn each whitespace run into a single `-`.
///
/// May return an empty string when the name has no allowed characters.
pub fn slugify(name: &str) -> String {
    let s = name.trim().to_lowercase();
    let s = DISALLOWED.replace_all(&s, "");
    // Removing characters can expose whitespace at either end ("Fly !" → "fly ").
    WHITESPACE_RUN.replace_all(s.trim(), "-").into_owned()
}
