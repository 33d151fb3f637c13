//! Location-name validation.

use once_cell::sync::Lazy;
use regex::Regex;

// `#var$`, `##var$`, `#%var$` — a name embedding one of these holds a
// runtime variable and cannot be resolved statically.
static TEMPLATE_VARIABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[#%]?[^$]*\$").unwrap());

/// Structurally valid location name: non-empty after trimming and free of
/// the reserved `:` / `&` / `/*` sequences.
pub fn is_structurally_valid(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty()
        && !trimmed.contains(':')
        && !trimmed.contains('&')
        && !trimmed.contains("/*")
}

/// True when the text embeds a variable placeholder anywhere.
pub fn is_template_variable(text: &str) -> bool {
    TEMPLATE_VARIABLE.is_match(text)
}

/// Language keywords, operators and punctuation that can never be
/// location names. Only consulted by the word-under-cursor fallback
/// ([`Settings::word_fallback`]); the regular extraction pipeline never
/// produces these.
///
/// [`Settings::word_fallback`]: crate::config::Settings::word_fallback
pub fn is_reserved_word(text: &str) -> bool {
    const KEYWORDS: &[&str] = &[
        "and", "or", "if", "else", "then", "btn", "pln", "end", "goto", "proc", "act",
    ];
    const OPERATORS: &[&str] = &[
        "*", "+", "-", "/", "\\", "|", "<", ">", "=", "<>", "==", "!=", "<=", ">=",
    ];
    const PUNCTUATION: &[&str] = &[
        "(", ")", "[", "]", "{", "}", ",", ".", ";", ":", "?", "!",
    ];

    let normalized = text.trim().to_lowercase();
    KEYWORDS.contains(&normalized.as_str())
        || OPERATORS.contains(&normalized.as_str())
        || PUNCTUATION.contains(&normalized.as_str())
        || normalized == "$"
}
