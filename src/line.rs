//! Statement isolation for a single script line.
//!
//! A physical line can carry block comments (`/* ... */`), a trailing
//! `;`-comment, and several `&`-separated branch clauses. Reference
//! extraction only ever looks at the one clause the cursor sits in, so
//! this module reduces a raw line + cursor offset to that clause and a
//! remapped offset.

use once_cell::sync::Lazy;
use regex::Regex;

// Single-line, non-greedy. An unmatched `/*` is left in place.
static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*.*?\*/").unwrap());

/// Reduce `line` to the `&`-branch containing `cursor`, with the cursor
/// remapped into the branch's local coordinates.
///
/// Block comments are stripped first (the cursor offset is intentionally
/// not remapped for that step). A cursor strictly after the first `;`
/// sits in the trailing comment, so there is nothing to extract: the
/// segment comes back empty with the offset untouched. Otherwise the
/// returned offset is clamped into `[0, segment length]`.
pub fn isolate_statement(line: &str, cursor: usize) -> (String, usize) {
    let stripped = BLOCK_COMMENT.replace_all(line, "");

    let semicolon = stripped.chars().position(|c| c == ';');
    if let Some(at) = semicolon {
        if cursor > at {
            return (String::new(), cursor);
        }
    }
    let statement: String = match semicolon {
        Some(at) => stripped.chars().take(at).collect(),
        None => stripped.into_owned(),
    };

    let mut part_start = 0usize;
    let mut last: (&str, usize) = ("", 0);
    for part in statement.split('&') {
        let part_len = part.chars().count();
        let part_end = part_start + part_len;
        if part_start <= cursor && cursor < part_end {
            return (part.to_string(), cursor - part_start);
        }
        last = (part, part_start);
        // +1 for the consumed separator
        part_start = part_end + 1;
    }

    // Cursor past every part (e.g. at the very end of the line): keep the
    // last part scanned, clamping the offset to its length.
    let (part, start) = last;
    let offset = cursor.saturating_sub(start).min(part.chars().count());
    (part.to_string(), offset)
}
