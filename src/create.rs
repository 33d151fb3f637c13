//! New-location synthesis: where to insert, and what.
//!
//! On a lookup miss the block goes after the first `end` line following
//! the cursor, falling back to the end of the document. The rendered
//! template carries a cursor marker so the host can land the caret on
//! the stub statement of the fresh block.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::document::{ScriptDocument, Span};

// A whole line of `end`, allowing indentation and a `;`-comment.
static END_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*end\s*(?:;.*)?$").unwrap());

const CURSOR_MARKER: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
    pub offset: usize,
    pub needs_leading_newline: bool,
}

/// The atomic edit triple for the creation path: the host inserts `text`
/// at `offset` and moves the caret to `cursor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationEdit {
    pub offset: usize,
    pub text: String,
    pub cursor: usize,
}

/// Decide where the new block goes. The first `end` line strictly after
/// the cursor wins; the insertion offset lands immediately after that
/// line's terminator. Without one, the block goes to the document end.
pub fn plan_insertion(doc: &ScriptDocument, cursor: usize) -> InsertionPoint {
    let mut offset = doc.len_chars();
    let tail = doc.slice(Span::new(cursor, doc.len_chars()));
    if let Some(found) = END_LINE.find(&tail) {
        offset = cursor + tail[..found.end()].chars().count();
        if doc.char_at(offset) == Some('\n') {
            offset += 1;
        }
    }
    let needs_leading_newline = offset > 0 && doc.char_at(offset - 1) != Some('\n');
    InsertionPoint {
        offset,
        needs_leading_newline,
    }
}

/// Render the block for `name` at an insertion point. The marker's char
/// position becomes the final cursor; every marker char is removed from
/// the inserted text.
pub fn instantiate(point: InsertionPoint, name: &str) -> LocationEdit {
    let prefix = if point.needs_leading_newline { "\n" } else { "" };
    let rendered = format!("{prefix}\n:{name} \n    pln {CURSOR_MARKER} \n    end\n");
    let marker = rendered.chars().position(|c| c == CURSOR_MARKER);
    LocationEdit {
        offset: point.offset,
        text: rendered.replace(CURSOR_MARKER, ""),
        cursor: point.offset + marker.unwrap_or(0),
    }
}

/// Plan + instantiate in one step.
pub fn render_location(doc: &ScriptDocument, cursor: usize, name: &str) -> LocationEdit {
    instantiate(plan_insertion(doc, cursor), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_lands_after_the_next_end_line() {
        //                 0         1
        //                 0123456789012345678
        let doc = ScriptDocument::new(":start\npln x\nend\nmore\n");
        let point = plan_insertion(&doc, 3);
        // "end" line terminates at char 16; offset steps past it
        assert_eq!(point.offset, 17);
        assert!(!point.needs_leading_newline);
    }

    #[test]
    fn insertion_defaults_to_document_end() {
        let doc = ScriptDocument::new(":start\npln x\n");
        let point = plan_insertion(&doc, 0);
        assert_eq!(point.offset, 13);
        assert!(!point.needs_leading_newline);
    }

    #[test]
    fn missing_final_newline_requires_a_leading_one() {
        let doc = ScriptDocument::new(":start\npln x");
        let point = plan_insertion(&doc, 0);
        assert_eq!(point.offset, 12);
        assert!(point.needs_leading_newline);
    }

    #[test]
    fn end_line_may_be_indented_and_commented() {
        let doc = ScriptDocument::new("pln a\n    end ; closes start\nrest\n");
        let point = plan_insertion(&doc, 0);
        assert_eq!(point.offset, 29);
    }

    #[test]
    fn end_must_fill_its_line() {
        // "append" and "end game" are not block terminators
        let doc = ScriptDocument::new("append\nend game\n");
        let point = plan_insertion(&doc, 0);
        assert_eq!(point.offset, doc.len_chars());
    }

    #[test]
    fn search_starts_strictly_after_the_cursor() {
        let doc = ScriptDocument::new("end\nmiddle\nend\n");
        // cursor past the first `end` line: only the second one counts
        let point = plan_insertion(&doc, 5);
        assert_eq!(point.offset, 15);
    }

    #[test]
    fn template_renders_with_marker_removed() {
        let edit = instantiate(
            InsertionPoint {
                offset: 10,
                needs_leading_newline: false,
            },
            "cave",
        );
        assert_eq!(edit.text, "\n:cave \n    pln  \n    end\n");
        // marker sat right after "    pln " -> char 16 of the template
        assert_eq!(edit.cursor, 26);
    }

    #[test]
    fn leading_newline_shifts_the_cursor() {
        let edit = instantiate(
            InsertionPoint {
                offset: 4,
                needs_leading_newline: true,
            },
            "cave",
        );
        assert!(edit.text.starts_with("\n\n:cave"));
        assert_eq!(edit.cursor, 21);
    }
}
