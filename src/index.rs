//! Location-header index.
//!
//! Built fresh from the live document on every invocation; the document
//! is the sole source of truth and nothing is cached across commands.
//! A line declares a location iff, trimmed, it starts with `:` and
//! contains no `&` (a location cannot be declared inside a branch
//! clause). Uniqueness is not enforced: lookup returns the first header
//! in document order.

use itertools::Itertools;
use serde::Serialize;
use tracing::trace;

use crate::document::ScriptDocument;

/// One location header: its normalized (trimmed + lowercased) name and
/// the char offset of the `:` that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationEntry {
    pub name: String,
    pub position: usize,
}

/// Every location header in document order.
pub fn locations(doc: &ScriptDocument) -> Vec<LocationEntry> {
    let mut current_header_line = None;
    doc.occurrences(':')
        .into_iter()
        .filter_map(|position| {
            let (line, line_start) = doc.line_containing(position);
            // later `:` chars on an already-indexed header line (a colon
            // inside its `;`-comment) belong to the same entry
            if current_header_line == Some(line_start) {
                return None;
            }
            let trimmed = line.trim();
            if !trimmed.starts_with(':') || trimmed.contains('&') {
                return None;
            }
            current_header_line = Some(line_start);
            Some(LocationEntry {
                name: header_name(trimmed),
                position,
            })
        })
        .collect_vec()
}

/// Char offset of the first header whose normalized name equals `name`
/// (compared trimmed + lowercased).
pub fn find_location(doc: &ScriptDocument, name: &str) -> Option<usize> {
    let needle = name.trim().to_lowercase();
    let found = locations(doc)
        .into_iter()
        .find(|entry| entry.name == needle);
    trace!(name = %needle, found = found.is_some(), "location lookup");
    found.map(|entry| entry.position)
}

// Header name: text after the leading `:`, cut at the first `;`-comment,
// trimmed and lowercased.
fn header_name(trimmed_line: &str) -> String {
    trimmed_line[1..]
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let doc = ScriptDocument::new(":start\n    pln ok\nend\n:other\nend\n");
        assert_eq!(find_location(&doc, "START"), Some(0));
        assert_eq!(find_location(&doc, "Other"), Some(22));
    }

    #[test]
    fn first_header_wins_on_duplicates() {
        let doc = ScriptDocument::new(":twice\nend\n:twice\nend\n");
        assert_eq!(find_location(&doc, "twice"), Some(0));
    }

    #[test]
    fn branch_lines_are_not_headers() {
        let doc = ScriptDocument::new(":real\nend\nif x then goto a & :fake\n");
        assert_eq!(find_location(&doc, "fake"), None);
        assert_eq!(find_location(&doc, "real"), Some(0));
    }

    #[test]
    fn header_comment_is_stripped_from_the_name() {
        let doc = ScriptDocument::new("intro\n  :Старт ; entry point\nend\n");
        assert_eq!(find_location(&doc, "старт"), Some(8));
    }

    #[test]
    fn colon_inside_a_header_comment_does_not_duplicate_the_entry() {
        let doc = ScriptDocument::new(":start ; note: entry\nend\n");
        let all = locations(&doc);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "start");
        assert_eq!(all[0].position, 0);
    }

    #[test]
    fn listing_preserves_document_order() {
        let doc = ScriptDocument::new(":b\nend\n:a\nend\n");
        let names = locations(&doc)
            .into_iter()
            .map(|entry| entry.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn missing_location_reports_none() {
        let doc = ScriptDocument::new(":start\nend\n");
        assert_eq!(find_location(&doc, "absent"), None);
    }
}
