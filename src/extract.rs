//! Reference extraction and nearest-candidate selection.
//!
//! Four reference syntaxes can name a location on a script line:
//!
//! | Syntax | Example | Captured name |
//! |--------|---------|---------------|
//! | Labeled link | `[[target\|label]]` | the label |
//! | Bare link | `[[target]]` | the target |
//! | Button | `btn Start Game, desc` | the word run after `btn` |
//! | Jump/procedure | `goto start else goto end` | the name after the keyword |
//!
//! The labeled form captures the *label*: in this dialect the visible
//! text usually coincides with the canonical location name.
//!
//! Every syntax is matched independently over the whole normalized
//! segment and all non-overlapping matches are pooled; the selector then
//! picks the candidate nearest the cursor. Spans are char ranges so that
//! proximity and length comparisons behave on Cyrillic scripts.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::Span;
use crate::validate::is_structurally_valid;

/// A raw extracted reference: the capture as matched (untrimmed) plus its
/// char span within the segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub span: Span,
}

static WIKI_LABELED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^|\]]+)\|([^|\]]+)\]\]").unwrap());
static WIKI_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[([^|\]]+)\]\]").unwrap());
static BUTTON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bbtn\s+([^,;&\s]+(?:\s+[^,;&\s]+)*)").unwrap());
// Keyword + mandatory whitespace; the name after it is scanned by hand
// because its end condition is a lookahead (` else`, `;`, `&`, `/*`, EOS).
static JUMP_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:goto|proc)\s+").unwrap());

/// All candidates from all four syntaxes, in syntax-priority order
/// (labeled link, bare link, button, jump). Captures whose trimmed text
/// is not a structurally valid location name are dropped here.
pub fn extract_candidates(segment: &str) -> Vec<Candidate> {
    let mut out = Vec::new();
    for caps in WIKI_LABELED.captures_iter(segment) {
        if let Some(label) = caps.get(2) {
            push_candidate(&mut out, segment, label);
        }
    }
    for caps in WIKI_BARE.captures_iter(segment) {
        if let Some(target) = caps.get(1) {
            push_candidate(&mut out, segment, target);
        }
    }
    for caps in BUTTON.captures_iter(segment) {
        if let Some(name) = caps.get(1) {
            push_candidate(&mut out, segment, name);
        }
    }
    jump_candidates(segment, &mut out);
    out
}

/// Pick the candidate nearest the cursor. Ties go to the shorter trimmed
/// name, then to whichever came first in syntax-priority, match-order
/// iteration (the strict `<` comparisons keep the earliest).
pub fn select_nearest(candidates: &[Candidate], cursor: usize) -> Option<Candidate> {
    let mut best: Option<(&Candidate, usize, usize)> = None;
    for candidate in candidates {
        let distance = candidate.span.distance_to(cursor);
        let length = candidate.name.trim().chars().count();
        let closer = match best {
            None => true,
            Some((_, best_distance, best_length)) => {
                distance < best_distance || (distance == best_distance && length < best_length)
            }
        };
        if closer {
            best = Some((candidate, distance, length));
        }
    }
    best.map(|(candidate, _, _)| candidate.clone())
}

fn push_candidate(out: &mut Vec<Candidate>, segment: &str, capture: regex::Match) {
    if !is_structurally_valid(capture.as_str()) {
        return;
    }
    out.push(Candidate {
        name: capture.as_str().to_string(),
        span: char_span(segment, capture.start(), capture.end()),
    });
}

fn char_span(text: &str, start_byte: usize, end_byte: usize) -> Span {
    let start = text[..start_byte].chars().count();
    let end = start + text[start_byte..end_byte].chars().count();
    Span::new(start, end)
}

/// `goto name` / `proc name` extraction. The name is the shortest
/// non-empty run of chars outside `; & / *` after the keyword such that
/// the text at the run's end is a stop position: whitespace + the word
/// `else`, optional whitespace + `;`/`&`/`/*`, or end of segment. A run
/// with no stop position (e.g. `goto a/b`) yields no candidate.
fn jump_candidates(segment: &str, out: &mut Vec<Candidate>) {
    let chars: Vec<char> = segment.chars().collect();
    let mut consumed = 0usize;
    for keyword in JUMP_KEYWORD.find_iter(segment) {
        let keyword_span = char_span(segment, keyword.start(), keyword.end());
        // Non-overlapping with the previous keyword's captured name.
        if keyword_span.start < consumed {
            continue;
        }
        let name_start = keyword_span.end;
        let mut run_end = name_start;
        while run_end < chars.len() && !is_stop_char(chars[run_end]) {
            run_end += 1;
        }
        if run_end == name_start {
            continue;
        }
        let Some(name_end) = (name_start + 1..=run_end).find(|&at| stops_here(&chars, at)) else {
            continue;
        };
        consumed = name_end;
        let name: String = chars[name_start..name_end].iter().collect();
        if is_structurally_valid(&name) {
            out.push(Candidate {
                name,
                span: Span::new(name_start, name_end),
            });
        }
    }
}

fn is_stop_char(c: char) -> bool {
    matches!(c, ';' | '&' | '/' | '*')
}

fn stops_here(chars: &[char], at: usize) -> bool {
    if at == chars.len() {
        return true;
    }
    let mut i = at;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    // whitespace then a trailing `else` clause at a word boundary
    if i > at
        && chars[i..].starts_with(&['e', 'l', 's', 'e'])
        && chars
            .get(i + 4)
            .is_none_or(|c| !(c.is_alphanumeric() || *c == '_'))
    {
        return true;
    }
    if i < chars.len() && matches!(chars[i], ';' | '&') {
        return true;
    }
    if chars[i..].starts_with(&['/', '*']) {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nearest(segment: &str, cursor: usize) -> Option<String> {
        let candidates = extract_candidates(segment);
        select_nearest(&candidates, cursor).map(|c| c.name.trim().to_string())
    }

    #[test]
    fn labeled_link_captures_the_label_not_the_target() {
        assert_eq!(
            nearest("[[chapter1|Go to Chapter One]]", 3),
            Some("Go to Chapter One".to_string())
        );
    }

    #[test]
    fn bare_link_captures_the_target() {
        assert_eq!(nearest("see [[chapter1]] now", 6), Some("chapter1".to_string()));
    }

    #[test]
    fn button_captures_the_full_word_run() {
        let candidates = extract_candidates("btn Start Game, go");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Start Game");
        assert_eq!(candidates[0].span, Span::new(4, 14));
    }

    #[test]
    fn jump_name_stops_before_else_clause() {
        assert_eq!(
            nearest("goto start else goto end", 5),
            Some("start".to_string())
        );
        assert_eq!(
            nearest("goto start else goto end", 22),
            Some("end".to_string())
        );
    }

    #[test]
    fn jump_name_stops_before_comment_opener() {
        let candidates = extract_candidates("proc rescue /*later*/");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "rescue");
        assert_eq!(candidates[0].span, Span::new(5, 11));
    }

    #[test]
    fn jump_name_with_bare_slash_never_matches() {
        assert!(extract_candidates("goto a/b").is_empty());
    }

    #[test]
    fn proc_keyword_requires_word_boundary() {
        assert!(extract_candidates("reproc start").is_empty());
    }

    #[test]
    fn nearest_candidate_wins_over_an_earlier_match() {
        // cursor sits on the second button
        assert_eq!(
            nearest("btn first & btn second", 15),
            Some("second".to_string())
        );
    }

    #[test]
    fn equal_distance_prefers_the_shorter_name() {
        // "aaaa" ends at 8, "zz" starts at 14; cursor 11 is 3 from both,
        // and the longer name comes first in pool order
        let candidates = extract_candidates("btn aaaa&goto zz");
        let chosen = select_nearest(&candidates, 11).unwrap();
        assert_eq!(chosen.name, "zz");
    }

    #[test]
    fn candidates_failing_structural_validation_are_dropped() {
        // the bare-link target embeds a branch separator
        assert!(extract_candidates("[[a&b]]").is_empty());
    }

    /// Brackets are not button stop chars, so the `btn` run swallows a
    /// following link; at a shared-span cursor the link wins only by the
    /// shorter-name tie-break.
    #[test]
    fn pooled_syntaxes_compete_by_distance_then_length() {
        let segment = "btn menu [[intro]]";
        assert_eq!(nearest(segment, 4), Some("menu [[intro]]".to_string()));
        assert_eq!(nearest(segment, 12), Some("intro".to_string()));
    }

    #[test]
    fn cyrillic_names_and_spans() {
        let candidates = extract_candidates("goto старт");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "старт");
        assert_eq!(candidates[0].span, Span::new(5, 10));
    }

    #[test]
    fn empty_pool_selects_nothing() {
        assert_eq!(select_nearest(&[], 0), None);
    }
}
