//! Rope-backed script document.
//!
//! `ScriptDocument` is the in-memory view of one quest-script buffer that
//! the resolution pipeline reads from. It never mutates: the creation path
//! returns an edit triple and the host applies it. All offsets in the
//! public API are **char** offsets, matching how editors address points;
//! byte offsets only appear at the regex boundary inside other modules.

use ropey::Rope;
use serde::Serialize;

/// Half-open char range `[start, end)` within a line or document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Distance from a cursor to this span: 0 when the cursor lies within
    /// `[start, end]` *inclusive* (a cursor sitting right after the last
    /// char still counts as "on" the match), otherwise the gap to the
    /// nearest endpoint.
    pub fn distance_to(&self, offset: usize) -> usize {
        if self.start <= offset && offset <= self.end {
            0
        } else {
            usize::min(
                self.start.abs_diff(offset),
                self.end.abs_diff(offset),
            )
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScriptDocument {
    rope: Rope,
}

impl ScriptDocument {
    pub fn new(text: &str) -> ScriptDocument {
        ScriptDocument {
            rope: Rope::from_str(text),
        }
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    /// The line containing `offset` (without its trailing line break) and
    /// the char offset of the line's first char. An offset equal to the
    /// document length resolves to the last line.
    pub fn line_containing(&self, offset: usize) -> (String, usize) {
        let offset = offset.min(self.rope.len_chars());
        let line_idx = self.rope.char_to_line(offset);
        let line_start = self.rope.line_to_char(line_idx);
        let mut text = self.rope.line(line_idx).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        (text, line_start)
    }

    pub fn slice(&self, span: Span) -> String {
        let start = span.start.min(self.rope.len_chars());
        let end = span.end.min(self.rope.len_chars()).max(start);
        self.rope.slice(start..end).to_string()
    }

    /// Char offsets of every occurrence of `needle`, in document order.
    pub fn occurrences(&self, needle: char) -> Vec<usize> {
        self.rope
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == needle)
            .map(|(i, _)| i)
            .collect()
    }

    /// The identifier word around `offset` (alphanumerics and `_`),
    /// with its span. A cursor at either edge of a word still picks it up.
    pub fn word_at(&self, offset: usize) -> Option<(String, Span)> {
        fn is_word(c: char) -> bool {
            c.is_alphanumeric() || c == '_'
        }

        let len = self.rope.len_chars();
        let at = offset.min(len);
        let mut start = at;
        while start > 0 && self.char_at(start - 1).is_some_and(is_word) {
            start -= 1;
        }
        let mut end = at;
        while end < len && self.char_at(end).is_some_and(is_word) {
            end += 1;
        }
        if start == end {
            return None;
        }
        let span = Span::new(start, end);
        Some((self.slice(span), span))
    }

    /// 1-based line and column for display purposes.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        let col = offset - self.rope.line_to_char(line);
        (line + 1, col + 1)
    }

    /// Byte offset for a char offset; hosts use this to splice the
    /// creation edit into their own `String` buffer.
    pub fn char_to_byte(&self, offset: usize) -> usize {
        self.rope.char_to_byte(offset.min(self.rope.len_chars()))
    }
}
