//! The jump command: resolve the reference at the cursor, then navigate
//! or create.
//!
//! Resolution order: a non-empty, structurally valid selection wins
//! verbatim (no proximity heuristics); otherwise the cursor's line is
//! normalized and the extraction pipeline picks the nearest reference;
//! optionally (off by default) the bare word under the cursor is taken
//! as a last resort. The whole pipeline runs to completion inside one
//! command invocation against a snapshot of the document — nothing is
//! cached between calls and the core never edits the buffer itself.

use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::create::{self, LocationEdit};
use crate::document::{ScriptDocument, Span};
use crate::error::JumpError;
use crate::extract;
use crate::index;
use crate::line;
use crate::validate;

/// Outcome of a successful jump invocation. `Existing` is a pure
/// navigation; `Created` carries the edit triple for the host to apply
/// atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Jump {
    Existing { target: usize, name: String },
    Created { edit: LocationEdit, name: String },
}

impl Jump {
    /// The user-facing status line for this outcome (without the
    /// location-count suffix; see [`crate::status::with_location_count`]).
    pub fn status_message(&self) -> String {
        match self {
            Jump::Existing { name, .. } => format!("→ {name}"),
            Jump::Created { name, .. } => format!("✓ {name}"),
        }
    }
}

/// Resolve the target name at `cursor`, check it for variable
/// placeholders, then either find its location header or plan a new
/// block.
pub fn jump(
    doc: &ScriptDocument,
    cursor: usize,
    selection: Option<Span>,
    settings: &Settings,
) -> Result<Jump, JumpError> {
    let name = resolve_target(doc, cursor, selection, settings)?;

    if let Some(target) = index::find_location(doc, &name) {
        let normalized = name.trim().to_lowercase();
        debug!(name = %normalized, target, "jump to existing location");
        return Ok(Jump::Existing {
            target,
            name: normalized,
        });
    }

    let edit = create::render_location(doc, cursor, &name);
    debug!(name = %name, offset = edit.offset, "planned new location");
    Ok(Jump::Created { edit, name })
}

/// The name-resolution entry point: selection, then line extraction,
/// then (when enabled) the word under the cursor. The resolved name is
/// trimmed but otherwise verbatim; names embedding variable placeholders
/// are rejected here.
pub fn resolve_target(
    doc: &ScriptDocument,
    cursor: usize,
    selection: Option<Span>,
    settings: &Settings,
) -> Result<String, JumpError> {
    let target =
        select_target(doc, cursor, selection, settings).ok_or(JumpError::NoTargetText)?;
    if validate::is_template_variable(&target) {
        return Err(JumpError::ContainsVariables(target));
    }
    Ok(target)
}

fn select_target(
    doc: &ScriptDocument,
    cursor: usize,
    selection: Option<Span>,
    settings: &Settings,
) -> Option<String> {
    if let Some(span) = selection.filter(|span| !span.is_empty()) {
        let text = doc.slice(span);
        if validate::is_structurally_valid(&text) {
            return Some(text.trim().to_string());
        }
        // an invalid selection falls through to line extraction
    }

    let (line_text, line_start) = doc.line_containing(cursor);
    let local = cursor.saturating_sub(line_start);
    let (segment, offset) = line::isolate_statement(&line_text, local);
    if !segment.is_empty() {
        let candidates = extract::extract_candidates(&segment);
        if let Some(candidate) = extract::select_nearest(&candidates, offset) {
            return Some(candidate.name.trim().to_string());
        }
    }

    if settings.word_fallback {
        if let Some((word, _)) = doc.word_at(cursor) {
            let word = word.trim();
            if validate::is_structurally_valid(word) && !validate::is_reserved_word(word) {
                return Some(word.to_string());
            }
        }
    }

    None
}
