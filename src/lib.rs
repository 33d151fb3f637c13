//! urqjump: a jump-to-location engine for URQ quest scripts
//!
//! This crate resolves the textual reference at or near a cursor
//! position inside a quest-script document (`.qst`) to a named location
//! block, navigating to it if it exists or synthesizing a new block if
//! it does not.
//!
//! # Overview
//!
//! A URQ script is a flat sequence of location blocks:
//!
//! ```text
//! :start
//!     pln You are at the gate.
//!     btn cave, Enter the cave
//! end
//! ```
//!
//! References to locations come in four syntaxes — `[[target|label]]`,
//! `[[target]]`, `btn name`, `goto`/`proc name` — scattered through
//! lines that also carry `&`-separated branch clauses, `;`-comments and
//! `/* */` block comments. The pipeline here normalizes the cursor's
//! line, extracts every candidate reference, picks the one nearest the
//! cursor, validates it, and looks it up in a per-invocation index of
//! `:name` headers.
//!
//! # Architecture
//!
//! - [`document`]: rope-backed buffer view; char-offset addressing
//! - [`line`]: comment/terminator stripping, `&`-branch isolation
//! - [`extract`]: the four reference syntaxes + nearest-candidate selection
//! - [`validate`]: location-name validity, variable-placeholder detection
//! - [`index`]: `:` header scan and first-match lookup
//! - [`create`]: insertion planning and block template rendering
//! - [`jump`]: the command entry point tying the pipeline together
//!
//! The core never mutates the document: it returns a navigation offset
//! or an `(offset, text, cursor)` edit triple that the host applies as a
//! single atomic edit.
//!
//! # Usage
//!
//! This crate backs the `urqjump` binary, a thin CLI host; editor
//! integrations use the same public API:
//!
//! ```
//! use urqjump::config::Settings;
//! use urqjump::document::ScriptDocument;
//! use urqjump::jump::jump;
//!
//! let doc = ScriptDocument::new(":start\n    goto cave\nend\n:cave\nend\n");
//! let outcome = jump(&doc, 16, None, &Settings::default());
//! assert!(outcome.is_ok());
//! ```

// Core pipeline
pub mod document;
pub mod extract;
pub mod index;
pub mod jump;
pub mod line;
pub mod validate;

// Creation path
pub mod create;

// Configuration, errors, status composition
pub mod config;
pub mod error;
pub mod status;
