//! Status-line composition.
//!
//! Message text is composed as a pure function of the message and the
//! live document, so hosts can route it to a status bar, stdout, or a
//! log line without the core knowing which.

use crate::document::ScriptDocument;

/// Append the live count of `:` occurrences, the rough "how many
/// locations does this script have" signal quest authors watch.
pub fn with_location_count(message: &str, doc: &ScriptDocument) -> String {
    format!("{message}. Locs: {}", doc.occurrences(':').len())
}
