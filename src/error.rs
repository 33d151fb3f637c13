//! Failure modes of a jump invocation.
//!
//! Every variant renders directly as the status line shown to the user;
//! none of them leaves the document modified. A lookup miss is not an
//! error — it triggers the creation path instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JumpError {
    /// Resolution found nothing to search for or create: no valid
    /// selection, no reference on the cursor's statement.
    #[error("no text found")]
    NoTargetText,

    /// The resolved name embeds a runtime variable placeholder and
    /// cannot be resolved statically. Carries the raw name for display.
    #[error("contains variables: {0}")]
    ContainsVariables(String),
}
