//! Error types for the widget crate.

use headline_core::ObjectError;

use crate::dom::DomError;

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the widget layer.
///
/// Widgets themselves are fail-soft: a missing container falls back to the
/// document body, a missing heading is a sentinel branch, empty children
/// produce an empty layout. The only failures that surface are the ones the
/// DOM adapter or the object registry refuse, and those propagate unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A DOM adapter primitive refused an operation.
    #[error("DOM operation failed: {0}")]
    Dom(#[from] DomError),

    /// An object registry operation failed.
    #[error("object registry operation failed: {0}")]
    Object(#[from] ObjectError),
}
