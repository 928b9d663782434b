//! Error types for the Canvass engine.

use crate::ItemId;
use thiserror::Error;

/// All possible errors from the Canvass engine.
///
/// Bad-but-well-typed input is reported through these variants; the engine
/// never panics on it. Ambiguous ordering is deliberately absent here - it is
/// advisory data on the plan, not a failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The same item id appeared more than once in a sequencing input.
    #[error("duplicate item id: {0}")]
    DuplicateItemId(ItemId),

    /// A tracked field name was empty or whitespace-only.
    #[error("tracked field name must not be blank")]
    BlankTrackedField,

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::DuplicateItemId("q_42".into());
        assert_eq!(err.to_string(), "duplicate item id: q_42");

        let err = Error::BlankTrackedField;
        assert_eq!(err.to_string(), "tracked field name must not be blank");

        let err = Error::InvalidSnapshot("truncated".into());
        assert_eq!(err.to_string(), "invalid snapshot: truncated");
    }
}
