//! Error types for vintf-bump-edit.

use thiserror::Error;

/// Failure modes for anchored splices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// The anchor line matched zero times or more than once.
    ///
    /// Insertion points must be unique; anything else means the target
    /// sources changed unexpectedly and need to be inspected by hand before
    /// re-running the bump.
    #[error("anchor line {anchor:?} matched {matches} time(s); expected exactly one")]
    AnchorNotFoundOrAmbiguous {
        /// The exact line that was searched for.
        anchor: String,
        /// How many lines matched.
        matches: usize,
    },
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::EditError;

    #[test]
    fn display_names_the_anchor_and_count() {
        let err = EditError::AnchorNotFoundOrAmbiguous {
            anchor: "    // marker".to_string(),
            matches: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("// marker"));
        assert!(msg.contains("2 time(s)"));
    }
}
