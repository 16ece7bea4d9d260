//! Crate-wide error taxonomy
//!
//! Two of these are recoverable by the caller: `PositionOutOfBounds`
//! (reject the edit, state untouched) and `Protocol` (drop the payload,
//! state untouched). The rest signal protocol violations or corrupted
//! input and abort the operation that raised them; no operation leaves
//! the document partially mutated on failure.

use crate::crdt::text::ItemId;
use thiserror::Error;

/// Result type alias using [`CrdtError`]
pub type Result<T> = std::result::Result<T, CrdtError>;

/// Errors produced by the CRDT engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrdtError {
    /// An item's sequence number does not immediately follow the last
    /// known sequence number for its agent (version-vector gap).
    #[error("operations out of order for agent {agent}: expected seq {expected}, got {got}")]
    OutOfOrder {
        agent: String,
        expected: u64,
        got: u64,
    },

    /// An origin (or reconciliation) reference to an item that is not
    /// present in the target sequence. The caller violated the
    /// precondition that origins be integrated first.
    #[error("item {0} cannot be found in document")]
    MissingItem(ItemId),

    /// A position request past the document's visible length.
    #[error("position {position} past end of document (visible length {length})")]
    PositionOutOfBounds { position: usize, length: usize },

    /// A merge pass integrated nothing while items remain unresolved:
    /// the source has a gap or cycle in its dependency graph.
    #[error("merge not making progress: {remaining} items unresolved")]
    MergeStalled { remaining: usize },

    /// Malformed wire payload, rejected before any merge was attempted.
    #[error("protocol error: {0}")]
    Protocol(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CrdtError::OutOfOrder {
            agent: "alice".to_string(),
            expected: 3,
            got: 5,
        };
        assert_eq!(
            err.to_string(),
            "operations out of order for agent alice: expected seq 3, got 5"
        );

        let err = CrdtError::MissingItem(ItemId::new("bob".to_string(), 7));
        assert_eq!(err.to_string(), "item bob:7 cannot be found in document");
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = CrdtError::PositionOutOfBounds {
            position: 10,
            length: 4,
        };
        assert_eq!(
            err.to_string(),
            "position 10 past end of document (visible length 4)"
        );
    }
}
