//! Error types for the B-tree index.

use thiserror::Error;

use super::NodeId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by the index.
///
/// A missing key is not an error: lookups return `Option` and deletes
/// return `bool`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Node capacity too small for a split to produce two non-empty halves.
    ///
    /// Raised at construction time only.
    #[error("invalid node capacity {capacity}: must be at least {minimum}")]
    InvalidCapacity { capacity: usize, minimum: usize },

    /// Key already present and the tree rejects duplicates.
    ///
    /// Only returned under [`DuplicatePolicy::Reject`](super::config::DuplicatePolicy::Reject).
    #[error("key already present in index")]
    DuplicateKey,

    /// A structural invariant does not hold.
    ///
    /// Produced by `BTreeIndex::validate`. Seeing this outside of a test
    /// means a bug in the split or rebalance code.
    #[error("invariant violated at {node}: {reason}")]
    InvariantViolation { node: NodeId, reason: String },
}

impl Error {
    pub(crate) fn invariant(node: NodeId, reason: impl Into<String>) -> Self {
        Error::InvariantViolation {
            node,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidCapacity {
            capacity: 2,
            minimum: 3,
        };
        assert_eq!(
            format!("{}", err),
            "invalid node capacity 2: must be at least 3"
        );

        let err = Error::DuplicateKey;
        assert_eq!(format!("{}", err), "key already present in index");
    }

    #[test]
    fn test_invariant_display() {
        let err = Error::invariant(NodeId::new(7), "too many keys");
        assert_eq!(
            format!("{}", err),
            "invariant violated at Node(7): too many keys"
        );
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
