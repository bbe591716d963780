//! Error types for trie operations.

use thiserror::Error;

/// Malformed key input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Keys must contain at least one digit.
    #[error("key is empty")]
    Empty,

    /// A character outside `{'0', '1'}`.
    #[error("invalid digit {found:?} at position {position}")]
    InvalidDigit {
        /// 1-based position of the offending character.
        position: usize,
        /// The offending character.
        found: char,
    },
}

/// Errors returned by [`PatriciaTrie::insert`](crate::PatriciaTrie::insert).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// Key failed validation; nothing was attempted.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// Key is already stored; the trie is unchanged.
    #[error("key {key} already exists")]
    AlreadyExists {
        /// The rejected key.
        key: String,
    },

    /// Key equals a stored key up to trailing zeros, so no bit position can
    /// tell them apart.
    #[error("key {key} is indistinguishable from stored key {existing} under zero padding")]
    Indistinguishable {
        /// The rejected key.
        key: String,
        /// The stored key it collides with.
        existing: String,
    },
}

/// Errors returned by [`PatriciaTrie::delete`](crate::PatriciaTrie::delete).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteError {
    /// Key failed validation; nothing was attempted.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    #[error("trie is empty")]
    EmptyTree,

    #[error("key {key} not found")]
    NotFound {
        /// The key that was searched for.
        key: String,
    },

    /// The structure is corrupt. This is a bug in the trie, not in the caller.
    #[error("integrity violation: {0}")]
    Integrity(#[from] IntegrityError),
}

/// A structural invariant does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// No node links to this node through a real edge.
    #[error("node {key} has no physical parent")]
    OrphanNode {
        /// Key of the unreachable node.
        key: String,
    },

    /// Walking a node's own key from the node never threads back to it.
    #[error("no thread leads back to node {key}")]
    MissingBackEdge {
        /// Key of the node without a back edge.
        key: String,
    },

    /// The node that ends the search for a key does not link to it.
    #[error("search terminus for {key} does not thread to its node")]
    MissingThread {
        /// Key whose terminus thread is missing.
        key: String,
    },
}
