//! # threaded-patricia
//!
//! A PATRICIA trie over binary-string keys whose nodes link through threads:
//! instead of null children, a pointer either descends to a node testing a
//! later bit or loops back to the node itself or an ancestor. Every node
//! stores one complete key, so `n` keys occupy exactly `n` nodes.
//!
//! Search, insert and delete all run in O(key length) bit tests; delete
//! additionally walks the real edges once to find a node's parent. There is
//! no rebalancing.
//!
//! ## Example
//!
//! ```rust
//! use threaded_patricia::PatriciaTrie;
//!
//! let mut trie = PatriciaTrie::new();
//! trie.insert("1000").unwrap();
//! trie.insert("1010").unwrap();
//!
//! assert!(trie.contains("1010"));
//! assert_eq!(trie.search("1000").key(), Some("1000"));
//!
//! trie.delete("1000").unwrap();
//! assert!(!trie.contains("1000"));
//! assert_eq!(trie.len(), 1);
//! ```
//!
//! ## Tracing
//!
//! The `*_with` variants of each operation report every checkpoint (node
//! visited, bit tested, splice, deletion case) to an [`Observer`]. Mutations
//! are also logged through `tracing`.

#![deny(unsafe_op_in_unsafe_fn)]

mod arena;
pub mod bits;
pub mod config;
mod debug;
pub mod error;
pub mod observe;
mod shared;
mod trie;

pub use arena::NodeId;
pub use bits::{bit_at, first_diff_bit, BitKey};
pub use config::{Orientation, Side, TrieConfig};
pub use debug::{Edge, EdgeKind, NodeView, Snapshot};
pub use error::{DeleteError, InsertError, IntegrityError, KeyError};
pub use observe::{DeleteCase, NoopObserver, Observer, Recorder, Step};
pub use shared::SharedTrie;
pub use trie::{Keys, NodeRef, PatriciaTrie, Terminus};

#[cfg(test)]
mod proptests;
