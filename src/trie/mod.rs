//! The threaded PATRICIA trie.
//!
//! Every node stores a complete key and tests one bit position. A child
//! pointer is a *real edge* when its target tests a strictly later bit and a
//! *thread* otherwise; a thread is either a self-loop (the key resting here)
//! or a back-reference to an ancestor. Searches stop at the first thread, so
//! no pointer is ever null.

mod delete;
mod insert;
mod search;

use std::fmt;

use smallvec::SmallVec;

use crate::arena::{Node, NodeArena, NodeId};
use crate::bits::bit_at;
use crate::config::{Orientation, Side, TrieConfig};

/// Entry state of the trie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Head {
    Empty,
    /// The head node tests bit `0`, so every search leaves it on the side
    /// for bit value `0`. Its other side permanently loops back to itself.
    Rooted(NodeId),
}

/// A PATRICIA trie over binary-string keys.
#[derive(Clone)]
pub struct PatriciaTrie {
    pub(crate) nodes: NodeArena,
    pub(crate) head: Head,
    pub(crate) config: TrieConfig,
}

/// Where a search ended.
#[derive(Clone, Copy, Debug)]
pub enum Terminus<'a> {
    /// The trie is empty; the head holds no key.
    Sentinel,
    /// The node the descent reached. It stores the searched key only if that
    /// key is present.
    Node(NodeRef<'a>),
}

impl<'a> Terminus<'a> {
    /// Key stored at the terminus, if any.
    pub fn key(&self) -> Option<&'a str> {
        match self {
            Terminus::Sentinel => None,
            Terminus::Node(n) => Some(n.key()),
        }
    }

    pub fn node(&self) -> Option<NodeRef<'a>> {
        match self {
            Terminus::Sentinel => None,
            Terminus::Node(n) => Some(*n),
        }
    }

    /// Whether the terminus stores exactly `key`.
    pub fn holds(&self, key: &str) -> bool {
        self.key() == Some(key)
    }
}

/// Borrowed view of one node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    trie: &'a PatriciaTrie,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[inline]
    fn node(&self) -> &'a Node {
        self.trie.nodes.get(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &'a str {
        self.node().key.as_str()
    }

    /// Bit position tested at this node.
    pub fn bit(&self) -> u32 {
        self.node().bit
    }

    pub fn left(&self) -> NodeId {
        self.node().left
    }

    pub fn right(&self) -> NodeId {
        self.node().right
    }

    pub fn link(&self, side: Side) -> NodeId {
        self.node().link(side)
    }

    /// Child selected by bit value `bit` under the trie's orientation.
    pub fn child(&self, bit: u8) -> NodeId {
        self.link(self.trie.config.orientation.side(bit))
    }

    /// Whether the pointer on `side` is a real edge rather than a thread.
    pub fn is_real(&self, side: Side) -> bool {
        self.trie.is_real(self.id, self.link(side))
    }

    pub fn is_head(&self) -> bool {
        self.trie.head == Head::Rooted(self.id)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node();
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", &node.key)
            .field("bit", &node.bit)
            .field("left", &node.left)
            .field("right", &node.right)
            .finish()
    }
}

impl PatriciaTrie {
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            nodes: NodeArena::with_capacity(config.initial_capacity),
            head: Head::Empty,
            config,
        }
    }

    /// Number of stored keys (one per node).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == Head::Empty
    }

    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// Drop every key and return to the empty state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = Head::Empty;
    }

    /// The head node, or `None` while empty.
    pub fn head(&self) -> Option<NodeRef<'_>> {
        match self.head {
            Head::Empty => None,
            Head::Rooted(id) => Some(NodeRef { trie: self, id }),
        }
    }

    /// View of a live node. Stale handles yield `None`.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes.try_get(id).map(|_| NodeRef { trie: self, id })
    }

    /// Stored keys in depth-first order over real edges, head first.
    pub fn keys(&self) -> Keys<'_> {
        let mut stack = SmallVec::new();
        if let Head::Rooted(id) = self.head {
            stack.push(id);
        }
        Keys { trie: self, stack }
    }

    #[inline]
    pub(crate) fn bit(&self, id: NodeId) -> u32 {
        self.nodes.get(id).bit
    }

    #[inline]
    pub(crate) fn is_real(&self, from: NodeId, to: NodeId) -> bool {
        self.bit(to) > self.bit(from)
    }

    /// Real children of `id`, left first.
    pub(crate) fn real_children(&self, id: NodeId) -> impl Iterator<Item = (Side, NodeId)> + '_ {
        let node = self.nodes.get(id);
        [(Side::Left, node.left), (Side::Right, node.right)]
            .into_iter()
            .filter(move |&(_, child)| self.bit(child) > node.bit)
    }

    /// Whether `id` rests its own key on a self-loop.
    ///
    /// The head's side for bit value `1` always loops back but is never
    /// followed by a search, so only its bit-`0` side counts.
    pub(crate) fn has_terminus_loop(&self, id: NodeId) -> bool {
        let node = self.nodes.get(id);
        if self.head == Head::Rooted(id) {
            return node.link(self.config.orientation.side(0)) == id;
        }
        node.left == id || node.right == id
    }

    /// One descent step: the side `key` selects at `id` and its target.
    #[inline]
    pub(crate) fn step(&self, id: NodeId, key: &str) -> (u32, u8, Side, NodeId) {
        let node = self.nodes.get(id);
        let value = bit_at(key, node.bit);
        let side = self.config.orientation.side(value);
        (node.bit, value, side, node.link(side))
    }
}

impl Default for PatriciaTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PatriciaTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

/// Iterator over stored keys. See [`PatriciaTrie::keys`].
pub struct Keys<'a> {
    trie: &'a PatriciaTrie,
    stack: SmallVec<[NodeId; 32]>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children: SmallVec<[NodeId; 2]> =
            self.trie.real_children(id).map(|(_, child)| child).collect();
        // Right pushed first so the left subtree is yielded first.
        self.stack.extend(children.into_iter().rev());
        Some(self.trie.nodes.get(id).key.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.trie.len()))
    }
}
