//! Slot arena that owns every trie node.
//!
//! Nodes link to each other through [`NodeId`] handles instead of references,
//! so self-loops and back-references are plain integers and the pointer graph
//! may be cyclic without any aliasing. Freed slots go on a free list and are
//! reused by the next allocation.

use crate::bits::BitKey;
use crate::config::Side;

/// Stable handle to a node slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Slot index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A trie node. Every node stores a complete key.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) key: BitKey,
    /// 1-based bit position tested here; `0` for the head.
    pub(crate) bit: u32,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl Node {
    #[inline]
    pub(crate) fn link(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_link(&mut self, side: Side, to: NodeId) {
        match side {
            Side::Left => self.left = to,
            Side::Right => self.right = to,
        }
    }

    /// Side whose pointer is `to`, left first.
    #[inline]
    pub(crate) fn side_of(&self, to: NodeId) -> Option<Side> {
        if self.left == to {
            Some(Side::Left)
        } else if self.right == to {
            Some(Side::Right)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct NodeArena {
    slots: Vec<Option<Node>>,
    free: Vec<u32>,
    live: usize,
}

impl NodeArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Allocate a node whose pointers both loop back to itself.
    pub(crate) fn alloc(&mut self, key: BitKey, bit: u32) -> NodeId {
        let id = match self.free.pop() {
            Some(idx) => NodeId(idx),
            None => {
                let idx = u32::try_from(self.slots.len()).expect("node arena exceeds u32 handles");
                self.slots.push(None);
                NodeId(idx)
            }
        };
        self.slots[id.index()] = Some(Node {
            key,
            bit,
            left: id,
            right: id,
        });
        self.live += 1;
        id
    }

    /// Free a slot and hand back its node.
    pub(crate) fn release(&mut self, id: NodeId) -> Node {
        let node = self.slots[id.index()]
            .take()
            .expect("released slot must be live");
        self.free.push(id.0);
        self.live -= 1;
        node
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        self.slots[id.index()]
            .as_ref()
            .expect("node handle must refer to a live slot")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.index()]
            .as_mut()
            .expect("node handle must refer to a live slot")
    }

    /// Lookup that tolerates stale or foreign handles.
    #[inline]
    pub(crate) fn try_get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    /// Live nodes in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeId(i as u32), n)))
    }
}
