use super::{Head, NodeRef, PatriciaTrie, Terminus};
use crate::arena::NodeId;
use crate::observe::{NoopObserver, Observer, Step};

/// Outcome of a descent from the head.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Descent {
    /// Last node entered through a real edge (the head if none was).
    pub(crate) parent: NodeId,
    /// Target of the thread that ended the descent.
    pub(crate) terminus: NodeId,
}

impl PatriciaTrie {
    /// Find the node a search for `key` ends at.
    ///
    /// Never fails: the caller compares the terminus key with `key` to decide
    /// presence. Digits other than `'1'` read as `0`.
    pub fn search(&self, key: &str) -> Terminus<'_> {
        self.search_with(key, &mut NoopObserver)
    }

    pub fn search_with(&self, key: &str, observer: &mut dyn Observer) -> Terminus<'_> {
        match self.head {
            Head::Empty => Terminus::Sentinel,
            Head::Rooted(head) => {
                let id = self.descend(head, key, observer).terminus;
                Terminus::Node(NodeRef { trie: self, id })
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.search(key).holds(key)
    }

    /// Walk from `head` testing `key`, stopping at the first thread.
    pub(crate) fn descend(&self, head: NodeId, key: &str, observer: &mut dyn Observer) -> Descent {
        let mut parent = head;
        let mut target = self.visit(head, key, observer);
        while self.bit(parent) < self.bit(target) {
            parent = target;
            target = self.visit(target, key, observer);
        }
        observer.on_step(&Step::Stop { node: target });
        Descent {
            parent,
            terminus: target,
        }
    }

    fn visit(&self, node: NodeId, key: &str, observer: &mut dyn Observer) -> NodeId {
        let (bit, value, side, next) = self.step(node, key);
        tracing::trace!(node = node.index(), bit, value, ?side, "descend");
        observer.on_step(&Step::Visit {
            node,
            bit,
            value,
            side,
        });
        next
    }

    /// Bounded re-search for the insertion point of a node testing `bit`.
    ///
    /// Returns `(p, x)`: `p` is the last node on the path for `key` testing a
    /// bit before `bit`, and `x` is what `p` currently points at on that
    /// path, either a thread or a real child testing `bit` or later.
    pub(crate) fn splice_point(&self, head: NodeId, key: &str, bit: u32) -> (NodeId, NodeId) {
        let mut p = head;
        let (_, _, _, mut x) = self.step(head, key);
        while self.bit(p) < self.bit(x) && self.bit(x) < bit {
            p = x;
            x = self.step(x, key).3;
        }
        (p, x)
    }
}
