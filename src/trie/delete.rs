use smallvec::SmallVec;

use super::{Head, PatriciaTrie};
use crate::arena::NodeId;
use crate::bits::BitKey;
use crate::config::Side;
use crate::error::{DeleteError, IntegrityError};
use crate::observe::{DeleteCase, NoopObserver, Observer, Step};

impl PatriciaTrie {
    /// Remove `key`.
    ///
    /// Exactly one node slot is freed. Every lookup runs before the first
    /// pointer write, so an error leaves the trie untouched.
    pub fn delete(&mut self, key: &str) -> Result<(), DeleteError> {
        self.delete_with(key, &mut NoopObserver)
    }

    pub fn delete_with(&mut self, key: &str, observer: &mut dyn Observer) -> Result<(), DeleteError> {
        let key = BitKey::parse(key)?;
        let head = match self.head {
            Head::Empty => return Err(DeleteError::EmptyTree),
            Head::Rooted(head) => head,
        };

        let p = self.descend(head, key.as_str(), observer).terminus;
        if self.nodes.get(p).key != key {
            return Err(DeleteError::NotFound {
                key: key.to_string(),
            });
        }

        let result = if self.has_terminus_loop(p) {
            observer.on_step(&Step::Case {
                node: p,
                case: DeleteCase::SelfLoop,
            });
            self.unlink_terminus(head, p, observer)
        } else {
            observer.on_step(&Step::Case {
                node: p,
                case: DeleteCase::Threaded,
            });
            self.replace_threaded(head, p, observer)
        };

        match result {
            Ok(case) => {
                tracing::debug!(%key, ?case, "deleted key");
                Ok(())
            }
            Err(err) => {
                tracing::error!(%key, error = %err, "trie integrity violated during delete");
                Err(err.into())
            }
        }
    }

    /// `p` rests its key on a self-loop: splice it out of its parent.
    fn unlink_terminus(
        &mut self,
        head: NodeId,
        p: NodeId,
        observer: &mut dyn Observer,
    ) -> Result<DeleteCase, IntegrityError> {
        if p == head {
            // A head looping on its tested side has no real children.
            self.clear();
            observer.on_step(&Step::Cleared);
            return Ok(DeleteCase::SelfLoop);
        }

        let (pp, side) = self
            .physical_parent(head, p)
            .ok_or_else(|| self.orphan(p))?;
        let node = self.nodes.get(p);
        let keep = if node.left == p { node.right } else { node.left };

        self.nodes.get_mut(pp).set_link(side, keep);
        self.nodes.release(p);
        observer.on_step(&Step::Unlinked {
            node: p,
            parent: pp,
            replacement: keep,
        });
        Ok(DeleteCase::SelfLoop)
    }

    /// `p` is only reached through a thread from a descendant `q`.
    ///
    /// `q`'s key moves into `p`, the thread `r` uses to end searches for
    /// `q`'s key is pointed at `p`, and `q`'s slot is unlinked.
    fn replace_threaded(
        &mut self,
        head: NodeId,
        p: NodeId,
        observer: &mut dyn Observer,
    ) -> Result<DeleteCase, IntegrityError> {
        let q = self.back_edge_source(p)?;
        observer.on_step(&Step::BackEdgeSource { node: q });

        let r = {
            let q_key = self.nodes.get(q).key.as_str();
            self.descend(head, q_key, observer).parent
        };
        observer.on_step(&Step::BackEdgeOwner { node: r });
        let r_side = self
            .nodes
            .get(r)
            .side_of(q)
            .ok_or_else(|| IntegrityError::MissingThread {
                key: self.nodes.get(q).key.to_string(),
            })?;

        let (qp, qp_side) = self
            .physical_parent(head, q)
            .ok_or_else(|| self.orphan(q))?;

        // `q`'s side away from `p` holds the subtree that takes its place. When
        // that side is `q`'s own self-loop, `q`'s key is about to live in `p`,
        // so the parent threads straight to `p`.
        let q_node = self.nodes.get(q);
        let q_other = if q_node.left == p { q_node.right } else { q_node.left };
        let survivor = if q_other == q { p } else { q_other };

        if r != q {
            self.nodes.get_mut(r).set_link(r_side, p);
            observer.on_step(&Step::Redirected {
                node: r,
                side: r_side,
                target: p,
            });
        }
        self.nodes.get_mut(qp).set_link(qp_side, survivor);
        observer.on_step(&Step::Unlinked {
            node: q,
            parent: qp,
            replacement: survivor,
        });

        let moved = self.nodes.release(q);
        self.nodes.get_mut(p).key = moved.key;
        observer.on_step(&Step::Relocated { from: q, into: p });
        Ok(DeleteCase::Threaded)
    }

    /// Walk `p`'s own key starting at `p` until a pointer leads back to `p`.
    /// The node owning that pointer is returned.
    fn back_edge_source(&self, p: NodeId) -> Result<NodeId, IntegrityError> {
        let key = self.nodes.get(p).key.as_str();
        let mut curr = p;
        loop {
            let (_, _, _, next) = self.step(curr, key);
            if next == p {
                return Ok(curr);
            }
            if !self.is_real(curr, next) {
                return Err(IntegrityError::MissingBackEdge {
                    key: key.to_string(),
                });
            }
            curr = next;
        }
    }

    /// Node linking to `target` through a real edge, and the side it uses.
    ///
    /// Plain depth-first walk over real edges; threads are never followed.
    pub(crate) fn physical_parent(&self, head: NodeId, target: NodeId) -> Option<(NodeId, Side)> {
        let mut stack: SmallVec<[NodeId; 32]> = SmallVec::new();
        stack.push(head);
        while let Some(id) = stack.pop() {
            for (side, child) in self.real_children(id) {
                if child == target {
                    return Some((id, side));
                }
                stack.push(child);
            }
        }
        None
    }

    fn orphan(&self, id: NodeId) -> IntegrityError {
        IntegrityError::OrphanNode {
            key: self.nodes.get(id).key.to_string(),
        }
    }
}
