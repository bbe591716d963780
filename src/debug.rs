//! Structural export and integrity checks.

use smallvec::SmallVec;

use crate::arena::NodeId;
use crate::config::Side;
use crate::observe::NoopObserver;
use crate::trie::{Head, PatriciaTrie};

/// Kind of a child pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Target tests a later bit.
    Real,
    /// Back-reference to an ancestor.
    Thread,
    /// Points at the node itself.
    SelfLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: NodeId,
    pub kind: EdgeKind,
}

/// One node as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub id: NodeId,
    pub key: String,
    pub bit: u32,
    pub left: Edge,
    pub right: Edge,
}

/// The whole pointer graph at one moment, nodes in depth-first order over real
/// edges starting at the head.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub head: Option<NodeId>,
    pub nodes: Vec<NodeView>,
}

impl PatriciaTrie {
    pub fn snapshot(&self) -> Snapshot {
        let Head::Rooted(head) = self.head else {
            return Snapshot::default();
        };

        let mut nodes = Vec::with_capacity(self.len());
        let mut stack: SmallVec<[NodeId; 32]> = SmallVec::new();
        stack.push(head);
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(id);
            let edge = |side: Side| {
                let target = node.link(side);
                let kind = if target == id {
                    EdgeKind::SelfLoop
                } else if self.is_real(id, target) {
                    EdgeKind::Real
                } else {
                    EdgeKind::Thread
                };
                Edge { target, kind }
            };
            nodes.push(NodeView {
                id,
                key: node.key.to_string(),
                bit: node.bit,
                left: edge(Side::Left),
                right: edge(Side::Right),
            });
            let children: SmallVec<[NodeId; 2]> = self.real_children(id).map(|(_, c)| c).collect();
            stack.extend(children.into_iter().rev());
        }

        Snapshot {
            head: Some(head),
            nodes,
        }
    }

    /// Check every structural invariant and describe each violation found.
    ///
    /// An empty result means the trie is sound.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let head = match self.head {
            Head::Empty => {
                if self.nodes.len() != 0 {
                    issues.push(format!("empty trie still owns {} nodes", self.nodes.len()));
                }
                return issues;
            }
            Head::Rooted(head) => head,
        };

        let Some(head_node) = self.nodes.try_get(head) else {
            issues.push(format!("head {head:?} is not a live slot"));
            return issues;
        };
        if head_node.bit != 0 {
            issues.push(format!("head tests bit {} instead of 0", head_node.bit));
        }
        let untested = self.config.orientation.side(1);
        if head_node.link(untested) != head {
            issues.push(format!("head side {untested:?} must loop back to the head"));
        }

        let mut visited = 0usize;
        let mut path = Vec::new();
        self.verify_node(head, &mut path, &mut visited, &mut issues);
        if visited != self.nodes.len() {
            issues.push(format!(
                "{} nodes reachable over real edges but {} allocated",
                visited,
                self.nodes.len()
            ));
        }
        if !issues.is_empty() {
            return issues;
        }

        for (id, node) in self.nodes.iter() {
            let reached = self
                .descend(head, node.key.as_str(), &mut NoopObserver)
                .terminus;
            if reached != id {
                issues.push(format!(
                    "search for {} ends at {:?} instead of {:?}",
                    node.key, reached, id
                ));
            }
        }
        issues
    }

    fn verify_node(
        &self,
        id: NodeId,
        path: &mut Vec<NodeId>,
        visited: &mut usize,
        issues: &mut Vec<String>,
    ) {
        *visited += 1;
        path.push(id);
        let node = self.nodes.get(id);
        for side in [Side::Left, Side::Right] {
            let target = node.link(side);
            let Some(child) = self.nodes.try_get(target) else {
                issues.push(format!("{}: {side:?} points at dead slot {target:?}", node.key));
                continue;
            };
            if child.bit > node.bit {
                self.verify_node(target, path, visited, issues);
            } else if !path.contains(&target) {
                issues.push(format!(
                    "{}: {side:?} threads to {} which is not an ancestor",
                    node.key, child.key
                ));
            }
        }
        path.pop();
    }
}
