//! Checkpoint notifications for step-by-step tracing.
//!
//! The trie reports what it does through [`Observer::on_step`] and never reads
//! anything back, so an attached observer cannot change the outcome of an
//! operation. Events name nodes by [`NodeId`]; an observer that needs keys or
//! layout can inspect the trie between operations.

use crate::arena::NodeId;
use crate::config::Side;

/// Which deletion strategy was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteCase {
    /// The node terminates its own key through a self-loop and is unlinked.
    SelfLoop,
    /// The node is reached only through a thread from a descendant, whose
    /// key replaces it before the descendant's slot is unlinked.
    Threaded,
}

/// One algorithmic checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Descent tested `bit` of the key at `node` and read `value`.
    Visit {
        node: NodeId,
        bit: u32,
        value: u8,
        side: Side,
    },
    /// Descent followed a thread and stopped at `node`.
    Stop { node: NodeId },
    /// First key of an empty trie became the head.
    Planted { node: NodeId },
    /// Insert found its key already stored at `node`.
    Present { node: NodeId },
    /// Insert found a key at `node` equal to its own up to trailing zeros.
    Collision { node: NodeId },
    /// The key first differs from the search terminus at `bit`.
    Diverged { bit: u32 },
    /// `parent` will be redirected away from `displaced`.
    SplicePoint { parent: NodeId, displaced: NodeId },
    /// `node` now hangs off `parent` on `side`.
    Spliced {
        node: NodeId,
        parent: NodeId,
        side: Side,
    },
    /// Delete located its target and picked a strategy.
    Case { node: NodeId, case: DeleteCase },
    /// The only key was removed; the trie is empty again.
    Cleared,
    /// `node` is the descendant whose thread targets the deleted node.
    BackEdgeSource { node: NodeId },
    /// `node` holds the thread that terminates the search for the back-edge
    /// source's key.
    BackEdgeOwner { node: NodeId },
    /// `node` now points at `target` on `side` instead of the old node.
    Redirected {
        node: NodeId,
        side: Side,
        target: NodeId,
    },
    /// `parent` skips `node` and now points at `replacement`.
    Unlinked {
        node: NodeId,
        parent: NodeId,
        replacement: NodeId,
    },
    /// The key stored at `from` moved into `into`.
    Relocated { from: NodeId, into: NodeId },
}

/// Receiver of checkpoint events.
pub trait Observer {
    fn on_step(&mut self, step: &Step);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    #[inline]
    fn on_step(&mut self, _step: &Step) {}
}

/// Observer that keeps every event in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    steps: Vec<Step>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<Step> {
        std::mem::take(&mut self.steps)
    }
}

impl Observer for Recorder {
    fn on_step(&mut self, step: &Step) {
        self.steps.push(step.clone());
    }
}
