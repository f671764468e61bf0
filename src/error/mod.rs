//! Error types for structural edits on a template tree.
//!
//! Lookups never fail: absence is reported with `Option`. The only errors are
//! structural misuse that the arena can detect when a caller links nodes by
//! hand, such as attaching a node twice or beneath its own descendant.

use crate::tree::NodeId;

/// The error type returned by checked structural edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The node already hangs beneath a parent and must be detached first.
    #[error("node {0:?} already has a parent; detach it first")]
    AlreadyAttached(NodeId),
    /// Attaching the node would make it its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// The requested parent.
        parent: NodeId,
        /// The node being attached.
        child: NodeId,
    },
    /// The handle was not allocated by this tree.
    #[error("node {0:?} does not belong to this tree")]
    UnknownNode(NodeId),
}
