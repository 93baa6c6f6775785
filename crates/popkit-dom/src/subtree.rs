//! Outside-interaction detection

use crate::{DomTree, InteractionEvent, NodeId};

/// Check whether `event` originated on the element with id `root_id` or
/// anywhere beneath it.
///
/// Walks from the event target up through its ancestors. The walk ends at the
/// document node, or at the top of a subtree that was detached while the event
/// was in flight, so removed targets count as outside.
pub fn occurred_within_subtree(tree: &DomTree, event: &InteractionEvent, root_id: &str) -> bool {
    node_within_subtree(tree, event.target, root_id)
}

/// Check whether `node` is, or lies beneath, the element with id `root_id`
pub fn node_within_subtree(tree: &DomTree, node: NodeId, root_id: &str) -> bool {
    tree.ancestors(node)
        .filter_map(|id| tree.get(id))
        .any(|n| n.element_id() == Some(root_id))
}
