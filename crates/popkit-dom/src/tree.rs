//! DOM Tree (arena-based allocation)

use crate::{DomError, Node, NodeId};

/// Arena-based DOM tree
///
/// Index 0 always holds the document node. Detached nodes stay in the arena
/// so that ids held by in-flight events keep resolving.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree containing only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node exists from construction
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Set (or clear, with `None`) an element's `id` attribute
    pub fn set_id(&mut self, node: NodeId, id: Option<&str>) -> Result<(), DomError> {
        let elem = self
            .get_mut(node)
            .and_then(Node::as_element_mut)
            .ok_or(DomError::InvalidNode(node))?;
        elem.id = id.map(str::to_string);
        Ok(())
    }

    /// Parent of a node, `None` at the document or at a detached subtree's top
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Walk from `node` (inclusive) up through its ancestors
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        let next = if self.get(node).is_some() { node } else { NodeId::NONE };
        Ancestors { tree: self, next }
    }

    /// Check whether `node` is `ancestor` or lies beneath it
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.get(parent).is_none() {
            return Err(DomError::InvalidNode(parent));
        }
        if self.get(child).is_none() || child == NodeId::ROOT {
            return Err(DomError::InvalidNode(child));
        }
        if self.is_inclusive_descendant(parent, child) {
            return Err(DomError::HierarchyCycle { parent, child });
        }

        self.detach(child)?;

        let last = self.nodes[parent.index()].last_child;
        {
            let c = &mut self.nodes[child.index()];
            c.parent = parent;
            c.prev_sibling = last;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        Ok(())
    }

    /// Unlink a node (and its subtree) from its parent
    ///
    /// Detaching an already detached node is a no-op.
    pub fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        let (parent, prev, next) = match self.get(node) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return Err(DomError::InvalidNode(node)),
        };
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let n = &mut self.nodes[node.index()];
        n.parent = NodeId::NONE;
        n.prev_sibling = NodeId::NONE;
        n.next_sibling = NodeId::NONE;
        tracing::trace!("Detached {:?} from {:?}", node, parent);
        Ok(())
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        let mut next = self.get(node).map_or(NodeId::NONE, |n| n.first_child);
        std::iter::from_fn(move || {
            if !next.is_valid() {
                return None;
            }
            let id = next;
            let n = &self.nodes[id.index()];
            next = n.next_sibling;
            Some((id, n))
        })
    }

    /// Find the first attached element, in document order, carrying `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root()];
        while let Some(current) = stack.pop() {
            if self.nodes[current.index()].element_id() == Some(id) {
                return Some(current);
            }
            let children: Vec<NodeId> = self.children(current).map(|(c, _)| c).collect();
            stack.extend(children.into_iter().rev());
        }
        None
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node and its ancestors, innermost first
///
/// Ends at the document node, or at the top of a detached subtree.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.parent);
        Some(current)
    }
}
