use ahash::{HashMap, HashSet};

use crate::statement::Statement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, PartialEq, Eq, thiserror::Error, Clone)]
pub enum TreeError {
    #[error("Unknown node {0:?}")]
    UnknownNode(NodeId),
    #[error("Index {index} is out of bounds for a statement list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Node {0:?} is already attached to the tree")]
    AlreadyAttached(NodeId),
    #[error("Node {sibling:?} is not a child of {parent:?}")]
    SiblingNotFound { parent: NodeId, sibling: NodeId },
}

/// Arena of statements with stable ids and ordered statement lists.
///
/// A node is created detached: it remembers the node it was built against as
/// its parent but is not yet part of that parent's statement list. Inserting it
/// attaches it and makes the insertion target its parent. Nodes are never
/// removed; a node that is never attached is simply unreachable from any root.
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    nodes: Vec<Statement>,
    children: HashMap<NodeId, Vec<NodeId>>,
    parent: HashMap<NodeId, NodeId>,
    attached: HashSet<NodeId>,
}

impl SourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Add a detached node without any construction context (a new root).
    pub fn add_node(&mut self, statement: Statement) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(statement);
        id
    }

    /// Add a detached node built against `context`.
    pub fn add_node_with_context(
        &mut self,
        statement: Statement,
        context: NodeId,
    ) -> Result<NodeId, TreeError> {
        self.require(context)?;
        let id = self.add_node(statement);
        self.parent.insert(id, context);
        Ok(id)
    }

    /// Add a node and attach it at the end of `parent`'s statement list.
    pub fn push_child(&mut self, parent: NodeId, statement: Statement) -> Result<NodeId, TreeError> {
        let id = self.add_node_with_context(statement, parent)?;
        let index = self.children(parent).len();
        self.insert_child(parent, index, id)?;
        Ok(id)
    }

    pub fn statement(&self, id: NodeId) -> Option<&Statement> {
        self.nodes.get(id.0)
    }

    pub fn statement_mut(&mut self, id: NodeId) -> Option<&mut Statement> {
        self.nodes.get_mut(id.0)
    }

    pub fn get(&self, id: NodeId) -> Result<&Statement, TreeError> {
        self.statement(id).ok_or(TreeError::UnknownNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Statement, TreeError> {
        self.nodes.get_mut(id.0).ok_or(TreeError::UnknownNode(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(&id).copied()
    }

    /// The statement list of `id`; empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.attached.contains(&id)
    }

    /// Parent chain of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&node| self.parent(node))
    }

    /// Index of `sibling` in `parent`'s statement list, by identity.
    pub fn position_of(&self, parent: NodeId, sibling: NodeId) -> Result<usize, TreeError> {
        self.children(parent)
            .iter()
            .position(|&child| child == sibling)
            .ok_or(TreeError::SiblingNotFound { parent, sibling })
    }

    /// Replace the construction context of a detached node.
    pub fn change_parent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), TreeError> {
        self.require(id)?;
        self.require(new_parent)?;
        if self.is_attached(id) {
            return Err(TreeError::AlreadyAttached(id));
        }
        self.parent.insert(id, new_parent);
        Ok(())
    }

    /// Attach the detached `child` at `index` of `parent`'s statement list.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), TreeError> {
        self.require(parent)?;
        self.require(child)?;
        if self.is_attached(child) {
            return Err(TreeError::AlreadyAttached(child));
        }
        let siblings = self.children.entry(parent).or_default();
        if index > siblings.len() {
            return Err(TreeError::IndexOutOfBounds {
                index,
                len: siblings.len(),
            });
        }
        siblings.insert(index, child);
        self.parent.insert(child, parent);
        self.attached.insert(child);
        Ok(())
    }

    fn require(&self, id: NodeId) -> Result<(), TreeError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(text: &str) -> Statement {
        Statement::Comment(text.to_string())
    }

    #[test]
    fn test_detached_node_keeps_context() {
        let mut tree = SourceTree::new();
        let root = tree.add_node(comment("root"));
        let child = tree.add_node_with_context(comment("child"), root).unwrap();

        assert_eq!(tree.parent(child), Some(root));
        assert!(!tree.is_attached(child));
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn test_insert_child_keeps_order() {
        let mut tree = SourceTree::new();
        let root = tree.add_node(comment("root"));
        let a = tree.push_child(root, comment("a")).unwrap();
        let b = tree.push_child(root, comment("b")).unwrap();
        let c = tree.add_node_with_context(comment("c"), root).unwrap();
        tree.insert_child(root, 1, c).unwrap();

        assert_eq!(tree.children(root), &[a, c, b]);
        assert_eq!(tree.position_of(root, b), Ok(2));
        assert!(tree.is_attached(c));
    }

    #[test]
    fn test_insert_child_rejects_bad_index() {
        let mut tree = SourceTree::new();
        let root = tree.add_node(comment("root"));
        let child = tree.add_node_with_context(comment("child"), root).unwrap();

        assert_eq!(
            tree.insert_child(root, 1, child),
            Err(TreeError::IndexOutOfBounds { index: 1, len: 0 })
        );
        assert!(!tree.is_attached(child));
    }

    #[test]
    fn test_attached_node_cannot_move() {
        let mut tree = SourceTree::new();
        let root = tree.add_node(comment("root"));
        let other = tree.add_node(comment("other"));
        let child = tree.push_child(root, comment("child")).unwrap();

        assert_eq!(
            tree.insert_child(other, 0, child),
            Err(TreeError::AlreadyAttached(child))
        );
        assert_eq!(
            tree.change_parent(child, other),
            Err(TreeError::AlreadyAttached(child))
        );
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let mut tree = SourceTree::new();
        let root = tree.add_node(comment("root"));
        let middle = tree.push_child(root, comment("middle")).unwrap();
        let leaf = tree.add_node_with_context(comment("leaf"), middle).unwrap();

        assert_eq!(tree.ancestors(leaf).collect::<Vec<_>>(), vec![middle, root]);
        assert_eq!(tree.ancestors(root).count(), 0);
    }

    #[test]
    fn test_unknown_nodes_are_errors() {
        let mut tree = SourceTree::new();
        let root = tree.add_node(comment("root"));
        let missing = NodeId(42);

        assert_eq!(
            tree.add_node_with_context(comment("x"), missing),
            Err(TreeError::UnknownNode(missing))
        );
        assert_eq!(
            tree.position_of(root, missing),
            Err(TreeError::SiblingNotFound {
                parent: root,
                sibling: missing
            })
        );
        assert!(tree.get(missing).is_err());
    }
}
