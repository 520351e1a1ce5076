use fgen_tree::{NodeId, SourceTree, Statement};

use crate::error::GenError;

/// The last do loop in `node`'s statement list.
pub(crate) fn previous_loop(tree: &SourceTree, node: NodeId) -> Result<NodeId, GenError> {
    last_child_where(tree, node, Statement::is_loop).ok_or(GenError::NoPreviousLoop(node))
}

/// The last declaration in `node`'s statement list.
pub(crate) fn last_declaration(tree: &SourceTree, node: NodeId) -> Result<NodeId, GenError> {
    last_child_where(tree, node, |statement| statement.as_declaration().is_some())
        .ok_or(GenError::NoDeclarations(node))
}

fn last_child_where(
    tree: &SourceTree,
    node: NodeId,
    predicate: impl Fn(&Statement) -> bool,
) -> Option<NodeId> {
    tree.children(node)
        .iter()
        .rev()
        .copied()
        .find(|&child| tree.statement(child).is_some_and(&predicate))
}
