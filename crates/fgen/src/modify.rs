//! Edits to an existing [`SourceTree`] outside of a [`ProgramBuilder`](crate::ProgramBuilder).

use fgen_tree::{NodeId, SourceTree};
use tracing::debug;

use crate::error::GenError;
use crate::factory::UseOptions;

/// Insert a `USE` statement at the top of the module or subroutine enclosing
/// `node` (or `node` itself when it is one). Existing imports are not
/// consulted.
pub fn add_use(
    tree: &mut SourceTree,
    node: NodeId,
    options: UseOptions,
) -> Result<NodeId, GenError> {
    tree.get(node)?;
    let scope = std::iter::once(node)
        .chain(tree.ancestors(node))
        .find(|&id| tree.statement(id).is_some_and(|statement| statement.is_scope()))
        .ok_or(GenError::NoEnclosingScope(node))?;

    let use_stmt = tree.add_node_with_context(options.into_statement(), scope)?;
    tree.insert_child(scope, 0, use_stmt)?;
    debug!(?scope, ?use_stmt, "added use statement");
    Ok(use_stmt)
}
