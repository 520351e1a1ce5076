//! Placement inside loop and conditional bodies.

use fgen_tree::{NodeId, SourceTree};
use tracing::{debug, trace};

use crate::builder::Placement;
use crate::error::GenError;
use crate::insert::insert_at;
use crate::position::Position;
use crate::scope::add_to_scope;

/// Add `node` to the body of the do loop or if block `block`.
///
/// Imports and declarations cannot live in a block body, so in auto mode they
/// are handed to the nearest enclosing module or subroutine instead. A select
/// between the block and that scope stops them with `AutoNotSupportedHere`.
pub(crate) fn add_to_block(
    tree: &mut SourceTree,
    block: NodeId,
    node: NodeId,
    position: Position,
) -> Result<Placement, GenError> {
    match position {
        Position::Auto if tree.get(node)?.is_hoistable() => hoist(tree, block, node),
        Position::Auto | Position::Append => {
            // The last statement is the block's END line.
            let index = tree.children(block).len().saturating_sub(1);
            insert_at(tree, block, node, Position::Insert(index))
        }
        explicit => insert_at(tree, block, node, explicit),
    }
}

/// Pass `node` up through the enclosing blocks to the first other ancestor.
fn hoist(tree: &mut SourceTree, block: NodeId, node: NodeId) -> Result<Placement, GenError> {
    let mut current = block;
    loop {
        let parent = tree
            .parent(current)
            .ok_or(GenError::NoEnclosingScope(block))?;
        let statement = tree.get(parent)?;
        if statement.is_block() {
            trace!(?node, ?parent, "passing statement up");
            current = parent;
            continue;
        }
        if statement.is_scope() {
            debug!(?node, from = ?block, to = ?parent, "hoisting statement out of block");
            return add_to_scope(tree, parent, node, Position::Auto, true);
        }
        // Anything else has no automatic placement of its own.
        return insert_at(tree, parent, node, Position::Auto);
    }
}
