//! Explicit positional insertion shared by every kind of target.

use fgen_tree::{NodeId, SourceTree, TreeError};
use tracing::trace;

use crate::builder::Placement;
use crate::error::GenError;
use crate::position::Position;

/// Insert `node` into `target`'s statement list at an explicit position.
///
/// `Position::Auto` is rejected: each kind of target defines its own automatic
/// placement on top of this.
pub(crate) fn insert_at(
    tree: &mut SourceTree,
    target: NodeId,
    node: NodeId,
    position: Position,
) -> Result<Placement, GenError> {
    let len = tree.children(target).len();
    let index = match position {
        Position::Auto => return Err(GenError::AutoNotSupportedHere { target }),
        Position::Append => len,
        Position::First => 0,
        Position::Insert(index) | Position::BeforeIndex(index) => index,
        Position::AfterIndex(index) => index
            .checked_add(1)
            .ok_or(TreeError::IndexOutOfBounds { index, len })?,
        Position::Before(sibling) => sibling_index(tree, target, sibling)?,
        Position::After(sibling) => sibling_index(tree, target, sibling)? + 1,
    };
    tree.insert_child(target, index, node)?;
    trace!(?target, ?node, index, "inserted statement");
    Ok(Placement::Inserted { index })
}

fn sibling_index(tree: &SourceTree, parent: NodeId, sibling: NodeId) -> Result<usize, GenError> {
    tree.position_of(parent, sibling).map_err(|err| match err {
        TreeError::SiblingNotFound { parent, sibling } => {
            GenError::SiblingNotFound { parent, sibling }
        }
        other => GenError::Tree(other),
    })
}
