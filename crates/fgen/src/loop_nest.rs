use fgen_tree::{NodeId, SourceTree, Statement};
use tracing::debug;

use crate::error::GenError;
use crate::position::Position;

/// Where code that must run ahead of a loop nest belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopNestInsertion {
    /// The node whose statement list holds the loop nest.
    pub container: NodeId,
    /// The outermost loop of the nest.
    pub outer_loop: NodeId,
    /// First statement of the nest: its `begin` directive if it has one,
    /// otherwise the outer loop.
    pub head: NodeId,
    /// The statement immediately before the nest, or the outer loop when the
    /// nest opens its container.
    pub anchor: NodeId,
}

impl LoopNestInsertion {
    /// Position in `container` that puts a statement directly ahead of the nest.
    pub fn position(&self) -> Position {
        Position::Before(self.head)
    }
}

pub(crate) fn locate_outer_loop(
    tree: &SourceTree,
    node: NodeId,
) -> Result<LoopNestInsertion, GenError> {
    tree.get(node)?;
    let is_loop = |id: NodeId| tree.statement(id).is_some_and(Statement::is_loop);

    let mut outer_loop = std::iter::once(node)
        .chain(tree.ancestors(node))
        .find(|&id| is_loop(id))
        .ok_or(GenError::NoEnclosingLoop(node))?;
    while let Some(parent) = tree.parent(outer_loop).filter(|&parent| is_loop(parent)) {
        outer_loop = parent;
    }
    debug!(?node, ?outer_loop, "found outermost loop of the nest");

    let container = tree
        .parent(outer_loop)
        .ok_or(GenError::NotAttached(outer_loop))?;
    let index = tree
        .position_of(container, outer_loop)
        .map_err(|_| GenError::NotAttached(outer_loop))?;
    let siblings = tree.children(container);
    debug!(?container, index, "loop nest position in its container");

    let (head, anchor) = match index.checked_sub(1).map(|previous| siblings[previous]) {
        None => (outer_loop, outer_loop),
        Some(previous) if tree.get(previous)?.is_begin_directive() => {
            debug!(directive = ?previous, "loop nest is opened by a begin directive");
            let anchor = index.checked_sub(2).map_or(previous, |before| siblings[before]);
            (previous, anchor)
        }
        Some(previous) => (outer_loop, previous),
    };

    Ok(LoopNestInsertion {
        container,
        outer_loop,
        head,
        anchor,
    })
}
