use fgen_tree::{NodeId, SourceTree};

use crate::error::GenError;

/// Check that `node` was built against `target` or one of `target`'s ancestors.
///
/// The parent chain of `node` (its construction context upwards) must meet
/// `target` or an ancestor of it. A node built against a different program
/// unit, or one with no context at all, is rejected.
pub(crate) fn require_shared_ancestor(
    tree: &SourceTree,
    node: NodeId,
    target: NodeId,
) -> Result<(), GenError> {
    let origin: Vec<NodeId> = tree.ancestors(node).collect();
    let found = std::iter::once(target)
        .chain(tree.ancestors(target))
        .any(|ancestor| origin.contains(&ancestor));
    if found {
        Ok(())
    } else {
        Err(GenError::NotADescendant { node, target })
    }
}
