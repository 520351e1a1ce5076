use fgen_tree::{NodeId, Printer, RenderConfig, SourceTree, Statement};

use crate::block::add_to_block;
use crate::error::GenError;
use crate::insert::insert_at;
use crate::loop_nest::{LoopNestInsertion, locate_outer_loop};
use crate::position::Position;
use crate::query;
use crate::scope::add_to_scope;

/// Outcome of a successful [`ProgramBuilder::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The node now sits at `index` of its new parent's statement list.
    Inserted { index: usize },
    /// The node's remaining import symbols were appended to the import `into`;
    /// the node itself was not attached.
    Merged { into: NodeId },
    /// Everything the node declares or imports was already present.
    Discarded,
}

impl Placement {
    pub fn is_inserted(self) -> bool {
        matches!(self, Placement::Inserted { .. })
    }
}

/// Assembles Fortran program units in a [`SourceTree`].
///
/// Factory methods create detached nodes built against a context node;
/// [`add`](Self::add) is the only way to attach them.
#[derive(Debug, Clone, Default)]
pub struct ProgramBuilder {
    pub(crate) tree: SourceTree,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &SourceTree {
        &self.tree
    }

    pub fn finish(self) -> SourceTree {
        self.tree
    }

    pub fn statement(&self, id: NodeId) -> Result<&Statement, GenError> {
        Ok(self.tree.get(id)?)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    pub fn to_source(&self, root: NodeId) -> String {
        self.tree.to_source(root)
    }

    pub fn render(&self, root: NodeId, config: RenderConfig) -> String {
        Printer::new(config).print(&self.tree, root)
    }

    /// Add `node` to `target`.
    ///
    /// Modules and subroutines resolve [`Position::Auto`] by the ordering rules
    /// of a scope and merge duplicate declarations and imports. Do loops and if
    /// blocks append to their body and hand declarations and imports to the
    /// enclosing scope. Select blocks only accept explicit positions, and
    /// statements without a body of their own are rejected.
    pub fn add(
        &mut self,
        target: NodeId,
        node: NodeId,
        position: Position,
    ) -> Result<Placement, GenError> {
        self.check_insertable(target, node)?;
        let target_statement = self.tree.get(target)?;
        if target_statement.is_scope() {
            add_to_scope(&mut self.tree, target, node, position, false)
        } else if target_statement.is_block() {
            add_to_block(&mut self.tree, target, node, position)
        } else {
            insert_at(&mut self.tree, target, node, position)
        }
    }

    /// Add `node` to `target` at an explicit position, bypassing the scope and
    /// block rules. `Position::Auto` is rejected.
    pub fn add_generic(
        &mut self,
        target: NodeId,
        node: NodeId,
        position: Position,
    ) -> Result<Placement, GenError> {
        self.check_insertable(target, node)?;
        insert_at(&mut self.tree, target, node, position)
    }

    /// Find the outermost loop around `node` and the statement just ahead of
    /// that loop nest.
    pub fn locate_outer_loop_insertion_point(
        &self,
        node: NodeId,
    ) -> Result<LoopNestInsertion, GenError> {
        locate_outer_loop(&self.tree, node)
    }

    pub fn previous_loop(&self, node: NodeId) -> Result<NodeId, GenError> {
        query::previous_loop(&self.tree, node)
    }

    pub fn last_declaration(&self, node: NodeId) -> Result<NodeId, GenError> {
        query::last_declaration(&self.tree, node)
    }

    fn check_insertable(&self, target: NodeId, node: NodeId) -> Result<(), GenError> {
        if !self.tree.get(target)?.has_body() {
            return Err(GenError::NoStatementList(target));
        }
        self.tree.get(node)?;
        if self.tree.is_attached(node) {
            return Err(fgen_tree::TreeError::AlreadyAttached(node).into());
        }
        if target == node || self.tree.ancestors(target).any(|ancestor| ancestor == node) {
            return Err(GenError::CyclicInsertion { node, target });
        }
        Ok(())
    }
}
