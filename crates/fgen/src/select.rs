//! Case labels of `SELECT CASE` and `SELECT TYPE` blocks.
//!
//! Labels and their bodies are siblings in the select's statement list; a
//! label runs until the next label or `END SELECT`.

use ahash::HashSet;
use fgen_tree::{NodeId, Statement};
use tracing::debug;

use crate::builder::ProgramBuilder;
use crate::error::GenError;
use crate::insert::insert_at;
use crate::position::Position;

impl ProgramBuilder {
    /// Append `CASE ( selector )` (`TYPE IS` in a type select) followed by
    /// `body` ahead of `END SELECT`. Returns the label node.
    pub fn add_case(
        &mut self,
        select: NodeId,
        selector: impl Into<String>,
        body: &[NodeId],
    ) -> Result<NodeId, GenError> {
        self.check_select(select)?;
        let mut seen = HashSet::default();
        for &statement in body {
            if !seen.insert(statement) {
                return Err(GenError::DuplicateCaseStatement(statement));
            }
            self.tree.get(statement)?;
            if self.tree.is_attached(statement) {
                return Err(fgen_tree::TreeError::AlreadyAttached(statement).into());
            }
            if statement == select || self.tree.ancestors(select).any(|id| id == statement) {
                return Err(GenError::CyclicInsertion {
                    node: statement,
                    target: select,
                });
            }
        }

        let case = self.case(select, Some(selector.into()))?;
        let mut index = self.end_index(select);
        for node in std::iter::once(case).chain(body.iter().copied()) {
            insert_at(&mut self.tree, select, node, Position::Insert(index))?;
            index += 1;
        }
        debug!(?select, ?case, statements = body.len(), "added case");
        Ok(case)
    }

    /// Append `CASE DEFAULT` (`CLASS DEFAULT` in a type select) ahead of
    /// `END SELECT`. Body statements follow it with an explicit position such
    /// as `Position::After(case)`.
    pub fn add_default_case(&mut self, select: NodeId) -> Result<NodeId, GenError> {
        self.check_select(select)?;
        let case = self.case(select, None)?;
        let index = self.end_index(select);
        insert_at(&mut self.tree, select, case, Position::Insert(index))?;
        Ok(case)
    }

    fn check_select(&self, select: NodeId) -> Result<(), GenError> {
        match self.tree.get(select)? {
            Statement::Select(_) => Ok(()),
            _ => Err(GenError::NotASelect(select)),
        }
    }

    fn end_index(&self, select: NodeId) -> usize {
        self.tree.children(select).len().saturating_sub(1)
    }
}
