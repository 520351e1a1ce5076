//! Automatic placement inside modules and subroutines.
//!
//! A scope's statement list is kept in zones: imports, an optional
//! `IMPLICIT NONE`, intent-qualified declarations, then everything else, with
//! the scope's `END` line last. Automatic placement never breaks this order and
//! folds declarations and imports into what the scope already has.

use fgen_tree::{NodeId, SourceTree, Statement};
use tracing::debug;

use crate::ancestry::require_shared_ancestor;
use crate::builder::Placement;
use crate::error::GenError;
use crate::insert::insert_at;
use crate::position::Position;

/// How automatic placement treats a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AutoClass {
    Declaration,
    Import,
    ImplicitMarker,
    Body,
}

impl AutoClass {
    fn of(statement: &Statement) -> Self {
        match statement {
            Statement::Declaration(_) => AutoClass::Declaration,
            Statement::Use(_) => AutoClass::Import,
            Statement::ImplicitNone => AutoClass::ImplicitMarker,
            Statement::Module { .. }
            | Statement::Subroutine { .. }
            | Statement::Contains
            | Statement::End(_)
            | Statement::Comment(_)
            | Statement::Directive(_)
            | Statement::Call { .. }
            | Statement::Assign { .. }
            | Statement::Allocate(_)
            | Statement::Deallocate(_)
            | Statement::Do(_)
            | Statement::IfThen { .. }
            | Statement::Select(_)
            | Statement::Case(_) => AutoClass::Body,
        }
    }
}

/// Add `node` to the module or subroutine `scope`.
///
/// `hoisted` marks a node relocated here from a nested block; it is re-homed
/// to `scope` before being placed.
pub(crate) fn add_to_scope(
    tree: &mut SourceTree,
    scope: NodeId,
    node: NodeId,
    position: Position,
    hoisted: bool,
) -> Result<Placement, GenError> {
    require_shared_ancestor(tree, node, scope)?;
    if hoisted {
        tree.change_parent(node, scope)?;
    }
    if !position.is_auto() {
        return insert_at(tree, scope, node, position);
    }

    match AutoClass::of(tree.get(node)?) {
        AutoClass::Declaration => place_declaration(tree, scope, node),
        AutoClass::Import => place_import(tree, scope, node),
        AutoClass::ImplicitMarker => {
            let statements = Statements::of(tree, scope);
            if statements.any(Statement::is_implicit_none) {
                debug!(?scope, "implicit none already present");
                return Ok(Placement::Discarded);
            }
            let index = statements.after_imports();
            insert_at(tree, scope, node, Position::Insert(index))
        }
        AutoClass::Body => {
            let index = tree.children(scope).len().saturating_sub(1);
            insert_at(tree, scope, node, Position::Insert(index))
        }
    }
}

fn place_declaration(
    tree: &mut SourceTree,
    scope: NodeId,
    node: NodeId,
) -> Result<Placement, GenError> {
    let Some(incoming) = tree.get(node)?.as_declaration() else {
        return Ok(Placement::Discarded);
    };
    let family = incoming.family.clone();
    let mut remaining = incoming.names.clone();
    for &child in tree.children(scope) {
        if let Some(existing) = tree.statement(child).and_then(Statement::as_declaration)
            && existing.family.same_family(&family)
        {
            remaining.remove_covered(&existing.names);
        }
    }
    if remaining.is_empty() {
        debug!(?scope, ?node, "all variables already declared");
        return Ok(Placement::Discarded);
    }
    if let Some(declaration) = tree.get_mut(node)?.as_declaration_mut() {
        declaration.names = remaining;
    }

    let statements = Statements::of(tree, scope);
    let index = statements.after_imports();
    let index = statements.after_implicit_none(index);
    let index = statements.after_intent_declarations(index);
    debug!(?scope, ?node, index, "placing declaration");
    insert_at(tree, scope, node, Position::Insert(index))
}

fn place_import(tree: &mut SourceTree, scope: NodeId, node: NodeId) -> Result<Placement, GenError> {
    let Some(incoming) = tree.get(node)?.as_use() else {
        return Ok(Placement::Discarded);
    };
    let incoming = incoming.clone();
    let mut remaining = incoming.names.clone();
    let mut merge_into = None;

    for &child in tree.children(scope) {
        let Some(existing) = tree.statement(child).and_then(Statement::as_use) else {
            continue;
        };
        if !existing.module.eq_ignore_ascii_case(&incoming.module) {
            continue;
        }
        match (existing.only, incoming.only) {
            // A generic import already grants every symbol.
            (false, _) => {
                debug!(?scope, module = %incoming.module, "module already imported");
                return Ok(Placement::Discarded);
            }
            (true, false) => {}
            (true, true) => {
                remaining.remove_covered(&existing.names);
                if remaining.is_empty() {
                    debug!(?scope, module = %incoming.module, "symbols already imported");
                    return Ok(Placement::Discarded);
                }
                merge_into.get_or_insert(child);
            }
        }
    }

    if let Some(into) = merge_into {
        if let Some(existing) = tree.get_mut(into)?.as_use_mut() {
            existing.names.extend_from(&remaining);
        }
        debug!(?scope, ?into, module = %incoming.module, "merged symbols into existing import");
        return Ok(Placement::Merged { into });
    }
    insert_at(tree, scope, node, Position::First)
}

/// Read-only view of a scope's statement list used to find zone boundaries.
struct Statements<'a> {
    tree: &'a SourceTree,
    ids: &'a [NodeId],
}

impl<'a> Statements<'a> {
    fn of(tree: &'a SourceTree, scope: NodeId) -> Self {
        Self {
            tree,
            ids: tree.children(scope),
        }
    }

    fn get(&self, index: usize) -> Option<&'a Statement> {
        self.ids.get(index).and_then(|&id| self.tree.statement(id))
    }

    fn is(&self, index: usize, predicate: impl Fn(&Statement) -> bool) -> bool {
        self.get(index).is_some_and(predicate)
    }

    fn any(&self, predicate: impl Fn(&Statement) -> bool) -> bool {
        (0..self.ids.len()).any(|index| self.is(index, &predicate))
    }

    /// First index after the leading imports, not counting comments that
    /// trail the last import.
    fn after_imports(&self) -> usize {
        let mut index = 0;
        while self.is(index, |s| s.is_use() || s.is_comment_like()) {
            index += 1;
        }
        while index > 0 && self.is(index - 1, Statement::is_comment_like) {
            index -= 1;
        }
        index
    }

    /// Index just past an `IMPLICIT NONE` found at `start`, possibly after
    /// comments; `start` itself when there is none.
    fn after_implicit_none(&self, start: usize) -> usize {
        let mut index = start;
        while let Some(statement) = self.get(index) {
            if statement.is_implicit_none() {
                return index + 1;
            }
            if !statement.is_comment_like() {
                break;
            }
            index += 1;
        }
        start
    }

    fn after_intent_declarations(&self, start: usize) -> usize {
        let mut index = start;
        while self.is(index, Statement::is_intent_declaration) {
            index += 1;
        }
        index
    }
}
