use fgen_tree::{NodeId, TreeError};

/// Failures of builder operations.
///
/// Deduplicated declarations and imports are not errors; see
/// [`Placement`](crate::Placement).
#[derive(Debug, PartialEq, Eq, thiserror::Error, Clone)]
pub enum GenError {
    #[error(
        "Cannot add {node:?} to {target:?} because it is not a descendant of it or of any of its ancestors"
    )]
    NotADescendant { node: NodeId, target: NodeId },
    #[error(
        "Unsupported position `{0}`; supported positions are auto, append, first, insert, before, after, before_index and after_index"
    )]
    UnsupportedPosition(String),
    #[error("Position `{0}` requires an index or sibling argument of the matching kind")]
    MissingPositionArgument(String),
    #[error("Auto placement must be resolved by a module, subroutine or block, not by {target:?}")]
    AutoNotSupportedHere { target: NodeId },
    #[error(
        "Failed to find {sibling:?} in the statements of {parent:?}; is it a child of the parent?"
    )]
    SiblingNotFound { parent: NodeId, sibling: NodeId },
    #[error("Cannot add {node:?} to {target:?} because the target lies inside it")]
    CyclicInsertion { node: NodeId, target: NodeId },
    #[error("{0:?} has no enclosing do loop")]
    NoEnclosingLoop(NodeId),
    #[error("{0:?} is not inside a module or subroutine")]
    NoEnclosingScope(NodeId),
    #[error("{0:?} has not been added to its parent yet")]
    NotAttached(NodeId),
    #[error("No loop found in {0:?}; there is no previous loop")]
    NoPreviousLoop(NodeId),
    #[error("No variable declarations found in {0:?}")]
    NoDeclarations(NodeId),
    #[error("Only integer and real are supported intrinsic types, but found `{0}`")]
    UnsupportedDeclarationKind(String),
    #[error("Cannot create a declaration without specifying the name(s) of the variable(s)")]
    MissingEntityNames,
    #[error("{statement} requires at least one item")]
    EmptyItemList { statement: &'static str },
    #[error("Unsupported directive language `{0}`; expected omp")]
    UnsupportedDirectiveLanguage(String),
    #[error("Unrecognised directive type `{0}`; expected parallel do, parallel, do or master")]
    UnsupportedDirectiveType(String),
    #[error("Unrecognised directive position `{0}`; expected begin or end")]
    UnsupportedDirectivePosition(String),
    #[error("The parent of implicit none must be a module or a subroutine, but found {0:?}")]
    ImplicitNoneOutsideScope(NodeId),
    #[error("{0:?} cannot hold statements; only modules, subroutines, blocks and selects can")]
    NoStatementList(NodeId),
    #[error("{0:?} appears more than once in the case body")]
    DuplicateCaseStatement(NodeId),
    #[error("{0:?} is not a select block")]
    NotASelect(NodeId),
    #[error("{0:?} is not a subroutine")]
    NotASubroutine(NodeId),
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}

impl GenError {
    /// True for the failures reported when a directive flavour is not recognised.
    pub fn is_unsupported_directive(&self) -> bool {
        matches!(
            self,
            GenError::UnsupportedDirectiveLanguage(_)
                | GenError::UnsupportedDirectiveType(_)
                | GenError::UnsupportedDirectivePosition(_)
        )
    }
}
