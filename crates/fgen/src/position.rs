use fgen_tree::NodeId;

use crate::error::GenError;

/// Where [`ProgramBuilder::add`](crate::ProgramBuilder::add) places a node.
///
/// Index variants refer to the target's statement list, which includes its
/// terminal `END` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Let the target pick a legal location for the node.
    #[default]
    Auto,
    Append,
    First,
    Insert(usize),
    BeforeIndex(usize),
    AfterIndex(usize),
    /// Directly before an existing child, found by identity.
    Before(NodeId),
    /// Directly after an existing child, found by identity.
    After(NodeId),
}

/// Argument accompanying a textual position tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionArgument {
    Index(usize),
    Node(NodeId),
}

impl Position {
    /// Parse a position tag such as `"before_index"` with its argument.
    pub fn parse_tag(tag: &str, argument: Option<PositionArgument>) -> Result<Self, GenError> {
        use PositionArgument::{Index, Node};

        let missing = || GenError::MissingPositionArgument(tag.to_string());
        match (tag, argument) {
            ("auto", _) => Ok(Position::Auto),
            ("append", _) => Ok(Position::Append),
            ("first", _) => Ok(Position::First),
            ("insert", Some(Index(index))) => Ok(Position::Insert(index)),
            ("before_index", Some(Index(index))) => Ok(Position::BeforeIndex(index)),
            ("after_index", Some(Index(index))) => Ok(Position::AfterIndex(index)),
            ("before", Some(Node(sibling))) => Ok(Position::Before(sibling)),
            ("after", Some(Node(sibling))) => Ok(Position::After(sibling)),
            ("insert" | "before_index" | "after_index" | "before" | "after", _) => Err(missing()),
            _ => Err(GenError::UnsupportedPosition(tag.to_string())),
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Position::Auto)
    }
}
