//! Syntax tree for generated Fortran source.
//!
//! A [`SourceTree`] is an arena of [`Statement`]s addressed by [`NodeId`]. Each
//! node holds its construction context or containing node as parent and an
//! ordered statement list as children, so there is exactly one tree to keep
//! consistent.

pub mod render;
pub mod statement;
pub mod tree;

pub use render::{KeywordCase, NewlineStyle, Printer, RenderConfig, render};
pub use statement::{
    Case, Declaration, Directive, DirectiveKind, DirectiveLanguage, DirectivePosition, DoLoop,
    EndKind, EntityNames, IntrinsicType, Select, Statement, TypeFamily, UseStmt,
};
pub use tree::{NodeId, SourceTree, TreeError};

pub mod prelude {
    pub use crate::render::{RenderConfig, render};
    pub use crate::statement::*;
    pub use crate::tree::{NodeId, SourceTree, TreeError};
}
