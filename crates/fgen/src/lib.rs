//! High-level builder for generating Fortran source.
//!
//! Callers create statements with the factory methods of [`ProgramBuilder`]
//! and attach them with [`ProgramBuilder::add`]. Unless told otherwise the
//! builder decides where a statement goes:
//!
//! - In a module or subroutine, imports lead, followed by `IMPLICIT NONE`,
//!   intent-qualified declarations, other declarations and finally the body.
//!   Declarations and imports that repeat what the unit already has are merged
//!   or dropped.
//! - In a do loop or if block, statements are appended to the body, except
//!   declarations and imports, which are moved to the enclosing unit.
//!
//! # Types
//!
//! - [`ProgramBuilder`] - Owns the [`SourceTree`](fgen_tree::SourceTree) under construction
//! - [`Position`] - Where to place a statement
//! - [`Placement`] - What `add` did with a statement
//! - [`LoopNestInsertion`] - Location ahead of a loop nest
//! - [`GenError`] - Failures of builder operations

mod ancestry;
mod block;
mod builder;
mod error;
mod factory;
mod insert;
mod loop_nest;
pub mod modify;
mod position;
mod query;
mod scope;
mod select;

pub use builder::*;
pub use error::*;
pub use factory::*;
pub use loop_nest::LoopNestInsertion;
pub use position::*;

pub use fgen_tree;

pub mod prelude {
    pub use crate::{
        DeclSpec, GenError, LoopNestInsertion, ModuleOptions, Placement, Position,
        ProgramBuilder, SubroutineOptions, TypeDeclSpec, UseOptions,
    };
    pub use fgen_tree::{NodeId, RenderConfig, Statement};
}
