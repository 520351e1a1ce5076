#![allow(dead_code)]

use fgen::prelude::*;

/// Index of the first rendered line of `root` containing `needle`.
pub fn line_number(builder: &ProgramBuilder, root: NodeId, needle: &str) -> Option<usize> {
    builder
        .to_source(root)
        .lines()
        .position(|line| line.contains(needle))
}

/// Number of rendered lines of `root` containing `needle`.
pub fn count_lines(builder: &ProgramBuilder, root: NodeId, needle: &str) -> usize {
    builder
        .to_source(root)
        .lines()
        .filter(|line| line.contains(needle))
        .count()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// A module `testmodule` holding an attached subroutine `testsubroutine`.
pub fn module_with_subroutine(builder: &mut ProgramBuilder) -> (NodeId, NodeId) {
    init_tracing();
    let module = builder
        .module(ModuleOptions::builder().name("testmodule").build())
        .unwrap();
    let subroutine = builder
        .subroutine(
            module,
            SubroutineOptions::builder().name("testsubroutine").build(),
        )
        .unwrap();
    builder.add(module, subroutine, Position::Auto).unwrap();
    (module, subroutine)
}

pub fn integer(builder: &mut ProgramBuilder, parent: NodeId, names: &[&str]) -> NodeId {
    builder
        .declaration(
            parent,
            DeclSpec::builder()
                .datatype("integer")
                .names(names.iter().map(|name| name.to_string()).collect())
                .build(),
        )
        .unwrap()
}

pub fn derived(builder: &mut ProgramBuilder, parent: NodeId, datatype: &str, names: &[&str]) -> NodeId {
    builder
        .type_declaration(
            parent,
            TypeDeclSpec::builder()
                .datatype(datatype)
                .names(names.iter().map(|name| name.to_string()).collect())
                .build(),
        )
        .unwrap()
}

pub fn use_only(builder: &mut ProgramBuilder, parent: NodeId, module: &str, names: &[&str]) -> NodeId {
    builder
        .use_module(
            parent,
            UseOptions::builder()
                .module(module)
                .only(true)
                .names(names.iter().map(|name| name.to_string()).collect())
                .build(),
        )
        .unwrap()
}

pub fn use_all(builder: &mut ProgramBuilder, parent: NodeId, module: &str) -> NodeId {
    builder
        .use_module(parent, UseOptions::builder().module(module).build())
        .unwrap()
}
