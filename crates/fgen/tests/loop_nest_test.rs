mod common;

use common::*;
use fgen::prelude::*;

/// A subroutine holding `before` (if any) followed by a loop containing a call.
fn loop_with_call(
    builder: &mut ProgramBuilder,
    before: &[(&str, &str)],
) -> (NodeId, Vec<NodeId>, NodeId, NodeId) {
    let (_, subroutine) = module_with_subroutine(builder);
    let mut preceding = Vec::new();
    for &(position, kind) in before {
        let node = match position {
            "call" => builder
                .call(subroutine, kind, std::iter::empty::<&str>())
                .unwrap(),
            _ => builder
                .directive(subroutine, "omp", position, kind, "")
                .unwrap(),
        };
        builder.add(subroutine, node, Position::Auto).unwrap();
        preceding.push(node);
    }
    let do_loop = builder.do_loop(subroutine, "it", "1", "10", None).unwrap();
    builder.add(subroutine, do_loop, Position::Auto).unwrap();
    let call = builder.call(do_loop, "testcall", ["it"]).unwrap();
    builder.add(do_loop, call, Position::Auto).unwrap();
    (subroutine, preceding, do_loop, call)
}

#[test]
fn test_loop_first_in_subroutine() {
    let mut builder = ProgramBuilder::new();
    let (subroutine, _, do_loop, call) = loop_with_call(&mut builder, &[]);

    let found = builder.locate_outer_loop_insertion_point(call).unwrap();
    assert_eq!(
        found,
        LoopNestInsertion {
            container: subroutine,
            outer_loop: do_loop,
            head: do_loop,
            anchor: do_loop,
        }
    );
}

#[test]
fn test_loop_after_other_statement() {
    let mut builder = ProgramBuilder::new();
    let (subroutine, preceding, do_loop, call) =
        loop_with_call(&mut builder, &[("call", "setup")]);

    let found = builder.locate_outer_loop_insertion_point(call).unwrap();
    assert_eq!(found.container, subroutine);
    assert_eq!(found.outer_loop, do_loop);
    assert_eq!(found.head, do_loop);
    assert_eq!(found.anchor, preceding[0]);
}

#[test]
fn test_begin_directive_belongs_to_the_nest() {
    let mut builder = ProgramBuilder::new();
    let (subroutine, preceding, do_loop, call) = loop_with_call(
        &mut builder,
        &[("call", "setup"), ("begin", "do")],
    );

    let found = builder.locate_outer_loop_insertion_point(call).unwrap();
    assert_eq!(found.outer_loop, do_loop);
    assert_eq!(found.head, preceding[1]);
    assert_eq!(found.anchor, preceding[0]);

    let halo = builder
        .call(subroutine, "halo_exchange", ["f"])
        .unwrap();
    builder
        .add(found.container, halo, found.position())
        .unwrap();
    let halo_line = line_number(&builder, subroutine, "CALL halo_exchange(f)").unwrap();
    let directive_line = line_number(&builder, subroutine, "!$omp do").unwrap();
    assert_eq!(directive_line - halo_line, 1);
}

#[test]
fn test_begin_directive_first_in_subroutine() {
    let mut builder = ProgramBuilder::new();
    let (_, preceding, _, call) = loop_with_call(&mut builder, &[("begin", "parallel do")]);

    let found = builder.locate_outer_loop_insertion_point(call).unwrap();
    assert_eq!(found.head, preceding[0]);
    assert_eq!(found.anchor, preceding[0]);
}

#[test]
fn test_end_directive_is_an_ordinary_predecessor() {
    let mut builder = ProgramBuilder::new();
    let (_, preceding, do_loop, call) = loop_with_call(&mut builder, &[("end", "do")]);

    let found = builder.locate_outer_loop_insertion_point(call).unwrap();
    assert_eq!(found.head, do_loop);
    assert_eq!(found.anchor, preceding[0]);
}

#[test]
fn test_nested_loops_resolve_to_outermost() {
    let mut builder = ProgramBuilder::new();
    let (subroutine, _, outer, _) = loop_with_call(&mut builder, &[]);
    let inner = builder.do_loop(outer, "jt", "1", "5", None).unwrap();
    builder.add(outer, inner, Position::Auto).unwrap();
    let work = builder.assign(inner, "x", "0.0").unwrap();
    builder.add(inner, work, Position::Auto).unwrap();

    for start in [work, inner, outer] {
        let found = builder.locate_outer_loop_insertion_point(start).unwrap();
        assert_eq!(found.container, subroutine);
        assert_eq!(found.outer_loop, outer);
    }
}

#[test]
fn test_no_enclosing_loop() {
    let mut builder = ProgramBuilder::new();
    let (_, subroutine) = module_with_subroutine(&mut builder);
    let directive = builder
        .directive(subroutine, "omp", "end", "do", "")
        .unwrap();
    builder.add(subroutine, directive, Position::Auto).unwrap();
    let call = builder.call(subroutine, "testcall", ["a", "b"]).unwrap();
    builder.add(subroutine, call, Position::Auto).unwrap();

    let err = builder.locate_outer_loop_insertion_point(call).unwrap_err();
    assert_eq!(err, GenError::NoEnclosingLoop(call));
    assert!(err.to_string().contains("has no enclosing do loop"));
}

#[test]
fn test_loop_not_yet_added() {
    let mut builder = ProgramBuilder::new();
    let (_, subroutine) = module_with_subroutine(&mut builder);
    let do_loop = builder.do_loop(subroutine, "i", "1", "n", None).unwrap();
    let call = builder
        .call(do_loop, "work", std::iter::empty::<&str>())
        .unwrap();
    builder.add(do_loop, call, Position::Auto).unwrap();

    assert_eq!(
        builder.locate_outer_loop_insertion_point(call),
        Err(GenError::NotAttached(do_loop))
    );
}
