//! Stack capture as seen by a downstream crate.

use exitus::{construct, exitus, kind::Unexpected, NewError, ResultExt, StackRequest};

#[test]
fn captured_stack_starts_at_caller() {
    let err = construct(NewError::new().with_stack(true));
    let stack = err.stack().expect("platform supports backtraces");

    assert!(!stack.is_empty());
    assert!(!stack.contains("exitus::stack::capture"), "got: {}", stack);
    assert!(!stack.contains("exitus::error::construct"), "got: {}", stack);
    assert!(!stack.contains("Backtrace::force_capture"), "got: {}", stack);
    assert!(stack.contains("captured_stack_starts_at_caller"), "got: {}", stack);
}

#[test]
fn macro_and_builder_capture() {
    let err = exitus!(Unexpected, "state drifted", { stack: StackRequest::Capture });
    let stack = err.stack().expect("platform supports backtraces");
    assert!(!stack.contains("exitus::error::NewError"), "got: {}", stack);
    assert!(stack.contains("macro_and_builder_capture"), "got: {}", stack);
}

#[test]
fn no_stack_unless_requested() {
    let err = construct(NewError::new().with_message("boom"));
    assert_eq!(err.message(), Some("boom"));
    assert!(err.stack().is_none());
}

#[test]
fn literal_overrides_capture() {
    let err = construct(NewError::new().with_stack("handwritten"));
    assert_eq!(err.stack(), Some("handwritten"));
}

#[test]
fn adapters_have_no_stack() {
    let result: Result<(), std::io::Error> =
        Err(std::io::Error::new(std::io::ErrorKind::Other, "low"));
    let err = result.err_context("wrapped").unwrap_err();
    assert!(err.stack().is_none());
}
