use crate::compiler::{Assembly, assemble};
use crate::diagnostics::DiagnosticMessage;

/// Stack size used by tests so addresses stay small.
pub const TEST_STACK: u32 = 64;

#[track_caller]
pub fn assemble_ok(source: &str) -> Assembly {
    assemble(source, TEST_STACK).unwrap_or_else(|diags| panic!("{}", diags.render(source)))
}

#[track_caller]
pub fn assemble_err(source: &str) -> DiagnosticMessage {
    match assemble(source, TEST_STACK) {
        Ok(_) => panic!("expected assembly of {source:?} to fail"),
        Err(diags) => {
            assert_eq!(diags.len(), 1, "first error aborts");
            diags.first().cloned().unwrap()
        }
    }
}
