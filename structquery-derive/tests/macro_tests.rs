//! Proc-macro testing using trybuild.

/// Tests that invalid macro usage produces helpful error messages
#[test]
fn compile_fail_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui-fail/*.rs");
}

/// Tests that valid macro usage compiles successfully
#[test]
fn compile_pass_tests() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui-pass/*.rs");
}
