use indoc::indoc;

use super::diagnostics::DiagnosticKind;
use super::resolve::resolve;
use super::symbol_table::SymbolKind;
use super::test_utils::{TEST_STACK, assemble_err};

#[test]
fn resolve_addresses_and_sizes() {
    let src = indoc! {"
        LITERAL #count
        $main #a
        LITERAL #a
        LOAD_ARG
        @loop
        LITERAL @loop
        JMP
    "};

    let program = resolve(src, TEST_STACK).unwrap();
    let symbols = &program.symbols;

    assert_eq!(program.instruction_bytes, 25);
    assert_eq!(symbols.value("$main"), Some(69));
    assert_eq!(symbols.value("@loop"), Some(83));
    assert_eq!(symbols.value("#count"), Some(89));
    assert_eq!(symbols.value("#a"), Some(0));
    assert_eq!(symbols.static_count(), 1);
}

#[test]
fn literal_array_sizes() {
    let src = indoc! {r#"
        LITERAL_ARRAY "Hi"
        LITERAL_ARRAY 1 2 3
        LITERAL_ARRAY "a b c"
    "#};

    let program = resolve(src, TEST_STACK).unwrap();

    assert_eq!(program.instruction_bytes, 13 + 17 + 25);
}

#[test]
fn literal_array_declares_variables() {
    let src = indoc! {"
        $f
        LITERAL_ARRAY #i #j 3
        RETURN
    "};

    let program = resolve(src, 0).unwrap();

    assert_eq!(program.symbols.function_var_count("$f"), Some(2));
    assert_eq!(program.symbols.value("#j"), Some(4));
}

#[test]
fn variables_declared_on_first_use() {
    let src = indoc! {"
        $f
        LITERAL #t
        LITERAL #t
        LITERAL #u
        RETURN
        $g
        LITERAL #t
        RETURN
    "};

    let program = resolve(src, 0).unwrap();
    let symbols = &program.symbols;

    assert_eq!(symbols.function_var_count("$f"), Some(2));
    assert_eq!(symbols.function_var_count("$g"), Some(0));
    let locals = symbols
        .symbols()
        .filter(|s| s.kind == SymbolKind::Local)
        .count();
    assert_eq!(locals, 2);
}

#[test]
fn comments_do_not_count() {
    let src = indoc! {"
        // nothing here
        PRINT_ENDL

        // or here
    "};

    assert_eq!(resolve(src, 0).unwrap().instruction_bytes, 1);
}

#[test]
fn invalid_opcode() {
    let diag = assemble_err("ADD\nFOO 1\n");

    assert_eq!(diag.kind(), DiagnosticKind::InvalidOpcode);
    assert_eq!(diag.line(), 2);
    assert_eq!(diag.range(), 4..7);
    assert_eq!(diag.to_string(), "line 2: invalid opcode `FOO`");
}

#[test]
fn mnemonics_are_case_sensitive() {
    let diag = assemble_err("print_endl");

    assert_eq!(diag.kind(), DiagnosticKind::InvalidOpcode);
}

#[test]
fn duplicate_label() {
    let diag = assemble_err("@a\nPRINT_ENDL\n@a\n");

    assert_eq!(diag.kind(), DiagnosticKind::DuplicateSymbol);
    assert_eq!(diag.line(), 3);
    assert_eq!(diag.message(), "`@a` is already defined");
}

#[test]
fn duplicate_function_argument() {
    let src = "$f #a #a";
    let diag = assemble_err(src);

    assert_eq!(diag.kind(), DiagnosticKind::DuplicateSymbol);
    assert_eq!(&src[diag.range()], "#a");
}

#[test]
fn argument_name_reused_by_later_function() {
    let src = indoc! {"
        $f #a
        RETURN
        $g #a
        RETURN
    "};
    let diag = assemble_err(src);

    assert_eq!(diag.kind(), DiagnosticKind::DuplicateSymbol);
    assert_eq!(diag.line(), 3);
    assert_eq!(diag.message(), "`#a` is already defined");
}

#[test]
fn malformed_function_argument() {
    let src = "$f #a b";
    let diag = assemble_err(src);

    assert_eq!(diag.kind(), DiagnosticKind::MalformedArgument);
    assert_eq!(diag.range(), 6..7);
    assert_eq!(diag.message(), "function arguments must be `#name`, found `b`");
}

#[test]
fn label_takes_no_operands() {
    let diag = assemble_err("@loop 1");

    assert_eq!(diag.kind(), DiagnosticKind::WrongArity);
    assert_eq!(
        diag.message(),
        "wrong number of arguments: label `@loop` takes no operands"
    );
}

#[test]
fn literal_takes_exactly_one_operand() {
    assert_eq!(assemble_err("LITERAL").kind(), DiagnosticKind::WrongArity);
    assert_eq!(
        assemble_err("LITERAL 1 2").message(),
        "wrong number of arguments: `LITERAL` takes exactly one operand, found 2"
    );
}

#[test]
fn literal_array_needs_operands() {
    assert_eq!(
        assemble_err("LITERAL_ARRAY").message(),
        "wrong number of arguments: `LITERAL_ARRAY` takes at least one operand"
    );
    assert_eq!(
        assemble_err(r#"LITERAL_ARRAY "a" 1"#).kind(),
        DiagnosticKind::WrongArity
    );
}

#[test]
fn plain_opcode_takes_no_operands() {
    let src = "ADD 1";
    let diag = assemble_err(src);

    assert_eq!(diag.kind(), DiagnosticKind::WrongArity);
    assert_eq!(&src[diag.range()], "1");
}

#[test]
fn bare_sigil() {
    let diag = assemble_err("@");

    assert_eq!(diag.kind(), DiagnosticKind::MissingName);
    assert_eq!(diag.message(), "`@` is missing a name");
}

#[test]
fn first_error_aborts() {
    let diag = assemble_err("NOPE\nALSO_NOPE\n");

    assert_eq!(diag.line(), 1);
}
