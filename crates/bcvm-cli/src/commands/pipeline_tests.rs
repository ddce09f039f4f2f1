//! End-to-end command tests: `compile` + `run` must behave like `cRun`.

use std::path::{Path, PathBuf};

use indoc::indoc;

use super::c_run::{self, CRunArgs};
use super::compile::{self, CompileArgs, output_path};
use super::dump::{self, DumpArgs};
use super::error::CliError;
use super::run::{self, RunArgs};
use super::run_common::ExecOptions;
use super::symbols::{self, SymbolsArgs};

const STACK: u32 = 64;

const HELLO: &str = indoc! {r#"
    // greet, then print a number
    LITERAL_ARRAY "Hi"
    LITERAL 2
    PRINT
    PRINT_ENDL
    LITERAL 72
    PRINT_INT
    PRINT_ENDL
"#};

const FUNCTIONS: &str = indoc! {"
    LITERAL 20
    LITERAL 22
    LITERAL $add
    CALL
    PRINT_INT
    PRINT_ENDL
    LITERAL @end
    JMP
    $add #a #b
    LITERAL #a
    LOAD_ARG
    LITERAL #b
    LOAD_ARG
    ADD
    RETURN
    @end
"};

const FAULTING: &str = indoc! {"
    LITERAL 1
    PRINT_INT
    ADD
"};

fn exec() -> ExecOptions {
    ExecOptions {
        memory_size: 4096,
        fuel: Some(10_000),
        verbosity: None,
        color: false,
    }
}

fn write_source(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn compile_to_image(path: &Path) -> Result<PathBuf, CliError> {
    compile::run(CompileArgs {
        path: path.to_path_buf(),
        stack_size: STACK,
        report: false,
        color: false,
    })?;
    Ok(output_path(path))
}

fn run_image(path: &Path) -> (Result<(), CliError>, String) {
    let mut out: Vec<u8> = Vec::new();
    let result = run::run(
        RunArgs {
            path: path.to_path_buf(),
            exec: exec(),
        },
        &mut out,
    );
    (result, String::from_utf8(out).unwrap())
}

fn c_run_source(path: &Path) -> (Result<(), CliError>, String) {
    let mut out: Vec<u8> = Vec::new();
    let result = c_run::run(
        CRunArgs {
            path: path.to_path_buf(),
            stack_size: STACK,
            exec: exec(),
        },
        &mut out,
    );
    (result, String::from_utf8(out).unwrap())
}

fn exit_code(result: &Result<(), CliError>) -> u8 {
    result.as_ref().err().map_or(0, CliError::exit_code)
}

#[track_caller]
fn assert_same_behavior(text: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "prog.bca", text);

    let image = compile_to_image(&source).unwrap();
    let (run_result, run_out) = run_image(&image);
    let (c_run_result, c_run_out) = c_run_source(&source);

    assert_eq!(run_out, c_run_out);
    assert_eq!(exit_code(&run_result), exit_code(&c_run_result));
    run_out
}

#[test]
fn compile_then_run_matches_c_run() {
    assert_eq!(assert_same_behavior(HELLO), "Hi\n72\n");
    assert_eq!(assert_same_behavior(FUNCTIONS), "42\n");
}

#[test]
fn runtime_fault_matches_c_run() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "fault.bca", FAULTING);

    assert_eq!(assert_same_behavior(FAULTING), "1");
    let (result, _) = c_run_source(&source);
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 5);
    assert_eq!(err.to_string(), "runtime error: stack underflow");
}

#[test]
fn compile_writes_sibling_image() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "hello.bca", HELLO);

    let image = compile_to_image(&source).unwrap();

    assert_eq!(image, dir.path().join("hello.bce"));
    let bytes = std::fs::read(&image).unwrap();
    assert_eq!(&bytes[..8], [64, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn output_path_rules() {
    assert_eq!(output_path(Path::new("a/hello.bca")), PathBuf::from("a/hello.bce"));
    assert_eq!(output_path(Path::new("prog")), PathBuf::from("prog.bce"));
    assert_eq!(output_path(Path::new("prog.txt")), PathBuf::from("prog.txt.bce"));
}

#[test]
fn compile_failure_is_exit_code_3() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "bad.bca", "LITERAL 1\nBOGUS\n");

    let err = compile_to_image(&source).unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("invalid opcode `BOGUS`"), "{err}");
    assert!(!dir.path().join("bad.bce").exists());

    let (result, out) = c_run_source(&source);
    assert_eq!(exit_code(&result), 3);
    assert_eq!(out, "");
}

#[test]
fn missing_image_is_exit_code_4() {
    let dir = tempfile::tempdir().unwrap();

    let (result, _) = run_image(&dir.path().join("missing.bce"));
    assert!(matches!(result, Err(CliError::Io { .. })));
    assert_eq!(exit_code(&result), 4);
}

#[test]
fn unreadable_source_is_compile_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.bca");
    let empty = write_source(dir.path(), "empty.bca", "");

    let (result, _) = c_run_source(&missing);
    assert!(matches!(result, Err(CliError::Source(_))));
    assert_eq!(exit_code(&result), 3);

    let err = compile_to_image(&missing).unwrap_err();
    assert_eq!(err.exit_code(), 3);

    let err = compile_to_image(&empty).unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert!(!dir.path().join("empty.bce").exists());
}

#[test]
fn truncated_image_is_exit_code_4() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("short.bce");
    std::fs::write(&image, [1, 2, 3]).unwrap();

    let (result, _) = run_image(&image);
    assert!(matches!(result, Err(CliError::Load(_))));
    assert_eq!(exit_code(&result), 4);
}

#[test]
fn fuel_exhaustion_is_runtime_fault() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "spin.bca", "@spin\nLITERAL @spin\nJMP\n");

    let (result, _) = c_run_source(&source);
    assert!(matches!(result, Err(CliError::Runtime(_))));
    assert_eq!(exit_code(&result), 5);
}

#[test]
fn dump_assembly_names_labels() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "d.bca", "@start\nLITERAL 72\nPRINT_INT\n");
    let mut out: Vec<u8> = Vec::new();

    dump::run(
        DumpArgs {
            path: source,
            stack_size: STACK,
            color: false,
        },
        &mut out,
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        indoc! {"
            [header]
            stack_size   = 64
            static_count = 0
            code_bytes   = 6

            [code]
            @start:
              64  LITERAL 72
              69  PRINT_INT
        "}
    );
}

#[test]
fn dump_image_has_no_labels() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "d.bca", "@start\nLITERAL 72\nPRINT_INT\n");
    let image = compile_to_image(&source).unwrap();
    let mut out: Vec<u8> = Vec::new();

    dump::run(
        DumpArgs {
            path: image,
            stack_size: STACK,
            color: false,
        },
        &mut out,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("@start"));
    assert!(text.contains("  64  LITERAL 72\n"));
}

#[test]
fn symbols_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "s.bca", FUNCTIONS);
    let mut out: Vec<u8> = Vec::new();

    symbols::run(
        SymbolsArgs {
            path: source,
            stack_size: STACK,
            color: false,
        },
        &mut out,
    )
    .unwrap();

    let listing: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(listing["stack_size"], 64);
    assert_eq!(listing["static_count"], 0);
    assert_eq!(listing["symbols"][0]["name"], "$add");
    assert_eq!(listing["symbols"][0]["kind"], "function");
    assert_eq!(listing["symbols"][1]["name"], "#a");
    assert_eq!(listing["symbols"][1]["function"], "$add");
    assert_eq!(listing["functions"][0]["arg_count"], 2);
}
