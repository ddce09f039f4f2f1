//! Command builders for the CLI.
//!
//! Every operation accepts the full set of flags so scripts can pass one
//! flag list to any operation; flags an operation ignores are hidden from
//! its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden execution args (for commands that don't run a program).
fn with_hidden_exec_args(cmd: Command) -> Command {
    cmd.arg(memory_arg().hide(true))
        .arg(fuel_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("bcvm")
        .about("Assembler and stack-based bytecode virtual machine")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(compile_command())
        .subcommand(run_command())
        .subcommand(c_run_command())
        .subcommand(dump_command())
        .subcommand(symbols_command())
}

/// Assemble a source file into an image next to it.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Assemble a .bca file into a .bce image")
        .after_help(
            r#"EXAMPLES:
  bcvm compile hello.bca              # writes hello.bca -> hello.bce
  bcvm compile prog                   # writes prog.bce
  bcvm compile hello.bca -v           # report instruction and symbol counts"#,
        )
        .arg(path_arg("Assembly source file"))
        .arg(stack_size_arg())
        .arg(report_arg())
        .arg(color_arg());

    with_hidden_exec_args(cmd)
}

/// Execute a compiled image.
pub fn run_command() -> Command {
    Command::new("run")
        .about("Load and execute a .bce image")
        .after_help(
            r#"EXAMPLES:
  bcvm run hello.bce                  # execute
  bcvm run hello.bce -vv              # with stack and heap trace on stderr
  bcvm run loop.bce --fuel 10000      # stop runaway programs"#,
        )
        .arg(path_arg("Compiled image"))
        .arg(memory_arg())
        .arg(fuel_arg())
        .arg(verbose_arg())
        .arg(color_arg())
        .arg(stack_size_arg().hide(true))
}

/// Assemble in memory and execute.
pub fn c_run_command() -> Command {
    Command::new("cRun")
        .visible_alias("crun")
        .about("Assemble a .bca file in memory and execute it")
        .after_help(
            r#"EXAMPLES:
  bcvm cRun hello.bca                 # nothing is written to disk
  bcvm cRun hello.bca -v              # trace calls with function names"#,
        )
        .arg(path_arg("Assembly source file"))
        .arg(stack_size_arg())
        .arg(memory_arg())
        .arg(fuel_arg())
        .arg(verbose_arg())
        .arg(color_arg())
}

/// Disassemble an image or assembly file.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the disassembled image")
        .after_help(
            r#"EXAMPLES:
  bcvm dump hello.bce                 # raw image, no symbol names
  bcvm dump hello.bca                 # assemble first, label functions"#,
        )
        .arg(path_arg("Compiled image, or .bca source"))
        .arg(stack_size_arg())
        .arg(color_arg())
        .arg(verbose_arg().hide(true));

    with_hidden_exec_args(cmd)
}

/// Print the resolved symbol table as JSON.
pub fn symbols_command() -> Command {
    let cmd = Command::new("symbols")
        .about("Print the resolved symbol table of a .bca file as JSON")
        .arg(path_arg("Assembly source file"))
        .arg(stack_size_arg())
        .arg(color_arg())
        .arg(verbose_arg().hide(true));

    with_hidden_exec_args(cmd)
}
