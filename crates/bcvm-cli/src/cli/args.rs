//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! The same definition is reused across commands, hidden (via `.hide(true)`)
//! where the command accepts but ignores it.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Input file (positional, required).
pub fn path_arg(help: &'static str) -> Arg {
    Arg::new("path")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help(help)
}

/// Stack region size written into compiled images (--stack-size).
pub fn stack_size_arg() -> Arg {
    Arg::new("stack_size")
        .long("stack-size")
        .value_name("BYTES")
        .default_value("1048576")
        .value_parser(value_parser!(u32).range(4..))
        .help("Stack region size in bytes")
}

/// VM arena size (--memory).
pub fn memory_arg() -> Arg {
    Arg::new("memory")
        .long("memory")
        .value_name("BYTES")
        .default_value("16777216")
        .value_parser(value_parser!(u32))
        .help("Total VM memory in bytes (stack, code, statics and heap)")
}

/// Execution fuel (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Stop after N executed instructions")
}

/// Verbosity level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Trace execution (-v calls, -vv stack and heap, -vvv every push)")
}

/// Compile report (-v).
pub fn report_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Report instruction and symbol counts")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
