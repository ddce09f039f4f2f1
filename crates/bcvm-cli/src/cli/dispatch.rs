//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs populated from clap
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use bcvm_bytecode::DEFAULT_STACK_SIZE;
use bcvm_vm::{DEFAULT_MEMORY_SIZE, Verbosity};
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::c_run::CRunArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::run::RunArgs;
use crate::commands::run_common::ExecOptions;
use crate::commands::symbols::SymbolsArgs;

pub struct CompileParams {
    pub path: PathBuf,
    pub stack_size: u32,
    pub verbose: u8,
    pub color: ColorChoice,
    // Note: memory and fuel are parsed but not extracted (unified flags)
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: parse_path(m),
            stack_size: parse_stack_size(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            path: p.path,
            stack_size: p.stack_size,
            report: p.verbose > 0,
            color: p.color.should_colorize(),
        }
    }
}

pub struct RunParams {
    pub path: PathBuf,
    pub memory: u32,
    pub fuel: Option<u32>,
    pub verbose: u8,
    pub color: ColorChoice,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: parse_path(m),
            memory: parse_memory(m),
            fuel: m.get_one::<u32>("fuel").copied(),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        let color = p.color.should_colorize();
        Self {
            path: p.path,
            exec: exec_options(p.memory, p.fuel, p.verbose, color),
        }
    }
}

pub struct CRunParams {
    pub path: PathBuf,
    pub stack_size: u32,
    pub memory: u32,
    pub fuel: Option<u32>,
    pub verbose: u8,
    pub color: ColorChoice,
}

impl CRunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: parse_path(m),
            stack_size: parse_stack_size(m),
            memory: parse_memory(m),
            fuel: m.get_one::<u32>("fuel").copied(),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<CRunParams> for CRunArgs {
    fn from(p: CRunParams) -> Self {
        let color = p.color.should_colorize();
        Self {
            path: p.path,
            stack_size: p.stack_size,
            exec: exec_options(p.memory, p.fuel, p.verbose, color),
        }
    }
}

pub struct DumpParams {
    pub path: PathBuf,
    pub stack_size: u32,
    pub color: ColorChoice,
    // Note: memory, fuel, verbose are parsed but not extracted (unified flags)
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: parse_path(m),
            stack_size: parse_stack_size(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            path: p.path,
            stack_size: p.stack_size,
            color: p.color.should_colorize(),
        }
    }
}

pub struct SymbolsParams {
    pub path: PathBuf,
    pub stack_size: u32,
    pub color: ColorChoice,
}

impl SymbolsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: parse_path(m),
            stack_size: parse_stack_size(m),
            color: parse_color(m),
        }
    }
}

impl From<SymbolsParams> for SymbolsArgs {
    fn from(p: SymbolsParams) -> Self {
        Self {
            path: p.path,
            stack_size: p.stack_size,
            color: p.color.should_colorize(),
        }
    }
}

fn exec_options(memory: u32, fuel: Option<u32>, verbose: u8, color: bool) -> ExecOptions {
    let verbosity = match verbose {
        0 => None,
        1 => Some(Verbosity::Default),
        2 => Some(Verbosity::Verbose),
        _ => Some(Verbosity::VeryVerbose),
    };
    ExecOptions {
        memory_size: memory as usize,
        fuel,
        verbosity,
        color,
    }
}

fn parse_path(m: &ArgMatches) -> PathBuf {
    // Required positional: clap rejects the command line without it.
    m.get_one::<PathBuf>("path").cloned().unwrap_or_default()
}

fn parse_stack_size(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("stack_size")
        .copied()
        .unwrap_or(DEFAULT_STACK_SIZE)
}

fn parse_memory(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("memory")
        .copied()
        .unwrap_or(DEFAULT_MEMORY_SIZE as u32)
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
