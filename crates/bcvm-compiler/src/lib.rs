//! bcvm assembler: turns `.bca` assembly into executable images.
//!
//! The pipeline has two passes over the source:
//! - `resolve` - pass 1, builds the symbol table and counts instruction bytes
//! - `emit` - pass 2, encodes instructions with resolved operands
//!
//! `AssemblyCompiler` wraps both with source loading, a compile state
//! machine, and image output. Errors are reported as `Diagnostics`.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod classify;
pub mod compiler;
pub mod diagnostics;
pub mod emit;
pub mod lexer;
pub mod resolve;
pub mod source;
pub mod symbol_table;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod resolve_tests;
#[cfg(test)]
mod symbol_table_tests;

use std::path::PathBuf;

pub use compiler::{Assembly, AssemblyCompiler, AssemblyCompilerBuilder, CompState, assemble};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter};
pub use emit::{LiteralError, parse_literal};
pub use resolve::{ResolvedProgram, resolve};
pub use symbol_table::{FunctionMeta, Symbol, SymbolError, SymbolKind, SymbolTable};

/// Errors that can occur while assembling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no assembly source provided")]
    NoSource,

    #[error("previous compilation failed, provide new source first")]
    SourceFailed,

    #[error("source already compiled")]
    AlreadyCompiled,

    #[error("source not compiled")]
    NotCompiled,

    #[error("no assembly lines in {}", .0.display())]
    EmptySource(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("compilation failed: {0}")]
    Assembly(Diagnostics),
}

/// Result type for assembler operations.
pub type Result<T> = std::result::Result<T, Error>;
