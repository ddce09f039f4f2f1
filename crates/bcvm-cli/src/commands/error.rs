//! Command failures and their process exit codes.

use std::path::PathBuf;

use bcvm_vm::{LoadError, RuntimeError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Rendered assembler diagnostics.
    #[error("{0}")]
    Compile(String),

    /// The source could not be read, so nothing was compiled.
    #[error(transparent)]
    Source(bcvm_compiler::Error),

    /// Writing or reading back the compiled image failed.
    #[error(transparent)]
    Assembler(bcvm_compiler::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to serialize symbols: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Compile(_) | CliError::Source(_) => 3,
            CliError::Runtime(_) => 5,
            CliError::Assembler(_)
            | CliError::Io { .. }
            | CliError::Load(_)
            | CliError::Output(_)
            | CliError::Json(_) => 4,
        }
    }

    /// Print the error to stderr.
    pub fn report(&self) {
        match self {
            CliError::Compile(rendered) => eprintln!("{rendered}"),
            e => eprintln!("error: {e}"),
        }
    }
}
