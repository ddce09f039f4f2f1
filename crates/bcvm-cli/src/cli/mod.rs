mod args;
mod commands;
mod dispatch;


use clap::error::ErrorKind;

pub use commands::build_cli;
pub use dispatch::{CRunParams, CompileParams, DumpParams, RunParams, SymbolsParams};

/// Color output mode for CLI commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            // Traces and diagnostics go to stderr, program output to stdout;
            // color only when neither is piped.
            ColorChoice::Auto => {
                std::io::IsTerminal::is_terminal(&std::io::stdout())
                    && std::io::IsTerminal::is_terminal(&std::io::stderr())
            }
        }
    }
}

/// Exit code for a command line clap rejected.
///
/// An unknown operation is 2; any other usage problem (missing or extra
/// arguments, bad flag values) is 1. Help and version requests succeed.
pub fn usage_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        ErrorKind::InvalidSubcommand => 2,
        _ => 1,
    }
}
