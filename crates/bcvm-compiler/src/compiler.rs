//! Assembler front end: source handling, compile state and output.

use std::path::Path;

use bcvm_bytecode::{DEFAULT_STACK_SIZE, Header, Image};

use crate::diagnostics::Diagnostics;
use crate::emit::emit;
use crate::resolve::resolve;
use crate::symbol_table::SymbolTable;
use crate::{Error, Result};

/// Compilation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompState {
    /// No source loaded.
    Init,
    /// Source loaded, not yet compiled.
    Source,
    /// Image available.
    Compiled,
    /// Last compile failed; needs new source.
    Failed,
}

/// Result of a successful assembly.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub image: Image,
    pub symbols: SymbolTable,
}

/// Assemble `source` in one go: pass 1, header, pass 2.
pub fn assemble(source: &str, stack_size: u32) -> std::result::Result<Assembly, Diagnostics> {
    let program = resolve(source, stack_size)?;
    let header = Header::new(stack_size, program.symbols.static_count());
    let code = emit(source, &program)?;
    Ok(Assembly {
        image: Image::new(header, code),
        symbols: program.symbols,
    })
}

pub struct AssemblyCompilerBuilder {
    stack_size: u32,
}

impl AssemblyCompilerBuilder {
    /// Size of the stack region written into the image header.
    pub fn stack_size(mut self, bytes: u32) -> Self {
        self.stack_size = bytes;
        self
    }

    pub fn build(self) -> AssemblyCompiler {
        AssemblyCompiler {
            stack_size: self.stack_size,
            source: None,
            state: CompState::Init,
            output: None,
        }
    }
}

/// Stateful assembler: load source, compile once, then save or hand over
/// the bytecode.
pub struct AssemblyCompiler {
    stack_size: u32,
    source: Option<String>,
    state: CompState,
    output: Option<Assembly>,
}

impl Default for AssemblyCompiler {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AssemblyCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AssemblyCompilerBuilder {
        AssemblyCompilerBuilder {
            stack_size: DEFAULT_STACK_SIZE,
        }
    }

    pub fn state(&self) -> CompState {
        self.state
    }

    pub fn stack_size(&self) -> u32 {
        self.stack_size
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Replace the source. Always moves to `Source`, discarding any output.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
        self.output = None;
        self.state = CompState::Source;
    }

    /// Replace the source with individual lines.
    pub fn set_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text: Vec<String> = lines.into_iter().map(|l| l.as_ref().to_string()).collect();
        self.set_source(text.join("\n"));
    }

    /// Read source from a file. On failure the compiler is reset to `Init`.
    pub fn load_source(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(source) => {
                self.reset();
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        if text.lines().next().is_none() {
            self.reset();
            return Err(Error::EmptySource(path.to_path_buf()));
        }
        self.set_source(text);
        Ok(())
    }

    fn reset(&mut self) {
        self.source = None;
        self.output = None;
        self.state = CompState::Init;
    }

    /// Run both passes over the loaded source.
    ///
    /// Only allowed from `Source`. Other states are rejected without change.
    pub fn compile(&mut self) -> Result<()> {
        match self.state {
            CompState::Init => return Err(Error::NoSource),
            CompState::Failed => return Err(Error::SourceFailed),
            CompState::Compiled => return Err(Error::AlreadyCompiled),
            CompState::Source => {}
        }
        let Some(source) = self.source.as_deref() else {
            return Err(Error::NoSource);
        };

        match assemble(source, self.stack_size) {
            Ok(assembly) => {
                self.output = Some(assembly);
                self.state = CompState::Compiled;
                Ok(())
            }
            Err(diagnostics) => {
                self.state = CompState::Failed;
                Err(Error::Assembly(diagnostics))
            }
        }
    }

    fn output(&self) -> Result<&Assembly> {
        match (&self.output, self.state) {
            (Some(output), CompState::Compiled) => Ok(output),
            _ => Err(Error::NotCompiled),
        }
    }

    pub fn image(&self) -> Result<&Image> {
        self.output().map(|o| &o.image)
    }

    pub fn symbols(&self) -> Result<&SymbolTable> {
        self.output().map(|o| &o.symbols)
    }

    /// Encoded image: header followed by the instruction stream.
    pub fn bytecode(&self) -> Result<Vec<u8>> {
        self.image().map(Image::to_bytes)
    }

    /// Write the encoded image to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.bytecode()?;
        std::fs::write(path, bytes).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
