//! Assembly loading shared by commands that take `.bca` input.

use std::path::Path;

use bcvm_compiler::{AssemblyCompiler, Error};

use super::error::CliError;

/// Read and assemble `path`. Diagnostics are rendered against the source.
///
/// Every failure here means the program did not compile, including a
/// missing or empty source file.
pub fn compile_file(path: &Path, stack_size: u32, color: bool) -> Result<AssemblyCompiler, CliError> {
    let mut compiler = AssemblyCompiler::builder().stack_size(stack_size).build();
    compiler.load_source(path).map_err(CliError::Source)?;

    match compiler.compile() {
        Ok(()) => Ok(compiler),
        Err(Error::Assembly(diagnostics)) => {
            let source = compiler.source().unwrap_or_default();
            let path = path.display().to_string();
            let rendered = diagnostics
                .printer()
                .source(source)
                .path(&path)
                .colored(color)
                .render();
            Err(CliError::Compile(rendered))
        }
        Err(e) => Err(CliError::Source(e)),
    }
}
