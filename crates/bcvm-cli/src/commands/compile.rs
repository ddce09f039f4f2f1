use std::ffi::OsString;
use std::path::{Path, PathBuf};

use bcvm_bytecode::{ASSEMBLY_EXTENSION, EXECUTABLE_EXTENSION};

use super::assembly_loader::compile_file;
use super::error::CliError;

pub struct CompileArgs {
    pub path: PathBuf,
    pub stack_size: u32,
    pub report: bool,
    pub color: bool,
}

pub fn run(args: CompileArgs) -> Result<(), CliError> {
    let compiler = compile_file(&args.path, args.stack_size, args.color)?;
    let output = output_path(&args.path);
    compiler.save(&output).map_err(CliError::Assembler)?;

    if args.report {
        let symbols = compiler.symbols().map_err(CliError::Assembler)?;
        eprintln!(
            "{} -> {}: {} instruction bytes, {} symbols",
            args.path.display(),
            output.display(),
            symbols.instruction_count(),
            symbols.len()
        );
    }
    Ok(())
}

/// Image path for a source path: `x.bca` becomes `x.bce`, anything else
/// gets `.bce` appended.
pub fn output_path(source: &Path) -> PathBuf {
    if source.extension().is_some_and(|ext| ext == ASSEMBLY_EXTENSION) {
        return source.with_extension(EXECUTABLE_EXTENSION);
    }
    let mut name = OsString::from(source.as_os_str());
    name.push(".");
    name.push(EXECUTABLE_EXTENSION);
    PathBuf::from(name)
}
