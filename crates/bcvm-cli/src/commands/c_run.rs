use std::io::Write;
use std::path::PathBuf;

use super::assembly_loader::compile_file;
use super::error::CliError;
use super::run_common::{ExecOptions, execute};

pub struct CRunArgs {
    pub path: PathBuf,
    pub stack_size: u32,
    pub exec: ExecOptions,
}

pub fn run(args: CRunArgs, out: &mut impl Write) -> Result<(), CliError> {
    let compiler = compile_file(&args.path, args.stack_size, args.exec.color)?;
    let image = compiler.image().map_err(CliError::Assembler)?;
    let labels = compiler
        .symbols()
        .map_err(CliError::Assembler)?
        .code_labels();

    execute(image, &labels, &args.exec, out)
}
