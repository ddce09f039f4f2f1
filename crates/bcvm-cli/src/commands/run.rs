use std::io::Write;
use std::path::PathBuf;

use bcvm_bytecode::Image;
use bcvm_vm::LoadError;

use super::error::CliError;
use super::run_common::{ExecOptions, execute};

pub struct RunArgs {
    pub path: PathBuf,
    pub exec: ExecOptions,
}

pub fn run(args: RunArgs, out: &mut impl Write) -> Result<(), CliError> {
    let bytes = std::fs::read(&args.path).map_err(|source| CliError::Io {
        path: args.path.clone(),
        source,
    })?;
    let image = Image::from_bytes(&bytes).map_err(LoadError::from)?;

    // Raw images carry no symbol names.
    execute(&image, &[], &args.exec, out)
}
