use std::io::Write;
use std::path::PathBuf;

use super::assembly_loader::compile_file;
use super::error::CliError;

pub struct SymbolsArgs {
    pub path: PathBuf,
    pub stack_size: u32,
    pub color: bool,
}

pub fn run(args: SymbolsArgs, out: &mut impl Write) -> Result<(), CliError> {
    let compiler = compile_file(&args.path, args.stack_size, args.color)?;
    let symbols = compiler.symbols().map_err(CliError::Assembler)?;

    serde_json::to_writer_pretty(&mut *out, &symbols.listing())?;
    writeln!(out)?;
    Ok(())
}
