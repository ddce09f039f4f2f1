use std::io::Write;
use std::path::PathBuf;

use bcvm_bytecode::{ASSEMBLY_EXTENSION, Image, dump, dump_with};
use bcvm_core::Colors;
use bcvm_vm::LoadError;

use super::assembly_loader::compile_file;
use super::error::CliError;

pub struct DumpArgs {
    pub path: PathBuf,
    pub stack_size: u32,
    pub color: bool,
}

/// Disassemble an image. `.bca` sources are assembled first so functions
/// and labels can be named.
pub fn run(args: DumpArgs, out: &mut impl Write) -> Result<(), CliError> {
    let colors = Colors::new(args.color);

    let text = if args.path.extension().is_some_and(|ext| ext == ASSEMBLY_EXTENSION) {
        let compiler = compile_file(&args.path, args.stack_size, args.color)?;
        let image = compiler.image().map_err(CliError::Assembler)?;
        let symbols = compiler.symbols().map_err(CliError::Assembler)?;
        dump_with(image, &symbols.code_labels(), colors)
    } else {
        let bytes = std::fs::read(&args.path).map_err(|source| CliError::Io {
            path: args.path.clone(),
            source,
        })?;
        let image = Image::from_bytes(&bytes).map_err(LoadError::from)?;
        dump(&image, colors)
    };

    out.write_all(text.as_bytes())?;
    Ok(())
}
