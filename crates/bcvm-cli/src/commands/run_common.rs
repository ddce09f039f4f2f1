//! Execution shared by `run` and `cRun`.

use std::io::Write;

use bcvm_bytecode::Image;
use bcvm_core::Colors;
use bcvm_vm::{PrintTracer, Verbosity, Vm};

use super::error::CliError;

/// VM configuration from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecOptions {
    pub memory_size: usize,
    pub fuel: Option<u32>,
    /// Trace level, `None` to run untraced.
    pub verbosity: Option<Verbosity>,
    pub color: bool,
}

/// Load `image` into a fresh VM and run it, writing program output to `out`.
///
/// `labels` names function and label addresses in the trace.
pub fn execute(
    image: &Image,
    labels: &[(u32, String)],
    opts: &ExecOptions,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut builder = Vm::builder().memory_size(opts.memory_size);
    if let Some(fuel) = opts.fuel {
        builder = builder.exec_fuel(fuel);
    }
    let mut vm = builder.build();
    vm.load_image(image)?;

    let result = match opts.verbosity {
        None => vm.interpret(out),
        Some(verbosity) => {
            let mut tracer = PrintTracer::new(verbosity, Colors::new(opts.color))
                .with_labels(labels, image.static_base());
            let result = vm.interpret_with(out, &mut tracer);
            // Program output first, so a trace on a terminal follows it.
            out.flush()?;
            tracer.print();
            result
        }
    };

    // Output written before a fault is still shown.
    out.flush()?;
    result.map_err(CliError::from)
}
