//! Execution engine: memory arena, heap, registers and the interpreter loop.

mod error;
mod frame;
mod heap;
mod memory;
mod trace;
mod vm;

#[cfg(test)]
mod memory_tests;

pub use error::{LoadError, RuntimeError};
pub use frame::Registers;
pub use heap::{Heap, Segment};
pub use memory::Memory;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use vm::{DEFAULT_MEMORY_SIZE, Vm, VmBuilder};
